//! Yield prediction HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::prediction::PredictionService;
use crate::AppState;

/// Predict the final yield for a crop
pub async fn get_prediction(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = PredictionService::new(state.store.clone());

    match service.predict_for_crop(crop_id).await {
        Ok(prediction) => (StatusCode::OK, Json(prediction)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Summarize the growing conditions recorded for a crop
pub async fn get_conditions(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = PredictionService::new(state.store.clone());

    match service.conditions_for_crop(crop_id).await {
        Ok(conditions) => (StatusCode::OK, Json(conditions)).into_response(),
        Err(e) => e.into_response(),
    }
}
