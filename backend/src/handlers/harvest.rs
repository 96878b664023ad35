//! Harvest HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::harvest::{HarvestService, RecordHarvestInput};
use crate::AppState;

/// Record the harvest for a crop
pub async fn record_harvest(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
    Json(input): Json<RecordHarvestInput>,
) -> impl IntoResponse {
    let service = HarvestService::new(state.store.clone());

    match service.record_harvest(crop_id, input).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get the harvest record for a crop
pub async fn get_harvest(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = HarvestService::new(state.store.clone());

    match service.get_harvest(crop_id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}
