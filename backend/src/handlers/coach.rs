//! Growth coach HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::coach::CoachService;
use crate::AppState;

/// Get the daily coaching tip for a crop
pub async fn get_suggestion(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CoachService::from_config(state.store.clone(), &state.config.coach);

    match service.daily_tip(crop_id).await {
        Ok(tip) => (StatusCode::OK, Json(tip)).into_response(),
        Err(e) => e.into_response(),
    }
}
