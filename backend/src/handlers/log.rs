//! Daily log HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::log::{CreateLogInput, LogService, RecordActionInput};
use crate::AppState;

/// Record an action for today
pub async fn record_action(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
    Json(input): Json<RecordActionInput>,
) -> impl IntoResponse {
    let service = LogService::new(state.store.clone());

    match service.record_action(crop_id, input).await {
        Ok(log) => (StatusCode::OK, Json(log)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a complete log for an explicit day
pub async fn create_log(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
    Json(input): Json<CreateLogInput>,
) -> impl IntoResponse {
    let service = LogService::new(state.store.clone());

    match service.create_log(crop_id, input).await {
        Ok(log) => (StatusCode::CREATED, Json(log)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List all logs for a crop
pub async fn list_logs(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = LogService::new(state.store.clone());

    match service.list_logs(crop_id).await {
        Ok(logs) => (StatusCode::OK, Json(serde_json::json!({ "logs": logs }))).into_response(),
        Err(e) => e.into_response(),
    }
}
