//! Crop lifecycle HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::models::CropStatus;

use crate::services::crop::{CreateCropInput, CropService};
use crate::services::user::UserService;
use crate::AppState;

/// Query parameters for listing crops
#[derive(Debug, Deserialize)]
pub struct ListCropsQuery {
    pub status: Option<CropStatus>,
}

/// Start a new crop
pub async fn create_crop(
    State(state): State<AppState>,
    Json(input): Json<CreateCropInput>,
) -> impl IntoResponse {
    // All crops belong to the local account in single-user mode
    let user = match UserService::new(state.store.clone()).current_user().await {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    let service = CropService::new(state.store.clone());

    match service.create_crop(user.id, input).await {
        Ok(crop) => (StatusCode::CREATED, Json(crop)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List crops, optionally filtered by status
pub async fn list_crops(
    State(state): State<AppState>,
    Query(query): Query<ListCropsQuery>,
) -> impl IntoResponse {
    let service = CropService::new(state.store.clone());

    match service.list_crops(query.status).await {
        Ok(crops) => (StatusCode::OK, Json(serde_json::json!({ "crops": crops }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a crop with its seed and logs
pub async fn get_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CropService::new(state.store.clone());

    match service.get_crop(crop_id).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a crop and everything recorded for it
pub async fn delete_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CropService::new(state.store.clone());

    match service.delete_crop(crop_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Mark a crop as failed
pub async fn fail_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CropService::new(state.store.clone());

    match service.mark_failed(crop_id).await {
        Ok(crop) => (StatusCode::OK, Json(crop)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get the day-by-day schedule for a crop
pub async fn get_crop_schedule(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CropService::new(state.store.clone());

    match service.schedule_for_crop(crop_id).await {
        Ok(schedule) => {
            (StatusCode::OK, Json(serde_json::json!({ "schedule": schedule }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get the current day, phase, and progress for a crop
pub async fn get_crop_status(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CropService::new(state.store.clone());

    match service.status_for_crop(crop_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => e.into_response(),
    }
}
