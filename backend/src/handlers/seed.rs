//! Seed catalog HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::seed::SeedService;
use crate::AppState;

/// List all seeds in the catalog
pub async fn list_seeds(State(state): State<AppState>) -> impl IntoResponse {
    let service = SeedService::new(state.store.clone());

    match service.list_seeds().await {
        Ok(seeds) => (StatusCode::OK, Json(serde_json::json!({ "seeds": seeds }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a single seed
pub async fn get_seed(
    State(state): State<AppState>,
    Path(seed_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = SeedService::new(state.store.clone());

    match service.get_seed(seed_id).await {
        Ok(seed) => (StatusCode::OK, Json(seed)).into_response(),
        Err(e) => e.into_response(),
    }
}
