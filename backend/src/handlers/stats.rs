//! Dashboard statistics HTTP handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::stats::{DashboardStats, StatsService};
use crate::AppState;

/// Get dashboard statistics
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let service = StatsService::new(state.store.clone());
    let stats = service.dashboard().await?;
    Ok(Json(stats))
}
