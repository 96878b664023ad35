//! Schedule preview HTTP handlers

use axum::{
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use shared::schedule::GrowthPlan;

/// Query parameters for previewing a schedule
#[derive(Debug, Deserialize)]
pub struct SchedulePreviewQuery {
    pub growth_days: Option<f64>,
    pub blackout_days: Option<f64>,
    pub soak_hours: Option<f64>,
}

/// Preview the schedule for arbitrary durations, before any crop exists
///
/// Backs the planting wizard, so out-of-range values are normalized the
/// same way they would be for a real crop instead of rejected.
pub async fn preview_schedule(Query(query): Query<SchedulePreviewQuery>) -> impl IntoResponse {
    let plan = GrowthPlan::new(query.growth_days, query.blackout_days, query.soak_hours);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "plan": plan,
            "schedule": plan.schedule(),
        })),
    )
        .into_response()
}
