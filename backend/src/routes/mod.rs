//! Route definitions for the Microgreens Cultivation Tracker

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Seed catalog
        .nest("/seeds", seed_routes())
        // Crop lifecycle, logging, and predictions
        .nest("/crops", crop_routes())
        // Schedule preview for the planting wizard
        .route("/schedule/preview", get(handlers::preview_schedule))
        // Dashboard statistics
        .route("/stats", get(handlers::get_stats))
        // Local user account
        .nest("/users", user_routes())
}

/// Seed catalog routes
fn seed_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_seeds))
        .route("/:seed_id", get(handlers::get_seed))
}

/// Crop management routes
fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops).post(handlers::create_crop))
        .route(
            "/:crop_id",
            get(handlers::get_crop).delete(handlers::delete_crop),
        )
        .route("/:crop_id/fail", post(handlers::fail_crop))
        .route("/:crop_id/schedule", get(handlers::get_crop_schedule))
        .route("/:crop_id/status", get(handlers::get_crop_status))
        .route("/:crop_id/actions", post(handlers::record_action))
        .route(
            "/:crop_id/logs",
            get(handlers::list_logs).post(handlers::create_log),
        )
        .route(
            "/:crop_id/harvest",
            get(handlers::get_harvest).post(handlers::record_harvest),
        )
        .route("/:crop_id/prediction", get(handlers::get_prediction))
        .route("/:crop_id/conditions", get(handlers::get_conditions))
        .route("/:crop_id/suggestion", get(handlers::get_suggestion))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::get_current_user))
        .route("/me/preferences", put(handlers::update_preferences))
}
