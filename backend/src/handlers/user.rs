//! User HTTP handlers for single-user mode

use axum::{extract::State, Json};

use shared::models::User;

use crate::error::AppResult;
use crate::services::user::{UpdatePreferencesInput, UserService};
use crate::AppState;

/// Get the current user
pub async fn get_current_user(State(state): State<AppState>) -> AppResult<Json<User>> {
    let service = UserService::new(state.store.clone());
    let user = service.current_user().await?;
    Ok(Json(user))
}

/// Update preferences for the current user
pub async fn update_preferences(
    State(state): State<AppState>,
    Json(input): Json<UpdatePreferencesInput>,
) -> AppResult<Json<User>> {
    let service = UserService::new(state.store.clone());
    let user = service.update_preferences(input).await?;
    Ok(Json(user))
}
