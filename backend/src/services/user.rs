//! User service for the single-user deployment mode

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use shared::models::{PreferenceMode, User, UserRole, DEFAULT_TRAY_SIZE};
use shared::validation::validate_tray_size;

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Username of the account created on first startup
pub const DEFAULT_USERNAME: &str = "default";

/// User service managing the local grower account
#[derive(Clone)]
pub struct UserService {
    store: Store,
}

/// Input for updating user preferences
#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesInput {
    pub preference_mode: Option<PreferenceMode>,
    pub default_tray_size: Option<String>,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create the default account on first startup if it does not exist
    pub async fn ensure_default_user(&self) -> AppResult<User> {
        if let Some(user) = self.store.user_by_username(DEFAULT_USERNAME).await {
            return Ok(user);
        }
        let user = User {
            id: Uuid::new_v4(),
            username: DEFAULT_USERNAME.to_string(),
            email: None,
            role: UserRole::Admin,
            preference_mode: PreferenceMode::default(),
            default_tray_size: DEFAULT_TRAY_SIZE.to_string(),
            created_at: Utc::now(),
        };
        self.store.upsert_user(user.clone()).await;
        Ok(user)
    }

    /// Get the account all crops belong to
    pub async fn current_user(&self) -> AppResult<User> {
        self.store
            .primary_user()
            .await
            .ok_or_else(|| AppError::Internal("No user account present".to_string()))
    }

    /// Update preferences for the current user
    pub async fn update_preferences(&self, input: UpdatePreferencesInput) -> AppResult<User> {
        let user = self.current_user().await?;
        if let Some(size) = &input.default_tray_size {
            validate_tray_size(size).map_err(|msg| AppError::Validation {
                field: "default_tray_size".to_string(),
                message: msg.to_string(),
            })?;
        }
        self.store
            .update_user(user.id, |u| {
                if let Some(mode) = input.preference_mode {
                    u.preference_mode = mode;
                }
                if let Some(size) = input.default_tray_size {
                    u.default_tray_size = size;
                }
            })
            .await
            .ok_or_else(|| AppError::Internal("No user account present".to_string()))
    }
}
