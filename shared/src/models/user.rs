//! User models
//!
//! The tracker runs in single-user mode: one seeded account owns every
//! crop. Authentication lives in an external service and never reaches
//! this codebase.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub preference_mode: PreferenceMode,
    pub default_tray_size: String,
    pub created_at: DateTime<Utc>,
}

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    User,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        };
        write!(f, "{}", label)
    }
}

/// How much detail the UI shows
///
/// Home mode keeps the wizard simple; pro mode exposes every override.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceMode {
    #[default]
    Home,
    Pro,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_mode_default() {
        assert_eq!(PreferenceMode::default(), PreferenceMode::Home);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }
}
