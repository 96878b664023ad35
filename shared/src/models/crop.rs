//! Crop models

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tray size assumed when the grower does not pick one
pub const DEFAULT_TRAY_SIZE: &str = "10x20 inch";

/// A tracked grow cycle of one seed variety in one tray
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crop {
    pub id: Uuid,
    pub user_id: Uuid,
    pub seed_id: Uuid,
    /// Moment the cycle began: soak start, or sowing when there is no soak
    pub start_datetime: DateTime<Utc>,
    pub harvested_at: Option<DateTime<Utc>>,
    pub tray_size: String,
    pub status: CropStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_settings: Option<CustomSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_settings: Option<NotificationSettings>,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle state of a crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CropStatus {
    Active,
    Harvested,
    Failed,
}

impl CropStatus {
    /// Harvested and failed crops cannot change state again
    pub fn is_terminal(&self) -> bool {
        matches!(self, CropStatus::Harvested | CropStatus::Failed)
    }
}

impl fmt::Display for CropStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CropStatus::Active => "active",
            CropStatus::Harvested => "harvested",
            CropStatus::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// Per-crop overrides of the seed's default growing parameters
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CustomSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soak_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blackout_days: Option<f64>,
    /// Waterings per day the grower committed to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watering_frequency: Option<u32>,
}

/// Reminder preferences for a crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationSettings {
    pub enabled: bool,
    /// Times of day to remind, as "HH:MM" strings
    pub times: Vec<String>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            times: vec!["08:00".to_string(), "18:00".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!CropStatus::Active.is_terminal());
        assert!(CropStatus::Harvested.is_terminal());
        assert!(CropStatus::Failed.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&CropStatus::Harvested).unwrap(),
            "\"harvested\""
        );
    }
}
