//! Daily log models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Actions that count as watering the crop
pub const WATERING_ACTIONS: &[&str] = &["water_morning", "water_evening"];

/// Observations and actions recorded against one day of a crop's cycle
///
/// At most one log exists per crop per day number; repeated action
/// recordings on the same day merge into the existing log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
    pub id: Uuid,
    pub crop_id: Uuid,
    pub day_number: u32,
    pub watered: bool,
    pub actions_recorded: Vec<String>,
    pub temperature_celsius: Option<f64>,
    pub humidity_percent: Option<f64>,
    /// Reference into the external photo storage service
    pub photo_url: Option<String>,
    pub notes: Option<String>,
    pub predicted_yield_grams: Option<f64>,
    pub logged_at: DateTime<Utc>,
}

impl DailyLog {
    /// Create an empty log for a day
    pub fn empty(crop_id: Uuid, day_number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            crop_id,
            day_number,
            watered: false,
            actions_recorded: Vec::new(),
            temperature_celsius: None,
            humidity_percent: None,
            photo_url: None,
            notes: None,
            predicted_yield_grams: None,
            logged_at: Utc::now(),
        }
    }

    /// Record an action, deduplicating and updating the watered flag
    pub fn apply_action(&mut self, action: &str) {
        if !self.actions_recorded.iter().any(|a| a == action) {
            self.actions_recorded.push(action.to_string());
        }
        if is_watering_action(action) {
            self.watered = true;
        }
    }

    /// Merge a new observation into the log
    ///
    /// Readings overwrite previous ones for the day; notes accumulate.
    pub fn apply_observation(
        &mut self,
        temperature_celsius: Option<f64>,
        humidity_percent: Option<f64>,
        notes: Option<&str>,
    ) {
        if temperature_celsius.is_some() {
            self.temperature_celsius = temperature_celsius;
        }
        if humidity_percent.is_some() {
            self.humidity_percent = humidity_percent;
        }
        if let Some(text) = notes {
            if !text.is_empty() {
                match &mut self.notes {
                    Some(existing) => {
                        existing.push('\n');
                        existing.push_str(text);
                    }
                    None => self.notes = Some(text.to_string()),
                }
            }
        }
    }
}

/// Whether an action name counts as watering
pub fn is_watering_action(action: &str) -> bool {
    WATERING_ACTIONS.contains(&action)
}
