//! Harvest models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The outcome of a finished crop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestRecord {
    pub id: Uuid,
    pub crop_id: Uuid,
    pub actual_weight_grams: f64,
    pub predicted_weight_grams: f64,
    /// How close the prediction was to the actual weight, 0-100
    pub accuracy_percent: f64,
    pub notes: Option<String>,
    pub harvested_at: DateTime<Utc>,
}

impl HarvestRecord {
    /// Prediction accuracy as a percentage, clamped to 0-100
    ///
    /// Defined as 100 minus the relative error. A zero or missing
    /// prediction scores 0 rather than dividing by zero.
    pub fn accuracy_for(actual_grams: f64, predicted_grams: f64) -> f64 {
        if predicted_grams <= 0.0 {
            return 0.0;
        }
        let relative_error = (actual_grams - predicted_grams).abs() / predicted_grams * 100.0;
        (100.0 - relative_error).clamp(0.0, 100.0)
    }
}
