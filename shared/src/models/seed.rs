//! Seed catalog models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A seed variety in the catalog
///
/// Duration fields stay optional raw data here; normalization into a usable
/// timeline happens in [`crate::schedule::GrowthPlan`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    pub id: Uuid,
    /// Stable slug derived from the variety name, e.g. "red-radish"
    pub seed_type: String,
    pub name: String,
    pub latin_name: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub seed_count_per_gram: Option<f64>,
    /// Recommended sow density for a standard tray, in grams
    pub sow_density_grams: Option<f64>,
    pub soaking_duration_hours: Option<f64>,
    pub blackout_time_days: Option<f64>,
    pub germination_days: Option<f64>,
    pub harvest_days: Option<f64>,
    pub soaking_requirements: Option<String>,
    pub watering_requirements: Option<String>,
    pub avg_yield_grams: Option<f64>,
    pub ideal_temperature_celsius: f64,
    pub ideal_humidity_percent: f64,
    pub temperature_tolerance: f64,
    pub humidity_tolerance: f64,
    pub description: Option<String>,
    pub taste_profile: Option<String>,
    pub nutrition: Option<String>,
    pub care_instructions: Option<String>,
    pub source_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Seed {
    /// Expected yield in grams for a standard tray, 0 when unknown
    pub fn base_yield_grams(&self) -> f64 {
        self.avg_yield_grams.unwrap_or(0.0)
    }
}

/// How demanding a variety is to grow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Difficulty {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err("Unknown difficulty, expected easy, medium, or hard"),
        }
    }
}
