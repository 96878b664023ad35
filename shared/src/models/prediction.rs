//! Yield prediction models
//!
//! A deterministic heuristic over a crop's daily logs: condition deviations
//! and missed waterings accumulate into a gram penalty against the seed's
//! base yield. Kept in the shared crate so the backend and the browser
//! produce identical numbers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{DailyLog, Seed};
use crate::schedule::GrowthPlan;

/// Penalty in grams for a skipped watering during the light phase
const MISSED_WATERING_PENALTY: f64 = 25.0;

/// Penalty in grams for a skipped watering during blackout
const MISSED_WATERING_PENALTY_BLACKOUT: f64 = 15.0;

/// A crop never drops below this fraction of its base yield
const MIN_YIELD_FRACTION: f64 = 0.3;

/// Yield prediction for a crop in progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldPrediction {
    pub predicted_yield_grams: f64,
    pub base_yield_grams: f64,
    /// Predicted over base yield, 0-1
    pub yield_efficiency: f64,
    pub potential_loss_grams: f64,
    pub suggestions: Vec<Suggestion>,
    pub status: ConditionStatus,
}

/// An actionable observation about the crop's conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_loss: Option<String>,
}

/// How urgent a suggestion is
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Success,
}

/// Overall condition class derived from yield efficiency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConditionStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ConditionStatus {
    pub fn from_efficiency(efficiency: f64) -> Self {
        if efficiency >= 0.95 {
            ConditionStatus::Excellent
        } else if efficiency >= 0.85 {
            ConditionStatus::Good
        } else if efficiency >= 0.70 {
            ConditionStatus::Fair
        } else {
            ConditionStatus::Poor
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConditionStatus::Excellent => "excellent",
            ConditionStatus::Good => "good",
            ConditionStatus::Fair => "fair",
            ConditionStatus::Poor => "poor",
        };
        write!(f, "{}", label)
    }
}

/// Aggregated growing conditions over a crop's logged days
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthFeatures {
    pub avg_temperature_celsius: f64,
    pub avg_humidity_percent: f64,
    /// Fraction of logged days that were watered, 0-1
    pub watering_consistency: f64,
    /// Mean absolute deviation from the ideal temperature
    pub temperature_deviation: f64,
    /// Mean absolute deviation from the ideal humidity
    pub humidity_deviation: f64,
    /// Days more than 3 degrees off the ideal temperature
    pub temperature_stress_days: u32,
    /// Days more than 15 points off the ideal humidity
    pub humidity_stress_days: u32,
    pub missed_watering_days: u32,
    pub max_temperature_celsius: Option<f64>,
    pub min_temperature_celsius: Option<f64>,
    pub max_humidity_percent: Option<f64>,
    pub min_humidity_percent: Option<f64>,
}

impl GrowthFeatures {
    /// Aggregate features from a crop's logs
    ///
    /// Days without a reading contribute the ideal value, so sparse logging
    /// is treated as neutral rather than as stress.
    pub fn from_logs(logs: &[DailyLog], ideal_temperature: f64, ideal_humidity: f64) -> Self {
        let total_days = logs.len() as f64;

        let temperatures: Vec<f64> = logs
            .iter()
            .map(|log| log.temperature_celsius.unwrap_or(ideal_temperature))
            .collect();
        let humidities: Vec<f64> = logs
            .iter()
            .map(|log| log.humidity_percent.unwrap_or(ideal_humidity))
            .collect();

        let avg_temperature = mean(&temperatures).unwrap_or(ideal_temperature);
        let avg_humidity = mean(&humidities).unwrap_or(ideal_humidity);

        let temp_deviations: Vec<f64> = temperatures
            .iter()
            .map(|t| (t - ideal_temperature).abs())
            .collect();
        let humidity_deviations: Vec<f64> = humidities
            .iter()
            .map(|h| (h - ideal_humidity).abs())
            .collect();

        let watered_days = logs.iter().filter(|log| log.watered).count() as f64;
        let missed_watering_days = logs.iter().filter(|log| !log.watered).count() as u32;

        let recorded_temps: Vec<f64> =
            logs.iter().filter_map(|log| log.temperature_celsius).collect();
        let recorded_humidities: Vec<f64> =
            logs.iter().filter_map(|log| log.humidity_percent).collect();

        Self {
            avg_temperature_celsius: avg_temperature,
            avg_humidity_percent: avg_humidity,
            watering_consistency: if total_days > 0.0 {
                watered_days / total_days
            } else {
                1.0
            },
            temperature_deviation: mean(&temp_deviations).unwrap_or(0.0),
            humidity_deviation: mean(&humidity_deviations).unwrap_or(0.0),
            temperature_stress_days: temp_deviations.iter().filter(|d| **d > 3.0).count() as u32,
            humidity_stress_days: humidity_deviations.iter().filter(|d| **d > 15.0).count() as u32,
            missed_watering_days,
            max_temperature_celsius: fold_extreme(&recorded_temps, f64::max),
            min_temperature_celsius: fold_extreme(&recorded_temps, f64::min),
            max_humidity_percent: fold_extreme(&recorded_humidities, f64::max),
            min_humidity_percent: fold_extreme(&recorded_humidities, f64::min),
        }
    }
}

/// Predict the yield of a crop from its logs so far
///
/// An unlogged crop predicts the full base yield. Each logged day adds
/// penalties for deviations beyond the seed's tolerances and for skipped
/// waterings, with a compounding term for repeated stress, floored at 30%
/// of the base yield.
pub fn predict_yield(seed: &Seed, plan: &GrowthPlan, logs: &[DailyLog]) -> YieldPrediction {
    let base_yield = seed.base_yield_grams();

    if logs.is_empty() {
        return YieldPrediction {
            predicted_yield_grams: base_yield,
            base_yield_grams: base_yield,
            yield_efficiency: 1.0,
            potential_loss_grams: 0.0,
            suggestions: vec![Suggestion {
                severity: Severity::Success,
                title: "Ready to Start!".to_string(),
                message: "No logs yet. Water on schedule and keep conditions near the ideal to hit the full yield.".to_string(),
                potential_loss: None,
            }],
            status: ConditionStatus::Excellent,
        };
    }

    let mut ordered: Vec<&DailyLog> = logs.iter().collect();
    ordered.sort_by_key(|log| log.day_number);

    let penalty = yield_penalty(seed, plan, &ordered);
    let predicted = (base_yield - penalty).max(base_yield * MIN_YIELD_FRACTION);

    let efficiency = if base_yield > 0.0 {
        (predicted / base_yield).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let suggestions = match ordered.last() {
        Some(&latest) => suggestions_for(seed, latest),
        None => Vec::new(),
    };

    YieldPrediction {
        predicted_yield_grams: predicted,
        base_yield_grams: base_yield,
        yield_efficiency: efficiency,
        potential_loss_grams: (base_yield - predicted).max(0.0),
        suggestions,
        status: ConditionStatus::from_efficiency(efficiency),
    }
}

/// Cumulative gram penalty over the logged days
fn yield_penalty(seed: &Seed, plan: &GrowthPlan, ordered_logs: &[&DailyLog]) -> f64 {
    let mut penalty = 0.0;

    for (i, log) in ordered_logs.iter().enumerate() {
        let temperature = log
            .temperature_celsius
            .unwrap_or(seed.ideal_temperature_celsius);
        let humidity = log.humidity_percent.unwrap_or(seed.ideal_humidity_percent);

        let temp_deviation = (temperature - seed.ideal_temperature_celsius).abs();
        let humidity_deviation = (humidity - seed.ideal_humidity_percent).abs();

        if temp_deviation > seed.temperature_tolerance {
            penalty += (temp_deviation - seed.temperature_tolerance).powf(1.5) * 2.0;
        }
        if humidity_deviation > seed.humidity_tolerance {
            penalty += (humidity_deviation - seed.humidity_tolerance) * 0.5;
        }
        if !log.watered {
            penalty += if log.day_number > plan.blackout_days {
                MISSED_WATERING_PENALTY
            } else {
                MISSED_WATERING_PENALTY_BLACKOUT
            };
        }

        // Consecutive problems compound: later stress hurts more
        if i > 0 && (temp_deviation > seed.temperature_tolerance || !log.watered) {
            penalty += i as f64 * 0.5;
        }
    }

    penalty
}

/// Actionable suggestions from the most recent log
fn suggestions_for(seed: &Seed, latest: &DailyLog) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let ideal_temp = seed.ideal_temperature_celsius;

    if let Some(temp) = latest.temperature_celsius {
        if temp > ideal_temp + 4.0 {
            suggestions.push(Suggestion {
                severity: Severity::Critical,
                title: "Heat Stress Detected".to_string(),
                message: format!(
                    "Temperature is {:.1} C but this variety wants {:.1} C. Move the tray somewhere cooler or improve airflow.",
                    temp, ideal_temp
                ),
                potential_loss: Some(format!("{:.0}g", (temp - ideal_temp) * 8.0)),
            });
        } else if temp > ideal_temp + 2.0 {
            suggestions.push(Suggestion {
                severity: Severity::Warning,
                title: "Above Ideal Temperature".to_string(),
                message: format!(
                    "Running {:.1} C over the ideal. Growth speeds up but so does mold risk.",
                    temp - ideal_temp
                ),
                potential_loss: None,
            });
        } else if temp < ideal_temp - 4.0 {
            suggestions.push(Suggestion {
                severity: Severity::Warning,
                title: "Temperature Too Low".to_string(),
                message: format!(
                    "Temperature is {:.1} C, well under the ideal {:.1} C. Expect slower growth.",
                    temp, ideal_temp
                ),
                potential_loss: None,
            });
        }
    }

    if let Some(humidity) = latest.humidity_percent {
        if humidity < 35.0 {
            suggestions.push(Suggestion {
                severity: Severity::Warning,
                title: "Air Too Dry".to_string(),
                message: format!(
                    "Humidity is down to {:.0}%. Mist the tray or cover it to hold moisture.",
                    humidity
                ),
                potential_loss: None,
            });
        } else if humidity > 70.0 {
            suggestions.push(Suggestion {
                severity: Severity::Warning,
                title: "High Humidity".to_string(),
                message: format!(
                    "Humidity is {:.0}%, which invites mold. Increase airflow around the tray.",
                    humidity
                ),
                potential_loss: None,
            });
        }
    }

    if !latest.watered {
        suggestions.push(Suggestion {
            severity: Severity::Critical,
            title: "Missed Watering!".to_string(),
            message: "No watering recorded for the latest day. Water now to limit the damage."
                .to_string(),
            potential_loss: Some("25-40g".to_string()),
        });
    }

    if suggestions.is_empty() {
        suggestions.push(Suggestion {
            severity: Severity::Success,
            title: "Perfect Conditions!".to_string(),
            message: "Everything is on track. Keep doing what you are doing.".to_string(),
            potential_loss: None,
        });
    }

    suggestions
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn fold_extreme(values: &[f64], pick: fn(f64, f64) -> f64) -> Option<f64> {
    values.iter().copied().reduce(pick)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn test_seed() -> Seed {
        Seed {
            id: Uuid::new_v4(),
            seed_type: "sunflower".to_string(),
            name: "Sunflower".to_string(),
            latin_name: None,
            difficulty: None,
            seed_count_per_gram: None,
            sow_density_grams: None,
            soaking_duration_hours: Some(10.0),
            blackout_time_days: Some(3.0),
            germination_days: None,
            harvest_days: Some(10.0),
            soaking_requirements: None,
            watering_requirements: None,
            avg_yield_grams: Some(600.0),
            ideal_temperature_celsius: 22.5,
            ideal_humidity_percent: 50.0,
            temperature_tolerance: 2.5,
            humidity_tolerance: 10.0,
            description: None,
            taste_profile: None,
            nutrition: None,
            care_instructions: None,
            source_url: None,
            created_at: Utc::now(),
        }
    }

    fn log_for_day(day: u32, watered: bool, temp: Option<f64>, humidity: Option<f64>) -> DailyLog {
        let mut log = DailyLog::empty(Uuid::new_v4(), day);
        log.watered = watered;
        log.temperature_celsius = temp;
        log.humidity_percent = humidity;
        log
    }

    #[test]
    fn test_no_logs_predicts_base_yield() {
        let seed = test_seed();
        let plan = GrowthPlan::from_seed(&seed);
        let prediction = predict_yield(&seed, &plan, &[]);

        assert_eq!(prediction.predicted_yield_grams, 600.0);
        assert_eq!(prediction.yield_efficiency, 1.0);
        assert_eq!(prediction.status, ConditionStatus::Excellent);
        assert_eq!(prediction.suggestions.len(), 1);
        assert_eq!(prediction.suggestions[0].severity, Severity::Success);
    }

    #[test]
    fn test_ideal_logs_keep_full_yield() {
        let seed = test_seed();
        let plan = GrowthPlan::from_seed(&seed);
        let logs: Vec<DailyLog> = (1..=5)
            .map(|day| log_for_day(day, true, Some(22.5), Some(50.0)))
            .collect();

        let prediction = predict_yield(&seed, &plan, &logs);
        assert_eq!(prediction.predicted_yield_grams, 600.0);
        assert_eq!(prediction.status, ConditionStatus::Excellent);
    }

    #[test]
    fn test_missed_watering_penalties_by_phase() {
        let seed = test_seed();
        let plan = GrowthPlan::from_seed(&seed);

        // Day 2 is blackout (15g), day 5 is light (25g, plus 0.5 compounding
        // as the second problem day)
        let logs = vec![
            log_for_day(2, false, Some(22.5), Some(50.0)),
            log_for_day(5, false, Some(22.5), Some(50.0)),
        ];

        let prediction = predict_yield(&seed, &plan, &logs);
        let expected = 600.0 - (15.0 + 25.0 + 0.5);
        assert!((prediction.predicted_yield_grams - expected).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_penalty_beyond_tolerance() {
        let seed = test_seed();
        let plan = GrowthPlan::from_seed(&seed);

        // Deviation 4.5, tolerance 2.5: penalty = 2^1.5 * 2
        let logs = vec![log_for_day(4, true, Some(27.0), Some(50.0))];
        let prediction = predict_yield(&seed, &plan, &logs);

        let expected = 600.0 - 2.0_f64.powf(1.5) * 2.0;
        assert!((prediction.predicted_yield_grams - expected).abs() < 1e-9);
    }

    #[test]
    fn test_prediction_floors_at_thirty_percent() {
        let seed = test_seed();
        let plan = GrowthPlan::from_seed(&seed);
        let logs: Vec<DailyLog> = (1..=10)
            .map(|day| log_for_day(day, false, Some(40.0), Some(90.0)))
            .collect();

        let prediction = predict_yield(&seed, &plan, &logs);
        assert_eq!(prediction.predicted_yield_grams, 180.0);
        assert_eq!(prediction.status, ConditionStatus::Poor);
    }

    #[test]
    fn test_heat_stress_suggestion() {
        let seed = test_seed();
        let plan = GrowthPlan::from_seed(&seed);
        let logs = vec![log_for_day(3, true, Some(28.0), Some(50.0))];

        let prediction = predict_yield(&seed, &plan, &logs);
        let heat = prediction
            .suggestions
            .iter()
            .find(|s| s.title == "Heat Stress Detected")
            .expect("heat stress suggestion");
        assert_eq!(heat.severity, Severity::Critical);
        assert_eq!(heat.potential_loss.as_deref(), Some("44g"));
    }

    #[test]
    fn test_missed_watering_suggestion() {
        let seed = test_seed();
        let plan = GrowthPlan::from_seed(&seed);
        let logs = vec![log_for_day(3, false, Some(22.5), Some(50.0))];

        let prediction = predict_yield(&seed, &plan, &logs);
        assert!(prediction
            .suggestions
            .iter()
            .any(|s| s.title == "Missed Watering!" && s.severity == Severity::Critical));
    }

    #[test]
    fn test_perfect_conditions_suggestion() {
        let seed = test_seed();
        let plan = GrowthPlan::from_seed(&seed);
        let logs = vec![log_for_day(3, true, Some(22.5), Some(50.0))];

        let prediction = predict_yield(&seed, &plan, &logs);
        assert_eq!(prediction.suggestions.len(), 1);
        assert_eq!(prediction.suggestions[0].title, "Perfect Conditions!");
    }

    #[test]
    fn test_status_classes() {
        assert_eq!(
            ConditionStatus::from_efficiency(0.97),
            ConditionStatus::Excellent
        );
        assert_eq!(ConditionStatus::from_efficiency(0.90), ConditionStatus::Good);
        assert_eq!(ConditionStatus::from_efficiency(0.75), ConditionStatus::Fair);
        assert_eq!(ConditionStatus::from_efficiency(0.50), ConditionStatus::Poor);
    }

    #[test]
    fn test_features_aggregate() {
        let logs = vec![
            log_for_day(1, true, Some(22.0), Some(50.0)),
            log_for_day(2, false, Some(28.0), Some(70.0)),
            log_for_day(3, true, None, None),
        ];

        let features = GrowthFeatures::from_logs(&logs, 22.0, 50.0);
        assert!((features.watering_consistency - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(features.missed_watering_days, 1);
        assert_eq!(features.temperature_stress_days, 1);
        assert_eq!(features.humidity_stress_days, 1);
        assert_eq!(features.max_temperature_celsius, Some(28.0));
        assert_eq!(features.min_temperature_celsius, Some(22.0));
    }
}
