//! WebAssembly module for the Microgreens Cultivation Tracker
//!
//! Provides client-side computation for:
//! - Growth schedule generation
//! - Current day and progress calculations
//! - Phase lookups for calendar rendering
//! - Offline yield predictions

use chrono::{DateTime, FixedOffset};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::schedule::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Build the day-by-day schedule for the given durations
#[wasm_bindgen]
pub fn growth_schedule_json(
    growth_days: Option<f64>,
    blackout_days: Option<f64>,
    soak_hours: Option<f64>,
) -> Result<String, JsValue> {
    let plan = GrowthPlan::new(growth_days, blackout_days, soak_hours);
    serde_json::to_string(&plan.schedule())
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize schedule: {}", e)))
}

/// Current one-based day of a cycle, 0 before the start time
///
/// Timestamps are RFC 3339 strings; days are calendar days in the
/// timestamp's own offset, so growers see the day tick over at their
/// local midnight.
#[wasm_bindgen]
pub fn current_growth_day(
    start_rfc3339: &str,
    now_rfc3339: &str,
    growth_days: u32,
) -> Result<u32, JsValue> {
    let start = parse_timestamp(start_rfc3339)?;
    let now = parse_timestamp(now_rfc3339)?;
    Ok(current_day_for(&start, &now, growth_days))
}

/// Progress through a cycle as a whole percentage
#[wasm_bindgen]
pub fn growth_progress_percent(current_day: u32, growth_days: u32) -> u8 {
    progress_percent(current_day, growth_days)
}

/// Phase label for a day of the cycle
#[wasm_bindgen]
pub fn phase_for_growth_day(
    growth_days: Option<f64>,
    blackout_days: Option<f64>,
    day: u32,
) -> String {
    let plan = GrowthPlan::new(growth_days, blackout_days, None);
    plan.phase_for_day(day).label().to_string()
}

/// Current day, phase, and progress for a crop
#[wasm_bindgen]
pub fn growth_status_json(
    start_rfc3339: &str,
    now_rfc3339: &str,
    growth_days: Option<f64>,
    blackout_days: Option<f64>,
    soak_hours: Option<f64>,
) -> Result<String, JsValue> {
    let start = parse_timestamp(start_rfc3339)?;
    let now = parse_timestamp(now_rfc3339)?;
    let plan = GrowthPlan::new(growth_days, blackout_days, soak_hours);
    serde_json::to_string(&plan.status_at(&start, &now))
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize status: {}", e)))
}

/// Run the yield prediction model offline
#[wasm_bindgen]
pub fn predict_yield_json(
    seed_json: &str,
    plan_json: &str,
    logs_json: &str,
) -> Result<String, JsValue> {
    let seed: Seed = serde_json::from_str(seed_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid seed JSON: {}", e)))?;
    let plan: GrowthPlan = serde_json::from_str(plan_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid plan JSON: {}", e)))?;
    let logs: Vec<DailyLog> = serde_json::from_str(logs_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid logs JSON: {}", e)))?;

    let prediction = predict_yield(&seed, &plan, &logs);
    serde_json::to_string(&prediction)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize prediction: {}", e)))
}

/// Validate a temperature reading before submitting a log
#[wasm_bindgen]
pub fn is_valid_temperature(celsius: f64) -> bool {
    validate_temperature(celsius).is_ok()
}

/// Validate a humidity reading before submitting a log
#[wasm_bindgen]
pub fn is_valid_humidity(percent: f64) -> bool {
    validate_humidity(percent).is_ok()
}

fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, JsValue> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid timestamp {}: {}", value, e)))
}
