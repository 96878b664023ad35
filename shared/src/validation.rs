//! Validation utilities for the Microgreens Cultivation Tracker
//!
//! Includes the catalog parsing rules used when importing seed datasets,
//! where durations often arrive as ranges like "8-12 days".

// ============================================================================
// Catalog Parsing
// ============================================================================

/// Average of every number found in a text field
///
/// Catalog data writes durations as single values ("10 days") or ranges
/// ("8-12 days"); a range averages to its midpoint. Returns None when the
/// text contains no numbers.
pub fn parse_range_avg(text: &str) -> Option<f64> {
    let mut numbers = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c.is_ascii_digit() || (c == '.' && !current.is_empty() && !current.contains('.')) {
            current.push(c);
        } else if !current.is_empty() {
            if let Ok(value) = current.parse::<f64>() {
                numbers.push(value);
            }
            current.clear();
        }
    }
    if !current.is_empty() {
        if let Ok(value) = current.parse::<f64>() {
            numbers.push(value);
        }
    }

    if numbers.is_empty() {
        None
    } else {
        Some(numbers.iter().sum::<f64>() / numbers.len() as f64)
    }
}

/// Soaking duration in hours from a free-text soaking requirement
///
/// Only text that actually mentions hours yields a duration; anything else
/// ("No soaking required", "Mist before sowing") means no soak.
pub fn parse_soak_hours(text: &str) -> Option<f64> {
    let lowered = text.to_lowercase();
    if lowered.contains("hour") {
        parse_range_avg(&lowered)
    } else {
        None
    }
}

/// Stable catalog slug for a variety name, e.g. "Red Radish" -> "red-radish"
pub fn seed_slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

// ============================================================================
// Reading Validations
// ============================================================================

/// Validate a temperature reading is physically plausible for indoor growing
pub fn validate_temperature(celsius: f64) -> Result<(), &'static str> {
    if !(-10.0..=60.0).contains(&celsius) {
        return Err("Temperature reading must be between -10 and 60 C");
    }
    Ok(())
}

/// Validate a relative humidity reading
pub fn validate_humidity(percent: f64) -> Result<(), &'static str> {
    if !(0.0..=100.0).contains(&percent) {
        return Err("Humidity must be between 0 and 100%");
    }
    Ok(())
}

/// Validate a harvest or yield weight
pub fn validate_weight_grams(grams: f64) -> Result<(), &'static str> {
    if !(grams > 0.0) {
        return Err("Weight must be greater than 0");
    }
    if grams > 100_000.0 {
        return Err("Weight is implausibly large for a tray harvest");
    }
    Ok(())
}

// ============================================================================
// Input Validations
// ============================================================================

/// Validate a manual log's day number against the crop's cycle length
pub fn validate_log_day(day_number: u32, growth_days: u32) -> Result<(), &'static str> {
    if day_number == 0 {
        return Err("Day number must be at least 1");
    }
    if day_number > growth_days {
        return Err("Day number is past the end of the grow cycle");
    }
    Ok(())
}

/// Validate a tray size label
pub fn validate_tray_size(tray_size: &str) -> Result<(), &'static str> {
    let trimmed = tray_size.trim();
    if trimmed.is_empty() {
        return Err("Tray size cannot be empty");
    }
    if trimmed.len() > 50 {
        return Err("Tray size must be at most 50 characters");
    }
    Ok(())
}

/// Validate an action name (lowercase tokens like "water_morning")
pub fn validate_action_name(action: &str) -> Result<(), &'static str> {
    if action.is_empty() {
        return Err("Action name cannot be empty");
    }
    if action.len() > 64 {
        return Err("Action name must be at most 64 characters");
    }
    if !action
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err("Action names use lowercase letters, digits, and underscores");
    }
    Ok(())
}

/// Validate a per-crop soak override
pub fn validate_soak_override(hours: f64) -> Result<(), &'static str> {
    if !(0.0..=72.0).contains(&hours) {
        return Err("Soak duration must be between 0 and 72 hours");
    }
    Ok(())
}

/// Validate a per-crop blackout override
pub fn validate_blackout_override(days: f64) -> Result<(), &'static str> {
    if !(0.0..=30.0).contains(&days) {
        return Err("Blackout duration must be between 0 and 30 days");
    }
    Ok(())
}

/// Validate a watering frequency override
pub fn validate_watering_frequency(per_day: u32) -> Result<(), &'static str> {
    if !(1..=8).contains(&per_day) {
        return Err("Watering frequency must be between 1 and 8 times per day");
    }
    Ok(())
}

/// Validate a reminder time in HH:MM form
pub fn validate_time_of_day(time: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() != 2 || parts[0].len() != 2 || parts[1].len() != 2 {
        return Err("Times must be in HH:MM form");
    }

    let hours: u32 = parts[0].parse().map_err(|_| "Times must be in HH:MM form")?;
    let minutes: u32 = parts[1].parse().map_err(|_| "Times must be in HH:MM form")?;

    if hours > 23 || minutes > 59 {
        return Err("Times must be a valid time of day");
    }
    Ok(())
}
