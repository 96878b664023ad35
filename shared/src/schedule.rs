//! Grow-cycle schedule calculations
//!
//! A crop's timeline is derived on demand from its seed parameters and any
//! per-crop overrides. Nothing here is persisted: callers build a
//! [`GrowthPlan`] and read schedules, day numbers, and phases from it.
//! Backend handlers and the WASM bindings share this one implementation.

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::models::{CustomSettings, Seed};

/// Growth duration used when a seed has no usable harvest duration
pub const DEFAULT_GROWTH_DAYS: u32 = 10;

/// Blackout duration used when a seed does not specify one
pub const DEFAULT_BLACKOUT_DAYS: f64 = 3.0;

/// Upper bound on a grow cycle; longer inputs are clamped
pub const MAX_GROWTH_DAYS: u32 = 365;

/// Phase of a grow cycle that a given day belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Prep,
    Blackout,
    Light,
    Harvest,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Prep => "Preparation",
            Phase::Blackout => "Blackout",
            Phase::Light => "Light",
            Phase::Harvest => "Harvest",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One day of a crop's schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day_number: u32,
    pub phase: Phase,
    pub title: String,
    pub instruction: String,
}

/// Normalized growing parameters for one crop
///
/// Raw seed data is messy: durations may be missing, fractional, negative,
/// or longer than the cycle itself. Construction clamps everything into a
/// usable range (and logs what it clamped) so that every crop always renders
/// a plausible timeline. After construction the invariant
/// `growth_days >= 1 && blackout_days <= growth_days - 1` holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GrowthPlan {
    pub growth_days: u32,
    pub blackout_days: u32,
    pub soak_hours: f64,
}

impl GrowthPlan {
    /// Build a plan from raw durations, normalizing out-of-range values
    pub fn new(
        harvest_days: Option<f64>,
        blackout_days: Option<f64>,
        soak_hours: Option<f64>,
    ) -> Self {
        let growth_days = match harvest_days {
            Some(days) if days >= 1.0 => {
                let whole = days.trunc() as u32;
                if whole > MAX_GROWTH_DAYS {
                    tracing::warn!(
                        "Growth duration {} days exceeds the supported maximum, clamping to {}",
                        whole,
                        MAX_GROWTH_DAYS
                    );
                    MAX_GROWTH_DAYS
                } else {
                    whole
                }
            }
            Some(days) => {
                tracing::warn!(
                    "Unusable growth duration {} days, falling back to {}",
                    days,
                    DEFAULT_GROWTH_DAYS
                );
                DEFAULT_GROWTH_DAYS
            }
            None => DEFAULT_GROWTH_DAYS,
        };

        let requested_blackout = blackout_days.unwrap_or(DEFAULT_BLACKOUT_DAYS);
        let mut blackout_days = if requested_blackout < 0.0 {
            tracing::warn!(
                "Negative blackout duration {} days, clamping to 0",
                requested_blackout
            );
            0
        } else {
            // Fractional values round to the nearest whole day
            requested_blackout.round() as u32
        };

        // The final day is always the harvest day, never blackout
        let max_blackout = growth_days - 1;
        if blackout_days > max_blackout {
            tracing::warn!(
                "Blackout duration {} days leaves no room to harvest, clamping to {}",
                blackout_days,
                max_blackout
            );
            blackout_days = max_blackout;
        }

        let soak_hours = match soak_hours {
            Some(hours) if hours >= 0.0 => hours,
            Some(hours) => {
                tracing::warn!("Negative soak duration {} hours, clamping to 0", hours);
                0.0
            }
            None => 0.0,
        };

        Self {
            growth_days,
            blackout_days,
            soak_hours,
        }
    }

    /// Build a plan from a seed's catalog data
    pub fn from_seed(seed: &Seed) -> Self {
        Self::new(
            seed.harvest_days,
            seed.blackout_time_days,
            seed.soaking_duration_hours,
        )
    }

    /// Build a plan for a crop, letting its custom settings override the seed
    pub fn for_crop(seed: &Seed, custom: Option<&CustomSettings>) -> Self {
        let blackout = custom
            .and_then(|c| c.blackout_days)
            .or(seed.blackout_time_days);
        let soak = custom.and_then(|c| c.soak_hours).or(seed.soaking_duration_hours);
        Self::new(seed.harvest_days, blackout, soak)
    }

    /// Classify a day number within this plan
    ///
    /// Day 0 is preparation and the final day is harvest; harvest wins when
    /// a clamped blackout would otherwise reach the end of the cycle. Days
    /// past the cycle also classify as harvest.
    pub fn phase_for_day(&self, day: u32) -> Phase {
        if day == 0 {
            Phase::Prep
        } else if day >= self.growth_days {
            Phase::Harvest
        } else if day <= self.blackout_days {
            Phase::Blackout
        } else {
            Phase::Light
        }
    }

    /// Render the full day-by-day schedule
    ///
    /// Always returns `growth_days + 1` entries in day order: one prep
    /// entry, the blackout and light days, and exactly one harvest entry.
    pub fn schedule(&self) -> Vec<ScheduleEntry> {
        let mut entries = Vec::with_capacity(self.growth_days as usize + 1);

        entries.push(ScheduleEntry {
            day_number: 0,
            phase: Phase::Prep,
            title: format!("Day 0 - {}", Phase::Prep.label()),
            instruction: self.prep_instruction(),
        });

        for day in 1..self.growth_days {
            let phase = self.phase_for_day(day);
            entries.push(ScheduleEntry {
                day_number: day,
                phase,
                title: format!("Day {} - {}", day, phase.label()),
                instruction: instruction_for(phase).to_string(),
            });
        }

        entries.push(ScheduleEntry {
            day_number: self.growth_days,
            phase: Phase::Harvest,
            title: format!("Day {} - {}", self.growth_days, Phase::Harvest.label()),
            instruction: instruction_for(Phase::Harvest).to_string(),
        });

        entries
    }

    /// Day number and phase for a crop at a point in time
    pub fn status_at<Tz: TimeZone>(
        &self,
        start: &DateTime<Tz>,
        now: &DateTime<Tz>,
    ) -> GrowthStatus {
        let current_day = current_day_for(start, now, self.growth_days);
        GrowthStatus {
            current_day,
            phase: self.phase_for_day(current_day),
            progress_percent: progress_percent(current_day, self.growth_days),
        }
    }

    fn prep_instruction(&self) -> String {
        if self.soak_hours > 0.0 {
            format!(
                "Soak seeds for {} hours, then spread them evenly over the moist medium",
                self.soak_hours
            )
        } else {
            "Sow seeds directly onto the moist medium, no soaking needed".to_string()
        }
    }
}

/// Snapshot of where a crop stands in its cycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrowthStatus {
    pub current_day: u32,
    pub phase: Phase,
    pub progress_percent: u8,
}

/// Current day number for a crop that started at `start`
///
/// Day numbers advance with the calendar date in the caller's time zone,
/// not with 24-hour blocks of elapsed time: a crop started yesterday
/// evening is on day 2 this morning. Returns 0 before the start and caps
/// at `growth_days` once the cycle is over.
pub fn current_day_for<Tz: TimeZone>(
    start: &DateTime<Tz>,
    now: &DateTime<Tz>,
    growth_days: u32,
) -> u32 {
    if now < start {
        return 0;
    }
    let elapsed_days = (now.date_naive() - start.date_naive()).num_days();
    (elapsed_days + 1).min(growth_days as i64).max(0) as u32
}

/// Percentage of the cycle completed, rounded and clamped to 0-100
pub fn progress_percent(current_day: u32, growth_days: u32) -> u8 {
    if growth_days == 0 {
        return 0;
    }
    let percent = current_day as f64 / growth_days as f64 * 100.0;
    percent.round().clamp(0.0, 100.0) as u8
}

fn instruction_for(phase: Phase) -> &'static str {
    match phase {
        Phase::Prep => "Prepare the tray and growing medium",
        Phase::Blackout => "Keep the tray covered and dark, misting the medium if it feels dry",
        Phase::Light => "Keep the tray under light and water from the bottom",
        Phase::Harvest => "Cut the greens just above the medium and weigh the yield",
    }
}
