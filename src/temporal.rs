//! Temporal context for a refresh cycle
//!
//! Every generator keys its distribution parameters off the same
//! `(hour-of-day, is-weekday)` pair, derived once per refresh from the local
//! wall clock and passed by reference into each generator.

use chrono::{DateTime, Datelike, Local, Timelike};
use serde::{Deserialize, Serialize};

/// Snapshot of the wall clock for one refresh cycle
///
/// Created once per refresh, immutable, discarded after use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalContext {
    /// Moment this context was captured
    pub timestamp: DateTime<Local>,
    /// Local hour of day (0-23)
    pub hour: u32,
    /// True Monday through Friday
    pub is_weekday: bool,
}

impl TemporalContext {
    /// Capture the current local time
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Local::now())
    }

    /// Derive a context from an explicit moment
    #[must_use]
    pub fn from_datetime(timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            hour: timestamp.hour(),
            is_weekday: timestamp.weekday().number_from_monday() <= 5,
        }
    }

    /// Morning rush-hour bucket (hours 7-9 inclusive)
    #[must_use]
    pub fn is_morning_rush(&self) -> bool {
        (7..=9).contains(&self.hour)
    }

    /// Evening rush-hour bucket (hours 17-19)
    #[must_use]
    pub fn is_evening_rush(&self) -> bool {
        (17..=19).contains(&self.hour)
    }

    /// Either rush-hour bucket
    #[must_use]
    pub fn is_rush_hour(&self) -> bool {
        self.is_morning_rush() || self.is_evening_rush()
    }

    /// Seed derived from the capture timestamp, truncated to a bounded range.
    ///
    /// Refreshes that fall inside the same truncation window produce the same
    /// seed and therefore correlated output. That is an accepted property of a
    /// demo-data engine, not an accident; tests bypass this entirely by
    /// seeding their generators explicitly.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.timestamp.timestamp().rem_euclid(1000) as u64
    }
}
