//! Recurrence frequency and due-date schedule expansion.

use super::ParseFrequencyError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Step frequency for recurring task expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceFrequency {
    /// One task per day.
    Daily,
    /// One task per seven days.
    Weekly,
}

impl RecurrenceFrequency {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    /// Returns the interval between consecutive due dates.
    #[must_use]
    pub fn step(self) -> Duration {
        match self {
            Self::Daily => Duration::days(1),
            Self::Weekly => Duration::days(7),
        }
    }
}

impl TryFrom<&str> for RecurrenceFrequency {
    type Error = ParseFrequencyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(ParseFrequencyError(value.to_owned())),
        }
    }
}

/// Expands the inclusive `[start, end]` window into due dates at the given
/// frequency.
///
/// The first due date is `start`; each subsequent date advances by the
/// frequency step while it has not passed `end` (`end` itself is included
/// when it lands exactly on a step boundary). A window with `start > end`
/// yields no dates.
#[must_use]
pub fn expand_schedule(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    frequency: RecurrenceFrequency,
) -> Vec<DateTime<Utc>> {
    let step = frequency.step();
    let mut due_dates = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        due_dates.push(cursor);
        cursor = cursor + step;
    }
    due_dates
}
