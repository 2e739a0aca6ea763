//! Unit tests for the todo context.

mod recurrence_tests;

use chrono::{DateTime, TimeZone, Utc};

/// Builds a UTC timestamp for test data.
pub fn utc(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .expect("valid test timestamp")
}
