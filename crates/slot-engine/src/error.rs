//! Error types for slot-engine operations.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    #[error("Invalid time of day: {0:?} (expected HH:MM or HH:MM:SS)")]
    InvalidTimeOfDay(String),

    #[error("Invalid time range: {start} to {end} (end must be after start)")]
    InvalidTimeRange { start: String, end: String },

    #[error("Invalid day of week: {0} (expected 0 = Sunday through 6 = Saturday)")]
    InvalidWeekday(u8),

    #[error("Invalid duration: {0} minutes (must be positive)")]
    InvalidDuration(u32),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Local time {local} does not exist in {timezone}")]
    NonexistentLocalTime {
        local: NaiveDateTime,
        timezone: String,
    },

    #[error("Invalid date range: {first} is after {last}")]
    InvalidDateRange { first: NaiveDate, last: NaiveDate },
}

pub type Result<T> = std::result::Result<T, SlotError>;
