//! Input and output types for slot computation.
//!
//! Everything here is plain data assembled fresh per request by the caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::interval::TimeRange;

/// One recurring block of general availability on one weekday.
///
/// Times are local wall-clock strings (`HH:MM` or `HH:MM:SS`) interpreted in
/// the input's timezone. Slots for the same weekday may overlap or arrive in
/// any order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHourSlot {
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideKind {
    /// Adds bookable time, even outside working hours.
    Available,
    /// Removes time from whatever is otherwise bookable. Always wins.
    Unavailable,
}

/// A date-specific exception already resolved to the target date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Override {
    #[serde(rename = "type")]
    pub kind: OverrideKind,
    pub start_time: String,
    pub end_time: String,
}

impl Override {
    pub fn available(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            kind: OverrideKind::Available,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    pub fn unavailable(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            kind: OverrideKind::Unavailable,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// Everything the engine needs to compute one day's slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityInput {
    /// The target calendar date, in `timezone`.
    pub date: NaiveDate,
    /// IANA timezone identifier, e.g. `"Europe/Berlin"`.
    pub timezone: String,
    #[serde(default)]
    pub working_hours: Vec<WorkingHourSlot>,
    /// Overrides that apply to `date`.
    #[serde(default)]
    pub overrides: Vec<Override>,
    #[serde(default)]
    pub existing_bookings: Vec<TimeRange>,
    /// Busy blocks from external calendars. Treated exactly like bookings.
    #[serde(default)]
    pub calendar_busy: Vec<TimeRange>,
    pub duration_mins: u32,
    /// Idle time reserved after each slot, inside the same free interval.
    #[serde(default)]
    pub buffer_mins: u32,
    #[serde(default)]
    pub min_notice_ms: u64,
    pub now: DateTime<Utc>,
    #[serde(default)]
    pub dst_policy: DstPolicy,
}

/// A single bookable window of exactly the requested duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<AvailableSlot> for TimeRange {
    fn from(slot: AvailableSlot) -> Self {
        TimeRange::new(slot.start, slot.end)
    }
}
