//! Bookable slot computation for a single day.
//!
//! The free set for the day is built with interval arithmetic, in order:
//!
//! 1. merge the weekday's working hours,
//! 2. union in `available` overrides,
//! 3. subtract `unavailable` overrides,
//! 4. subtract bookings and external calendar busy blocks,
//!
//! and is then cut into fixed-length slots, dropping any that start inside the
//! minimum-notice window.

use chrono::{DateTime, Datelike, Duration, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::dst;
use crate::error::{Result, SlotError};
use crate::interval::{self, TimeRange};
use crate::model::{AvailabilityInput, AvailableSlot, OverrideKind};
use crate::time_of_day;

/// Compute the bookable slots for `input.date`.
///
/// The result is sorted by start instant, pairwise non-overlapping, and every
/// slot lasts exactly `duration_mins`. The same input always yields the same
/// output.
///
/// # Errors
///
/// - [`SlotError::InvalidDuration`] if `duration_mins` is zero.
/// - [`SlotError::InvalidTimezone`] if `timezone` is not a known IANA zone.
/// - [`SlotError::InvalidWeekday`] if any working-hour slot has `day_of_week > 6`.
/// - [`SlotError::InvalidTimeOfDay`] / [`SlotError::InvalidTimeRange`] for
///   malformed or inverted wall-clock times, on any weekday.
/// - [`SlotError::NonexistentLocalTime`] under
///   [`DstPolicy::Reject`](crate::dst::DstPolicy::Reject).
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(date = %input.date, timezone = %input.timezone)
)]
pub fn calculate_available_slots(input: &AvailabilityInput) -> Result<Vec<AvailableSlot>> {
    if input.duration_mins == 0 {
        return Err(SlotError::InvalidDuration(input.duration_mins));
    }
    let tz = dst::parse_timezone(&input.timezone)?;

    let working = working_intervals(input, tz)?;
    let mut free = interval::merge(&working);
    debug!(intervals = free.len(), "merged working hours");

    let mut extra = Vec::new();
    let mut blocked = Vec::new();
    for o in &input.overrides {
        let resolved =
            dst::resolve_range(tz, input.date, &o.start_time, &o.end_time, input.dst_policy)?;
        if let Some(range) = resolved {
            match o.kind {
                OverrideKind::Available => extra.push(range),
                OverrideKind::Unavailable => blocked.push(range),
            }
        }
    }
    free = interval::union(&free, &extra);
    free = interval::subtract(&free, &blocked);
    debug!(
        available = extra.len(),
        unavailable = blocked.len(),
        intervals = free.len(),
        "applied overrides"
    );

    // Only busy time inside the span of the free set can remove anything.
    let busy = match (free.first(), free.last()) {
        (Some(first), Some(last)) => interval::clip(
            &interval::union(&input.existing_bookings, &input.calendar_busy),
            TimeRange::new(first.start, last.end),
        ),
        _ => Vec::new(),
    };
    free = interval::subtract(&free, &busy);
    debug!(busy = busy.len(), intervals = free.len(), "subtracted busy time");

    let Some(earliest_start) = notice_cutoff(input.now, input.min_notice_ms) else {
        debug!("minimum notice reaches past the representable range");
        return Ok(Vec::new());
    };

    let duration = Duration::minutes(i64::from(input.duration_mins));
    let buffer = Duration::minutes(i64::from(input.buffer_mins));
    let slots: Vec<AvailableSlot> = quantize(&free, duration, buffer)
        .into_iter()
        .filter(|slot| slot.start >= earliest_start)
        .collect();
    debug!(slots = slots.len(), "generated slots");

    Ok(slots)
}

/// Resolve the working-hour slots for the target weekday to absolute ranges.
///
/// Slots for other weekdays are still validated so that a bad template is
/// reported on every day, not only the day it happens to apply to.
fn working_intervals(input: &AvailabilityInput, tz: Tz) -> Result<Vec<TimeRange>> {
    // num_days_from_sunday is always < 7.
    let weekday = input.date.weekday().num_days_from_sunday() as u8;

    let mut ranges = Vec::new();
    for slot in &input.working_hours {
        if slot.day_of_week > 6 {
            return Err(SlotError::InvalidWeekday(slot.day_of_week));
        }
        if slot.day_of_week != weekday {
            time_of_day::parse_range(&slot.start_time, &slot.end_time)?;
            continue;
        }
        if let Some(range) =
            dst::resolve_range(tz, input.date, &slot.start_time, &slot.end_time, input.dst_policy)?
        {
            ranges.push(range);
        }
    }
    Ok(ranges)
}

/// `now + min_notice`, or `None` if that is beyond what `DateTime` can hold.
fn notice_cutoff(now: DateTime<Utc>, min_notice_ms: u64) -> Option<DateTime<Utc>> {
    i64::try_from(min_notice_ms)
        .ok()
        .and_then(Duration::try_milliseconds)
        .and_then(|notice| now.checked_add_signed(notice))
}

/// Cut each free interval into back-to-back slots of `duration`, starting at
/// the interval's own start. A slot is kept only if it and the trailing
/// `buffer` both fit before the interval ends.
fn quantize(free: &[TimeRange], duration: Duration, buffer: Duration) -> Vec<AvailableSlot> {
    let mut slots = Vec::new();
    for range in free {
        let mut start = range.start;
        // Stop at the edge of representable time rather than overflow.
        while let Some(end) = start.checked_add_signed(duration) {
            match end.checked_add_signed(buffer) {
                Some(reserved) if reserved <= range.end => {}
                _ => break,
            }
            slots.push(AvailableSlot { start, end });
            start = end;
        }
    }
    debug_assert!(slots.windows(2).all(|w| w[0].end <= w[1].start));
    slots
}
