//! Resolving local wall-clock times to absolute instants across DST transitions.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::TimeRange;
use crate::time_of_day;

/// Policy for wall-clock boundaries that fall in a DST gap
/// (e.g., 02:30 on the night clocks spring forward from 02:00 to 03:00).
///
/// Ambiguous times during the autumn fall-back always resolve to the earlier
/// of the two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Move to the first valid wall-clock minute after the gap.
    #[default]
    ShiftForward,
    /// Drop the working-hour slot or override whose boundary is in the gap.
    Skip,
    /// Fail with [`SlotError::NonexistentLocalTime`].
    Reject,
}

/// Look up an IANA timezone identifier.
pub fn parse_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(timezone.to_string()))
}

/// Resolve a local date-time in `tz` to a UTC instant.
///
/// Returns `Ok(None)` only when the time does not exist and `policy` is
/// [`DstPolicy::Skip`].
pub fn resolve_local(
    tz: Tz,
    local: NaiveDateTime,
    policy: DstPolicy,
) -> Result<Option<DateTime<Utc>>> {
    if let Some(dt) = tz.from_local_datetime(&local).earliest() {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    match policy {
        DstPolicy::ShiftForward => first_valid_after(tz, local).map(Some),
        DstPolicy::Skip => Ok(None),
        DstPolicy::Reject => Err(nonexistent(tz, local)),
    }
}

/// Resolve a `[start, end)` pair of wall-clock times on `date` to a [`TimeRange`].
///
/// Errors if either string is malformed or `end` is not after `start`.
/// Returns `Ok(None)` when the range was skipped under [`DstPolicy::Skip`],
/// when both boundaries fell in the same gap and shifted onto one instant, or
/// when a boundary lies past the last representable date.
pub fn resolve_range(
    tz: Tz,
    date: NaiveDate,
    start: &str,
    end: &str,
    policy: DstPolicy,
) -> Result<Option<TimeRange>> {
    let (start_tod, end_tod) = time_of_day::parse_range(start, end)?;

    let (Some(start_local), Some(end_local)) = (start_tod.on(date), end_tod.on(date)) else {
        return Ok(None);
    };
    let Some(start_utc) = resolve_local(tz, start_local, policy)? else {
        return Ok(None);
    };
    let Some(end_utc) = resolve_local(tz, end_local, policy)? else {
        return Ok(None);
    };

    let range = TimeRange::new(start_utc, end_utc);
    Ok((!range.is_empty()).then_some(range))
}

/// Step forward a minute at a time from the gap to the first valid wall time.
fn first_valid_after(tz: Tz, local: NaiveDateTime) -> Result<DateTime<Utc>> {
    // Gaps are whole minutes, so start from the enclosing minute.
    let base = local.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(local);

    // No zone has ever skipped more than a day.
    (1..=24 * 60)
        .map_while(|m| base.checked_add_signed(Duration::minutes(m)))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| nonexistent(tz, local))
}

fn nonexistent(tz: Tz, local: NaiveDateTime) -> SlotError {
    SlotError::NonexistentLocalTime {
        local,
        timezone: tz.name().to_string(),
    }
}
