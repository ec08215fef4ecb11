//! Restricted weekly recurrence matching.
//!
//! Recognises the `FREQ=WEEKLY;BYDAY=..` subset of RFC 5545 RRULEs and answers
//! one question: does the rule fire on a given day of the week? Anything richer
//! (monthly rules, `BYSETPOS`, `COUNT`/`UNTIL` bounds) must be expanded by the
//! caller before the data reaches the engine.

use chrono::{Datelike, Weekday};

/// Two-letter RFC 5545 weekday codes, indexed by day of week (0 = Sunday).
const DAY_CODES: [&str; 7] = ["SU", "MO", "TU", "WE", "TH", "FR", "SA"];

/// Returns `true` iff `rule` is a weekly rule whose `BYDAY` list contains
/// `day_of_week` (0 = Sunday … 6 = Saturday).
///
/// Malformed input never panics or errors; it simply does not match. That
/// covers a missing `FREQ` or `BYDAY` term, a term without `=`, a repeated key,
/// an unknown weekday code, and an out-of-range `day_of_week`.
///
/// An optional leading `RRULE:` is tolerated. Terms other than `FREQ` and
/// `BYDAY` (e.g. `WKST`, `INTERVAL`) are ignored.
///
/// ```
/// use slot_engine::recurrence::matches;
///
/// assert!(matches("FREQ=WEEKLY;BYDAY=MO,WE", 1));
/// assert!(!matches("FREQ=WEEKLY;BYDAY=MO,WE", 2));
/// assert!(!matches("FREQ=MONTHLY;BYDAY=MO", 1));
/// ```
pub fn matches(rule: &str, day_of_week: u8) -> bool {
    let Some(code) = DAY_CODES.get(usize::from(day_of_week)) else {
        return false;
    };

    match parse_weekly(rule) {
        Some(days) => days.contains(code),
        None => false,
    }
}

/// Convenience wrapper over [`matches`] taking a `chrono` weekday.
pub fn matches_weekday(rule: &str, weekday: Weekday) -> bool {
    // num_days_from_sunday is always < 7, so the cast is lossless.
    matches(rule, weekday.num_days_from_sunday() as u8)
}

/// Convenience wrapper over [`matches`] taking a calendar date.
pub fn matches_date<D: Datelike>(rule: &str, date: &D) -> bool {
    matches_weekday(rule, date.weekday())
}

/// Parse a weekly rule into its `BYDAY` codes, or `None` if it is not one.
fn parse_weekly(rule: &str) -> Option<Vec<&str>> {
    let body = rule.trim();
    let body = body.strip_prefix("RRULE:").unwrap_or(body);

    let mut freq: Option<&str> = None;
    let mut byday: Option<&str> = None;

    for term in body.split(';') {
        let term = term.trim();
        if term.is_empty() {
            // Tolerate a trailing separator.
            continue;
        }
        let (key, value) = term.split_once('=')?;
        let slot = match key.trim() {
            "FREQ" => &mut freq,
            "BYDAY" => &mut byday,
            _ => continue,
        };
        if slot.replace(value.trim()).is_some() {
            return None;
        }
    }

    if freq? != "WEEKLY" {
        return None;
    }

    let days: Vec<&str> = byday?.split(',').map(str::trim).collect();
    if !days.iter().all(|d| DAY_CODES.iter().any(|code| code == d)) {
        return None;
    }
    Some(days)
}
