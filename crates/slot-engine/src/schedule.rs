//! A host's stored availability template and the per-date assembly of engine
//! input from it.
//!
//! Stored overrides are either pinned to one date or recur weekly. Deciding
//! which of them apply to a given date is the only place the recurrence
//! matcher is used; the engine itself only ever sees resolved [`Override`]s.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::availability::calculate_available_slots;
use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};
use crate::interval::TimeRange;
use crate::model::{AvailabilityInput, AvailableSlot, Override, OverrideKind, WorkingHourSlot};
use crate::recurrence;

/// A stored override, before resolution to a particular date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    #[serde(rename = "type")]
    pub kind: OverrideKind,
    pub start_time: String,
    pub end_time: String,
    /// The single date this override is for or, with `recurrence`, its first
    /// occurrence.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Weekly rule, e.g. `FREQ=WEEKLY;BYDAY=MO,WE`.
    #[serde(default)]
    pub recurrence: Option<String>,
}

impl OverrideRule {
    /// Whether this override is in effect on `date`.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        match (&self.recurrence, self.date) {
            (Some(rule), first) => {
                first.is_none_or(|first| date >= first) && recurrence::matches_date(rule, &date)
            }
            (None, Some(on)) => on == date,
            (None, None) => false,
        }
    }

    pub fn resolve(&self) -> Override {
        Override {
            kind: self.kind,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }
}

/// The overrides from `rules` in effect on `date`, in their original order.
pub fn applicable_overrides(rules: &[OverrideRule], date: NaiveDate) -> Vec<Override> {
    rules
        .iter()
        .filter(|rule| rule.applies_on(date))
        .map(OverrideRule::resolve)
        .collect()
}

/// Everything about a host and booking type that does not change per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub timezone: String,
    #[serde(default)]
    pub working_hours: Vec<WorkingHourSlot>,
    #[serde(default)]
    pub override_rules: Vec<OverrideRule>,
    pub duration_mins: u32,
    #[serde(default)]
    pub buffer_mins: u32,
    #[serde(default)]
    pub min_notice_ms: u64,
    #[serde(default)]
    pub dst_policy: DstPolicy,
}

impl Schedule {
    /// Assemble the engine input for `date`.
    ///
    /// `busy` carries bookings and calendar blocks together. If a calendar
    /// provider could not be reached, pass what is known rather than failing;
    /// availability degrades to ignoring that calendar.
    pub fn input_for(
        &self,
        date: NaiveDate,
        busy: &[TimeRange],
        now: DateTime<Utc>,
    ) -> AvailabilityInput {
        AvailabilityInput {
            date,
            timezone: self.timezone.clone(),
            working_hours: self.working_hours.clone(),
            overrides: applicable_overrides(&self.override_rules, date),
            existing_bookings: busy.to_vec(),
            calendar_busy: Vec::new(),
            duration_mins: self.duration_mins,
            buffer_mins: self.buffer_mins,
            min_notice_ms: self.min_notice_ms,
            now,
            dst_policy: self.dst_policy,
        }
    }

    pub fn slots_for(
        &self,
        date: NaiveDate,
        busy: &[TimeRange],
        now: DateTime<Utc>,
    ) -> Result<Vec<AvailableSlot>> {
        calculate_available_slots(&self.input_for(date, busy, now))
    }

    /// Slots for every date in `first..=last`. Dates without slots map to an
    /// empty list.
    pub fn slots_between(
        &self,
        first: NaiveDate,
        last: NaiveDate,
        busy: &[TimeRange],
        now: DateTime<Utc>,
    ) -> Result<BTreeMap<NaiveDate, Vec<AvailableSlot>>> {
        if last < first {
            return Err(SlotError::InvalidDateRange { first, last });
        }
        first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| Ok((date, self.slots_for(date, busy, now)?)))
            .collect()
    }

    /// Dates in `first..=last` with at least one bookable slot.
    pub fn bookable_days(
        &self,
        first: NaiveDate,
        last: NaiveDate,
        busy: &[TimeRange],
        now: DateTime<Utc>,
    ) -> Result<Vec<NaiveDate>> {
        Ok(self
            .slots_between(first, last, busy, now)?
            .into_iter()
            .filter(|(_, slots)| !slots.is_empty())
            .map(|(date, _)| date)
            .collect())
    }
}
