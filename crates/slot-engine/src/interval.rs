//! Half-open time interval arithmetic.
//!
//! Every stage of slot computation is expressed as merging or subtracting sets
//! of [`TimeRange`]s. Functions here accept ranges in any order and always
//! return a sorted, non-overlapping, non-adjacent set with no empty ranges.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)` between two absolute instants.
///
/// Used for confirmed bookings, externally synced calendar blocks, and the
/// engine's internal free set alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// A range with `end <= start` covers no time.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Two ranges overlap when `a.start < b.end && b.start < a.end`.
    /// Ranges that merely touch do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely within this range.
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Merge overlapping or adjacent ranges into a minimal sorted set.
///
/// Empty ranges are discarded.
pub fn merge(ranges: &[TimeRange]) -> Vec<TimeRange> {
    let mut sorted: Vec<TimeRange> = ranges.iter().filter(|r| !r.is_empty()).copied().collect();
    sorted.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        if let Some(last) = merged.last_mut() {
            if range.start <= last.end {
                last.end = last.end.max(range.end);
                continue;
            }
        }
        merged.push(range);
    }

    merged
}

/// Union of two range sets.
pub fn union(a: &[TimeRange], b: &[TimeRange]) -> Vec<TimeRange> {
    let mut all = Vec::with_capacity(a.len() + b.len());
    all.extend_from_slice(a);
    all.extend_from_slice(b);
    merge(&all)
}

/// Set difference `base - remove`.
///
/// A removed range strictly inside a base range splits it in two, one covering
/// a base range drops it, and a partial overlap truncates the affected end.
/// The order of `remove` does not matter.
pub fn subtract(base: &[TimeRange], remove: &[TimeRange]) -> Vec<TimeRange> {
    let base = merge(base);
    let remove = merge(remove);

    let mut result = Vec::with_capacity(base.len());
    let mut ri = 0;

    for b in base {
        let mut cursor = b.start;

        // Removals are sorted and disjoint; skip those wholly before this block.
        while ri < remove.len() && remove[ri].end <= cursor {
            ri += 1;
        }

        let mut j = ri;
        while j < remove.len() && remove[j].start < b.end {
            let r = remove[j];
            if r.start > cursor {
                result.push(TimeRange::new(cursor, r.start));
            }
            cursor = cursor.max(r.end);
            j += 1;
        }

        if cursor < b.end {
            result.push(TimeRange::new(cursor, b.end));
        }
    }

    result
}

/// Clip every range to `window`, dropping those entirely outside it.
pub fn clip(ranges: &[TimeRange], window: TimeRange) -> Vec<TimeRange> {
    let clipped: Vec<TimeRange> = ranges
        .iter()
        .filter(|r| r.overlaps(&window))
        .map(|r| TimeRange::new(r.start.max(window.start), r.end.min(window.end)))
        .collect();
    merge(&clipped)
}
