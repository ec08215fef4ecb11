//! Wall-clock time-of-day values as written in working hours and overrides.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Result, SlotError};

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// A time of day with second precision, `00:00:00` through `24:00:00`.
///
/// `24:00` is accepted so a block can run to the end of its day; it names
/// midnight at the start of the following date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    seconds: u32,
}

impl TimeOfDay {
    pub const END_OF_DAY: TimeOfDay = TimeOfDay {
        seconds: SECONDS_PER_DAY,
    };

    /// Build from components. Returns `None` outside the representable range.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour > 24 || minute >= 60 || second >= 60 {
            return None;
        }
        let seconds = hour * 3600 + minute * 60 + second;
        (seconds <= SECONDS_PER_DAY).then_some(Self { seconds })
    }

    /// The local date-time this time of day names on `date`, or `None` if
    /// that lies past the last representable date.
    pub fn on(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        date.and_time(NaiveTime::MIN)
            .checked_add_signed(Duration::seconds(i64::from(self.seconds)))
    }
}

/// Parse a `[start, end)` pair of wall-clock strings, requiring `end > start`.
pub fn parse_range(start: &str, end: &str) -> Result<(TimeOfDay, TimeOfDay)> {
    let start_tod: TimeOfDay = start.parse()?;
    let end_tod: TimeOfDay = end.parse()?;
    if end_tod <= start_tod {
        return Err(SlotError::InvalidTimeRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok((start_tod, end_tod))
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    /// Parse `HH:MM` or `HH:MM:SS` on a 24-hour clock. Hours may be written
    /// with one digit; minutes and seconds always take two.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidTimeOfDay(s.to_string());

        let parts: Vec<&str> = s.trim().split(':').collect();
        let (h, m, sec) = match parts.as_slice() {
            [h, m] => (*h, *m, "00"),
            [h, m, sec] => (*h, *m, *sec),
            _ => return Err(invalid()),
        };

        let well_formed = (1..=2).contains(&h.len())
            && m.len() == 2
            && sec.len() == 2
            && [h, m, sec]
                .iter()
                .all(|part| part.bytes().all(|b| b.is_ascii_digit()));
        if !well_formed {
            return Err(invalid());
        }

        let field = |part: &str| part.parse::<u32>().map_err(|_| invalid());
        Self::from_hms(field(h)?, field(m)?, field(sec)?).ok_or_else(invalid)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, rem) = (self.seconds / 3600, self.seconds % 3600);
        let (m, s) = (rem / 60, rem % 60);
        if s == 0 {
            write!(f, "{h:02}:{m:02}")
        } else {
            write!(f, "{h:02}:{m:02}:{s:02}")
        }
    }
}
