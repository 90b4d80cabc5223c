use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, DATE_FORMAT, ParseError, RANGE_DISPLAY_SEPARATOR, RANGE_SEPARATOR,
    RANGE_START_FORMAT, days_array, days_between,
};

/// A span between two calendar dates, counted inclusively.
///
/// The ends are kept in the order they were given; the span itself is
/// order independent. Use [`DateRange::ordered`] where `start <= end` must
/// hold, e.g. for a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// Error parsing date component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a range without checking the order of its ends
    pub const fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start, end }
    }

    /// Creates a range whose start is not after its end.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn ordered(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Returns both ends as a tuple, in the order given
    pub const fn dates(&self) -> (CalendarDate, CalendarDate) {
        (self.start, self.end)
    }

    pub fn earliest(&self) -> CalendarDate {
        self.start.min(self.end)
    }

    pub fn latest(&self) -> CalendarDate {
        self.start.max(self.end)
    }

    /// Inclusive number of days covered
    pub fn day_count(&self) -> u64 {
        days_between(&self.start, &self.end)
    }

    /// Each day from the earliest to the latest end
    pub fn days(&self) -> Vec<CalendarDate> {
        days_array(&self.earliest(), &self.latest())
    }

    /// Checks if the date's calendar day falls inside the range
    pub fn contains(&self, date: &CalendarDate) -> bool {
        let day = date.date();
        self.earliest().date() <= day && day <= self.latest().date()
    }

    /// Checks if the two ranges share at least one calendar day
    pub fn overlaps(&self, other: &Self) -> bool {
        self.earliest().date() <= other.latest().date()
            && other.earliest().date() <= self.latest().date()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{RANGE_DISPLAY_SEPARATOR}{} ({} days)",
            self.start.format(RANGE_START_FORMAT),
            self.end.format(DATE_FORMAT),
            self.day_count()
        )
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    /// Parses an ISO 8601 interval, `start/end`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = start_str.trim().parse::<CalendarDate>()?;
                let end = end_str.trim().parse::<CalendarDate>()?;

                Ok(Self::new(start, end))
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("{}{RANGE_SEPARATOR}{}", self.start, self.end))
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
