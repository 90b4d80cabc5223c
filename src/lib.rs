//! # hr_calendar
//!
//! Date arithmetic and display helpers for the HR desk: attendance sheets,
//! leave requests and training sessions all pass their dates through here.
//!
//! ```
//! use hr_calendar::{format_date, format_date_range, days_between_dates, week_days};
//!
//! assert_eq!(format_date("2024-01-05"), "Jan 5, 2024");
//! assert_eq!(format_date(None::<&str>), "");
//! assert_eq!(
//!     format_date_range("2024-01-05", "2024-01-10"),
//!     "Jan 5 - Jan 10, 2024 (6 days)"
//! );
//! assert_eq!(days_between_dates("2024-01-05", "2024-01-05"), Some(1));
//! assert_eq!(week_days("en-US")[0], "Sun");
//! ```
//!
//! Day counts are inclusive: a leave request starting and ending on the
//! same day is one day long.

mod config;
mod consts;
mod format;
mod input;
mod locale;
mod migrate;
mod month;
mod prelude;
mod range;

pub use config::{AppConfig, ConfigError};
pub use consts::*;
pub use format::{format_date, format_date_range, format_time};
pub use input::DateInput;
pub use locale::{week_days, week_days_default};
pub use migrate::{
    BoxError, Connection, ConnectionPool, Migration, MigrationError, PooledConnection, run_migration,
    run_migration_file, run_migrations,
};
pub use month::{days_array, days_between, days_between_dates, first_day_of_month, last_day_of_month};
pub use range::{DateRange, RangeError};

use crate::prelude::*;
use chrono::{
    DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A civil date with a time of day and no time zone.
///
/// Months and days are 1-based. Values are `Copy`, so stepping a date
/// forward always yields a new value and never touches the caller's copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deref, From, Into)]
#[display(fmt = "{}", "_0.format(ISO_DATETIME_FORMAT)")]
pub struct CalendarDate(NaiveDateTime);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[display(fmt = "Invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date at midnight
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDate` if the day does not exist in that month.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ParseError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from_date)
            .ok_or(ParseError::InvalidDate { year, month, day })
    }

    /// Creates a date with a time of day
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDate` or `ParseError::InvalidTime` for
    /// out-of-range components.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, ParseError> {
        Self::from_ymd(year, month, day)?.and_hms(hour, minute, second)
    }

    /// Midnight of the given calendar day
    pub fn from_date(date: NaiveDate) -> Self {
        Self(NaiveDateTime::new(date, NaiveTime::MIN))
    }

    /// Same day, different time of day
    ///
    /// # Errors
    /// Returns `ParseError::InvalidTime` if the time does not exist.
    pub fn and_hms(self, hour: u32, minute: u32, second: u32) -> Result<Self, ParseError> {
        NaiveTime::from_hms_opt(hour, minute, second)
            .map(|time| Self(self.0.date().and_time(time)))
            .ok_or(ParseError::InvalidTime {
                hour,
                minute,
                second,
            })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 1-based month
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// The calendar day without its time
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub const fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Midnight of the same day
    pub fn start_of_day(&self) -> Self {
        Self::from_date(self.0.date())
    }

    /// The same time of day `days` later, or `None` past chrono's range
    pub fn checked_add_days(self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }

    /// Absolute distance to `other` in milliseconds
    pub fn elapsed_millis(&self, other: &Self) -> u64 {
        let delta: TimeDelta = other.0 - self.0;
        delta.num_milliseconds().unsigned_abs()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_INPUT) {
            return Ok(Self::from_date(date));
        }

        if let Some(datetime) = DATETIME_INPUTS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        {
            return Ok(Self(datetime));
        }

        // Serialized JS dates carry an offset ("...T00:00:00.000Z"); keep their UTC wall time
        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| Self(dt.naive_utc()))
            .map_err(|_| {
                impossible_day(trimmed).unwrap_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))
            })
    }
}

/// `InvalidDate` for a well-formed `YYYY-MM-DD` prefix naming a day that
/// does not exist (Feb 30, month 13, ...)
fn impossible_day(s: &str) -> Option<ParseError> {
    let (date, rest) = s.split_at_checked(ISO_DATE_LEN)?;
    if !(rest.is_empty() || rest.starts_with(DATE_TIME_SEPARATORS)) {
        return None;
    }

    let parts: Vec<&str> = date.split(DATE_SEPARATOR).collect();
    let [y, m, d] = parts.as_slice() else {
        return None;
    };
    let well_formed = [(y, 4), (m, 2), (d, 2)]
        .iter()
        .all(|(part, len)| part.len() == *len && part.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return None;
    }

    let (year, month, day) = (y.parse().ok()?, m.parse().ok()?, d.parse().ok()?);
    NaiveDate::from_ymd_opt(year, month, day)
        .is_none()
        .then_some(ParseError::InvalidDate { year, month, day })
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, datetime};

    #[test]
    fn test_parse_iso_date() {
        let parsed = "2024-01-05".parse::<CalendarDate>().unwrap();
        assert_eq!(parsed, date(2024, 1, 5));
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.month(), 1);
        assert_eq!(parsed.day(), 5);
        assert_eq!(parsed.hour(), 0);
    }

    #[test]
    fn test_parse_forms() {
        struct TestCase {
            input:       &'static str,
            expected:    CalendarDate,
            description: &'static str,
        }

        let cases = [
            TestCase {
                input:       "2024-01-05T14:30",
                expected:    datetime(2024, 1, 5, 14, 30),
                description: "date-time without seconds",
            },
            TestCase {
                input:       "2024-01-05T14:30:00",
                expected:    datetime(2024, 1, 5, 14, 30),
                description: "date-time with seconds",
            },
            TestCase {
                input:       "2024-01-05T14:30:00.250",
                expected:    datetime(2024, 1, 5, 14, 30),
                description: "date-time with fraction",
            },
            TestCase {
                input:       "2024-01-05 14:30:00",
                expected:    datetime(2024, 1, 5, 14, 30),
                description: "space separated (postgres text)",
            },
            TestCase {
                input:       "2024-01-05T00:00:00.000Z",
                expected:    date(2024, 1, 5),
                description: "JSON serialized UTC date",
            },
            TestCase {
                input:       "2024-01-05T16:30:00+02:00",
                expected:    datetime(2024, 1, 5, 14, 30),
                description: "offset converted to UTC",
            },
            TestCase {
                input:       "  2024-02-29  ",
                expected:    date(2024, 2, 29),
                description: "surrounding whitespace",
            },
        ];

        for case in &cases {
            let parsed = case.input.parse::<CalendarDate>();
            let parsed = parsed.unwrap_or_else(|e| panic!("{}: {e}", case.description));
            // fractional seconds are kept, compare to the minute
            assert_eq!(parsed.start_of_day(), case.expected.start_of_day(), "{}", case.description);
            assert_eq!(parsed.hour(), case.expected.hour(), "{}", case.description);
            assert_eq!(parsed.minute(), case.expected.minute(), "{}", case.description);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<CalendarDate>(), Err(ParseError::EmptyInput));
        assert_eq!("   ".parse::<CalendarDate>(), Err(ParseError::EmptyInput));
        assert!(matches!(
            "not a date".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-1-5x".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-02-30garbage".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_impossible_day() {
        struct TestCase {
            input:    &'static str,
            expected: ParseError,
        }

        let cases = [
            TestCase {
                input:    "2023-02-29",
                expected: ParseError::InvalidDate { year: 2023, month: 2, day: 29 },
            },
            TestCase {
                input:    "2024-13-01",
                expected: ParseError::InvalidDate { year: 2024, month: 13, day: 1 },
            },
            TestCase {
                input:    "2024-04-31T09:00",
                expected: ParseError::InvalidDate { year: 2024, month: 4, day: 31 },
            },
            TestCase {
                input:    "1900-02-29 00:00:00",
                expected: ParseError::InvalidDate { year: 1900, month: 2, day: 29 },
            },
        ];

        for case in &cases {
            assert_eq!(case.input.parse::<CalendarDate>(), Err(case.expected.clone()), "{}", case.input);
        }

        // a real day with an impossible time is still a format problem
        assert!(matches!(
            "2024-01-05T25:00".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_constructor_errors() {
        assert_eq!(
            CalendarDate::from_ymd(2023, 2, 29),
            Err(ParseError::InvalidDate {
                year:  2023,
                month: 2,
                day:   29,
            })
        );
        assert_eq!(
            CalendarDate::from_ymd_hms(2024, 1, 5, 24, 0, 0),
            Err(ParseError::InvalidTime {
                hour:   24,
                minute: 0,
                second: 0,
            })
        );
        assert_eq!(
            ParseError::InvalidDate {
                year:  2023,
                month: 2,
                day:   29,
            }
            .to_string(),
            "Invalid date 2023-02-29"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(datetime(2024, 1, 5, 14, 30).to_string(), "2024-01-05T14:30:00");
        assert_eq!(date(2024, 12, 31).to_string(), "2024-12-31T00:00:00");
    }

    #[test]
    fn test_start_of_day_and_add_days() {
        let dt = datetime(2024, 2, 28, 9, 15);
        assert_eq!(dt.start_of_day(), date(2024, 2, 28));

        let next = dt.checked_add_days(1).unwrap();
        assert_eq!(next, datetime(2024, 2, 29, 9, 15));
        // the receiver is untouched
        assert_eq!(dt, datetime(2024, 2, 28, 9, 15));
    }

    #[test]
    fn test_elapsed_millis_is_symmetric() {
        let a = date(2024, 1, 5);
        let b = datetime(2024, 1, 6, 12, 0);
        assert_eq!(a.elapsed_millis(&b), MS_PER_DAY + MS_PER_DAY / 2);
        assert_eq!(b.elapsed_millis(&a), a.elapsed_millis(&b));
        assert_eq!(a.elapsed_millis(&a), 0);
    }

    #[test]
    fn test_ordering() {
        assert!(date(2024, 1, 5) < datetime(2024, 1, 5, 0, 1));
        assert!(date(2023, 12, 31) < date(2024, 1, 1));
    }

    #[test]
    fn test_serde_string_format() {
        let dt = datetime(2024, 1, 5, 14, 30);
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, r#""2024-01-05T14:30:00""#);
        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(dt, parsed);

        // date-only strings are accepted on the way in
        let parsed: CalendarDate = serde_json::from_str(r#""2024-01-05""#).unwrap();
        assert_eq!(parsed, date(2024, 1, 5));

        let result: Result<CalendarDate, _> = serde_json::from_str(r#""2024-02-30""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_reference_sunday() {
        assert_eq!(REFERENCE_SUNDAY.weekday(), chrono::Weekday::Sun);
    }
}
