//! Display strings for dates, times and date ranges.
//!
//! None of these functions fail: input that cannot be read as a date is
//! rendered as [`INVALID_DATE`] rather than reported.

use crate::{
    CalendarDate, DATE_FORMAT, DateInput, INVALID_DATE, INVALID_DAY_COUNT, RANGE_DISPLAY_SEPARATOR,
    RANGE_START_FORMAT, TIME_FORMAT, days_between,
};

/// `"Jan 5, 2024"`; empty for absent input or an empty string.
pub fn format_date(input: impl Into<DateInput>) -> String {
    let input = input.into();
    match input.resolve() {
        Ok(Some(date)) => date.format(DATE_FORMAT).to_string(),
        Ok(None) => String::new(),
        Err(err) => {
            tracing::debug!(error = %err, "formatting unparsable date");
            INVALID_DATE.to_owned()
        },
    }
}

/// `"02:30 pm"`
pub fn format_time(date: &CalendarDate) -> String {
    date.format(TIME_FORMAT).to_string()
}

/// `"Jan 5 - Jan 10, 2024 (6 days)"`, with an inclusive day count.
///
/// The ends may come in either order. An end that cannot be read renders as
/// `Invalid Date` and the count as `NaN`.
pub fn format_date_range(start: impl Into<DateInput>, end: impl Into<DateInput>) -> String {
    let start = start.into().to_date();
    let end = end.into().to_date();

    let count = match (start, end) {
        (Some(start), Some(end)) => days_between(&start, &end).to_string(),
        _ => INVALID_DAY_COUNT.to_owned(),
    };

    format!(
        "{}{RANGE_DISPLAY_SEPARATOR}{} ({count} days)",
        render(start, RANGE_START_FORMAT),
        render(end, DATE_FORMAT),
    )
}

fn render(date: Option<CalendarDate>, fmt: &str) -> String {
    date.map_or_else(|| INVALID_DATE.to_owned(), |d| d.format(fmt).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, datetime};

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2024, 1, 5)), "Jan 5, 2024");
        assert_eq!(format_date("2024-01-05"), "Jan 5, 2024");
        assert_eq!(format_date("2024-12-25T18:00:00"), "Dec 25, 2024");
        assert_eq!(format_date(Some(date(2023, 11, 30))), "Nov 30, 2023");
    }

    #[test]
    fn test_format_date_absent() {
        assert_eq!(format_date(None::<&str>), "");
        assert_eq!(format_date(None::<CalendarDate>), "");
        assert_eq!(format_date(DateInput::Absent), "");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_format_date_invalid() {
        assert_eq!(format_date("yesterday"), INVALID_DATE);
        assert_eq!(format_date("2024-02-30"), INVALID_DATE);
        // only the empty string counts as absent
        assert_eq!(format_date(" "), INVALID_DATE);
    }

    #[test]
    fn test_format_time() {
        struct TestCase {
            hour:     u32,
            minute:   u32,
            expected: &'static str,
        }

        let cases = [
            TestCase { hour: 14, minute: 30, expected: "02:30 pm" },
            TestCase { hour: 0, minute: 5, expected: "12:05 am" },
            TestCase { hour: 12, minute: 0, expected: "12:00 pm" },
            TestCase { hour: 9, minute: 45, expected: "09:45 am" },
            TestCase { hour: 23, minute: 59, expected: "11:59 pm" },
        ];

        for case in &cases {
            let dt = datetime(2024, 1, 5, case.hour, case.minute);
            assert_eq!(format_time(&dt), case.expected, "{}:{}", case.hour, case.minute);
        }
    }

    #[test]
    fn test_format_date_range() {
        assert_eq!(
            format_date_range("2024-01-05", "2024-01-10"),
            "Jan 5 - Jan 10, 2024 (6 days)"
        );
        assert_eq!(
            format_date_range(date(2024, 3, 1), date(2024, 3, 1)),
            "Mar 1 - Mar 1, 2024 (1 days)"
        );
        assert_eq!(
            format_date_range("2023-12-30", "2024-01-02"),
            "Dec 30 - Jan 2, 2024 (4 days)"
        );
    }

    #[test]
    fn test_format_date_range_reversed() {
        // ends are rendered where they were given; the count uses the absolute span
        assert_eq!(
            format_date_range("2024-01-10", "2024-01-05"),
            "Jan 10 - Jan 5, 2024 (6 days)"
        );
    }

    #[test]
    fn test_format_date_range_partial_day_rounds_up() {
        let start = datetime(2024, 1, 5, 9, 0);
        let end = datetime(2024, 1, 6, 17, 0);
        assert_eq!(format_date_range(start, end), "Jan 5 - Jan 6, 2024 (3 days)");
    }

    #[test]
    fn test_format_date_range_invalid() {
        assert_eq!(
            format_date_range("garbage", "2024-01-10"),
            "Invalid Date - Jan 10, 2024 (NaN days)"
        );
        assert_eq!(
            format_date_range(None::<&str>, None::<&str>),
            "Invalid Date - Invalid Date (NaN days)"
        );
    }
}
