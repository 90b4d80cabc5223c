use chrono::NaiveDate;

/// Milliseconds in one civil day
pub const MS_PER_DAY: u64 = 86_400_000;

/// Days added on top of the elapsed whole days so both endpoints are counted
pub const INCLUSIVE_DAY_OFFSET: u64 = 1;

/// Locale used when the caller does not name one, or names one we don't know
pub const DEFAULT_LOCALE: &str = "en-US";

/// Number of entries in a weekday label table
pub const DAYS_IN_WEEK: usize = 7;

/// Text rendered in place of a date that could not be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Text rendered in place of a day count that could not be computed
pub const INVALID_DAY_COUNT: &str = "NaN";

/// "Jan 5, 2024"
pub const DATE_FORMAT: &str = "%b %-d, %Y";
/// "Jan 5", used for the first half of a range
pub const RANGE_START_FORMAT: &str = "%b %-d";
/// "02:30 pm"
pub const TIME_FORMAT: &str = "%I:%M %P";
/// Abbreviated weekday name in the active locale
pub const WEEKDAY_FORMAT: &str = "%a";

/// Canonical text form of a `CalendarDate`
pub const ISO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Date-only input, e.g. `2024-01-05`
pub(crate) const ISO_DATE_INPUT: &str = "%Y-%m-%d";
/// Length of the `YYYY-MM-DD` prefix of an ISO input
pub(crate) const ISO_DATE_LEN: usize = 10;
/// Date component separator (ISO 8601 format)
pub(crate) const DATE_SEPARATOR: char = '-';
/// Characters allowed to follow the date part of an ISO input
pub(crate) const DATE_TIME_SEPARATORS: [char; 2] = ['T', ' '];
/// Date-time inputs tried in order after the date-only form
pub(crate) const DATETIME_INPUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A known Sunday (2023-01-01) that weekday tables are walked from
pub const REFERENCE_SUNDAY: NaiveDate = match NaiveDate::from_ymd_opt(2023, 1, 1) {
    Some(date) => date,
    None => panic!("reference Sunday is a valid date"),
};

/// Range separator (ISO 8601 interval format)
pub const RANGE_SEPARATOR: char = '/';
/// Separator between the two halves of a rendered range
pub const RANGE_DISPLAY_SEPARATOR: &str = " - ";

/// Separator between language and region in a BCP 47 tag
pub(crate) const LOCALE_TAG_SEPARATOR: char = '-';
/// Separator between language and region in a POSIX locale name
pub(crate) const POSIX_LOCALE_SEPARATOR: char = '_';
