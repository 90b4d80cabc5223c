use chrono::{Datelike, Days, Months, NaiveDate};

use crate::{CalendarDate, DateInput, INCLUSIVE_DAY_OFFSET, MS_PER_DAY};

/// Day 1 of the date's month, at midnight.
pub fn first_day_of_month(date: &CalendarDate) -> CalendarDate {
    CalendarDate::from_date(month_start(date.date()))
}

/// The last calendar day of the date's month, at midnight.
///
/// Computed as the day before the first of the following month.
pub fn last_day_of_month(date: &CalendarDate) -> CalendarDate {
    let last = month_start(date.date())
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        // only December of the last representable year has no following month
        .unwrap_or(NaiveDate::MAX);
    CalendarDate::from_date(last)
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Every day from `start` through `end`, ascending.
///
/// Each entry keeps `start`'s time of day, and the walk stops at the first
/// step that lands after `end`. Empty when `start > end`.
pub fn days_array(start: &CalendarDate, end: &CalendarDate) -> Vec<CalendarDate> {
    let mut days = Vec::new();
    let mut current = Some(*start);
    while let Some(day) = current.filter(|day| day <= end) {
        days.push(day);
        current = day.checked_add_days(1);
    }
    days
}

/// Inclusive day count between two dates, in either order.
///
/// `ceil(|end - start| / 1 day) + 1`, so the same day counts as 1 and
/// adjacent days as 2.
pub fn days_between(start: &CalendarDate, end: &CalendarDate) -> u64 {
    start.elapsed_millis(end).div_ceil(MS_PER_DAY) + INCLUSIVE_DAY_OFFSET
}

/// [`days_between`] for loosely typed input; `None` if either side is
/// absent or not a date.
pub fn days_between_dates(start: impl Into<DateInput>, end: impl Into<DateInput>) -> Option<u64> {
    let start = start.into().to_date()?;
    let end = end.into().to_date()?;
    Some(days_between(&start, &end))
}
