use chrono::{NaiveDate, NaiveDateTime};

use crate::{CalendarDate, ParseError};

/// A date as handed over by a page: already typed, still serialized, or
/// missing altogether.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateInput {
    /// Nothing was supplied (`null`/`undefined` on the client)
    #[default]
    Absent,
    Date(CalendarDate),
    /// Serialized form, parsed on demand
    Text(String),
}

impl DateInput {
    /// Turns the input into a date.
    ///
    /// Absent input and the empty string resolve to `Ok(None)`.
    ///
    /// # Errors
    /// Returns the `ParseError` of a string that is not a recognised date.
    pub fn resolve(&self) -> Result<Option<CalendarDate>, ParseError> {
        match self {
            Self::Absent => Ok(None),
            Self::Date(date) => Ok(Some(*date)),
            Self::Text(text) if text.is_empty() => Ok(None),
            Self::Text(text) => text.parse().map(Some),
        }
    }

    /// Resolves to a date, treating absent and unparsable input alike.
    pub(crate) fn to_date(&self) -> Option<CalendarDate> {
        match self.resolve() {
            Ok(date) => date,
            Err(err) => {
                tracing::debug!(error = %err, "date input degraded to invalid");
                None
            },
        }
    }

    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<CalendarDate> for DateInput {
    fn from(date: CalendarDate) -> Self {
        Self::Date(date)
    }
}

impl From<&CalendarDate> for DateInput {
    fn from(date: &CalendarDate) -> Self {
        Self::Date(*date)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date.into())
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::Date(datetime.into())
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for DateInput {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl<T: Into<Self>> From<Option<T>> for DateInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_resolve_absent_and_empty() {
        assert_eq!(DateInput::Absent.resolve(), Ok(None));
        assert_eq!(DateInput::from("").resolve(), Ok(None));
        assert_eq!(DateInput::from(None::<&str>).resolve(), Ok(None));
        assert!(DateInput::from(None::<CalendarDate>).is_absent());
    }

    #[test]
    fn test_resolve_values() {
        let expected = date(2024, 1, 5);
        assert_eq!(DateInput::from(expected).resolve(), Ok(Some(expected)));
        assert_eq!(DateInput::from("2024-01-05").resolve(), Ok(Some(expected)));
        assert_eq!(
            DateInput::from(String::from("2024-01-05")).resolve(),
            Ok(Some(expected))
        );
        assert_eq!(DateInput::from(Some("2024-01-05")).resolve(), Ok(Some(expected)));
        assert_eq!(DateInput::from(expected.date()).resolve(), Ok(Some(expected)));
    }

    #[test]
    fn test_resolve_whitespace_is_not_absent() {
        let input = DateInput::from("   ");
        assert!(!input.is_absent());
        assert_eq!(input.resolve(), Err(ParseError::EmptyInput));
        assert_eq!(input.to_date(), None);
    }

    #[test]
    fn test_resolve_invalid() {
        let input = DateInput::from("31/31/2024");
        assert!(matches!(input.resolve(), Err(ParseError::InvalidFormat(_))));
        assert_eq!(input.to_date(), None);
    }
}
