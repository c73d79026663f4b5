use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

macro_rules! calendar_newtype {
    ($name:ident, $doc:expr, $pattern:expr, $check:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parses a validated value from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                static PATTERN: OnceLock<Regex> = OnceLock::new();
                let s = value.into();
                let pattern = PATTERN.get_or_init(|| Regex::new($pattern).expect("invalid regex"));
                if !pattern.is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                let check: fn(&str) -> Result<(), String> = $check;
                if let Err(reason) = check(&s) {
                    return Err(ValidationError::InvalidCalendarValue {
                        field: stringify!($name),
                        value: s,
                        reason,
                    });
                }
                Ok(Self(s))
            }

            /// Borrows the underlying text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

calendar_newtype!(
    Timestamp,
    "UTC RFC3339 timestamp with `Z` suffix and second-or-finer precision.",
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?Z$",
    |s| DateTime::parse_from_rfc3339(s).map(|_| ()).map_err(|e| e.to_string())
);
calendar_newtype!(
    CalendarDate,
    "Calendar day (`YYYY-MM-DD`) naming a pending pool bucket.",
    r"^\d{4}-\d{2}-\d{2}$",
    |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|_| ()).map_err(|e| e.to_string())
);

impl Timestamp {
    /// Formats an instant the way block timestamps are written: UTC,
    /// millisecond precision, `Z` suffix.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// The calendar date component (the first ten characters).
    pub fn date(&self) -> CalendarDate {
        CalendarDate(self.0[..10].to_string())
    }
}

impl CalendarDate {
    /// The UTC calendar day of an instant.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.format("%Y-%m-%d").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_accepts_millis_and_seconds() {
        assert!(Timestamp::parse("2024-06-01T10:00:00.000Z").is_ok());
        assert!(Timestamp::parse("2024-06-01T10:00:00Z").is_ok());
        assert!(Timestamp::parse("2024-06-01T10:00:00.123456789Z").is_ok());
    }

    #[test]
    fn timestamp_rejects_offsets_and_garbage() {
        assert!(Timestamp::parse("2024-06-01T10:00:00+07:00").is_err());
        assert!(Timestamp::parse("2024-06-01 10:00:00Z").is_err());
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn timestamp_rejects_impossible_instants() {
        let err = Timestamp::parse("2024-02-30T10:00:00Z").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCalendarValue { .. }));
    }

    #[test]
    fn timestamp_date_is_prefix() {
        let ts = Timestamp::parse("2024-06-01T23:59:59.999Z").unwrap();
        assert_eq!(ts.date().as_str(), "2024-06-01");
    }

    #[test]
    fn from_datetime_uses_millisecond_precision() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        assert_eq!(
            Timestamp::from_datetime(instant).as_str(),
            "2024-06-01T10:00:00.000Z"
        );
        assert_eq!(CalendarDate::from_datetime(instant).as_str(), "2024-06-01");
    }

    #[test]
    fn calendar_dates_order_chronologically() {
        let a = CalendarDate::parse("2024-05-31").unwrap();
        let b = CalendarDate::parse("2024-06-01").unwrap();
        assert!(a < b);
        assert!(CalendarDate::parse("2024-13-01").is_err());
    }
}
