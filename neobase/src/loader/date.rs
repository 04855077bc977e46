//! Reference date used to decide which rows are active.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error returned when a reference date is not `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid reference date '{0}': expected YYYY-MM-DD")]
pub struct DateError(pub String);

/// An ISO `YYYY-MM-DD` date.
///
/// Validity windows in the data are compared as strings, which is sound
/// because zero-padded ISO dates sort lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceDate(String);

impl ReferenceDate {
    /// Today, in local time.
    pub fn today() -> Self {
        Self(chrono::Local::now().format(DATE_FORMAT).to_string())
    }

    /// Parse and normalise a date (`2012-1-1` becomes `2012-01-01`).
    pub fn parse(value: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
            .map(|date| Self(date.format(DATE_FORMAT).to_string()))
            .map_err(|_| DateError(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the date falls inside `[valid_from, valid_until]`.
    ///
    /// An empty bound is open.
    pub fn is_within(&self, valid_from: &str, valid_until: &str) -> bool {
        let date = self.as_str();
        if !valid_from.is_empty() && date < valid_from {
            return false;
        }
        if !valid_until.is_empty() && date > valid_until {
            return false;
        }
        true
    }
}

impl Default for ReferenceDate {
    fn default() -> Self {
        Self::today()
    }
}

impl FromStr for ReferenceDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ReferenceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalises() {
        assert_eq!(ReferenceDate::parse("2012-1-1").unwrap().as_str(), "2012-01-01");
        assert_eq!(ReferenceDate::parse(" 2020-01-01 ").unwrap().as_str(), "2020-01-01");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ReferenceDate::parse("yesterday").is_err());
        assert!(ReferenceDate::parse("2020-13-01").is_err());
        assert_eq!(
            "01/02/2020".parse::<ReferenceDate>(),
            Err(DateError("01/02/2020".to_string()))
        );
    }

    #[test]
    fn test_today_is_well_formed() {
        let today = ReferenceDate::today();
        assert_eq!(today.as_str().len(), 10);
        assert!(ReferenceDate::parse(today.as_str()).is_ok());
    }

    #[test]
    fn test_validity_window() {
        let date = ReferenceDate::parse("2020-01-01").unwrap();
        assert!(date.is_within("", ""));
        assert!(date.is_within("2020-01-01", "2020-01-01"));
        assert!(!date.is_within("", "2015-01-01"));
        assert!(!date.is_within("2021-06-01", ""));

        let past = ReferenceDate::parse("2012-01-01").unwrap();
        assert!(past.is_within("", "2015-01-01"));
    }
}
