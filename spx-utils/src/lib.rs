//! Shared utility functions for SPX crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{Datelike, NaiveDate};

    /// Date format used by FRED for observation dates and query parameters: "YYYY-MM-DD"
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format.
    ///
    /// Longer strings are accepted when their first ten characters are a
    /// "YYYY-MM-DD" date, e.g. "2024-03-01 00:00:00".
    pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
        let trimmed = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return Ok(date);
        }
        trimmed
            .get(..10)
            .and_then(|head| NaiveDate::parse_from_str(head, DATE_FORMAT).ok())
            .ok_or_else(|| DateError(s.to_string()))
    }

    /// The year key of a date string: its first four characters.
    ///
    /// Keys are fixed-width four-digit years, so comparing them as strings
    /// orders them the same way as comparing the years numerically.
    pub fn year_key(date: &str) -> &str {
        date.get(..4).unwrap_or(date)
    }

    /// Get the day-of-year (0-based) for a date string.
    /// Jan 1 = day 0, Dec 31 = day 364 (365 in leap years).
    pub fn day_of_year(date: &str) -> Result<u32, DateError> {
        let date = parse_date(date)?;
        let jan1 = NaiveDate::from_ymd_opt(date.year(), 1, 1)
            .ok_or_else(|| DateError(format_date(&date)))?;
        // whole calendar days, so Feb 29 just counts as another day
        let diff = (date - jan1).num_days();
        Ok(diff as u32)
    }

}

/// Error types
pub mod error {
    use std::fmt;

    /// A date string that could not be read as "YYYY-MM-DD".
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {:?} is not a YYYY-MM-DD date", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
