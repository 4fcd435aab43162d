//! Calendar arithmetic and coverage periods
//!
//! Vehicle depreciation is priced on calendar months and calendar years
//! (not elapsed days), and policy activity is an inclusive
//! `[start, end]` window. Both live here so every crate counts time the
//! same way.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Date arithmetic out of range: {0}")]
    OutOfRange(String),
}

/// Calendar month difference between two dates, ignoring the day of month
///
/// `months_between(2024-01-31, 2024-02-01)` is 1. The result is negative
/// when `to` falls in an earlier month than `from`.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

/// Calendar year difference between two dates, ignoring month and day
pub fn years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    to.year() - from.year()
}

/// Returns the instant exactly `months` calendar months before `at`
///
/// Day-of-month overflow is clamped to the last day of the target month
/// (31 March minus one month is 29 February in a leap year).
pub fn months_before(at: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>, TemporalError> {
    at.checked_sub_months(Months::new(months))
        .ok_or_else(|| TemporalError::OutOfRange(format!("{} minus {} months", at, months)))
}

/// The period during which a policy provides cover
///
/// Both bounds are inclusive: a claim decided exactly at `end` is still
/// inside the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveragePeriod {
    /// First instant of cover
    pub start: DateTime<Utc>,
    /// Last instant of cover
    pub end: DateTime<Utc>,
}

impl CoveragePeriod {
    /// Creates a new coverage period
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a period of `months` calendar months starting at `start`
    pub fn for_months(start: DateTime<Utc>, months: u32) -> Result<Self, TemporalError> {
        let end = start
            .checked_add_months(Months::new(months))
            .ok_or_else(|| TemporalError::OutOfRange(format!("{} plus {} months", start, months)))?;
        Self::new(start, end)
    }

    /// Returns true if `at` falls within the period, bounds included
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_months_between_ignores_day() {
        assert_eq!(months_between(date(2024, 1, 31), date(2024, 2, 1)), 1);
        assert_eq!(months_between(date(2023, 11, 1), date(2024, 12, 31)), 13);
        assert_eq!(months_between(date(2024, 5, 1), date(2024, 3, 1)), -2);
    }

    #[test]
    fn test_years_between_is_calendar_years() {
        assert_eq!(years_between(date(2020, 12, 31), date(2025, 1, 1)), 5);
        assert_eq!(years_between(date(2024, 1, 1), date(2024, 12, 31)), 0);
    }

    #[test]
    fn test_coverage_period_bounds_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let period = CoveragePeriod::for_months(start, 12).unwrap();

        assert!(period.contains(start));
        assert!(period.contains(period.end));
        assert!(!period.contains(period.end + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_coverage_period_rejects_inverted_bounds() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            CoveragePeriod::new(start, end),
            Err(TemporalError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_months_before_clamps_day() {
        let at = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let earlier = months_before(at, 1).unwrap();
        assert_eq!(earlier.date_naive(), date(2024, 2, 29));
    }
}
