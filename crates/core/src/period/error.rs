//! Period error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while resolving a reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Year is below the earliest reportable year.
    #[error("Invalid year {year}: must be {min} or later")]
    InvalidYear {
        /// Requested year.
        year: i32,
        /// Earliest accepted year.
        min: i32,
    },

    /// Explicit month is outside 1..=12.
    #[error("Invalid month {0}: must be between 1 and 12")]
    InvalidMonth(u32),

    /// Start date is after end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Year cannot be represented as a calendar date.
    #[error("Year {0} is out of the supported calendar range")]
    OutOfRange(i32),
}
