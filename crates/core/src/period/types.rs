//! Period types.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::PeriodError;

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The whole calendar month.
    pub fn month(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or(PeriodError::OutOfRange(year))?;
        let end = last_day_of_month(year, month)?;
        Ok(Self { start, end })
    }

    /// `count` consecutive months starting at `first_month`.
    pub fn months_from(year: i32, first_month: u32, count: u32) -> Result<Self, PeriodError> {
        let first = Self::month(year, first_month)?;
        let last = Self::month(year, first_month + count.saturating_sub(1))?;
        Ok(Self {
            start: first.start,
            end: last.end,
        })
    }

    /// January 1 to December 31.
    pub fn year(year: i32) -> Result<Self, PeriodError> {
        Self::months_from(year, 1, 12)
    }

    /// Returns true if `date` falls within the range, bounds included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, bounds included.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Every `(year, month)` the range touches, in calendar order.
    #[must_use]
    pub fn months(&self) -> Vec<(i32, u32)> {
        let mut months = Vec::new();
        let (mut year, mut month) = (self.start.year(), self.start.month());
        while (year, month) <= (self.end.year(), self.end.month()) {
            months.push((year, month));
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }
        months
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate, PeriodError> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or(PeriodError::OutOfRange(year))
}

/// A loosely specified period as it arrives from a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// Calendar year. Defaults to the current year.
    pub year: Option<i32>,
    /// Month 1-12. Takes precedence over `quarter`.
    pub month: Option<u32>,
    /// Quarter 1-4. Out-of-range values are clamped to 1.
    pub quarter: Option<u32>,
}

impl PeriodQuery {
    /// An empty query: everything defaults to "current".
    #[must_use]
    pub const fn new() -> Self {
        Self {
            year: None,
            month: None,
            quarter: None,
        }
    }

    /// A specific month.
    #[must_use]
    pub const fn for_month(year: i32, month: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            quarter: None,
        }
    }

    /// A specific quarter.
    #[must_use]
    pub const fn for_quarter(year: i32, quarter: u32) -> Self {
        Self {
            year: Some(year),
            month: None,
            quarter: Some(quarter),
        }
    }

    /// A whole year.
    #[must_use]
    pub const fn for_year(year: i32) -> Self {
        Self {
            year: Some(year),
            month: None,
            quarter: None,
        }
    }
}

/// Shape of a resolved period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
    /// A single month (1-12).
    Month(u32),
    /// A quarter (1-4), after clamping.
    Quarter(u32),
    /// A whole calendar year.
    Year,
}

/// A period after defaults, validation and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPeriod {
    /// Calendar year.
    pub year: i32,
    /// Month, quarter or year.
    pub granularity: Granularity,
    /// Inclusive date range.
    pub range: DateRange,
}

impl ResolvedPeriod {
    /// Months covered, in order: 1, 3 or 12 entries.
    #[must_use]
    pub fn months(&self) -> Vec<u32> {
        self.range.months().into_iter().map(|(_, m)| m).collect()
    }
}
