//! Period resolution.

use chrono::{Datelike, NaiveDate};

use super::error::PeriodError;
use super::types::{DateRange, Granularity, PeriodQuery, ResolvedPeriod};

/// Earliest reportable year unless configured otherwise.
pub const DEFAULT_MIN_YEAR: i32 = 2000;

/// Maps a quarter into 1..=4; anything outside becomes 1.
///
/// Months are validated strictly but quarters are not. Callers rely on
/// `quarter=7` silently meaning Q1.
#[must_use]
pub const fn clamp_quarter(quarter: u32) -> u32 {
    if matches!(quarter, 1..=4) { quarter } else { 1 }
}

/// Quarter (1-4) containing `month` (1-12).
#[must_use]
pub const fn quarter_of_month(month: u32) -> u32 {
    (month.saturating_sub(1)) / 3 + 1
}

/// Resolves loosely specified periods against an injected "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodResolver {
    today: NaiveDate,
    min_year: i32,
}

impl PeriodResolver {
    /// Creates a resolver that fills missing fields from `today`.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            today,
            min_year: DEFAULT_MIN_YEAR,
        }
    }

    /// Overrides the earliest accepted year.
    #[must_use]
    pub const fn with_min_year(mut self, min_year: i32) -> Self {
        self.min_year = min_year;
        self
    }

    /// The date used for defaults.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Resolves with month > quarter > year precedence.
    ///
    /// # Errors
    ///
    /// `InvalidYear` below the minimum year, `InvalidMonth` for an explicit
    /// month outside 1..=12.
    pub fn resolve(&self, query: PeriodQuery) -> Result<ResolvedPeriod, PeriodError> {
        let year = self.year_or_current(query.year)?;
        match (query.month, query.quarter) {
            (Some(month), _) => Self::month_period(year, month),
            (None, Some(quarter)) => Self::quarter_period(year, quarter),
            (None, None) => Self::year_period(year),
        }
    }

    /// Resolves a monthly request; a missing month means the current month.
    pub fn resolve_month(&self, query: PeriodQuery) -> Result<ResolvedPeriod, PeriodError> {
        let year = self.year_or_current(query.year)?;
        Self::month_period(year, query.month.unwrap_or_else(|| self.today.month()))
    }

    /// Resolves a quarterly request; a missing quarter means the current one.
    pub fn resolve_quarter(&self, query: PeriodQuery) -> Result<ResolvedPeriod, PeriodError> {
        let year = self.year_or_current(query.year)?;
        let quarter = query
            .quarter
            .unwrap_or_else(|| quarter_of_month(self.today.month()));
        Self::quarter_period(year, quarter)
    }

    /// Resolves a yearly request, ignoring month and quarter.
    pub fn resolve_year(&self, query: PeriodQuery) -> Result<ResolvedPeriod, PeriodError> {
        let year = self.year_or_current(query.year)?;
        Self::year_period(year)
    }

    /// Validates an explicit year.
    pub fn check_year(&self, year: i32) -> Result<i32, PeriodError> {
        if year < self.min_year {
            return Err(PeriodError::InvalidYear {
                year,
                min: self.min_year,
            });
        }
        Ok(year)
    }

    fn year_or_current(&self, year: Option<i32>) -> Result<i32, PeriodError> {
        self.check_year(year.unwrap_or_else(|| self.today.year()))
    }

    fn month_period(year: i32, month: u32) -> Result<ResolvedPeriod, PeriodError> {
        Ok(ResolvedPeriod {
            year,
            granularity: Granularity::Month(month),
            range: DateRange::month(year, month)?,
        })
    }

    fn quarter_period(year: i32, quarter: u32) -> Result<ResolvedPeriod, PeriodError> {
        let quarter = clamp_quarter(quarter);
        Ok(ResolvedPeriod {
            year,
            granularity: Granularity::Quarter(quarter),
            range: DateRange::months_from(year, (quarter - 1) * 3 + 1, 3)?,
        })
    }

    fn year_period(year: i32) -> Result<ResolvedPeriod, PeriodError> {
        Ok(ResolvedPeriod {
            year,
            granularity: Granularity::Year,
            range: DateRange::year(year)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn resolver() -> PeriodResolver {
        PeriodResolver::new(date(2024, 5, 17))
    }

    #[test]
    fn test_month_takes_precedence_over_quarter() {
        let query = PeriodQuery {
            year: Some(2024),
            month: Some(2),
            quarter: Some(3),
        };
        let period = resolver().resolve(query).unwrap();
        assert_eq!(period.granularity, Granularity::Month(2));
        assert_eq!(period.range.start, date(2024, 2, 1));
        assert_eq!(period.range.end, date(2024, 2, 29));
    }

    #[rstest]
    #[case(1, date(2024, 1, 1), date(2024, 3, 31))]
    #[case(2, date(2024, 4, 1), date(2024, 6, 30))]
    #[case(3, date(2024, 7, 1), date(2024, 9, 30))]
    #[case(4, date(2024, 10, 1), date(2024, 12, 31))]
    fn test_quarter_ranges(#[case] quarter: u32, #[case] start: NaiveDate, #[case] end: NaiveDate) {
        let period = resolver()
            .resolve(PeriodQuery::for_quarter(2024, quarter))
            .unwrap();
        assert_eq!(period.range, DateRange { start, end });
        assert_eq!(period.months().len(), 3);
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(7)]
    #[case(u32::MAX)]
    fn test_out_of_range_quarter_clamps_to_first(#[case] quarter: u32) {
        let period = resolver()
            .resolve(PeriodQuery::for_quarter(2024, quarter))
            .unwrap();
        assert_eq!(period.granularity, Granularity::Quarter(1));
        assert_eq!(period.range.start, date(2024, 1, 1));
        assert_eq!(period.range.end, date(2024, 3, 31));
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn test_explicit_bad_month_is_rejected(#[case] month: u32) {
        let err = resolver()
            .resolve(PeriodQuery::for_month(2024, month))
            .unwrap_err();
        assert_eq!(err, PeriodError::InvalidMonth(month));
    }

    #[test]
    fn test_year_below_minimum_is_rejected() {
        let err = resolver().resolve(PeriodQuery::for_year(1999)).unwrap_err();
        assert_eq!(
            err,
            PeriodError::InvalidYear {
                year: 1999,
                min: 2000
            }
        );
    }

    #[test]
    fn test_custom_minimum_year() {
        let resolver = resolver().with_min_year(1990);
        assert!(resolver.resolve(PeriodQuery::for_year(1995)).is_ok());
    }

    #[test]
    fn test_defaults_come_from_today() {
        let r = resolver();
        let year = r.resolve(PeriodQuery::new()).unwrap();
        assert_eq!(year.granularity, Granularity::Year);
        assert_eq!(year.range, DateRange::year(2024).unwrap());

        let month = r.resolve_month(PeriodQuery::new()).unwrap();
        assert_eq!(month.granularity, Granularity::Month(5));

        let quarter = r.resolve_quarter(PeriodQuery::new()).unwrap();
        assert_eq!(quarter.granularity, Granularity::Quarter(2));
    }

    #[test]
    fn test_resolve_year_ignores_month() {
        let period = resolver()
            .resolve_year(PeriodQuery::for_month(2023, 6))
            .unwrap();
        assert_eq!(period.granularity, Granularity::Year);
        assert_eq!(period.months(), (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_date_range_rejects_inverted_bounds() {
        let err = DateRange::new(date(2024, 3, 2), date(2024, 3, 1)).unwrap_err();
        assert!(matches!(err, PeriodError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_date_range_months_spans_years() {
        let range = DateRange::new(date(2023, 11, 15), date(2024, 2, 1)).unwrap();
        assert_eq!(
            range.months(),
            vec![(2023, 11), (2023, 12), (2024, 1), (2024, 2)]
        );
        assert!(range.contains(date(2023, 11, 15)));
        assert!(range.contains(date(2024, 2, 1)));
        assert!(!range.contains(date(2024, 2, 2)));
    }
}
