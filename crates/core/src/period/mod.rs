//! Reporting periods.
//!
//! A request names a period loosely (a year, maybe a month or a quarter).
//! The resolver turns that into exactly one inclusive calendar range.

pub mod error;
pub mod resolver;
pub mod types;


pub use error::PeriodError;
pub use resolver::{DEFAULT_MIN_YEAR, PeriodResolver, clamp_quarter, quarter_of_month};
pub use types::{DateRange, Granularity, PeriodQuery, ResolvedPeriod};
