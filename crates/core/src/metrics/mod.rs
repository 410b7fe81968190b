//! Percentage and variance arithmetic.
//!
//! Every share-of-total and completion figure in every report goes through
//! [`percent_of`], so the zero-denominator rule is the same everywhere.

pub mod percent;
pub mod variance;


pub use percent::{percent_of, round_money, variance};
pub use variance::{BudgetVariance, VarianceType};
