//! Grouping and summing transactions.
//!
//! All sums use exact decimal addition. Budget-style totals (every row)
//! and actual-style totals (settled rows) are always taken from the same
//! input slice.

pub mod group;
pub mod totals;


pub use group::{
    StatusFilter, Tally, aggregate, by_calendar_month, by_category, by_counterparty, total,
};
pub use totals::{MonthTotal, SettlementTotals, sum_by_calendar_month};
