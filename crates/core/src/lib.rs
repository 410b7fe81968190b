//! Reporting engine for Ledgerlens.
//!
//! This crate contains pure reporting logic with ZERO web or database dependencies.
//! Transactions come in through the [`ledger::LedgerSource`] facade; every
//! report is computed from an immutable snapshot.
//!
//! # Modules
//!
//! - `period` - Turning a year, month or quarter into a date range
//! - `ledger` - Transactions, master data and the ledger facade
//! - `aggregate` - Grouping and summing transactions
//! - `metrics` - Percentages and budget variance
//! - `aging` - Aging buckets for receivables and payables
//! - `anomaly` - Unusual amounts and duplicate references
//! - `budget` - Planned budgets vs actuals
//! - `reports` - Report assembly and the report service

pub mod aggregate;
pub mod aging;
pub mod anomaly;
pub mod budget;
pub mod ledger;
pub mod metrics;
pub mod period;
pub mod reports;
