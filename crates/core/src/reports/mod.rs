//! Financial report generation.
//!
//! Every report is a pure function of an immutable [`LedgerSnapshot`]:
//! - Monthly, quarterly and yearly budget-vs-actual reports
//! - Customer and supplier contribution
//! - Receivables, payables, aging and anomaly findings
//! - Cash flow, category breakdown and period comparison
//!
//! [`ReportService`] resolves periods and fetches snapshots through a
//! [`LedgerSource`](crate::ledger::LedgerSource).
//!
//! [`LedgerSnapshot`]: crate::ledger::LedgerSnapshot

pub mod cash_flow;
pub mod category;
pub mod counterparty;
pub mod error;
pub mod monthly;
pub mod receivable;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use cash_flow::cash_flow_report;
pub use category::{category_breakdown, compare_periods};
pub use counterparty::{
    CounterpartySort, counterparty_detail, counterparty_report, counterparty_reports,
    counterparty_summary,
};
pub use error::ReportError;
pub use monthly::{degrade_to_zero, monthly_report, period_report};
pub use receivable::{
    receivable_payable_chart, receivable_payable_report, yearly_receivable_payable,
};
pub use service::ReportService;
pub use types::*;
