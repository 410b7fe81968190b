//! Anomaly finding types.

use chrono::NaiveDate;
use ledgerlens_shared::types::TransactionId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::TransactionKind;

/// What was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyKind {
    /// Amount far above the ledger average.
    UnusualAmount,
    /// Reference number shared by several transactions.
    DuplicateReference,
}

/// One detected anomaly.
///
/// Unusual-amount findings point at a single transaction. Duplicate-reference
/// findings describe a group and carry only the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyFinding {
    /// Offending transaction, for single-row findings.
    pub transaction_id: Option<TransactionId>,
    /// Kind of anomaly.
    pub kind: AnomalyKind,
    /// Human-readable explanation.
    pub description: String,
    /// Transaction amount, for single-row findings.
    pub amount: Option<Decimal>,
    /// Transaction date, for single-row findings.
    pub date: Option<NaiveDate>,
    /// Ledger the finding came from.
    pub transaction_type: TransactionKind,
    /// Reference number involved.
    pub reference_no: Option<String>,
}
