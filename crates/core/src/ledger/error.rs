//! Ledger error types.

use ledgerlens_shared::types::TransactionId;
use thiserror::Error;

/// Errors raised by the ledger facade or by snapshot validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A transaction violates a ledger invariant.
    #[error("Invalid transaction {id}: {reason}")]
    InvalidTransaction {
        /// Offending transaction.
        id: TransactionId,
        /// What is wrong with it.
        reason: String,
    },

    /// The backing store could not be read.
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    /// A serialized ledger could not be decoded.
    #[error("Malformed ledger data: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
