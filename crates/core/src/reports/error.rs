//! Report error types.

use ledgerlens_shared::AppError;
use thiserror::Error;

use crate::ledger::LedgerError;
use crate::period::PeriodError;

/// Errors that can occur during report generation.
///
/// An empty ledger is never an error; it yields a zero-valued report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Year, month or date range is not acceptable.
    #[error("Invalid period: {0}")]
    InvalidPeriod(#[from] PeriodError),

    /// A detail report was requested for an unknown id.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (`customer`, `supplier`, `category`).
        entity: &'static str,
        /// Requested id.
        id: String,
    },

    /// The ledger facade failed or returned invalid rows.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Report assembly did not complete.
    #[error("Report assembly failed: {0}")]
    Internal(String),
}

impl ReportError {
    /// Returns true for caller mistakes (4xx-equivalent).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidPeriod(_) | Self::NotFound { .. })
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidPeriod(e) => Self::Validation(e.to_string()),
            ReportError::NotFound { .. } => Self::NotFound(err.to_string()),
            ReportError::Ledger(e) => Self::Ledger(e.to_string()),
            ReportError::Internal(msg) => Self::Internal(msg),
        }
    }
}
