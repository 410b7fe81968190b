//! Income and expense ledgers.
//!
//! This module defines what the engine consumes:
//! - Transaction value objects and their payment statuses
//! - Master data (counterparties, categories, planned budgets)
//! - Immutable per-request snapshots
//! - The async facade that produces them

pub mod error;
pub mod snapshot;
pub mod source;
pub mod types;

pub use error::LedgerError;
pub use snapshot::{LedgerFilter, LedgerSnapshot};
pub use source::{InMemoryLedger, LedgerSource};
pub use types::{
    Category, Counterparty, CounterpartyRole, PaymentStatus, PlannedBudget, Transaction,
    TransactionKind,
};
