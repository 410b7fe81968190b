//! Transaction anomaly detection.
//!
//! Two independent passes over the same rows:
//! - unusually large amounts relative to the ledger average
//! - reference numbers used more than once within one ledger

pub mod detector;
pub mod types;


pub use detector::{AnomalyDetector, DEFAULT_MULTIPLIER};
pub use types::{AnomalyFinding, AnomalyKind};
