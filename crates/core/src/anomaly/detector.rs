//! Anomaly detector.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::types::{AnomalyFinding, AnomalyKind};
use crate::ledger::{Transaction, TransactionKind};
use crate::metrics::round_money;

/// Amounts above this many times the average are flagged.
pub const DEFAULT_MULTIPLIER: u32 = 3;

/// Flags unusual amounts and duplicate references.
///
/// Detection is deterministic: the same rows always give the same findings
/// in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnomalyDetector {
    multiplier: Decimal,
}

impl AnomalyDetector {
    /// Creates a detector with the given threshold multiplier.
    #[must_use]
    pub fn new(multiplier: u32) -> Self {
        Self {
            multiplier: Decimal::from(multiplier),
        }
    }

    /// Runs both passes; unusual amounts first, then duplicate references.
    ///
    /// Income and expense rows are evaluated separately even when mixed in
    /// one slice; a reference shared across the two ledgers is not a
    /// duplicate.
    #[must_use]
    pub fn detect(&self, transactions: &[Transaction]) -> Vec<AnomalyFinding> {
        let mut findings = self.unusual_amounts(transactions);
        findings.extend(Self::duplicate_references(transactions));
        findings
    }

    /// Rows whose amount exceeds `multiplier` times their ledger's average.
    #[must_use]
    pub fn unusual_amounts(&self, transactions: &[Transaction]) -> Vec<AnomalyFinding> {
        let mut findings = Vec::new();
        for kind in TransactionKind::ALL {
            let rows: Vec<&Transaction> =
                transactions.iter().filter(|t| t.kind() == kind).collect();
            if rows.is_empty() {
                continue;
            }
            let count = Decimal::from(rows.len());
            let total: Decimal = rows.iter().map(|t| t.amount).sum();
            let average = round_money(total / count);

            for tx in rows {
                if self.exceeds(tx.amount, count, total) {
                    findings.push(AnomalyFinding {
                        transaction_id: Some(tx.id),
                        kind: AnomalyKind::UnusualAmount,
                        description: format!(
                            "Unusually high {} amount {} (over {}x the average of {average})",
                            kind.label().to_lowercase(),
                            tx.amount,
                            self.multiplier
                        ),
                        amount: Some(tx.amount),
                        date: Some(tx.date),
                        transaction_type: kind,
                        reference_no: tx.reference_no.clone(),
                    });
                }
            }
        }
        findings
    }

    /// One finding per reference number used more than once in a ledger.
    #[must_use]
    pub fn duplicate_references(transactions: &[Transaction]) -> Vec<AnomalyFinding> {
        let mut seen: BTreeMap<(TransactionKind, &str), usize> = BTreeMap::new();
        for tx in transactions {
            if let Some(reference) = tx.reference() {
                *seen.entry((tx.kind(), reference)).or_default() += 1;
            }
        }

        seen.into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|((kind, reference), n)| AnomalyFinding {
                transaction_id: None,
                kind: AnomalyKind::DuplicateReference,
                description: format!(
                    "Duplicate reference number in {} transactions: {reference} ({n} occurrences)",
                    kind.label().to_lowercase()
                ),
                amount: None,
                date: None,
                transaction_type: kind,
                reference_no: Some(reference.to_string()),
            })
            .collect()
    }

    // amount > (total / count) * multiplier, without dividing.
    fn exceeds(&self, amount: Decimal, count: Decimal, total: Decimal) -> bool {
        match (amount.checked_mul(count), total.checked_mul(self.multiplier)) {
            (Some(lhs), Some(rhs)) => lhs > rhs,
            _ => amount > total / count * self.multiplier,
        }
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MULTIPLIER)
    }
}
