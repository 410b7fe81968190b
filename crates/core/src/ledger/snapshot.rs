//! Immutable ledger snapshots.

use ledgerlens_shared::types::{CategoryId, CounterpartyId};
use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use super::types::{Transaction, TransactionKind};
use crate::period::{DateRange, PeriodError};

/// Optional narrowing applied by the facade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFilter {
    /// Only this category.
    pub category_id: Option<CategoryId>,
    /// Only this customer or supplier.
    pub counterparty_id: Option<CounterpartyId>,
}

impl LedgerFilter {
    /// Matches everything.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            category_id: None,
            counterparty_id: None,
        }
    }

    /// Restricts to one category.
    #[must_use]
    pub const fn by_category(mut self, id: CategoryId) -> Self {
        self.category_id = Some(id);
        self
    }

    /// Restricts to one counterparty.
    #[must_use]
    pub const fn by_counterparty(mut self, id: CounterpartyId) -> Self {
        self.counterparty_id = Some(id);
        self
    }

    /// Returns true if the transaction passes every set criterion.
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.category_id.is_none_or(|id| tx.category_id == id)
            && self
                .counterparty_id
                .is_none_or(|id| tx.counterparty_id == Some(id))
    }
}

/// Income and expense rows for one date range, read once per request.
///
/// Every report function is a pure function of a snapshot, so "budget"
/// (all rows) and "actual" (settled rows) always come from the same data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Range the rows were fetched for.
    pub range: DateRange,
    /// Income rows.
    pub income: Vec<Transaction>,
    /// Expense rows.
    pub expense: Vec<Transaction>,
}

impl LedgerSnapshot {
    /// Creates a snapshot from rows already fetched for `range`.
    #[must_use]
    pub const fn new(
        range: DateRange,
        income: Vec<Transaction>,
        expense: Vec<Transaction>,
    ) -> Self {
        Self {
            range,
            income,
            expense,
        }
    }

    /// A snapshot with no rows.
    #[must_use]
    pub const fn empty(range: DateRange) -> Self {
        Self::new(range, Vec::new(), Vec::new())
    }

    /// Rows of one ledger.
    #[must_use]
    pub fn ledger(&self, kind: TransactionKind) -> &[Transaction] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
        }
    }

    /// Returns true if both ledgers are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expense.is_empty()
    }

    /// Sub-snapshot holding only rows dated within `range`.
    #[must_use]
    pub fn for_range(&self, range: DateRange) -> Self {
        let within = |rows: &[Transaction]| -> Vec<Transaction> {
            rows.iter()
                .filter(|tx| range.contains(tx.date))
                .cloned()
                .collect()
        };
        Self::new(range, within(&self.income), within(&self.expense))
    }

    /// Sub-snapshot for one calendar month.
    pub fn for_month(&self, year: i32, month: u32) -> Result<Self, PeriodError> {
        Ok(self.for_range(DateRange::month(year, month)?))
    }

    /// Sub-snapshot narrowed by a facade filter.
    #[must_use]
    pub fn filtered(&self, filter: &LedgerFilter) -> Self {
        let keep = |rows: &[Transaction]| -> Vec<Transaction> {
            rows.iter().filter(|tx| filter.matches(tx)).cloned().collect()
        };
        Self::new(self.range, keep(&self.income), keep(&self.expense))
    }

    /// Checks every row: valid amount, status matching its ledger, date in range.
    ///
    /// # Errors
    ///
    /// The first `InvalidTransaction` found.
    pub fn validate(&self) -> Result<(), LedgerError> {
        for kind in TransactionKind::ALL {
            for tx in self.ledger(kind) {
                tx.validate()?;
                if tx.kind() != kind {
                    return Err(LedgerError::InvalidTransaction {
                        id: tx.id,
                        reason: format!(
                            "status {:?} does not belong to the {kind} ledger",
                            tx.payment_status
                        ),
                    });
                }
                if !self.range.contains(tx.date) {
                    return Err(LedgerError::InvalidTransaction {
                        id: tx.id,
                        reason: format!("date {} is outside {}", tx.date, self.range),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::PaymentStatus;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(day: NaiveDate, status: PaymentStatus) -> Transaction {
        Transaction::new(day, dec!(10), status, CategoryId::new(), "Sales")
    }

    #[test]
    fn test_for_month_keeps_only_rows_in_month() {
        let snapshot = LedgerSnapshot::new(
            DateRange::year(2024).unwrap(),
            vec![
                tx(date(2024, 3, 1), PaymentStatus::Received),
                tx(date(2024, 4, 1), PaymentStatus::Pending),
            ],
            vec![tx(date(2024, 3, 31), PaymentStatus::Paid)],
        );

        let march = snapshot.for_month(2024, 3).unwrap();
        assert_eq!(march.income.len(), 1);
        assert_eq!(march.expense.len(), 1);
        assert_eq!(march.range, DateRange::month(2024, 3).unwrap());
    }

    #[test]
    fn test_validate_rejects_status_in_wrong_ledger() {
        let snapshot = LedgerSnapshot::new(
            DateRange::month(2024, 3).unwrap(),
            vec![tx(date(2024, 3, 1), PaymentStatus::Paid)],
            Vec::new(),
        );
        assert!(matches!(
            snapshot.validate(),
            Err(LedgerError::InvalidTransaction { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_amount_and_out_of_range_date() {
        let range = DateRange::month(2024, 3).unwrap();
        let mut negative = tx(date(2024, 3, 1), PaymentStatus::Received);
        negative.amount = dec!(-1);
        let negative = LedgerSnapshot::new(range, vec![negative], Vec::new());
        assert!(negative.validate().is_err());

        let outside = LedgerSnapshot::new(
            range,
            Vec::new(),
            vec![tx(date(2024, 4, 1), PaymentStatus::Unpaid)],
        );
        assert!(outside.validate().is_err());
    }

    #[test]
    fn test_filter_matches_category_and_counterparty() {
        let category = CategoryId::new();
        let customer = CounterpartyId::new();
        let row = Transaction::new(
            date(2024, 1, 5),
            dec!(5),
            PaymentStatus::Received,
            category,
            "Consulting",
        )
        .with_counterparty(customer, "Acme");

        assert!(LedgerFilter::new().matches(&row));
        assert!(LedgerFilter::new().by_category(category).matches(&row));
        assert!(
            LedgerFilter::new()
                .by_category(category)
                .by_counterparty(customer)
                .matches(&row)
        );
        assert!(
            !LedgerFilter::new()
                .by_counterparty(CounterpartyId::new())
                .matches(&row)
        );
    }
}
