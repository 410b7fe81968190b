//! Grouping transactions by a dimension.

use std::collections::BTreeMap;

use chrono::Datelike;
use ledgerlens_shared::types::{CategoryId, CounterpartyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::Transaction;

/// Which payment statuses take part in a sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    /// Every transaction ("budget").
    #[default]
    All,
    /// Received income and paid expense ("actual").
    Settled,
    /// Pending income and unpaid expense (receivables/payables).
    Unsettled,
}

impl StatusFilter {
    /// Returns true if the transaction passes.
    #[must_use]
    pub const fn matches(self, tx: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Settled => tx.is_settled(),
            Self::Unsettled => !tx.is_settled(),
        }
    }
}

/// Summed amount and row count for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Sum of amounts.
    pub amount: Decimal,
    /// Number of rows.
    pub count: usize,
}

impl Tally {
    /// Adds one row.
    pub fn add(&mut self, amount: Decimal) {
        self.amount += amount;
        self.count += 1;
    }
}

impl std::ops::AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        self.amount += rhs.amount;
        self.count += rhs.count;
    }
}

/// Groups transactions by `key_fn` and sums each group.
///
/// The filter is applied before grouping. Rows for which `key_fn` returns
/// `None` are skipped (e.g. income with no customer when grouping by
/// counterparty). Decimal addition is exact, so row order never changes a
/// total.
pub fn aggregate<'a, K, I, F>(
    transactions: I,
    mut key_fn: F,
    filter: StatusFilter,
) -> BTreeMap<K, Tally>
where
    K: Ord,
    I: IntoIterator<Item = &'a Transaction>,
    F: FnMut(&Transaction) -> Option<K>,
{
    let mut groups: BTreeMap<K, Tally> = BTreeMap::new();
    for tx in transactions {
        if !filter.matches(tx) {
            continue;
        }
        if let Some(key) = key_fn(tx) {
            groups.entry(key).or_default().add(tx.amount);
        }
    }
    groups
}

/// Groups by customer or supplier.
#[must_use]
pub fn by_counterparty(tx: &Transaction) -> Option<CounterpartyId> {
    tx.counterparty_id
}

/// Groups by category.
#[must_use]
pub fn by_category(tx: &Transaction) -> Option<CategoryId> {
    Some(tx.category_id)
}

/// Groups by `(year, month)`.
#[must_use]
pub fn by_calendar_month(tx: &Transaction) -> Option<(i32, u32)> {
    Some((tx.date.year(), tx.date.month()))
}

/// Sum of amounts passing the filter.
pub fn total<'a, I>(transactions: I, filter: StatusFilter) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|tx| filter.matches(tx))
        .map(|tx| tx.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::PaymentStatus;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn row(
        month: u32,
        amount: Decimal,
        status: PaymentStatus,
        category: CategoryId,
    ) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, month, 10).unwrap(),
            amount,
            status,
            category,
            "Sales",
        )
    }

    #[test]
    fn test_filter_is_applied_before_grouping() {
        let sales = CategoryId::new();
        let rows = vec![
            row(1, dec!(100), PaymentStatus::Received, sales),
            row(1, dec!(50), PaymentStatus::Pending, sales),
        ];

        let all = aggregate(&rows, by_category, StatusFilter::All);
        let settled = aggregate(&rows, by_category, StatusFilter::Settled);
        let unsettled = aggregate(&rows, by_category, StatusFilter::Unsettled);

        assert_eq!(all[&sales], Tally { amount: dec!(150), count: 2 });
        assert_eq!(settled[&sales], Tally { amount: dec!(100), count: 1 });
        assert_eq!(unsettled[&sales], Tally { amount: dec!(50), count: 1 });
    }

    #[test]
    fn test_rows_without_key_are_skipped() {
        let acme = CounterpartyId::new();
        let rows = vec![
            row(2, dec!(10), PaymentStatus::Paid, CategoryId::new())
                .with_counterparty(acme, "Acme"),
            row(2, dec!(99), PaymentStatus::Paid, CategoryId::new()),
        ];

        let groups = aggregate(&rows, by_counterparty, StatusFilter::All);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&acme].amount, dec!(10));
    }

    #[test]
    fn test_calendar_month_keys_are_ordered() {
        let c = CategoryId::new();
        let rows = vec![
            row(3, dec!(1), PaymentStatus::Received, c),
            row(1, dec!(2), PaymentStatus::Received, c),
            row(3, dec!(3), PaymentStatus::Pending, c),
        ];
        let groups = aggregate(&rows, by_calendar_month, StatusFilter::All);
        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec![(2024, 1), (2024, 3)]);
        assert_eq!(groups[&(2024, 3)].amount, dec!(4));
        assert_eq!(total(&rows, StatusFilter::Unsettled), dec!(3));
    }
}
