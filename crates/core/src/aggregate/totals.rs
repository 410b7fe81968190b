//! Fixed-shape totals: per calendar month and per settlement state.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::group::{StatusFilter, Tally};
use crate::ledger::Transaction;

/// One month of a zero-filled year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotal {
    /// Month 1-12.
    pub month: u32,
    /// Sum of amounts.
    pub amount: Decimal,
    /// Number of rows.
    pub count: usize,
}

/// Sums `year`'s rows by month. Always returns 12 entries, January first.
pub fn sum_by_calendar_month<'a, I>(
    transactions: I,
    year: i32,
    filter: StatusFilter,
) -> Vec<MonthTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months = [Tally::default(); 12];
    for tx in transactions {
        if tx.date.year() != year || !filter.matches(tx) {
            continue;
        }
        // month0() is always 0..=11
        if let Some(slot) = usize::try_from(tx.date.month0())
            .ok()
            .and_then(|i| months.get_mut(i))
        {
            slot.add(tx.amount);
        }
    }

    (1..=12)
        .zip(months)
        .map(|(month, tally)| MonthTotal {
            month,
            amount: tally.amount,
            count: tally.count,
        })
        .collect()
}

/// All / settled / unsettled sums of one ledger, taken in one pass.
///
/// `total == settled + unsettled` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTotals {
    /// Every row ("budget").
    pub total: Decimal,
    /// Received or paid ("actual").
    pub settled: Decimal,
    /// Pending or unpaid.
    pub unsettled: Decimal,
    /// Number of rows.
    pub count: usize,
}

impl SettlementTotals {
    /// Sums the rows.
    pub fn of<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals = Self::default();
        for tx in transactions {
            totals.total += tx.amount;
            totals.count += 1;
            if tx.is_settled() {
                totals.settled += tx.amount;
            } else {
                totals.unsettled += tx.amount;
            }
        }
        totals
    }
}
