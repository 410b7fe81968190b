//! Category breakdown and period-over-period comparison.

use std::collections::BTreeMap;

use ledgerlens_shared::types::CategoryId;
use rust_decimal::Decimal;

use super::types::{
    CategoryBreakdown, CategoryBreakdownOptions, CategoryChange, CategorySort, PeriodComparison,
    TotalChange,
};
use crate::aggregate::{StatusFilter, total};
use crate::ledger::{Category, LedgerSnapshot, Transaction, TransactionKind};
use crate::metrics::{percent_of, variance};

fn sums_by_category(rows: &[Transaction]) -> BTreeMap<CategoryId, (String, Decimal)> {
    let mut sums: BTreeMap<CategoryId, (String, Decimal)> = BTreeMap::new();
    for tx in rows {
        sums.entry(tx.category_id)
            .or_insert_with(|| (tx.category_name.clone(), Decimal::ZERO))
            .1 += tx.amount;
    }
    sums
}

/// Amount and share of every category of one ledger.
///
/// Known categories of `kind` are listed even without transactions;
/// categories only seen on transactions are added under their transaction
/// name.
#[must_use]
pub fn category_breakdown(
    snapshot: &LedgerSnapshot,
    kind: TransactionKind,
    categories: &[Category],
    options: CategoryBreakdownOptions,
) -> Vec<CategoryBreakdown> {
    let rows = snapshot.ledger(kind);
    let ledger_total = total(rows, StatusFilter::All);

    let mut sums = sums_by_category(rows);
    for category in categories.iter().filter(|c| c.kind == kind) {
        let entry = sums
            .entry(category.id)
            .or_insert_with(|| (String::new(), Decimal::ZERO));
        entry.0.clone_from(&category.name);
    }

    let mut breakdown: Vec<CategoryBreakdown> = sums
        .into_iter()
        .filter(|(_, (_, amount))| !options.active_only || !amount.is_zero())
        .map(|(category_id, (category_name, amount))| CategoryBreakdown {
            category_id,
            category_name,
            amount,
            percentage: percent_of(amount, ledger_total),
        })
        .collect();

    breakdown.sort_by(|a, b| {
        let primary = match options.sort {
            CategorySort::Amount => b.amount.cmp(&a.amount),
            CategorySort::Percentage => b.percentage.cmp(&a.percentage),
            CategorySort::Name => std::cmp::Ordering::Equal,
        };
        primary
            .then_with(|| a.category_name.cmp(&b.category_name))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
    breakdown
}

fn total_change(current: Decimal, previous: Decimal) -> TotalChange {
    let difference = variance(current, previous);
    TotalChange {
        current,
        previous,
        difference,
        percentage_change: percent_of(difference, previous),
    }
}

fn category_changes(current: &[Transaction], previous: &[Transaction]) -> Vec<CategoryChange> {
    let now = sums_by_category(current);
    let before = sums_by_category(previous);
    let now_total: Decimal = now.values().map(|(_, a)| *a).sum();
    let before_total: Decimal = before.values().map(|(_, a)| *a).sum();

    let mut ids: Vec<CategoryId> = now.keys().chain(before.keys()).copied().collect();
    ids.sort_unstable();
    ids.dedup();

    let mut changes: Vec<CategoryChange> = ids
        .into_iter()
        .map(|id| {
            let current = now.get(&id);
            let previous = before.get(&id);
            let current_amount = current.map_or(Decimal::ZERO, |(_, a)| *a);
            let previous_amount = previous.map_or(Decimal::ZERO, |(_, a)| *a);
            let difference = variance(current_amount, previous_amount);
            CategoryChange {
                category_id: id,
                category_name: current
                    .or(previous)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default(),
                current_amount,
                previous_amount,
                difference,
                percentage_change: percent_of(difference, previous_amount),
                current_percentage: percent_of(current_amount, now_total),
                previous_percentage: percent_of(previous_amount, before_total),
                is_new: previous.is_none(),
                is_removed: current.is_none(),
            }
        })
        .collect();

    changes.sort_by(|a, b| {
        b.current_amount
            .cmp(&a.current_amount)
            .then_with(|| b.previous_amount.cmp(&a.previous_amount))
            .then_with(|| a.category_name.cmp(&b.category_name))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
    changes
}

/// Compares two periods category by category.
///
/// A category with no previous amount has a zero percentage change and is
/// flagged `is_new`.
#[must_use]
pub fn compare_periods(current: &LedgerSnapshot, previous: &LedgerSnapshot) -> PeriodComparison {
    let side = |kind: TransactionKind| {
        total_change(
            total(current.ledger(kind), StatusFilter::All),
            total(previous.ledger(kind), StatusFilter::All),
        )
    };

    PeriodComparison {
        current_range: current.range,
        previous_range: previous.range,
        income: side(TransactionKind::Income),
        expense: side(TransactionKind::Expense),
        income_categories: category_changes(&current.income, &previous.income),
        expense_categories: category_changes(&current.expense, &previous.expense),
    }
}
