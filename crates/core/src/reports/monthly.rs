//! Monthly, quarterly and yearly budget-vs-actual reports.

use std::collections::BTreeMap;

use ledgerlens_shared::types::CategoryId;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::warn;

use super::error::ReportError;
use super::types::{CategoryComparison, MonthlyReport, MonthlySummary, PeriodReport};
use crate::aggregate::SettlementTotals;
use crate::ledger::{LedgerSnapshot, Transaction, TransactionKind};
use crate::metrics::{percent_of, variance};
use crate::period::ResolvedPeriod;

/// Builds the report for one calendar month of `snapshot`.
///
/// Rows outside the month are ignored. The month's rows are validated
/// before anything is summed.
///
/// # Errors
///
/// `InvalidPeriod` for a bad month, `Ledger` when a row in the month is
/// invalid.
pub fn monthly_report(
    snapshot: &LedgerSnapshot,
    year: i32,
    month: u32,
) -> Result<MonthlyReport, ReportError> {
    let month_snapshot = snapshot.for_month(year, month)?;
    month_snapshot.validate()?;

    let income = SettlementTotals::of(&month_snapshot.income);
    let expense = SettlementTotals::of(&month_snapshot.expense);

    Ok(MonthlyReport {
        year,
        month,
        summary: MonthlySummary {
            total_income_budget: income.total,
            total_income_actual: income.settled,
            total_expense_budget: expense.total,
            total_expense_actual: expense.settled,
        },
        income_categories: compare_categories(month_snapshot.ledger(TransactionKind::Income)),
        expense_categories: compare_categories(month_snapshot.ledger(TransactionKind::Expense)),
    })
}

/// Replaces a failed month with an empty one, logging the failure.
pub fn degrade_to_zero(
    year: i32,
    month: u32,
    result: Result<MonthlyReport, ReportError>,
) -> MonthlyReport {
    result.unwrap_or_else(|e| {
        warn!(year, month, error = %e, "Month degraded to zero report");
        MonthlyReport::empty(year, month)
    })
}

/// Builds one report per month of `period`, in calendar order.
///
/// A month that fails is degraded to zero; the period report itself never
/// fails. With `parallel` set the months are computed on the rayon pool.
#[must_use]
pub fn period_report(
    snapshot: &LedgerSnapshot,
    period: &ResolvedPeriod,
    parallel: bool,
) -> PeriodReport {
    let year = period.year;
    let build = |month: u32| degrade_to_zero(year, month, monthly_report(snapshot, year, month));

    let months: Vec<MonthlyReport> = if parallel {
        period.months().into_par_iter().map(build).collect()
    } else {
        period.months().into_iter().map(build).collect()
    };

    let mut totals = MonthlySummary::default();
    for report in &months {
        totals += report.summary;
    }

    PeriodReport {
        year,
        granularity: period.granularity,
        range: period.range,
        totals,
        months,
    }
}

#[derive(Default)]
struct CategoryTally {
    name: String,
    budget: Decimal,
    actual: Decimal,
}

/// Budget (all rows) vs actual (settled rows) per category, largest actual first.
fn compare_categories(rows: &[Transaction]) -> Vec<CategoryComparison> {
    let mut tallies: BTreeMap<CategoryId, CategoryTally> = BTreeMap::new();
    for tx in rows {
        let tally = tallies.entry(tx.category_id).or_insert_with(|| CategoryTally {
            name: tx.category_name.clone(),
            ..CategoryTally::default()
        });
        tally.budget += tx.amount;
        if tx.is_settled() {
            tally.actual += tx.amount;
        }
    }
    let total_actual: Decimal = tallies.values().map(|t| t.actual).sum();

    let mut categories: Vec<CategoryComparison> = tallies
        .into_iter()
        .map(|(category_id, t)| CategoryComparison {
            category_id,
            category_name: t.name,
            budget_amount: t.budget,
            actual_amount: t.actual,
            difference: variance(t.actual, t.budget),
            percentage_of_total_actual: percent_of(t.actual, total_actual),
        })
        .collect();

    categories.sort_by(|a, b| {
        b.actual_amount
            .cmp(&a.actual_amount)
            .then_with(|| b.budget_amount.cmp(&a.budget_amount))
            .then_with(|| a.category_name.cmp(&b.category_name))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
    categories
}
