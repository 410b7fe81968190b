//! Budget overview service.

use rust_decimal::Decimal;

use super::types::{BudgetMonth, BudgetOverview, BudgetSection};
use crate::aggregate::{StatusFilter, sum_by_calendar_month};
use crate::ledger::{LedgerSnapshot, PlannedBudget, TransactionKind};
use crate::metrics::BudgetVariance;
use crate::period::PeriodError;

/// Compares planned budget lines with actual transactions.
pub struct BudgetService;

impl BudgetService {
    /// Builds the overview for `year` (or one `month` of it).
    ///
    /// `snapshot` must cover the whole year: the monthly rows always span
    /// January to December even when `month` narrows the totals. Actual
    /// amounts include unsettled transactions.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidMonth` for a month outside 1..=12.
    pub fn overview(
        year: i32,
        month: Option<u32>,
        snapshot: &LedgerSnapshot,
        budgets: &[PlannedBudget],
    ) -> Result<BudgetOverview, PeriodError> {
        if let Some(m) = month
            && !(1..=12).contains(&m)
        {
            return Err(PeriodError::InvalidMonth(m));
        }

        Ok(BudgetOverview {
            year,
            month,
            income: Self::section(TransactionKind::Income, year, month, snapshot, budgets),
            expense: Self::section(TransactionKind::Expense, year, month, snapshot, budgets),
        })
    }

    /// Variance for one ledger, signed so that positive is favorable.
    #[must_use]
    pub fn variance(kind: TransactionKind, budget: Decimal, actual: Decimal) -> BudgetVariance {
        match kind {
            TransactionKind::Income => BudgetVariance::for_income(budget, actual),
            TransactionKind::Expense => BudgetVariance::for_expense(budget, actual),
        }
    }

    fn section(
        kind: TransactionKind,
        year: i32,
        month: Option<u32>,
        snapshot: &LedgerSnapshot,
        budgets: &[PlannedBudget],
    ) -> BudgetSection {
        let mut planned = [Decimal::ZERO; 12];
        for line in budgets.iter().filter(|b| b.kind == kind && b.year == year) {
            if let Some(slot) = line
                .month
                .checked_sub(1)
                .and_then(|i| usize::try_from(i).ok())
                .and_then(|i| planned.get_mut(i))
            {
                *slot += line.amount;
            }
        }
        let actual = sum_by_calendar_month(snapshot.ledger(kind), year, StatusFilter::All);

        let monthly: Vec<BudgetMonth> = actual
            .iter()
            .zip(planned)
            .map(|(a, budget)| {
                let v = Self::variance(kind, budget, a.amount);
                BudgetMonth {
                    month: a.month,
                    budget,
                    actual: a.amount,
                    difference: v.difference,
                    completion_percent: v.completion_percent,
                }
            })
            .collect();

        let in_scope = |m: &&BudgetMonth| month.is_none_or(|wanted| m.month == wanted);
        let total_budget: Decimal = monthly.iter().filter(in_scope).map(|m| m.budget).sum();
        let total_actual: Decimal = monthly.iter().filter(in_scope).map(|m| m.actual).sum();
        let v = Self::variance(kind, total_budget, total_actual);

        BudgetSection {
            kind,
            total_budget,
            total_actual,
            difference: v.difference,
            completion_percent: v.completion_percent,
            variance_type: v.variance_type,
            monthly,
        }
    }
}
