//! Budget overview types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::TransactionKind;
use crate::metrics::VarianceType;

/// Planned vs actual for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetMonth {
    /// Month 1-12.
    pub month: u32,
    /// Sum of planned budget lines.
    pub budget: Decimal,
    /// Sum of transactions, settled or not.
    pub actual: Decimal,
    /// Positive when favorable.
    pub difference: Decimal,
    /// `actual / budget * 100`, zero for a zero budget.
    pub completion_percent: Decimal,
}

/// Planned vs actual for one ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSection {
    /// Income or expense.
    pub kind: TransactionKind,
    /// Planned total for the requested scope.
    pub total_budget: Decimal,
    /// Actual total for the requested scope.
    pub total_actual: Decimal,
    /// `actual - budget` for income, `budget - actual` for expense.
    pub difference: Decimal,
    /// Completion percentage.
    pub completion_percent: Decimal,
    /// Favorable, unfavorable or on plan.
    pub variance_type: VarianceType,
    /// All twelve months of the year, zero-filled.
    pub monthly: Vec<BudgetMonth>,
}

/// Budget overview for a year, optionally narrowed to one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetOverview {
    /// Calendar year.
    pub year: i32,
    /// Month the totals are restricted to, if any.
    pub month: Option<u32>,
    /// Income targets vs received and pending income.
    pub income: BudgetSection,
    /// Expense ceilings vs paid and unpaid expense.
    pub expense: BudgetSection,
}
