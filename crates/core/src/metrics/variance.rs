//! Budget variance calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::percent::percent_of;

/// Type of variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VarianceType {
    /// Better than planned.
    Favorable,
    /// Worse than planned.
    Unfavorable,
    /// Exactly on plan.
    None,
}

impl VarianceType {
    fn of(difference: Decimal) -> Self {
        match difference.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => Self::Favorable,
            std::cmp::Ordering::Less => Self::Unfavorable,
            std::cmp::Ordering::Equal => Self::None,
        }
    }
}

/// Budget vs actual variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetVariance {
    /// Planned amount.
    pub budget_amount: Decimal,
    /// Actual amount.
    pub actual_amount: Decimal,
    /// Signed so that positive is favorable.
    pub difference: Decimal,
    /// `actual / budget * 100`, zero for a zero budget.
    pub completion_percent: Decimal,
    /// Type of variance.
    pub variance_type: VarianceType,
}

impl BudgetVariance {
    /// Calculates variance for an income target.
    ///
    /// For income: over target is favorable, `difference = actual - budget`.
    #[must_use]
    pub fn for_income(budget: Decimal, actual: Decimal) -> Self {
        Self::build(budget, actual, actual - budget)
    }

    /// Calculates variance for an expense ceiling.
    ///
    /// For expenses: under budget is favorable, `difference = budget - actual`.
    #[must_use]
    pub fn for_expense(budget: Decimal, actual: Decimal) -> Self {
        Self::build(budget, actual, budget - actual)
    }

    fn build(budget: Decimal, actual: Decimal, difference: Decimal) -> Self {
        Self {
            budget_amount: budget,
            actual_amount: actual,
            difference,
            completion_percent: percent_of(actual, budget),
            variance_type: VarianceType::of(difference),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_expense_under_budget_is_favorable() {
        let v = BudgetVariance::for_expense(dec!(1000), dec!(800));

        assert_eq!(v.difference, dec!(200));
        assert_eq!(v.completion_percent, dec!(80.00));
        assert_eq!(v.variance_type, VarianceType::Favorable);
    }

    #[test]
    fn test_expense_over_budget_is_unfavorable() {
        let v = BudgetVariance::for_expense(dec!(1000), dec!(1200));

        assert_eq!(v.difference, dec!(-200));
        assert_eq!(v.completion_percent, dec!(120.00));
        assert_eq!(v.variance_type, VarianceType::Unfavorable);
    }

    #[test]
    fn test_income_over_target_is_favorable() {
        let v = BudgetVariance::for_income(dec!(1000), dec!(1200));

        assert_eq!(v.difference, dec!(200));
        assert_eq!(v.variance_type, VarianceType::Favorable);
    }

    #[test]
    fn test_income_under_target_is_unfavorable() {
        let v = BudgetVariance::for_income(dec!(1000), dec!(800));

        assert_eq!(v.difference, dec!(-200));
        assert_eq!(v.variance_type, VarianceType::Unfavorable);
    }

    #[test]
    fn test_on_budget() {
        let v = BudgetVariance::for_expense(dec!(1000), dec!(1000));

        assert_eq!(v.difference, dec!(0));
        assert_eq!(v.variance_type, VarianceType::None);
    }

    #[test]
    fn test_zero_budget_completion() {
        let v = BudgetVariance::for_income(dec!(0), dec!(500));

        assert_eq!(v.completion_percent, dec!(0));
        assert_eq!(v.difference, dec!(500));
    }
}
