//! Property-based tests for budget module.

use chrono::NaiveDate;
use ledgerlens_shared::types::{BudgetId, CategoryId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::BudgetService;
use crate::ledger::{LedgerSnapshot, PaymentStatus, PlannedBudget, Transaction, TransactionKind};
use crate::metrics::VarianceType;
use crate::period::DateRange;

fn arb_month_amounts() -> impl Strategy<Value = Vec<(u32, i64)>> {
    prop::collection::vec((1u32..=12, 0i64..1_000_000), 0..30)
}

proptest! {
    /// Feature: budget-overview, Property 1: Monthly Rows Partition The Year
    /// Twelve rows whose budgets and actuals add up to the yearly totals.
    #[test]
    fn test_monthly_rows_sum_to_year(
        planned in arb_month_amounts(),
        actual in arb_month_amounts(),
    ) {
        let budgets: Vec<PlannedBudget> = planned
            .iter()
            .map(|&(month, amount)| PlannedBudget {
                id: BudgetId::new(),
                category_id: CategoryId::new(),
                kind: TransactionKind::Expense,
                year: 2024,
                month,
                amount: Decimal::from(amount),
            })
            .collect();
        let expense: Vec<Transaction> = actual
            .iter()
            .map(|&(month, amount)| Transaction::new(
                NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
                Decimal::from(amount),
                PaymentStatus::Unpaid,
                CategoryId::new(),
                "Rent",
            ))
            .collect();
        let snapshot = LedgerSnapshot::new(DateRange::year(2024).unwrap(), Vec::new(), expense);

        let overview = BudgetService::overview(2024, None, &snapshot, &budgets).unwrap();
        let section = overview.expense;

        prop_assert_eq!(section.monthly.len(), 12);
        let budget: Decimal = section.monthly.iter().map(|m| m.budget).sum();
        let spent: Decimal = section.monthly.iter().map(|m| m.actual).sum();
        prop_assert_eq!(budget, section.total_budget);
        prop_assert_eq!(spent, section.total_actual);
        prop_assert_eq!(section.difference, section.total_budget - section.total_actual);

        // Expense: under budget is favorable
        if section.difference > Decimal::ZERO {
            prop_assert_eq!(section.variance_type, VarianceType::Favorable);
        } else if section.difference < Decimal::ZERO {
            prop_assert_eq!(section.variance_type, VarianceType::Unfavorable);
        } else {
            prop_assert_eq!(section.variance_type, VarianceType::None);
        }
    }
}
