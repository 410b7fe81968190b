//! Property-based tests for reports module.

use chrono::NaiveDate;
use ledgerlens_shared::types::CategoryId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::cash_flow::cash_flow_report;
use super::counterparty::{CounterpartySort, counterparty_summary};
use super::monthly::{monthly_report, period_report};
use super::receivable::receivable_payable_chart;
use crate::ledger::{Counterparty, CounterpartyRole, LedgerSnapshot, PaymentStatus, Transaction};
use crate::period::{DateRange, PeriodQuery, PeriodResolver};

fn arb_status(income: bool) -> impl Strategy<Value = PaymentStatus> {
    let (settled, unsettled) = if income {
        (PaymentStatus::Received, PaymentStatus::Pending)
    } else {
        (PaymentStatus::Paid, PaymentStatus::Unpaid)
    };
    prop_oneof![Just(settled), Just(unsettled)]
}

/// Rows dated anywhere in 2024, spread over three categories.
fn arb_rows(income: bool) -> impl Strategy<Value = Vec<Transaction>> {
    let categories = [CategoryId::new(), CategoryId::new(), CategoryId::new()];
    prop::collection::vec(
        (1u32..=12, 1u32..=28, 0i64..1_000_000, 0u32..3, arb_status(income), 0usize..3),
        0..40,
    )
    .prop_map(move |rows| {
        rows.into_iter()
            .map(|(m, d, cents, scale, status, c)| {
                Transaction::new(
                    NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
                    Decimal::new(cents, scale),
                    status,
                    categories[c],
                    format!("Category {c}"),
                )
            })
            .collect()
    })
}

fn year_snapshot(income: Vec<Transaction>, expense: Vec<Transaction>) -> LedgerSnapshot {
    LedgerSnapshot::new(DateRange::year(2024).unwrap(), income, expense)
}

proptest! {
    /// Feature: financial-reports, Property 1: Budget Equals Settled Plus Unsettled
    /// Budget and actual come from one snapshot, so budget is always the sum of
    /// settled and unsettled rows and never below actual.
    #[test]
    fn test_budget_is_settled_plus_unsettled(
        income in arb_rows(true),
        expense in arb_rows(false),
        month in 1u32..=12,
    ) {
        let snapshot = year_snapshot(income, expense);
        let report = monthly_report(&snapshot, 2024, month).unwrap();

        let in_month = |tx: &&Transaction| chrono::Datelike::month(&tx.date) == month;
        let received: Decimal = snapshot.income.iter().filter(in_month)
            .filter(|t| t.payment_status == PaymentStatus::Received).map(|t| t.amount).sum();
        let pending: Decimal = snapshot.income.iter().filter(in_month)
            .filter(|t| t.payment_status == PaymentStatus::Pending).map(|t| t.amount).sum();

        prop_assert_eq!(report.summary.total_income_actual, received);
        prop_assert_eq!(report.summary.total_income_budget, received + pending);
        prop_assert!(report.summary.total_expense_budget >= report.summary.total_expense_actual);

        let category_budget: Decimal =
            report.income_categories.iter().map(|c| c.budget_amount).sum();
        prop_assert_eq!(category_budget, report.summary.total_income_budget);
        for pair in report.expense_categories.windows(2) {
            prop_assert!(pair[0].actual_amount >= pair[1].actual_amount);
        }
    }

    /// Feature: financial-reports, Property 2: Multi-Month Reports Are Zero-Filled
    /// A quarter always has 3 months and a year 12, in order, whatever the data.
    #[test]
    fn test_period_reports_have_fixed_shape(
        income in arb_rows(true),
        quarter in 0u32..9,
        parallel in any::<bool>(),
    ) {
        let resolver = PeriodResolver::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let snapshot = year_snapshot(income, Vec::new());

        let q = resolver.resolve_quarter(PeriodQuery::for_quarter(2024, quarter)).unwrap();
        let report = period_report(&snapshot, &q, parallel);
        prop_assert_eq!(report.months.len(), 3);

        let y = resolver.resolve_year(PeriodQuery::for_year(2024)).unwrap();
        let report = period_report(&snapshot, &y, parallel);
        let months: Vec<u32> = report.months.iter().map(|m| m.month).collect();
        prop_assert_eq!(months, (1..=12).collect::<Vec<_>>());

        let all: Decimal = snapshot.income.iter().map(|t| t.amount).sum();
        prop_assert_eq!(report.totals.total_income_budget, all);
    }

    /// Feature: financial-reports, Property 3: Cash Flow Ends At Settled Profit
    /// The closing balance equals received income minus paid expense.
    #[test]
    fn test_cash_flow_end_balance(income in arb_rows(true), expense in arb_rows(false)) {
        let snapshot = year_snapshot(income, expense);
        let report = cash_flow_report(&snapshot, 2024);

        let settled = |rows: &[Transaction]| -> Decimal {
            rows.iter().filter(|t| t.is_settled()).map(|t| t.amount).sum()
        };
        let received = settled(&snapshot.income);
        let paid = settled(&snapshot.expense);
        prop_assert_eq!(report.monthly_data.len(), 12);
        prop_assert_eq!(report.summary.end_balance, received - paid);
        prop_assert_eq!(report.summary.total_profit, report.summary.end_balance);
    }

    /// Feature: financial-reports, Property 4: Counterparty Totals Partition The Ledger
    /// When every row names a counterparty, their totals add up to the ledger total.
    #[test]
    fn test_counterparty_totals_partition_ledger(
        income in arb_rows(true),
        owners in prop::collection::vec(0usize..4, 40),
    ) {
        let customers: Vec<Counterparty> = (0..4)
            .map(|i| Counterparty::new(format!("Customer {i}"), CounterpartyRole::Customer))
            .collect();
        let income: Vec<Transaction> = income
            .into_iter()
            .zip(&owners)
            .map(|(tx, &o)| tx.with_counterparty(customers[o].id, customers[o].name.clone()))
            .collect();
        let snapshot = year_snapshot(income, Vec::new());

        let summary = counterparty_summary(
            &snapshot,
            CounterpartyRole::Customer,
            &customers,
            CounterpartySort::Total,
        );
        let sum: Decimal = summary.entities.iter().map(|e| e.total_amount).sum();
        prop_assert_eq!(sum, summary.total_amount);
        prop_assert_eq!(summary.total_amount, summary.settled_amount + summary.unsettled_amount);
        for pair in summary.entities.windows(2) {
            prop_assert!(pair[0].total_amount >= pair[1].total_amount);
        }
    }

    /// Feature: financial-reports, Property 5: Chart Months Sum To Outstanding Totals
    #[test]
    fn test_chart_months_sum_to_totals(income in arb_rows(true), expense in arb_rows(false)) {
        let chart = receivable_payable_chart(&year_snapshot(income, expense), 2024);

        let pending: Decimal = chart.receivables_by_month.iter().map(|m| m.amount).sum();
        let unpaid: Decimal = chart.payables_by_month.iter().map(|m| m.amount).sum();
        prop_assert_eq!(pending, chart.total_pending);
        prop_assert_eq!(unpaid, chart.total_unpaid);
        prop_assert_eq!(chart.total_receivable, chart.total_received + chart.total_pending);
    }
}
