//! Yearly cash-flow statement.

use rust_decimal::Decimal;

use super::types::{CashFlowMonth, CashFlowReport, CashFlowSummary};
use crate::aggregate::{StatusFilter, sum_by_calendar_month};
use crate::ledger::LedgerSnapshot;

/// Running balance over the twelve months of `year`.
///
/// Only settled rows move cash. The balance starts at zero on January 1;
/// nothing is carried in from earlier years.
#[must_use]
pub fn cash_flow_report(snapshot: &LedgerSnapshot, year: i32) -> CashFlowReport {
    let income = sum_by_calendar_month(&snapshot.income, year, StatusFilter::Settled);
    let expense = sum_by_calendar_month(&snapshot.expense, year, StatusFilter::Settled);

    let mut balance = Decimal::ZERO;
    let monthly_data: Vec<CashFlowMonth> = income
        .iter()
        .zip(&expense)
        .map(|(i, e)| {
            let profit = i.amount - e.amount;
            balance += profit;
            CashFlowMonth {
                month: i.month,
                income: i.amount,
                expense: e.amount,
                profit,
                balance,
            }
        })
        .collect();

    let total_income: Decimal = monthly_data.iter().map(|m| m.income).sum();
    let total_expense: Decimal = monthly_data.iter().map(|m| m.expense).sum();

    CashFlowReport {
        year,
        summary: CashFlowSummary {
            total_income,
            total_expense,
            total_profit: total_income - total_expense,
            end_balance: balance,
        },
        monthly_data,
    }
}
