//! Receivables, payables, their aging, and data-quality findings.

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::warn;

use super::error::ReportError;
use super::types::{
    OutstandingItem, ReceivablePayableChart, ReceivablePayableReport, ReportSettings,
    YearlyReceivablePayable,
};
use crate::aggregate::{SettlementTotals, StatusFilter, sum_by_calendar_month};
use crate::aging::{classify, days_outstanding};
use crate::anomaly::AnomalyDetector;
use crate::ledger::{LedgerSnapshot, Transaction};
use crate::period::DateRange;

/// Builds the receivable/payable report for every row of `snapshot`.
///
/// Aging and days outstanding are measured against `as_of`.
///
/// # Errors
///
/// `Ledger` when a row is invalid.
pub fn receivable_payable_report(
    snapshot: &LedgerSnapshot,
    as_of: NaiveDate,
    settings: &ReportSettings,
) -> Result<ReceivablePayableReport, ReportError> {
    snapshot.validate()?;

    let income = SettlementTotals::of(&snapshot.income);
    let expense = SettlementTotals::of(&snapshot.expense);
    let pending: Vec<&Transaction> = snapshot.income.iter().filter(|t| !t.is_settled()).collect();
    let unpaid: Vec<&Transaction> = snapshot.expense.iter().filter(|t| !t.is_settled()).collect();

    let rows: Vec<Transaction> = snapshot
        .income
        .iter()
        .chain(&snapshot.expense)
        .cloned()
        .collect();
    let transaction_errors = AnomalyDetector::new(settings.unusual_amount_multiplier).detect(&rows);

    Ok(ReceivablePayableReport {
        range: snapshot.range,
        as_of,
        total_receivables: income.unsettled,
        total_payables: expense.unsettled,
        net_working_capital_impact: income.unsettled - expense.unsettled,
        actual_profit: income.settled - expense.settled,
        potential_profit: income.total - expense.total,
        top_receivables: top_outstanding(&pending, as_of, settings.top_outstanding_limit),
        top_payables: top_outstanding(&unpaid, as_of, settings.top_outstanding_limit),
        aged_receivables: classify(pending.iter().copied(), as_of),
        aged_payables: classify(unpaid.iter().copied(), as_of),
        transaction_errors,
    })
}

/// Largest amounts first; ties go to the older row.
fn top_outstanding(
    unsettled: &[&Transaction],
    as_of: NaiveDate,
    limit: usize,
) -> Vec<OutstandingItem> {
    let mut rows = unsettled.to_vec();
    rows.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.date.cmp(&b.date))
            .then_with(|| a.id.cmp(&b.id))
    });
    rows.into_iter()
        .take(limit)
        .map(|tx| OutstandingItem {
            transaction_id: tx.id,
            counterparty_name: tx.counterparty_label().to_string(),
            category_name: tx.category_name.clone(),
            amount: tx.amount,
            date: tx.date,
            days_outstanding: days_outstanding(tx.date, as_of),
            reference_no: tx.reference_no.clone(),
        })
        .collect()
}

/// Twelve monthly reports for `year`; a failing month is replaced by an
/// empty one.
#[must_use]
pub fn yearly_receivable_payable(
    snapshot: &LedgerSnapshot,
    year: i32,
    as_of: NaiveDate,
    settings: &ReportSettings,
) -> YearlyReceivablePayable {
    let build = |month: u32| -> ReceivablePayableReport {
        let range = match DateRange::month(year, month) {
            Ok(range) => range,
            Err(e) => {
                warn!(year, month, error = %e, "Skipping unrepresentable month");
                return ReceivablePayableReport::empty(snapshot.range, as_of);
            }
        };
        receivable_payable_report(&snapshot.for_range(range), as_of, settings).unwrap_or_else(|e| {
            warn!(year, month, error = %e, "Month degraded to zero report");
            ReceivablePayableReport::empty(range, as_of)
        })
    };

    let months: Vec<ReceivablePayableReport> = if settings.parallel_months {
        (1..=12u32).into_par_iter().map(build).collect()
    } else {
        (1..=12u32).map(build).collect()
    };
    YearlyReceivablePayable { year, months }
}

/// Settlement totals for the year plus unsettled amounts by month.
#[must_use]
pub fn receivable_payable_chart(snapshot: &LedgerSnapshot, year: i32) -> ReceivablePayableChart {
    let income = SettlementTotals::of(&snapshot.income);
    let expense = SettlementTotals::of(&snapshot.expense);

    ReceivablePayableChart {
        year,
        total_received: income.settled,
        total_pending: income.unsettled,
        total_receivable: income.total,
        total_paid: expense.settled,
        total_unpaid: expense.unsettled,
        total_payable: expense.total,
        receivables_by_month: sum_by_calendar_month(
            &snapshot.income,
            year,
            StatusFilter::Unsettled,
        ),
        payables_by_month: sum_by_calendar_month(&snapshot.expense, year, StatusFilter::Unsettled),
    }
}
