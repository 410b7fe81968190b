//! Report data types.

use chrono::NaiveDate;
use ledgerlens_shared::ReportingConfig;
use ledgerlens_shared::types::{CategoryId, CounterpartyId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::MonthTotal;
use crate::aging::{AgingBucket, classify};
use crate::anomaly::AnomalyFinding;
use crate::ledger::{CounterpartyRole, Transaction};
use crate::period::{DateRange, Granularity};

/// Tunables shared by every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Earliest reportable year.
    pub min_year: i32,
    /// Length of the top receivables/payables lists.
    pub top_outstanding_limit: usize,
    /// Unusual-amount threshold as a multiple of the average.
    pub unusual_amount_multiplier: u32,
    /// Compute months of multi-month reports on the rayon pool.
    pub parallel_months: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self::from(&ReportingConfig::default())
    }
}

impl From<&ReportingConfig> for ReportSettings {
    fn from(config: &ReportingConfig) -> Self {
        Self {
            min_year: config.min_year,
            top_outstanding_limit: config.top_outstanding_limit,
            unusual_amount_multiplier: config.unusual_amount_multiplier,
            parallel_months: config.parallel_months,
        }
    }
}

// ---------------------------------------------------------------------------
// Monthly / quarterly / yearly
// ---------------------------------------------------------------------------

/// Budget (all rows) vs actual (settled rows) totals for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// All income.
    pub total_income_budget: Decimal,
    /// Received income.
    pub total_income_actual: Decimal,
    /// All expense.
    pub total_expense_budget: Decimal,
    /// Paid expense.
    pub total_expense_actual: Decimal,
}

impl std::ops::AddAssign for MonthlySummary {
    fn add_assign(&mut self, rhs: Self) {
        self.total_income_budget += rhs.total_income_budget;
        self.total_income_actual += rhs.total_income_actual;
        self.total_expense_budget += rhs.total_expense_budget;
        self.total_expense_actual += rhs.total_expense_actual;
    }
}

/// Budget vs actual for one category in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryComparison {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// All rows.
    pub budget_amount: Decimal,
    /// Settled rows.
    pub actual_amount: Decimal,
    /// `actual - budget`.
    pub difference: Decimal,
    /// Share of the ledger's actual total.
    pub percentage_of_total_actual: Decimal,
}

/// Budget vs actual report for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// Calendar year.
    pub year: i32,
    /// Month 1-12.
    pub month: u32,
    /// Ledger totals.
    pub summary: MonthlySummary,
    /// Income categories, largest actual first.
    pub income_categories: Vec<CategoryComparison>,
    /// Expense categories, largest actual first.
    pub expense_categories: Vec<CategoryComparison>,
}

impl MonthlyReport {
    /// A fully shaped report with every figure at zero.
    #[must_use]
    pub fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            summary: MonthlySummary::default(),
            income_categories: Vec::new(),
            expense_categories: Vec::new(),
        }
    }
}

/// One, three or twelve monthly reports plus their combined totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// Calendar year.
    pub year: i32,
    /// Month, quarter or year.
    pub granularity: Granularity,
    /// Covered range.
    pub range: DateRange,
    /// Sum of the monthly summaries.
    pub totals: MonthlySummary,
    /// One report per month, in calendar order.
    pub months: Vec<MonthlyReport>,
}

// ---------------------------------------------------------------------------
// Customer / supplier contribution
// ---------------------------------------------------------------------------

/// One month of a counterparty's activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// Calendar year.
    pub year: i32,
    /// Month 1-12.
    pub month: u32,
    /// Number of transactions.
    pub transaction_count: usize,
    /// Sum of amounts.
    pub amount: Decimal,
    /// Share of the counterparty's total.
    pub percentage: Decimal,
}

/// One category of a counterparty's activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Sum of amounts.
    pub amount: Decimal,
    /// Share of the counterparty's total.
    pub percentage: Decimal,
}

/// A customer's or supplier's contribution to its ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartyReport {
    /// Counterparty ID.
    pub counterparty_id: CounterpartyId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Customer or supplier.
    pub role: CounterpartyRole,
    /// All transactions.
    pub total_amount: Decimal,
    /// Received (customer) or paid (supplier).
    pub settled_amount: Decimal,
    /// Pending (customer) or unpaid (supplier).
    pub unsettled_amount: Decimal,
    /// Share of the whole ledger's total.
    pub percentage_of_ledger_total: Decimal,
    /// Non-empty months only, in calendar order.
    pub transactions_by_month: Vec<MonthSummary>,
    /// Non-empty categories only, largest first.
    pub transactions_by_category: Vec<CategorySummary>,
}

/// Ledger totals plus every contributing counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartySummary {
    /// Customer or supplier.
    pub role: CounterpartyRole,
    /// Covered range.
    pub range: DateRange,
    /// All transactions of the ledger.
    pub total_amount: Decimal,
    /// Settled transactions of the ledger.
    pub settled_amount: Decimal,
    /// Unsettled transactions of the ledger.
    pub unsettled_amount: Decimal,
    /// Contributing counterparties, sorted.
    pub entities: Vec<CounterpartyReport>,
}

// ---------------------------------------------------------------------------
// Receivables / payables
// ---------------------------------------------------------------------------

/// An unsettled transaction in a top-N list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutstandingItem {
    /// Transaction ID.
    pub transaction_id: TransactionId,
    /// Customer or supplier name, `"Unknown"` when absent.
    pub counterparty_name: String,
    /// Category name.
    pub category_name: String,
    /// Amount owed.
    pub amount: Decimal,
    /// Transaction date.
    pub date: NaiveDate,
    /// Whole days since `date`.
    pub days_outstanding: i64,
    /// Reference number.
    pub reference_no: Option<String>,
}

/// Receivables, payables, their aging, and data-quality findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivablePayableReport {
    /// Covered range.
    pub range: DateRange,
    /// Date aging is measured against.
    pub as_of: NaiveDate,
    /// Pending income.
    pub total_receivables: Decimal,
    /// Unpaid expense.
    pub total_payables: Decimal,
    /// Receivables minus payables.
    pub net_working_capital_impact: Decimal,
    /// Received income minus paid expense.
    pub actual_profit: Decimal,
    /// All income minus all expense.
    pub potential_profit: Decimal,
    /// Largest pending income rows.
    pub top_receivables: Vec<OutstandingItem>,
    /// Largest unpaid expense rows.
    pub top_payables: Vec<OutstandingItem>,
    /// Pending income by age.
    pub aged_receivables: [AgingBucket; 4],
    /// Unpaid expense by age.
    pub aged_payables: [AgingBucket; 4],
    /// Unusual amounts and duplicate references.
    pub transaction_errors: Vec<AnomalyFinding>,
}

impl ReceivablePayableReport {
    /// A fully shaped report with every figure at zero.
    #[must_use]
    pub fn empty(range: DateRange, as_of: NaiveDate) -> Self {
        let none: [&Transaction; 0] = [];
        Self {
            range,
            as_of,
            total_receivables: Decimal::ZERO,
            total_payables: Decimal::ZERO,
            net_working_capital_impact: Decimal::ZERO,
            actual_profit: Decimal::ZERO,
            potential_profit: Decimal::ZERO,
            top_receivables: Vec::new(),
            top_payables: Vec::new(),
            aged_receivables: classify(none, as_of),
            aged_payables: classify(none, as_of),
            transaction_errors: Vec::new(),
        }
    }
}

/// Twelve monthly receivable/payable reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyReceivablePayable {
    /// Calendar year.
    pub year: i32,
    /// January to December.
    pub months: Vec<ReceivablePayableReport>,
}

/// Settlement totals and unsettled amounts by month, for charting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivablePayableChart {
    /// Calendar year.
    pub year: i32,
    /// Received income.
    pub total_received: Decimal,
    /// Pending income.
    pub total_pending: Decimal,
    /// All income.
    pub total_receivable: Decimal,
    /// Paid expense.
    pub total_paid: Decimal,
    /// Unpaid expense.
    pub total_unpaid: Decimal,
    /// All expense.
    pub total_payable: Decimal,
    /// Pending income per month, zero-filled.
    pub receivables_by_month: Vec<MonthTotal>,
    /// Unpaid expense per month, zero-filled.
    pub payables_by_month: Vec<MonthTotal>,
}

// ---------------------------------------------------------------------------
// Cash flow
// ---------------------------------------------------------------------------

/// One month of the cash-flow statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowMonth {
    /// Month 1-12.
    pub month: u32,
    /// Received income.
    pub income: Decimal,
    /// Paid expense.
    pub expense: Decimal,
    /// `income - expense`.
    pub profit: Decimal,
    /// Running balance at month end.
    pub balance: Decimal,
}

/// Yearly cash-flow totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    /// Received income.
    pub total_income: Decimal,
    /// Paid expense.
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub total_profit: Decimal,
    /// Balance after December.
    pub end_balance: Decimal,
}

/// Running balance across a calendar year, starting from zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowReport {
    /// Calendar year.
    pub year: i32,
    /// Yearly totals.
    pub summary: CashFlowSummary,
    /// January to December.
    pub monthly_data: Vec<CashFlowMonth>,
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// How category lists are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategorySort {
    /// Largest amount first.
    #[default]
    Amount,
    /// Largest share first.
    Percentage,
    /// Alphabetical.
    Name,
}

impl std::str::FromStr for CategorySort {
    type Err = std::convert::Infallible;

    /// Unknown keys fall back to `Amount`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "percentage" => Self::Percentage,
            "name" => Self::Name,
            _ => Self::Amount,
        })
    }
}

/// Filtering and ordering for a category breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdownOptions {
    /// Drop categories with a zero amount.
    pub active_only: bool,
    /// Ordering.
    pub sort: CategorySort,
}

/// One category's amount and share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Sum of all rows.
    pub amount: Decimal,
    /// Share of the ledger total.
    pub percentage: Decimal,
}

/// Income and expense split by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdownReport {
    /// Covered range.
    pub range: DateRange,
    /// Income categories.
    pub income_categories: Vec<CategoryBreakdown>,
    /// Expense categories.
    pub expense_categories: Vec<CategoryBreakdown>,
}

/// One category across two periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChange {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub category_name: String,
    /// Amount in the current period.
    pub current_amount: Decimal,
    /// Amount in the previous period.
    pub previous_amount: Decimal,
    /// `current - previous`.
    pub difference: Decimal,
    /// `difference / previous * 100`, zero when previous is zero.
    pub percentage_change: Decimal,
    /// Share of the current period's ledger total.
    pub current_percentage: Decimal,
    /// Share of the previous period's ledger total.
    pub previous_percentage: Decimal,
    /// Absent in the previous period.
    pub is_new: bool,
    /// Absent in the current period.
    pub is_removed: bool,
}

/// Ledger-level change between two periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalChange {
    /// Current total.
    pub current: Decimal,
    /// Previous total.
    pub previous: Decimal,
    /// `current - previous`.
    pub difference: Decimal,
    /// `difference / previous * 100`, zero when previous is zero.
    pub percentage_change: Decimal,
}

/// Category-level comparison of two periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodComparison {
    /// Current period.
    pub current_range: DateRange,
    /// Previous period.
    pub previous_range: DateRange,
    /// Income totals.
    pub income: TotalChange,
    /// Expense totals.
    pub expense: TotalChange,
    /// Income categories, largest current amount first.
    pub income_categories: Vec<CategoryChange>,
    /// Expense categories, largest current amount first.
    pub expense_categories: Vec<CategoryChange>,
}
