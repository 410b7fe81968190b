//! Report generation service.
//!
//! Resolves the requested period, reads one snapshot through the ledger
//! facade, and hands it to the pure assembler functions. The caller always
//! supplies the current date.

use chrono::{Datelike, NaiveDate};
use ledgerlens_shared::types::CounterpartyId;
use tracing::{debug, info};

use super::cash_flow::cash_flow_report;
use super::category::{category_breakdown, compare_periods};
use super::counterparty::{
    CounterpartySort, counterparty_detail, counterparty_reports, counterparty_summary,
};
use super::error::ReportError;
use super::monthly::{monthly_report, period_report};
use super::receivable::{
    receivable_payable_chart, receivable_payable_report, yearly_receivable_payable,
};
use super::types::{
    CashFlowReport, CategoryBreakdownOptions, CategoryBreakdownReport, CounterpartyReport,
    CounterpartySummary, MonthlyReport, PeriodComparison, PeriodReport, ReceivablePayableChart,
    ReceivablePayableReport, ReportSettings, YearlyReceivablePayable,
};
use crate::budget::{BudgetOverview, BudgetService};
use crate::ledger::{
    Counterparty, CounterpartyRole, LedgerFilter, LedgerSnapshot, LedgerSource, TransactionKind,
};
use crate::period::{DateRange, PeriodQuery, PeriodResolver, ResolvedPeriod};

/// Runs CPU-bound multi-month assembly on the blocking pool.
async fn assemble<T, F>(build: F) -> Result<T, ReportError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(build)
        .await
        .map_err(|e| ReportError::Internal(e.to_string()))
}

/// Service for generating financial reports from a ledger source.
pub struct ReportService<S> {
    source: S,
    settings: ReportSettings,
}

impl<S: LedgerSource> ReportService<S> {
    /// Creates a service over `source`.
    #[must_use]
    pub const fn new(source: S, settings: ReportSettings) -> Self {
        Self { source, settings }
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// The underlying ledger source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    fn resolver(&self, today: NaiveDate) -> PeriodResolver {
        PeriodResolver::new(today).with_min_year(self.settings.min_year)
    }

    async fn fetch(&self, range: DateRange) -> Result<LedgerSnapshot, ReportError> {
        Ok(self.source.snapshot(range, &LedgerFilter::new()).await?)
    }

    /// Budget-vs-actual report for one month (default: today's month).
    pub async fn monthly(
        &self,
        query: PeriodQuery,
        today: NaiveDate,
    ) -> Result<MonthlyReport, ReportError> {
        let period = self.resolver(today).resolve_month(query)?;
        debug!(range = %period.range, "Generating monthly report");
        let snapshot = self.fetch(period.range).await?;
        monthly_report(&snapshot, period.year, period.range.start.month())
    }

    /// Three monthly reports for one quarter (default: today's quarter).
    pub async fn quarterly(
        &self,
        query: PeriodQuery,
        today: NaiveDate,
    ) -> Result<PeriodReport, ReportError> {
        let period = self.resolver(today).resolve_quarter(query)?;
        self.period_with(&period).await
    }

    /// Twelve monthly reports for one year.
    pub async fn yearly(
        &self,
        query: PeriodQuery,
        today: NaiveDate,
    ) -> Result<PeriodReport, ReportError> {
        let period = self.resolver(today).resolve_year(query)?;
        self.period_with(&period).await
    }

    /// Month, quarter or year, whichever the query names most precisely.
    pub async fn period(
        &self,
        query: PeriodQuery,
        today: NaiveDate,
    ) -> Result<PeriodReport, ReportError> {
        let period = self.resolver(today).resolve(query)?;
        self.period_with(&period).await
    }

    async fn period_with(&self, period: &ResolvedPeriod) -> Result<PeriodReport, ReportError> {
        debug!(range = %period.range, "Generating period report");
        let snapshot = self.fetch(period.range).await?;
        let (period, parallel) = (*period, self.settings.parallel_months);
        assemble(move || period_report(&snapshot, &period, parallel)).await
    }

    /// Cash-flow statement for a year (default: this year).
    pub async fn cash_flow(
        &self,
        year: Option<i32>,
        today: NaiveDate,
    ) -> Result<CashFlowReport, ReportError> {
        let period = self.resolver(today).resolve_year(PeriodQuery { year, ..PeriodQuery::new() })?;
        debug!(range = %period.range, "Generating cash flow report");
        let snapshot = self.fetch(period.range).await?;
        snapshot.validate()?;
        Ok(cash_flow_report(&snapshot, period.year))
    }

    async fn fetch_with_directory(
        &self,
        role: CounterpartyRole,
        query: PeriodQuery,
        today: NaiveDate,
    ) -> Result<(LedgerSnapshot, Vec<Counterparty>), ReportError> {
        let period = self.resolver(today).resolve(query)?;
        debug!(range = %period.range, role = role.entity_name(), "Generating counterparty report");
        let filter = LedgerFilter::new();
        let (snapshot, directory) = futures::try_join!(
            self.source.snapshot(period.range, &filter),
            self.source.counterparties(role)
        )?;
        snapshot.validate()?;
        Ok((snapshot, directory))
    }

    /// Contribution of every active customer or supplier.
    pub async fn counterparty_reports(
        &self,
        role: CounterpartyRole,
        query: PeriodQuery,
        sort: CounterpartySort,
        today: NaiveDate,
    ) -> Result<Vec<CounterpartyReport>, ReportError> {
        let (snapshot, directory) = self.fetch_with_directory(role, query, today).await?;
        Ok(counterparty_reports(&snapshot, role, &directory, sort))
    }

    /// Ledger totals plus every counterparty seen in the period.
    pub async fn counterparty_summary(
        &self,
        role: CounterpartyRole,
        query: PeriodQuery,
        sort: CounterpartySort,
        today: NaiveDate,
    ) -> Result<CounterpartySummary, ReportError> {
        let (snapshot, directory) = self.fetch_with_directory(role, query, today).await?;
        Ok(counterparty_summary(&snapshot, role, &directory, sort))
    }

    /// Contribution of one customer or supplier.
    ///
    /// # Errors
    ///
    /// `NotFound` for an id unknown to the directory.
    pub async fn counterparty_detail(
        &self,
        role: CounterpartyRole,
        id: CounterpartyId,
        query: PeriodQuery,
        today: NaiveDate,
    ) -> Result<CounterpartyReport, ReportError> {
        let (snapshot, directory) = self.fetch_with_directory(role, query, today).await?;
        counterparty_detail(&snapshot, role, &directory, id)
    }

    /// Receivables and payables for one month (default: the month of `as_of`).
    pub async fn receivable_payable(
        &self,
        query: PeriodQuery,
        as_of: NaiveDate,
    ) -> Result<ReceivablePayableReport, ReportError> {
        let period = self.resolver(as_of).resolve_month(query)?;
        self.receivable_payable_for(period.range, as_of).await
    }

    /// Receivables and payables for an explicit inclusive range.
    pub async fn receivable_payable_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        as_of: NaiveDate,
    ) -> Result<ReceivablePayableReport, ReportError> {
        self.resolver(as_of).check_year(start.year())?;
        let range = DateRange::new(start, end)?;
        self.receivable_payable_for(range, as_of).await
    }

    async fn receivable_payable_for(
        &self,
        range: DateRange,
        as_of: NaiveDate,
    ) -> Result<ReceivablePayableReport, ReportError> {
        debug!(range = %range, %as_of, "Generating receivable/payable report");
        let snapshot = self.fetch(range).await?;
        let report = receivable_payable_report(&snapshot, as_of, &self.settings)?;
        if !report.transaction_errors.is_empty() {
            info!(
                range = %range,
                findings = report.transaction_errors.len(),
                "Transaction anomalies detected"
            );
        }
        Ok(report)
    }

    /// Twelve monthly receivable/payable reports.
    pub async fn receivable_payable_yearly(
        &self,
        year: Option<i32>,
        as_of: NaiveDate,
    ) -> Result<YearlyReceivablePayable, ReportError> {
        let period = self.resolver(as_of).resolve_year(PeriodQuery { year, ..PeriodQuery::new() })?;
        debug!(range = %period.range, "Generating yearly receivable/payable report");
        let snapshot = self.fetch(period.range).await?;
        let (year, settings) = (period.year, self.settings);
        assemble(move || yearly_receivable_payable(&snapshot, year, as_of, &settings)).await
    }

    /// Settlement totals and unsettled amounts by month for a year.
    pub async fn receivable_payable_chart(
        &self,
        year: Option<i32>,
        as_of: NaiveDate,
    ) -> Result<ReceivablePayableChart, ReportError> {
        let period = self.resolver(as_of).resolve_year(PeriodQuery { year, ..PeriodQuery::new() })?;
        let snapshot = self.fetch(period.range).await?;
        snapshot.validate()?;
        Ok(receivable_payable_chart(&snapshot, period.year))
    }

    /// Planned budgets vs actual transactions for a year, optionally one month.
    pub async fn budget_overview(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        today: NaiveDate,
    ) -> Result<BudgetOverview, ReportError> {
        let period = self.resolver(today).resolve_year(PeriodQuery { year, ..PeriodQuery::new() })?;
        debug!(range = %period.range, ?month, "Generating budget overview");
        let filter = LedgerFilter::new();
        let (snapshot, mut budgets, expense_budgets) = futures::try_join!(
            self.source.snapshot(period.range, &filter),
            self.source.planned_budgets(TransactionKind::Income, period.year),
            self.source.planned_budgets(TransactionKind::Expense, period.year)
        )?;
        snapshot.validate()?;
        budgets.extend(expense_budgets);
        Ok(BudgetService::overview(period.year, month, &snapshot, &budgets)?)
    }

    /// Income and expense split by category.
    pub async fn category_breakdown(
        &self,
        query: PeriodQuery,
        options: CategoryBreakdownOptions,
        today: NaiveDate,
    ) -> Result<CategoryBreakdownReport, ReportError> {
        let period = self.resolver(today).resolve(query)?;
        debug!(range = %period.range, "Generating category breakdown");
        let filter = LedgerFilter::new();
        let (snapshot, income, expense) = futures::try_join!(
            self.source.snapshot(period.range, &filter),
            self.source.categories(TransactionKind::Income),
            self.source.categories(TransactionKind::Expense)
        )?;
        snapshot.validate()?;

        Ok(CategoryBreakdownReport {
            range: period.range,
            income_categories: category_breakdown(
                &snapshot,
                TransactionKind::Income,
                &income,
                options,
            ),
            expense_categories: category_breakdown(
                &snapshot,
                TransactionKind::Expense,
                &expense,
                options,
            ),
        })
    }

    /// One month (default: today's) compared with the month before it.
    pub async fn compare_periods(
        &self,
        query: PeriodQuery,
        today: NaiveDate,
    ) -> Result<PeriodComparison, ReportError> {
        let period = self.resolver(today).resolve_month(query)?;
        let previous_range = match period.range.start.pred_opt() {
            Some(last_day) => DateRange::month(last_day.year(), last_day.month())?,
            None => period.range,
        };
        debug!(current = %period.range, previous = %previous_range, "Comparing periods");

        let filter = LedgerFilter::new();
        let (current, previous) = futures::try_join!(
            self.source.snapshot(period.range, &filter),
            self.source.snapshot(previous_range, &filter)
        )?;
        current.validate()?;
        previous.validate()?;
        Ok(compare_periods(&current, &previous))
    }

    /// Raw rows for a period, narrowed by `filter`.
    pub async fn transactions(
        &self,
        query: PeriodQuery,
        filter: LedgerFilter,
        today: NaiveDate,
    ) -> Result<LedgerSnapshot, ReportError> {
        let period = self.resolver(today).resolve(query)?;
        let snapshot = self.source.snapshot(period.range, &filter).await?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}
