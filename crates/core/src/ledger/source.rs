//! Ledger query facade.
//!
//! The engine never talks to storage directly. It reads through
//! [`LedgerSource`], and [`InMemoryLedger`] is the implementation used by
//! the command-line front end and the tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use super::snapshot::{LedgerFilter, LedgerSnapshot};
use super::types::{
    Category, Counterparty, CounterpartyRole, PlannedBudget, Transaction, TransactionKind,
};
use crate::period::DateRange;

/// Read access to income/expense transactions and the master data that
/// labels them.
///
/// Implementations must return rows whose date lies inside the requested
/// inclusive range, in any order.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Income transactions dated within `range`.
    async fn list_income(
        &self,
        range: &DateRange,
        filter: &LedgerFilter,
    ) -> Result<Vec<Transaction>, LedgerError>;

    /// Expense transactions dated within `range`.
    async fn list_expense(
        &self,
        range: &DateRange,
        filter: &LedgerFilter,
    ) -> Result<Vec<Transaction>, LedgerError>;

    /// Customers or suppliers.
    async fn counterparties(&self, role: CounterpartyRole)
    -> Result<Vec<Counterparty>, LedgerError>;

    /// Income or expense categories.
    async fn categories(&self, kind: TransactionKind) -> Result<Vec<Category>, LedgerError>;

    /// Planned budget lines of one ledger for a year.
    async fn planned_budgets(
        &self,
        kind: TransactionKind,
        year: i32,
    ) -> Result<Vec<PlannedBudget>, LedgerError>;

    /// Fetches both ledgers for `range` concurrently.
    async fn snapshot(
        &self,
        range: DateRange,
        filter: &LedgerFilter,
    ) -> Result<LedgerSnapshot, LedgerError> {
        let (income, expense) = futures::try_join!(
            self.list_income(&range, filter),
            self.list_expense(&range, filter)
        )?;
        Ok(LedgerSnapshot::new(range, income, expense))
    }
}

/// A ledger held entirely in memory, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryLedger {
    /// Customers and suppliers.
    #[serde(default)]
    pub counterparties: Vec<Counterparty>,
    /// Income and expense categories.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Income rows.
    #[serde(default)]
    pub income: Vec<Transaction>,
    /// Expense rows.
    #[serde(default)]
    pub expense: Vec<Transaction>,
    /// Planned budget lines.
    #[serde(default)]
    pub budgets: Vec<PlannedBudget>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a ledger document.
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds a transaction to the ledger matching its status.
    #[must_use]
    pub fn with_transaction(mut self, tx: Transaction) -> Self {
        match tx.kind() {
            TransactionKind::Income => self.income.push(tx),
            TransactionKind::Expense => self.expense.push(tx),
        }
        self
    }

    /// Adds a customer or supplier.
    #[must_use]
    pub fn with_counterparty(mut self, counterparty: Counterparty) -> Self {
        self.counterparties.push(counterparty);
        self
    }

    /// Adds a category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Adds a planned budget line.
    #[must_use]
    pub fn with_budget(mut self, budget: PlannedBudget) -> Self {
        self.budgets.push(budget);
        self
    }

    fn select(rows: &[Transaction], range: &DateRange, filter: &LedgerFilter) -> Vec<Transaction> {
        rows.iter()
            .filter(|tx| range.contains(tx.date) && filter.matches(tx))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl LedgerSource for InMemoryLedger {
    async fn list_income(
        &self,
        range: &DateRange,
        filter: &LedgerFilter,
    ) -> Result<Vec<Transaction>, LedgerError> {
        Ok(Self::select(&self.income, range, filter))
    }

    async fn list_expense(
        &self,
        range: &DateRange,
        filter: &LedgerFilter,
    ) -> Result<Vec<Transaction>, LedgerError> {
        Ok(Self::select(&self.expense, range, filter))
    }

    async fn counterparties(
        &self,
        role: CounterpartyRole,
    ) -> Result<Vec<Counterparty>, LedgerError> {
        Ok(self
            .counterparties
            .iter()
            .filter(|c| c.role == role)
            .cloned()
            .collect())
    }

    async fn categories(&self, kind: TransactionKind) -> Result<Vec<Category>, LedgerError> {
        Ok(self
            .categories
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect())
    }

    async fn planned_budgets(
        &self,
        kind: TransactionKind,
        year: i32,
    ) -> Result<Vec<PlannedBudget>, LedgerError> {
        Ok(self
            .budgets
            .iter()
            .filter(|b| b.kind == kind && b.year == year)
            .cloned()
            .collect())
    }
}
