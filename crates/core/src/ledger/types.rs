//! Ledger domain types.
//!
//! These are the value objects the facade hands to the engine. Category
//! and counterparty names are denormalized onto each transaction so report
//! labeling needs no extra lookup.

use chrono::NaiveDate;
use ledgerlens_shared::types::{BudgetId, CategoryId, CounterpartyId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Which ledger a transaction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Money coming in from customers.
    Income,
    /// Money going out to suppliers.
    Expense,
}

impl TransactionKind {
    /// Both kinds, income first.
    pub const ALL: [Self; 2] = [Self::Income, Self::Expense];

    /// Wire label (`INCOME` / `EXPENSE`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }

    /// Status meaning the money has moved.
    #[must_use]
    pub const fn settled_status(self) -> PaymentStatus {
        match self {
            Self::Income => PaymentStatus::Received,
            Self::Expense => PaymentStatus::Paid,
        }
    }

    /// Status meaning the money is still owed.
    #[must_use]
    pub const fn unsettled_status(self) -> PaymentStatus {
        match self {
            Self::Income => PaymentStatus::Pending,
            Self::Expense => PaymentStatus::Unpaid,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment status of a transaction.
///
/// Income uses `Received`/`Pending`, expense uses `Paid`/`Unpaid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Income collected.
    Received,
    /// Income not yet collected.
    Pending,
    /// Expense paid out.
    Paid,
    /// Expense not yet paid.
    Unpaid,
}

impl PaymentStatus {
    /// The ledger this status belongs to.
    #[must_use]
    pub const fn kind(self) -> TransactionKind {
        match self {
            Self::Received | Self::Pending => TransactionKind::Income,
            Self::Paid | Self::Unpaid => TransactionKind::Expense,
        }
    }

    /// Returns true for `Received` and `Paid`.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Received | Self::Paid)
    }
}

/// An income or expense transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Category reference.
    pub category_id: CategoryId,
    /// Category display name.
    pub category_name: String,
    /// Customer (income) or supplier (expense), if any.
    #[serde(default)]
    pub counterparty_id: Option<CounterpartyId>,
    /// Counterparty display name.
    #[serde(default)]
    pub counterparty_name: Option<String>,
    /// Transaction date.
    pub date: NaiveDate,
    /// Amount, never negative.
    pub amount: Decimal,
    /// Settlement status; also determines the ledger.
    pub payment_status: PaymentStatus,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// External reference (invoice number, receipt number...).
    #[serde(default)]
    pub reference_no: Option<String>,
}

impl Transaction {
    /// Creates a transaction with a fresh id and no counterparty.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        payment_status: PaymentStatus,
        category_id: CategoryId,
        category_name: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            category_id,
            category_name: category_name.into(),
            counterparty_id: None,
            counterparty_name: None,
            date,
            amount,
            payment_status,
            description: None,
            reference_no: None,
        }
    }

    /// Sets the id.
    #[must_use]
    pub const fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    /// Attaches a customer or supplier.
    #[must_use]
    pub fn with_counterparty(mut self, id: CounterpartyId, name: impl Into<String>) -> Self {
        self.counterparty_id = Some(id);
        self.counterparty_name = Some(name.into());
        self
    }

    /// Sets the reference number.
    #[must_use]
    pub fn with_reference(mut self, reference_no: impl Into<String>) -> Self {
        self.reference_no = Some(reference_no.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Ledger this transaction belongs to.
    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        self.payment_status.kind()
    }

    /// Returns true when received or paid.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.payment_status.is_settled()
    }

    /// Reference number, if present and not blank.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference_no
            .as_deref()
            .filter(|r| !r.trim().is_empty())
    }

    /// Counterparty name or `"Unknown"`.
    #[must_use]
    pub fn counterparty_label(&self) -> &str {
        self.counterparty_name.as_deref().unwrap_or("Unknown")
    }

    /// Checks the value-object invariants.
    ///
    /// # Errors
    ///
    /// `InvalidTransaction` when the amount is negative.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount < Decimal::ZERO {
            return Err(LedgerError::InvalidTransaction {
                id: self.id,
                reason: format!("amount {} is negative", self.amount),
            });
        }
        Ok(())
    }
}

/// Role of a counterparty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterpartyRole {
    /// Pays us; appears on income.
    Customer,
    /// We pay them; appears on expense.
    Supplier,
}

impl CounterpartyRole {
    /// Ledger that carries this role's transactions.
    #[must_use]
    pub const fn ledger_kind(self) -> TransactionKind {
        match self {
            Self::Customer => TransactionKind::Income,
            Self::Supplier => TransactionKind::Expense,
        }
    }

    /// Lowercase entity name used in messages.
    #[must_use]
    pub const fn entity_name(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Supplier => "supplier",
        }
    }
}

/// A customer or supplier from the master-data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    /// Unique identifier.
    pub id: CounterpartyId,
    /// Display name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Customer or supplier.
    pub role: CounterpartyRole,
    /// Inactive counterparties are left out of contribution reports.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Counterparty {
    /// Creates an active counterparty with no contact details.
    #[must_use]
    pub fn new(name: impl Into<String>, role: CounterpartyRole) -> Self {
        Self {
            id: CounterpartyId::new(),
            name: name.into(),
            email: None,
            phone: None,
            role,
            is_active: true,
        }
    }
}

/// An income or expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Ledger this category classifies.
    pub kind: TransactionKind,
}

impl Category {
    /// Creates a category with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TransactionKind) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            kind,
        }
    }
}

/// A planned amount for one category in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedBudget {
    /// Unique identifier.
    pub id: BudgetId,
    /// Category being planned.
    pub category_id: CategoryId,
    /// Income target or expense ceiling.
    pub kind: TransactionKind,
    /// Calendar year.
    pub year: i32,
    /// Month 1-12.
    pub month: u32,
    /// Planned amount.
    pub amount: Decimal,
}
