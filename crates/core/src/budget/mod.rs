//! Budget tracking: planned budget lines vs actual transactions.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::BudgetService;
pub use types::{BudgetMonth, BudgetOverview, BudgetSection};
