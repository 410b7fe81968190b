//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use ledgerlens_core::period::PeriodQuery;
use ledgerlens_core::reports::{CategorySort, CounterpartySort};
use ledgerlens_shared::types::{CategoryId, CounterpartyId};

/// Financial reports over a JSON ledger snapshot.
#[derive(Parser, Debug)]
#[command(name = "ledgerlens")]
#[command(version)]
#[command(about = "Financial reports over a JSON ledger snapshot", long_about = None)]
pub struct Cli {
    /// Ledger snapshot file (JSON)
    #[arg(short, long)]
    pub ledger: PathBuf,

    /// Date used for defaults and aging (default: today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Report to generate
    #[command(subcommand)]
    pub command: Command,
}

/// Loose period selection; missing parts default to the current date.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PeriodArgs {
    /// Calendar year
    #[arg(long)]
    pub year: Option<i32>,
    /// Month 1-12
    #[arg(long)]
    pub month: Option<u32>,
    /// Quarter 1-4 (anything else means 1)
    #[arg(long)]
    pub quarter: Option<u32>,
}

impl From<PeriodArgs> for PeriodQuery {
    fn from(args: PeriodArgs) -> Self {
        Self {
            year: args.year,
            month: args.month,
            quarter: args.quarter,
        }
    }
}

/// Customer/supplier list options.
#[derive(Args, Debug, Clone, Copy)]
pub struct ListArgs {
    #[command(flatten)]
    pub period: PeriodArgs,
    /// name, settled, unsettled, percentage or total
    #[arg(long, default_value = "total")]
    pub sort: CounterpartySort,
    /// Include ledger totals and counterparties missing from the directory
    #[arg(long)]
    pub summary: bool,
}

/// Available reports.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Budget vs actual for one month
    Monthly(PeriodArgs),
    /// Budget vs actual for the three months of a quarter
    Quarterly(PeriodArgs),
    /// Budget vs actual for the twelve months of a year
    Yearly {
        /// Calendar year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Budget vs actual for a month, quarter or year
    Period(PeriodArgs),
    /// Running balance across a year
    CashFlow {
        /// Calendar year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Contribution of every customer
    Customers(ListArgs),
    /// Contribution of every supplier
    Suppliers(ListArgs),
    /// Contribution of one customer
    Customer {
        /// Customer id
        id: CounterpartyId,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Contribution of one supplier
    Supplier {
        /// Supplier id
        id: CounterpartyId,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Receivables, payables and aging for one month
    ReceivablePayable(PeriodArgs),
    /// Receivables and payables for each month of a year
    ReceivablePayableYearly {
        /// Calendar year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Receivables and payables for an explicit date range
    ReceivablePayableRange {
        /// First day, inclusive
        #[arg(long)]
        start: NaiveDate,
        /// Last day, inclusive
        #[arg(long)]
        end: NaiveDate,
    },
    /// Settled and outstanding totals by month
    Chart {
        /// Calendar year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Planned budgets vs actual transactions
    BudgetOverview {
        /// Calendar year
        #[arg(long)]
        year: Option<i32>,
        /// Restrict totals to one month
        #[arg(long)]
        month: Option<u32>,
    },
    /// Amount and share per category
    Categories {
        #[command(flatten)]
        period: PeriodArgs,
        /// Hide categories without transactions
        #[arg(long)]
        active_only: bool,
        /// amount, percentage or name
        #[arg(long, default_value = "amount")]
        sort: CategorySort,
    },
    /// One month compared with the month before
    Compare(PeriodArgs),
    /// Raw transactions of a period
    Transactions {
        #[command(flatten)]
        period: PeriodArgs,
        /// Only this category
        #[arg(long)]
        category: Option<CategoryId>,
        /// Only this customer or supplier
        #[arg(long)]
        counterparty: Option<CounterpartyId>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_global_and_period_flags() {
        let cli = Cli::try_parse_from([
            "ledgerlens",
            "--ledger",
            "ledger.json",
            "--as-of",
            "2024-06-15",
            "quarterly",
            "--year",
            "2024",
            "--quarter",
            "7",
        ])
        .unwrap();

        assert_eq!(cli.as_of, NaiveDate::from_ymd_opt(2024, 6, 15));
        let Command::Quarterly(period) = cli.command else {
            panic!("expected quarterly");
        };
        assert_eq!(PeriodQuery::from(period), PeriodQuery::for_quarter(2024, 7));
    }

    #[test]
    fn test_sort_aliases() {
        let cli = Cli::try_parse_from([
            "ledgerlens", "-l", "x.json", "customers", "--sort", "pending", "--summary",
        ])
        .unwrap();
        let Command::Customers(list) = cli.command else {
            panic!("expected customers");
        };
        assert_eq!(list.sort, CounterpartySort::Unsettled);
        assert!(list.summary);
    }

    #[test]
    fn test_rejects_malformed_id() {
        let args = ["ledgerlens", "-l", "x.json", "customer", "not-a-uuid"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
