//! Ledgerlens reporter
//!
//! Reads a JSON ledger snapshot and prints one report as JSON.

mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ledgerlens_core::ledger::{CounterpartyRole, InMemoryLedger, LedgerFilter};
use ledgerlens_core::period::PeriodQuery;
use ledgerlens_core::reports::{CategoryBreakdownOptions, ReportService, ReportSettings};
use ledgerlens_shared::{AppConfig, AppError, LoggingConfig};

use cli::{Cli, Command, ListArgs};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let ledger = load_ledger(&cli.ledger)?;
    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());
    info!(
        ledger = %cli.ledger.display(),
        income = ledger.income.len(),
        expense = ledger.expense.len(),
        %as_of,
        "Ledger loaded"
    );

    let service = ReportService::new(ledger, ReportSettings::from(&config.reporting));
    match run(&service, cli.command, as_of).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(code = err.error_code(), status = err.status_code(), "{err}");
            eprintln!("error: {err}");
            Ok(ExitCode::from(if err.is_client_error() { 2 } else { 1 }))
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the report
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_ledger(path: &Path) -> anyhow::Result<InMemoryLedger> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ledger {}", path.display()))?;
    InMemoryLedger::from_json(&json)
        .with_context(|| format!("Failed to parse ledger {}", path.display()))
}

fn to_json<T: Serialize>(report: &T) -> Result<Value, AppError> {
    serde_json::to_value(report).map_err(|e| AppError::Internal(e.to_string()))
}

async fn counterparties(
    service: &ReportService<InMemoryLedger>,
    role: CounterpartyRole,
    list: ListArgs,
    today: NaiveDate,
) -> Result<Value, AppError> {
    let query = list.period.into();
    if list.summary {
        to_json(&service.counterparty_summary(role, query, list.sort, today).await?)
    } else {
        to_json(&service.counterparty_reports(role, query, list.sort, today).await?)
    }
}

async fn run(
    service: &ReportService<InMemoryLedger>,
    command: Command,
    today: NaiveDate,
) -> Result<Value, AppError> {
    match command {
        Command::Monthly(period) => to_json(&service.monthly(period.into(), today).await?),
        Command::Quarterly(period) => to_json(&service.quarterly(period.into(), today).await?),
        Command::Yearly { year } => {
            let query = PeriodQuery { year, ..PeriodQuery::new() };
            to_json(&service.yearly(query, today).await?)
        }
        Command::Period(period) => to_json(&service.period(period.into(), today).await?),
        Command::CashFlow { year } => to_json(&service.cash_flow(year, today).await?),
        Command::Customers(list) => {
            counterparties(service, CounterpartyRole::Customer, list, today).await
        }
        Command::Suppliers(list) => {
            counterparties(service, CounterpartyRole::Supplier, list, today).await
        }
        Command::Customer { id, period } => to_json(
            &service
                .counterparty_detail(CounterpartyRole::Customer, id, period.into(), today)
                .await?,
        ),
        Command::Supplier { id, period } => to_json(
            &service
                .counterparty_detail(CounterpartyRole::Supplier, id, period.into(), today)
                .await?,
        ),
        Command::ReceivablePayable(period) => {
            to_json(&service.receivable_payable(period.into(), today).await?)
        }
        Command::ReceivablePayableYearly { year } => {
            to_json(&service.receivable_payable_yearly(year, today).await?)
        }
        Command::ReceivablePayableRange { start, end } => {
            to_json(&service.receivable_payable_range(start, end, today).await?)
        }
        Command::Chart { year } => to_json(&service.receivable_payable_chart(year, today).await?),
        Command::BudgetOverview { year, month } => {
            to_json(&service.budget_overview(year, month, today).await?)
        }
        Command::Categories {
            period,
            active_only,
            sort,
        } => {
            let options = CategoryBreakdownOptions { active_only, sort };
            to_json(&service.category_breakdown(period.into(), options, today).await?)
        }
        Command::Compare(period) => to_json(&service.compare_periods(period.into(), today).await?),
        Command::Transactions {
            period,
            category,
            counterparty,
        } => {
            let filter = LedgerFilter {
                category_id: category,
                counterparty_id: counterparty,
            };
            to_json(&service.transactions(period.into(), filter, today).await?)
        }
    }
}
