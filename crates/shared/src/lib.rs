//! Shared identifiers, errors, and configuration for Ledgerlens.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LoggingConfig, ReportingConfig};
pub use error::{AppError, AppResult};
