//! Application configuration management.

use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Reporting engine configuration.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reporting engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportingConfig {
    /// Years below this are rejected as invalid periods.
    #[serde(default = "default_min_year")]
    pub min_year: i32,
    /// Number of entries in the top receivables/payables lists.
    #[serde(default = "default_top_outstanding_limit")]
    pub top_outstanding_limit: usize,
    /// An amount above `multiplier * average` is flagged as unusual.
    #[serde(default = "default_unusual_amount_multiplier")]
    pub unusual_amount_multiplier: u32,
    /// Compute the months of multi-month reports in parallel.
    #[serde(default = "default_parallel_months")]
    pub parallel_months: bool,
}

fn default_min_year() -> i32 {
    2000
}

fn default_top_outstanding_limit() -> usize {
    10
}

fn default_unusual_amount_multiplier() -> u32 {
    3
}

fn default_parallel_months() -> bool {
    true
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
            top_outstanding_limit: default_top_outstanding_limit(),
            unusual_amount_multiplier: default_unusual_amount_multiplier(),
            parallel_months: default_parallel_months(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "ledgerlens=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `LEDGERLENS__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`](crate::AppError::Config) if a source
    /// cannot be read or a value has the wrong type.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("LEDGERLENS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.reporting.min_year, 2000);
        assert_eq!(config.reporting.top_outstanding_limit, 10);
        assert_eq!(config.reporting.unusual_amount_multiplier, 3);
        assert!(config.reporting.parallel_months);
        assert_eq!(config.logging.filter, "ledgerlens=info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "LEDGERLENS__REPORTING__MIN_YEAR",
                "LEDGERLENS__REPORTING__TOP_OUTSTANDING_LIMIT",
                "LEDGERLENS__LOGGING__JSON",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config, AppConfig::default());
            },
        );
    }

    #[test]
    fn test_load_reads_environment_overrides() {
        temp_env::with_vars(
            [
                ("LEDGERLENS__REPORTING__MIN_YEAR", Some("2010")),
                ("LEDGERLENS__REPORTING__TOP_OUTSTANDING_LIMIT", Some("5")),
                ("LEDGERLENS__LOGGING__JSON", Some("true")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.reporting.min_year, 2010);
                assert_eq!(config.reporting.top_outstanding_limit, 5);
                assert_eq!(config.reporting.unusual_amount_multiplier, 3);
                assert!(config.logging.json);
            },
        );
    }

    #[test]
    fn test_load_rejects_malformed_value() {
        temp_env::with_var("LEDGERLENS__REPORTING__MIN_YEAR", Some("soon"), || {
            let err = AppConfig::load().unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
            assert!(!err.is_client_error());
        });
    }
}
