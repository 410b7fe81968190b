//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Library crates keep their own precise error enums and convert into this
/// taxonomy at the boundary, where callers only need to know whether the
/// request itself was at fault.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (bad period, bad date range, bad argument).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The ledger collaborator failed or returned inconsistent data.
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP-equivalent status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Ledger(_) => 502,
            Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Ledger(_) => "LEDGER_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true when the caller is at fault (4xx-equivalent).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Validation(_))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::NotFound(String::new()), 404, "NOT_FOUND", true)]
    #[case(AppError::Validation(String::new()), 400, "VALIDATION_ERROR", true)]
    #[case(AppError::Ledger(String::new()), 502, "LEDGER_ERROR", false)]
    #[case(AppError::Config(String::new()), 500, "CONFIG_ERROR", false)]
    #[case(AppError::Internal(String::new()), 500, "INTERNAL_ERROR", false)]
    fn test_error_classification(
        #[case] err: AppError,
        #[case] status: u16,
        #[case] code: &str,
        #[case] client: bool,
    ) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
        assert_eq!(err.is_client_error(), client);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("msg".into()).to_string(),
            "Not found: msg"
        );
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::Ledger("msg".into()).to_string(),
            "Ledger error: msg"
        );
        assert_eq!(
            AppError::Config("msg".into()).to_string(),
            "Configuration error: msg"
        );
        assert_eq!(
            AppError::Internal("msg".into()).to_string(),
            "Internal error: msg"
        );
    }
}
