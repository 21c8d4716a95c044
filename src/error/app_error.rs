//! Unified error type for the client.
//!
//! `AppError` folds the validation, gateway and configuration errors into one
//! enum so view actions can return a single type and the caller can decide
//! how to present it from [`AppError::category`].

use std::fmt;

use super::category::ErrorCategory;
use super::gateway::GatewayError;
use super::validation::ValidationError;
use crate::config::ConfigError;

#[derive(Debug)]
pub enum AppError {
    /// Rejected locally, no remote call was made.
    Validation(ValidationError),

    /// A remote call failed.
    Gateway(GatewayError),

    /// Missing or malformed configuration.
    Config(ConfigError),

    /// Local I/O (reading an upload, writing a download).
    Io(std::io::Error),
}

impl AppError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Validation(ValidationError::SignInRequired { .. }) => ErrorCategory::Auth,
            AppError::Validation(_) => ErrorCategory::Validation,
            AppError::Gateway(err) if err.is_not_found() => ErrorCategory::NotFound,
            AppError::Gateway(err) if err.is_unauthorized() => ErrorCategory::Auth,
            AppError::Gateway(_) => ErrorCategory::Remote,
            AppError::Config(_) => ErrorCategory::Configuration,
            AppError::Io(_) => ErrorCategory::System,
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "E_VALIDATION",
            AppError::Gateway(err) => err.error_code(),
            AppError::Config(_) => "E_CONFIG",
            AppError::Io(_) => "E_IO",
        }
    }

    /// Returns the validation error, if that is what this is.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            AppError::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Text for the inline error slot of a view.
    ///
    /// Validation messages are shown verbatim; remote failures get the
    /// action-specific `fallback` so backend internals never reach the screen.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(err) => write!(f, "{}", err),
            AppError::Gateway(err) => write!(f, "{}", err),
            AppError::Config(err) => write!(f, "{}", err),
            AppError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(err) => Some(err),
            AppError::Gateway(err) => Some(err),
            AppError::Config(err) => Some(err),
            AppError::Io(err) => Some(err),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        AppError::Gateway(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}
