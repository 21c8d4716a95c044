//! Error category classification.
//!
//! Categories follow the three failure classes the client distinguishes:
//! input rejected locally, remote call failed, and the expected "no row"
//! answer from the backend. Configuration and system failures round it out.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Input rejected before any remote call was issued.
    /// Shown inline next to the form that produced it.
    Validation,

    /// A remote call failed (transport, HTTP status, undecodable body).
    /// Shown as a generic message for the action; never retried.
    Remote,

    /// The backend reported that the requested row does not exist.
    /// An expected state, not a failure (e.g. a profile not created yet).
    NotFound,

    /// The action needs a signed-in user.
    Auth,

    /// Missing or invalid configuration. Only fatal at startup.
    Configuration,

    /// Local filesystem or terminal errors.
    System,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Remote => "remote",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::System => "system",
        }
    }

    /// Whether the condition is an expected outcome rather than a failure.
    pub fn is_expected(&self) -> bool {
        matches!(self, ErrorCategory::NotFound | ErrorCategory::Validation)
    }

    /// Whether this category should stop the process.
    ///
    /// Everything except configuration is scoped to the triggering action.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ErrorCategory::Configuration)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
