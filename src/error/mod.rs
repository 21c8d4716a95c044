//! Error handling for the client.
//!
//! - **Categories**: what kind of failure it is and how to present it
//! - **Validation errors**: input rejected before any remote call
//! - **Gateway errors**: a remote call failed, or answered "no rows"
//! - **Unified error**: `AppError` consolidates the above for view actions
//!
//! | Category | Source | Presentation |
//! |----------|--------|--------------|
//! | Validation | form checks | inline, verbatim |
//! | Remote | gateway | generic per-action message, logged |
//! | NotFound | gateway (`PGRST116`) | expected state, not an error |
//! | Auth | missing session | sign-in prompt |
//! | Configuration | startup | fatal |
//! | System | local I/O | inline |

mod app_error;
mod category;
mod gateway;
mod validation;

pub use app_error::AppError;
pub use category::ErrorCategory;
pub use gateway::{GatewayError, NO_ROWS_CODE};
pub use validation::ValidationError;

/// Result alias for view actions.
pub type AppResult<T> = Result<T, AppError>;

/// Result alias for gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;
