//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport for every backend call
//! - [`SessionStore`] - Persistence of the signed-in session

pub mod http;
pub mod session_store;

pub use http::{Headers, HttpClient, HttpError, Method, Request, Response};
pub use session_store::{SessionStore, SessionStoreError};
