//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with scripted responses per route
//! - [`InMemorySessionStore`] - In-memory session storage

pub mod http;
pub mod session_store;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use session_store::InMemorySessionStore;
