//! Mala Junta - a terminal client for the community's profiles, characters
//! and media feed, backed by a hosted auth/REST/storage service.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod logging;
pub mod models;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod validation;
pub mod view_state;
