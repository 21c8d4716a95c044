//! File logging. The TUI owns stdout, so logs go to
//! `<data dir>/malajunta/malajunta.log`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Variable checked before `RUST_LOG`.
pub const LOG_VAR: &str = "MALAJUNTA_LOG";

pub const DEFAULT_FILTER: &str = "malajunta=info";

/// Pick the filter directive: `MALAJUNTA_LOG`, then `RUST_LOG`, then the
/// default.
pub fn filter_directive<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(LOG_VAR)
        .or_else(|| lookup("RUST_LOG"))
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

pub fn log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("malajunta").join("malajunta.log"))
}

/// Install the global subscriber. Returns the log file path, or `None` when
/// no file could be opened (logging is then disabled).
pub fn init_logging() -> Option<PathBuf> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let directive = filter_directive(|name| std::env::var(name).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .ok()?;
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_precedence() {
        let both = |name: &str| match name {
            "MALAJUNTA_LOG" => Some("malajunta=debug".to_string()),
            "RUST_LOG" => Some("warn".to_string()),
            _ => None,
        };
        assert_eq!(filter_directive(both), "malajunta=debug");

        let rust_only = |name: &str| (name == "RUST_LOG").then(|| "warn".to_string());
        assert_eq!(filter_directive(rust_only), "warn");

        assert_eq!(filter_directive(|_| None), DEFAULT_FILTER);
    }
}
