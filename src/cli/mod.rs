//! Command-line interface.
//!
//! The dispatcher runs before any terminal setup:
//!
//! ```ignore
//! use malajunta::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(command) {
//!     // CLI command was executed, exit with result
//!     std::process::exit(if result.is_ok() { 0 } else { 1 });
//! }
//! // No CLI command, continue to TUI
//! ```

pub mod args;
mod check;
mod version;

pub use args::{parse_args, CliCommand};
pub use check::run_check;
pub use version::{help_text, version_line, VERSION};

use color_eyre::Result;

use crate::config::BackendConfig;

/// Run a CLI command if applicable.
///
/// * `None` - the command is `RunTui` (no CLI action needed)
/// * `Some(result)` - a CLI command ran
pub fn run_cli_command(command: CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Some(Ok(()))
        }
        CliCommand::Help => {
            println!("{}", help_text());
            Some(Ok(()))
        }
        CliCommand::Check => Some(handle_check_command()),
        CliCommand::RunTui => None,
    }
}

fn handle_check_command() -> Result<()> {
    let config = BackendConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_check(config))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_tui_returns_none() {
        assert!(run_cli_command(CliCommand::RunTui).is_none());
    }

    #[test]
    fn test_version_succeeds() {
        assert!(matches!(run_cli_command(CliCommand::Version), Some(Ok(()))));
    }
}
