//! Command-line driver.
//!
//! # Data Flow
//! ```text
//! argv → args.rs (clap) → Command + Credentials
//!     → config (optional file) → logging
//!     → TokenProvider::token()          (fatal on failure, no API calls)
//!     → ComputeClient
//!     → commands.rs
//!         Discovery → catalog per project → {"data": [...]}
//!         Check     → resolver → classifier → severity code
//! ```
//!
//! # Design Decisions
//! - All argument validation happens before any network call
//! - Stdout carries only results; diagnostics go through tracing to stderr

pub mod args;
pub mod commands;

use std::io::{self, Write};

pub use args::{Cli, Command, Credentials};
pub use commands::{run_check, run_discovery};

use crate::compute::ComputeClient;
use crate::config::load_or_default;
use crate::error::AppError;
use crate::observability::init_logging;

/// Execute one invocation end to end.
pub async fn run(cli: Cli) -> Result<(), AppError> {
    let config = load_or_default(cli.config.as_deref())?;
    init_logging(&config.observability, cli.debug_enabled());

    let command = cli.command()?;
    let credentials = cli.credentials(&config.auth)?;
    let token = credentials.provider(&config.auth).token().await?;
    let client = ComputeClient::new(&config.api)?;

    let mut stdout = io::stdout().lock();
    match command {
        Command::Discovery { projects } => {
            run_discovery(&client, &token, &projects, &mut stdout).await
        }
        Command::Check { project, target } => {
            run_check(
                &client,
                &token,
                &project,
                &target,
                cli.debug_enabled(),
                &mut stdout,
            )
            .await
        }
    }
}

/// Report a finished run on `err` and return the process exit code.
///
/// Failures are written once, as a single `Error: ...` line.
pub fn report_outcome<W: Write>(result: Result<(), AppError>, err: &mut W) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            e.exit_code()
        }
    }
}
