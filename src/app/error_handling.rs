//! Error handling utilities
//!
//! This module maps fatal errors to messages and process exit codes.

use crate::error::SweepError;
use tracing::error;

/// Recover the [`SweepError`] behind a fatal error.
///
/// Errors from outside the analysis (such as a closed stdout) become
/// [`SweepError::Other`] with their cause chain in the message.
pub fn into_sweep_error(error: anyhow::Error) -> SweepError {
    match error.downcast::<SweepError>() {
        Ok(sweep_err) => sweep_err,
        Err(other) => SweepError::unexpected(&other),
    }
}

/// Handle fatal errors and exit with appropriate status code
///
/// Shows the user message, plus the developer message in verbose mode.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {:#}", error);

    let sweep_err = into_sweep_error(error);
    eprintln!("{}", sweep_err.user_message());

    if verbose >= 1 {
        eprintln!("\nContext Chain:\n{}", sweep_err.developer_message());
    }

    std::process::exit(sweep_err.exit_code())
}
