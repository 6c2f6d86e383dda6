//! Command implementations

pub mod async_utils;
pub mod container;
pub mod network_connectivity;

use gcpctl_core::Invocation;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::error::Result as CliResult;
use crate::output::print_output;

/// Print a command result: the final payload, or the pending operation under `--async`
pub fn print_invocation(
    result: &Invocation,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    if result.is_pending() {
        debug!("Printing pending operation handle");
    }
    print_output(result, output_format.resolve(), query)?;
    Ok(())
}
