//! Install command implementation.
use std::sync::Arc;

use anyhow::Result;

use crate::cli::Cli;
use crate::installer::Action;
use crate::logging::Logger;

/// Run the install command.
///
/// # Errors
///
/// Returns an error if setup fails or any file cannot be copied or linked.
pub fn run(args: &Cli, log: &Arc<Logger>) -> Result<()> {
    super::execute(Action::Install, args, log)
}
