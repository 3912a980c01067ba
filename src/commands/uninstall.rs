//! Uninstall command implementation.
use std::sync::Arc;

use anyhow::Result;

use crate::cli::Cli;
use crate::installer::Action;
use crate::logging::Logger;

/// Run the uninstall command.
///
/// # Errors
///
/// Returns an error if setup fails or an installed file or directory cannot
/// be removed.
pub fn run(args: &Cli, log: &Arc<Logger>) -> Result<()> {
    super::execute(Action::Uninstall, args, log)
}
