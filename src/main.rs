//! `node-install` binary.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use node_install::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose, args.log_file.as_deref())?;
    let log = Arc::new(logging::Logger::new(args.log_file.as_deref()));

    match args.command {
        cli::Command::Install => commands::install::run(&args, &log),
        cli::Command::Uninstall => commands::uninstall::run(&args, &log),
    }
}
