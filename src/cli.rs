//! Command-line interface.
use std::path::PathBuf;

use clap::builder::{StringValueParser, TypedValueParser as _};
use clap::{Parser, ValueEnum};

use crate::installer::Action;

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "node-install",
    about = "Install or uninstall a built Node.js tree into a prefix",
    version
)]
pub struct Cli {
    /// Operation to perform
    #[arg(value_enum, default_value_t = Command::Install)]
    pub command: Command,

    /// Staging directory prepended verbatim to the prefix (DESTDIR)
    pub staging_root: Option<String>,

    /// Installation prefix
    #[arg(default_value = "/usr/local")]
    pub prefix: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Append a plain-text copy of all output to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Options shared by both operations.
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// The staging directory, empty when not given.
    #[must_use]
    pub fn staging_root(&self) -> &str {
        self.staging_root.as_deref().unwrap_or_default()
    }
}

/// Options shared by both operations.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Install only the public headers (env: any non-empty value enables)
    #[arg(
        long,
        env = "HEADERS_ONLY",
        action = clap::ArgAction::SetTrue,
        default_value = "",
        value_parser = StringValueParser::new().map(|value| !value.is_empty())
    )]
    pub headers_only: bool,

    /// Preview changes without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Override the source tree root (the directory holding config.gypi)
    #[arg(long, env = "NODE_SOURCE_ROOT", value_name = "DIR")]
    pub source_root: Option<PathBuf>,
}

/// Available operations.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Copy the build output into the prefix
    Install,
    /// Remove previously installed files from the prefix
    Uninstall,
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        match command {
            Command::Install => Self::Install,
            Command::Uninstall => Self::Uninstall,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_install_into_usr_local() {
        let cli = Cli::try_parse_from(["node-install"]).unwrap();
        assert_eq!(cli.command, Command::Install);
        assert_eq!(cli.staging_root(), "");
        assert_eq!(cli.prefix, "/usr/local");
        assert!(!cli.global.dry_run);
        assert!(!cli.global.headers_only);
    }

    #[test]
    fn parse_uninstall_with_staging_and_prefix() {
        let cli = Cli::try_parse_from(["node-install", "uninstall", "/tmp/stage", "/opt/node"])
            .unwrap();
        assert_eq!(cli.command, Command::Uninstall);
        assert_eq!(cli.staging_root(), "/tmp/stage");
        assert_eq!(cli.prefix, "/opt/node");
    }

    #[test]
    fn parse_empty_staging_root() {
        let cli = Cli::try_parse_from(["node-install", "install", "", "/opt"]).unwrap();
        assert_eq!(cli.staging_root(), "");
        assert_eq!(cli.prefix, "/opt");
    }

    #[test]
    fn unknown_command_is_a_usage_error() {
        let err = Cli::try_parse_from(["node-install", "reinstall"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn parse_headers_only_flag() {
        let cli = Cli::try_parse_from(["node-install", "--headers-only", "install"]).unwrap();
        assert!(cli.global.headers_only);
    }

    #[test]
    fn parse_dry_run_short() {
        let cli = Cli::try_parse_from(["node-install", "-d"]).unwrap();
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_verbose_and_log_file() {
        let cli =
            Cli::try_parse_from(["node-install", "-v", "--log-file", "/tmp/install.log"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/install.log")));
    }

    #[test]
    fn parse_source_root_override() {
        let cli = Cli::try_parse_from(["node-install", "--source-root", "/src/node"]).unwrap();
        assert_eq!(cli.global.source_root, Some(PathBuf::from("/src/node")));
    }

    #[test]
    fn command_maps_to_action() {
        assert_eq!(Action::from(Command::Install), Action::Install);
        assert_eq!(Action::from(Command::Uninstall), Action::Uninstall);
    }
}
