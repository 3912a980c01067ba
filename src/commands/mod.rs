//! Top-level operation orchestration shared by `install` and `uninstall`.
pub mod install;
pub mod uninstall;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::Cli;
use crate::config::{BuildConfig, CONFIG_FILE};
use crate::error::InstallError;
use crate::fs::DestRoot;
use crate::installer::{Action, Installer};
use crate::logging::{Log, Logger};
use crate::manifest::{Manifest, Selection};
use crate::platform::Platform;

/// State produced by the common setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Installer context for the run.
    pub installer: Installer,
    /// Rules to apply.
    pub manifest: Manifest,
}

impl CommandSetup {
    /// Resolve the source root, load the build configuration, compute the
    /// destination root and select the manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the source root cannot be found, `config.gypi`
    /// cannot be loaded, or walking the header directories fails.
    pub fn init(args: &Cli, log: Arc<dyn Log>) -> Result<Self> {
        let platform = Platform::detect();
        let version = option_env!("NODE_INSTALL_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        log.debug(&format!("node-install {version} on {}", platform.os));

        log.stage("Resolving source root");
        let source_root = resolve_source_root(args.global.source_root.as_deref())?;
        log.debug(&format!("source root: {}", source_root.display()));

        log.stage("Loading configuration");
        let config = BuildConfig::load(&source_root).map_err(InstallError::from)?;
        log.debug(&format!("{} build variables", config.variables().len()));

        let root = DestRoot::new(&source_root, args.staging_root(), &args.prefix)
            .context("cannot resolve destination root")?;
        log.debug(&format!("destination root: {}", root.path().display()));

        let selection = if args.global.headers_only {
            Selection::HeadersOnly
        } else {
            Selection::Full
        };
        let manifest = Manifest::select(selection, &config, &platform, &source_root)
            .map_err(InstallError::from)?;
        log.debug(&format!("{} rule(s) selected", manifest.rules().len()));

        Ok(Self {
            installer: Installer {
                config,
                platform,
                source_root,
                root,
                log,
                dry_run: args.global.dry_run,
            },
            manifest,
        })
    }
}

/// Run `action` end to end and print the summary.
///
/// # Errors
///
/// Returns an error if setup fails or a filesystem operation fails; rules
/// after the failing one are not applied.
pub fn execute(action: Action, args: &Cli, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(args, Arc::clone(log) as Arc<dyn Log>)?;

    log.stage(&format!(
        "Running {action} into {}",
        setup.installer.root.path().display()
    ));
    let summary = setup
        .installer
        .run(action, &setup.manifest)
        .map_err(InstallError::from)
        .with_context(|| format!("{action} failed"))?;

    log.print_summary(&summary);
    Ok(())
}

/// Locate the source tree root (the directory holding `config.gypi`).
///
/// An explicit directory (from `--source-root` or `NODE_SOURCE_ROOT`) wins.
/// Otherwise the tree is searched for relative to the running executable
/// (`out/Release/` or `tools/`), then in the current directory.
///
/// # Errors
///
/// Returns an error if an explicit directory does not exist or no candidate
/// holds `config.gypi`.
pub fn resolve_source_root(explicit: Option<&Path>) -> Result<PathBuf, InstallError> {
    let exe = std::env::current_exe().ok();
    let cwd = std::env::current_dir().ok();
    resolve_source_root_from(explicit, exe.as_deref(), cwd.as_deref())
}

fn resolve_source_root_from(
    explicit: Option<&Path>,
    exe: Option<&Path>,
    cwd: Option<&Path>,
) -> Result<PathBuf, InstallError> {
    if let Some(root) = explicit {
        return dunce::canonicalize(root)
            .map_err(|e| InstallError::Root(format!("{}: {e}", root.display())));
    }

    if let Some(parent) = exe.and_then(Path::parent) {
        let candidates = [
            parent.join("../.."), // out/Release/ → source root
            parent.join(".."),    // tools/ → source root
        ];
        for candidate in &candidates {
            if candidate.join(CONFIG_FILE).is_file() {
                return dunce::canonicalize(candidate)
                    .map_err(|e| InstallError::Root(format!("{}: {e}", candidate.display())));
            }
        }
    }

    if let Some(cwd) = cwd
        && cwd.join(CONFIG_FILE).is_file()
    {
        return Ok(cwd.to_path_buf());
    }

    Err(InstallError::Root(format!(
        "no {CONFIG_FILE} found; use --source-root or set NODE_SOURCE_ROOT"
    )))
}
