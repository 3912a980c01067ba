//! Executes a [`Manifest`] against a destination root.
//!
//! Every rule is applied with one [`Action`]. Nothing is transactional: the
//! first error stops the run and files already handled stay as they are.
mod package;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::BuildConfig;
use crate::error::FsError;
use crate::fs::{
    DestRoot, copy_preserving, ensure_parent_dir, prune_empty_ancestors, remove_if_exists,
};
use crate::logging::Log;
use crate::manifest::{DestTemplate, Manifest, Rule};
use crate::platform::Platform;

/// What to do with each rule of a manifest.
///
/// # Examples
///
/// ```
/// use node_install::installer::Action;
///
/// assert_eq!(Action::Install.to_string(), "install");
/// assert_eq!(Action::Uninstall.to_string(), "uninstall");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Copy files and create symlinks.
    Install,
    /// Remove files and symlinks, then prune empty directories.
    Uninstall,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Uninstall => write!(f, "uninstall"),
        }
    }
}

/// Counts of the filesystem operations performed (or previewed) by a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Files copied.
    pub installed: u32,
    /// Files and links removed.
    pub removed: u32,
    /// Symlinks created.
    pub linked: u32,
    /// Bundled packages skipped because their install directory is a link.
    pub skipped_packages: u32,
}

/// Everything a run needs, built once and passed by reference.
pub struct Installer {
    /// Build configuration loaded from the source tree.
    pub config: BuildConfig,
    /// Host platform.
    pub platform: Platform,
    /// Root of the source tree; manifest sources are relative to it.
    pub source_root: PathBuf,
    /// Destination root.
    pub root: DestRoot,
    /// Logger for progress lines.
    pub log: Arc<dyn Log>,
    /// Print what would happen without touching the filesystem.
    pub dry_run: bool,
}

impl fmt::Debug for Installer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Installer")
            .field("config", &"<BuildConfig>")
            .field("platform", &self.platform)
            .field("source_root", &self.source_root)
            .field("root", &self.root)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Installer {
    /// Apply every rule of `manifest` in order.
    ///
    /// # Errors
    ///
    /// Returns the first filesystem error; the remaining rules are not run.
    pub fn run(&self, action: Action, manifest: &Manifest) -> Result<Summary, FsError> {
        let mut summary = Summary::default();
        for rule in manifest.rules() {
            self.apply(action, rule, &mut summary)?;
        }
        Ok(summary)
    }

    /// Apply one rule.
    ///
    /// # Errors
    ///
    /// Returns an error if any copy, removal, prune or link fails.
    pub fn apply(&self, action: Action, rule: &Rule, summary: &mut Summary) -> Result<(), FsError> {
        match rule {
            Rule::Files(files) => self.transfer(action, &files.sources, &files.dest, summary),
            Rule::Package(pkg) => package::apply(self, action, pkg, summary),
        }
    }

    fn transfer(
        &self,
        action: Action,
        sources: &[PathBuf],
        dest: &DestTemplate,
        summary: &mut Summary,
    ) -> Result<(), FsError> {
        match action {
            Action::Install => self.copy_into(sources, dest, summary),
            Action::Uninstall => self.remove_from(sources, dest, summary),
        }
    }

    /// Copy each source to its target, replacing whatever was there.
    ///
    /// The old target is unlinked first so a running executable is never
    /// written to in place.
    fn copy_into(
        &self,
        sources: &[PathBuf],
        dest: &DestTemplate,
        summary: &mut Summary,
    ) -> Result<(), FsError> {
        for source in sources {
            let target = dest.target_for(&self.root, source)?;
            self.progress(&format!("installing {}", target.display()));
            summary.installed += 1;
            if self.dry_run {
                continue;
            }
            ensure_parent_dir(&target)?;
            remove_if_exists(&target)?;
            copy_preserving(&self.source(source), &target)?;
        }
        Ok(())
    }

    /// Remove each source's target and prune the directories left empty.
    fn remove_from(
        &self,
        sources: &[PathBuf],
        dest: &DestTemplate,
        summary: &mut Summary,
    ) -> Result<(), FsError> {
        for source in sources {
            let target = dest.target_for(&self.root, source)?;
            self.progress(&format!("removing {}", target.display()));
            summary.removed += 1;
            if self.dry_run {
                continue;
            }
            remove_if_exists(&target)?;
            if let Some(parent) = target.parent() {
                prune_empty_ancestors(parent, &self.root)?;
            }
        }
        Ok(())
    }

    fn progress(&self, line: &str) {
        if self.dry_run {
            self.log.dry_run(line);
        } else {
            self.log.info(line);
        }
    }

    fn source(&self, relative: &Path) -> PathBuf {
        self.source_root.join(relative)
    }
}
