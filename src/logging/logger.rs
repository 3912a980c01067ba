//! Console logger backed by `tracing`.
use std::path::{Path, PathBuf};

use super::types::Log;
use super::{DRY_RUN_TARGET, STAGE_TARGET};
use crate::installer::Summary;

/// Implement the methods of [`Log`] by delegating to inherent methods of
/// the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Logger that emits every message as a `tracing` event.
///
/// Formatting and routing (stdout, stderr, optional log file) are decided by
/// the subscriber installed with [`init_subscriber`](super::init_subscriber).
#[derive(Debug, Default)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger; `log_file` is only used for the summary line.
    #[must_use]
    pub fn new(log_file: Option<&Path>) -> Self {
        Self {
            log_file: log_file.map(Path::to_path_buf),
        }
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        tracing::debug!(target: STAGE_TARGET, "{msg}");
    }

    /// Log a progress line.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run progress line.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Report operation counts at debug level.
    pub fn print_summary(&self, summary: &Summary) {
        self.stage("Summary");
        self.debug(&format!(
            "{} installed, {} removed, {} symlinked, {} package(s) skipped",
            summary.installed, summary.removed, summary.linked, summary.skipped_packages
        ));
        if let Some(path) = &self.log_file {
            self.debug(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, dry_run);
}
