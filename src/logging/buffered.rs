//! In-memory logger that keeps every entry for later inspection.
use std::sync::Mutex;

use super::types::Log;

/// A single buffered log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// A stage header.
    Stage(String),
    /// A progress line.
    Info(String),
    /// A debug message.
    Debug(String),
    /// A warning.
    Warn(String),
    /// A dry-run progress line.
    DryRun(String),
}

/// Implement the methods of [`Log`] by pushing the matching [`LogEntry`].
macro_rules! buffer_log_methods {
    ($($method:ident => $variant:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                if let Ok(mut guard) = self.entries.lock() {
                    guard.push(LogEntry::$variant(msg.to_string()));
                }
            }
        )+
    };
}

/// Logger that records entries in memory instead of printing them.
///
/// # Examples
///
/// ```
/// use node_install::logging::{BufferedLog, Log};
///
/// let log = BufferedLog::new();
/// log.info("installing /usr/local/bin/node");
/// log.debug("not a progress line");
/// assert_eq!(log.progress_lines(), vec!["installing /usr/local/bin/node"]);
/// ```
#[derive(Debug, Default)]
pub struct BufferedLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl BufferedLog {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries in order.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// The progress lines (info and dry-run entries) in order.
    #[must_use]
    pub fn progress_lines(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                LogEntry::Info(msg) | LogEntry::DryRun(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }
}

impl Log for BufferedLog {
    buffer_log_methods! {
        stage   => Stage,
        info    => Info,
        debug   => Debug,
        warn    => Warn,
        dry_run => DryRun,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_recorded_in_order() {
        let log = BufferedLog::new();
        log.stage("Installing");
        log.info("a");
        log.warn("b");
        assert_eq!(
            log.entries(),
            vec![
                LogEntry::Stage("Installing".to_string()),
                LogEntry::Info("a".to_string()),
                LogEntry::Warn("b".to_string()),
            ]
        );
    }

    #[test]
    fn progress_lines_include_dry_run() {
        let log = BufferedLog::new();
        log.info("installing x");
        log.dry_run("removing y");
        log.debug("z");
        assert_eq!(log.progress_lines(), vec!["installing x", "removing y"]);
    }
}
