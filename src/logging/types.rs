//! The [`Log`] trait shared by every logging backend.

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) forwards to `tracing`;
/// [`BufferedLog`](super::buffered::BufferedLog) keeps entries in memory so
/// callers can inspect exactly what an operation reported.
pub trait Log: Send + Sync {
    /// Log a stage header (shown on the console only when verbose).
    fn stage(&self, msg: &str);
    /// Log a progress line.
    fn info(&self, msg: &str);
    /// Log a debug message (shown on the console only when verbose).
    fn debug(&self, msg: &str);
    /// Log a warning (something was deliberately left alone).
    fn warn(&self, msg: &str);
    /// Log a progress line for an operation that was not performed.
    fn dry_run(&self, msg: &str);
}
