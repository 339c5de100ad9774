//! Reporting sink for non-fatal diagnostics.
//!
//! Fatal failures travel as `Result` errors. Everything that only needs to
//! be surfaced (a path that cannot be stat'ed, a truncated recursion, a
//! skipped entry) goes through the `Reporter` handed to the operation, so
//! callers decide where warnings end up and tests can capture them instead
//! of scraping log output.

/// Severity of a reported event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A recoverable anomaly; some data may be missing from the result.
    Warning,
    /// An informational event.
    Notice,
}

/// Sink for events that do not fail the operation that raised them.
pub trait Reporter: Send + Sync {
    /// Report a recoverable anomaly.
    fn warning(&self, message: &str);

    /// Report an informational event.
    fn notice(&self, message: &str);
}

/// Reporter that forwards events to the `log` crate.
///
/// Warnings map to `log::warn!` and notices to `log::info!`. This is the
/// sink operations get when the caller does not supply one.
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn warning(&self, message: &str) {
        log::warn!("{message}");
    }

    fn notice(&self, message: &str) {
        log::info!("{message}");
    }
}

/// Reporter that discards every event.
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn warning(&self, _message: &str) {}

    fn notice(&self, _message: &str) {}
}

/// Reporter that wraps a closure.
pub struct FnReporter<F>
where
    F: Fn(Severity, &str) + Send + Sync,
{
    callback: F,
}

impl<F> FnReporter<F>
where
    F: Fn(Severity, &str) + Send + Sync,
{
    /// Create a reporter from a closure.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> Reporter for FnReporter<F>
where
    F: Fn(Severity, &str) + Send + Sync,
{
    fn warning(&self, message: &str) {
        (self.callback)(Severity::Warning, message);
    }

    fn notice(&self, message: &str) {
        (self.callback)(Severity::Notice, message);
    }
}

/// Helper to create a reporter from a closure.
///
/// # Example
/// ```
/// use filekeeper_common::report::report_fn;
///
/// let reporter = report_fn(|severity, message| {
///     eprintln!("{severity:?}: {message}");
/// });
/// ```
pub fn report_fn<F>(callback: F) -> FnReporter<F>
where
    F: Fn(Severity, &str) + Send + Sync,
{
    FnReporter::new(callback)
}
