//! Progress reporting and cooperative cancellation
//!
//! Long-running operations report `(message, percent, level)` triples to an
//! optional [`Progress`] sink and poll an [`AbortFlag`] at their designated
//! checkpoints. Requesting an abort never interrupts work in flight; the
//! operation notices it at the next checkpoint and returns.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Severity of a progress report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportingLevel {
    /// Ordinary progress
    Normal,
    /// The operation failed
    Errors,
    /// The operation stopped because an abort was requested
    Abort,
}

/// Receiver of progress reports.
pub trait Progress {
    /// Record a report. `percent` is in `0..=100`.
    fn update_progress(&mut self, text: &str, percent: u32, level: ReportingLevel);
}

impl<F> Progress for F
where
    F: FnMut(&str, u32, ReportingLevel),
{
    fn update_progress(&mut self, text: &str, percent: u32, level: ReportingLevel) {
        self(text, percent, level)
    }
}

/// Progress sink that forwards reports to the `log` facade.
///
/// Normal reports go to `debug`, errors to `error` and aborts to `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn update_progress(&mut self, text: &str, percent: u32, level: ReportingLevel) {
        match level {
            ReportingLevel::Normal => log::debug!("{text} ({percent}%)"),
            ReportingLevel::Errors => log::error!("{text}"),
            ReportingLevel::Abort => log::warn!("{text}"),
        }
    }
}

/// Shared cancellation flag.
///
/// Clones refer to the same flag, so one clone can be handed to the running
/// operation and another kept by whoever may cancel it.
#[derive(Debug, Clone, Default)]
pub struct AbortFlag {
    flag: Arc<AtomicBool>,
}

impl AbortFlag {
    /// Create a flag with no abort requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an abort.
    pub fn abort(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether an abort has been requested.
    pub fn is_aborted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clear a previous abort request.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
