//! src/reporter.rs
//! Host-facing report of a configuration load failure.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use logging::{MessageFormatter, Severity};

use crate::SELF_KEYWORD;
use crate::error::ConfigurationLoadError;

/// Surfaces a configuration load failure through the host's own error channel.
///
/// A router calls this at most once, while it is being built.
pub trait ErrorReporter: Send + Sync {
    /// Reports `error`.
    fn report(&self, error: &ConfigurationLoadError);
}

impl<T: ErrorReporter + ?Sized> ErrorReporter for Arc<T> {
    fn report(&self, error: &ConfigurationLoadError) {
        (**self).report(error);
    }
}

impl<T: ErrorReporter + ?Sized> ErrorReporter for Box<T> {
    fn report(&self, error: &ConfigurationLoadError) {
        (**self).report(error);
    }
}

/// Formats the line every stock reporter emits: `"[tierlog][Error]{error}"`.
#[must_use]
pub fn report_line(error: &ConfigurationLoadError) -> String {
    MessageFormatter::build(Some(SELF_KEYWORD), Severity::Error, &error.to_string())
}

/// Writes the report to standard error.
#[derive(Copy, Clone, Debug, Default)]
pub struct StderrReporter;

impl ErrorReporter for StderrReporter {
    fn report(&self, error: &ConfigurationLoadError) {
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", report_line(error));
    }
}

/// Emits the report as a `tracing` error event.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &ConfigurationLoadError) {
        tracing::error!(target: "tierlog::report", %error, "failed to load logger settings");
    }
}

/// Collects report lines in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryReporter {
    reports: Arc<Mutex<Vec<String>>>,
}

impl MemoryReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every report line received so far.
    #[must_use]
    pub fn reports(&self) -> Vec<String> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ErrorReporter for MemoryReporter {
    fn report(&self, error: &ConfigurationLoadError) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report_line(error));
    }
}
