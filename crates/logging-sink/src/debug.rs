//! crates/logging-sink/src/debug.rs
//! Developer-facing debug output channel and its stock implementations.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use logging::Severity;

/// Destination for debug-channel lines.
///
/// The router hands every accepted, already formatted line to the sink along
/// with its severity. How the severity affects presentation is up to the
/// sink. Implementations must not panic and should swallow their own I/O
/// errors: logging never interrupts the caller.
pub trait DebugSink: Send + Sync {
    /// Emits one formatted line.
    fn write_debug_line(&self, message: &str, level: Severity);
}

impl<T: DebugSink + ?Sized> DebugSink for Arc<T> {
    fn write_debug_line(&self, message: &str, level: Severity) {
        (**self).write_debug_line(message, level);
    }
}

impl<T: DebugSink + ?Sized> DebugSink for Box<T> {
    fn write_debug_line(&self, message: &str, level: Severity) {
        (**self).write_debug_line(message, level);
    }
}

/// Writes debug lines to any [`io::Write`] target, one line per call.
///
/// The writer is held behind a mutex so concurrent callers never interleave
/// within a line.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wraps `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl WriterSink<io::Stderr> {
    /// Sink writing to the process's standard error stream.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> DebugSink for WriterSink<W> {
    fn write_debug_line(&self, message: &str, _level: Severity) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "{message}").and_then(|()| writer.flush());
    }
}

/// Debug sink writing to standard error.
pub type StderrSink = WriterSink<io::Stderr>;

/// Forwards debug lines as `tracing` events.
///
/// Fatal and Error map to `ERROR`, Warning to `WARN`, Notice and Information
/// to `INFO`, and Debug to `DEBUG`. Events are emitted with the target
/// `tierlog::debug` and the formatted line as the message.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Target used for every forwarded event.
    pub const TARGET: &'static str = "tierlog::debug";
}

impl DebugSink for TracingSink {
    fn write_debug_line(&self, message: &str, level: Severity) {
        match level {
            Severity::Fatal | Severity::Error => {
                tracing::error!(target: "tierlog::debug", "{message}");
            }
            Severity::Warning => tracing::warn!(target: "tierlog::debug", "{message}"),
            Severity::Notice | Severity::Information => {
                tracing::info!(target: "tierlog::debug", "{message}");
            }
            Severity::Debug => tracing::debug!(target: "tierlog::debug", "{message}"),
        }
    }
}

/// Discards every line.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl DebugSink for NullSink {
    fn write_debug_line(&self, _message: &str, _level: Severity) {}
}

/// One line captured by a [`MemorySink`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapturedLine {
    /// Severity passed by the router.
    pub level: Severity,
    /// Formatted line text.
    pub message: String,
}

/// Keeps every line in memory, for tests and in-process consoles.
///
/// Clones share the same buffer, so a test can hand one clone to the router
/// and inspect the other.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<CapturedLine>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every captured line.
    #[must_use]
    pub fn lines(&self) -> Vec<CapturedLine> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns only the message texts.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|line| line.message).collect()
    }

    /// Returns the number of captured lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Reports whether nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns every captured line.
    pub fn drain(&self) -> Vec<CapturedLine> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }
}

impl DebugSink for MemorySink {
    fn write_debug_line(&self, message: &str, level: Severity) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedLine {
                level,
                message: message.to_owned(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_sink_appends_newline_per_call() {
        let sink = WriterSink::new(Vec::new());
        sink.write_debug_line("[App]first", Severity::Information);
        sink.write_debug_line("[App][Error]second", Severity::Error);

        let output = String::from_utf8(sink.into_inner()).expect("utf-8");
        assert_eq!(output, "[App]first\n[App][Error]second\n");
    }

    #[test]
    fn memory_sink_clones_share_buffer() {
        let sink = MemorySink::new();
        let observer = sink.clone();
        sink.write_debug_line("hello", Severity::Notice);

        assert_eq!(observer.len(), 1);
        assert_eq!(
            observer.lines(),
            vec![CapturedLine {
                level: Severity::Notice,
                message: "hello".to_owned(),
            }]
        );
        assert_eq!(observer.drain().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn arc_and_box_forward_to_inner_sink() {
        let memory = MemorySink::new();
        let shared: Arc<dyn DebugSink> = Arc::new(memory.clone());
        let boxed: Box<dyn DebugSink> = Box::new(memory.clone());

        shared.write_debug_line("a", Severity::Debug);
        boxed.write_debug_line("b", Severity::Debug);
        assert_eq!(memory.messages(), vec!["a", "b"]);
    }

    #[test]
    fn null_and_tracing_sinks_do_not_panic() {
        NullSink.write_debug_line("ignored", Severity::Fatal);
        for level in Severity::ALL {
            TracingSink.write_debug_line("no subscriber installed", level);
        }
    }
}
