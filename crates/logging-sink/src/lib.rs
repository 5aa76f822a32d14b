#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the output half of the leveled logger: the
//! [`DebugSink`] trait for the developer-facing channel with a handful of stock
//! sinks, and the log file writer that frames each run in a session block and
//! stamps every line with the time elapsed since the file was opened.
//!
//! # Design
//!
//! [`SessionWriter`] owns the text layout and is generic over
//! [`std::io::Write`], so the exact bytes can be checked against a `Vec<u8>`.
//! [`LogFileWriter`] wraps a session around a [`std::fs::File`], converts I/O
//! failures into [`LogFileError`], and guarantees a single footer however many
//! times it is closed.
//!
//! # Invariants
//!
//! - Every line written ends with exactly one `\n` and is flushed before the
//!   call returns.
//! - Elapsed timestamps come from [`std::time::Instant`], never the wall
//!   clock, so adjusting the system time cannot reorder them.
//! - A successfully opened file always contains the session-start block.
//!
//! # Errors
//!
//! [`LogFileError::Open`] is returned when the path is invalid or the file or
//! its header cannot be written; [`LogFileError::Write`] when a later line
//! fails. Debug sinks swallow their own errors.
//!
//! # Examples
//!
//! ```
//! use branding::Identity;
//! use logging::Severity;
//! use logging_sink::{DebugSink, LogFileWriter, MemorySink, OpenMode};
//!
//! let sink = MemorySink::new();
//! sink.write_debug_line("[Demo][Warning]disk almost full", Severity::Warning);
//! assert_eq!(sink.len(), 1);
//!
//! let dir = tempfile::tempdir()?;
//! let identity = Identity::new("Demo", "1.0", "linux");
//! let mut file = LogFileWriter::open(dir.path().join("demo.log"), OpenMode::Overwrite, &identity)?;
//! file.write_line("[Warning]disk almost full")?;
//! file.close()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod debug;
mod error;
mod file;
mod session;

pub use debug::{
    CapturedLine, DebugSink, MemorySink, NullSink, StderrSink, TracingSink, WriterSink,
};
pub use error::LogFileError;
pub use file::{LogFileWriter, OpenMode};
pub use session::{
    ElapsedStamp, RULE_WIDTH, SESSION_TIMESTAMP_FORMAT, SessionWriter, local_timestamp,
};
