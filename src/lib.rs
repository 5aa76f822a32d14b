#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `tierlog` is a leveled logger that separates call sites from output
//! policy. Every call carries a message and a [`Severity`]; a [`LogRouter`]
//! decides per channel whether to emit it, using thresholds that depend on the
//! execution context (host development environment, detail mode, or default).
//!
//! Two channels exist:
//!
//! - the **debug channel**, which hands `"{keyword}{tag}{message}"` lines to
//!   a [`DebugSink`];
//! - the **file channel**, which opens a session log file on first use and
//!   writes `"HH:MM:SS.mmm | {tag}{message}"` lines into it.
//!
//! # Design
//!
//! The workspace is split by concern. `logging` owns severities, conditions,
//! configuration resolution and formatting. `logging-sink` owns the sinks and
//! the log file writer. `branding` describes the host application. This crate
//! ties them together with the [`ConfigurationProvider`] and
//! [`ErrorReporter`] seams, the router itself, and the process-wide
//! [`facade`].
//!
//! # Errors
//!
//! Logging calls never fail. A configuration that cannot be loaded leaves the
//! router inert with [`Status::SETTINGS_LOAD_ERROR`]; a log file that cannot
//! be opened or written silences the file channel with
//! [`Status::LOG_FILE_IO_ERROR`]. Use [`LogRouter::try_new`] to receive the
//! configuration failure instead.
//!
//! # Features
//!
//! - `serde` (default): serde derives on the settings types and
//!   [`JsonFileProvider`].
//! - `bridge`: `RouterLayer`, forwarding `tracing` events into a router.
//!
//! # Examples
//!
//! ```
//! use tierlog::{LogRouter, MemoryReporter, MemorySink, MissingProvider, Severity};
//!
//! let reporter = MemoryReporter::new();
//! let router = LogRouter::builder()
//!     .debug_sink(MemorySink::new())
//!     .reporter(reporter.clone())
//!     .build(MissingProvider::new("LogSettings"));
//!
//! router.write_line("ignored", Severity::Fatal);
//! assert!(router.status().settings_load_error());
//! assert_eq!(reporter.reports().len(), 1);
//! ```

#[cfg(feature = "bridge")]
mod bridge;
mod error;
pub mod facade;
mod provider;
mod reporter;
mod router;
mod status;

/// Keyword prefixed to the logger's own reports.
pub const SELF_KEYWORD: &str = "[tierlog]";

#[cfg(feature = "bridge")]
pub use bridge::{RouterLayer, install_bridge};
pub use error::ConfigurationLoadError;
#[cfg(feature = "serde")]
pub use provider::JsonFileProvider;
pub use provider::{ConfigurationProvider, FnProvider, MissingProvider, StaticProvider};
pub use reporter::{ErrorReporter, MemoryReporter, StderrReporter, TracingReporter, report_line};
pub use router::{LogRouter, LogRouterBuilder};
pub use status::Status;

pub use branding::{Identity, IdentityCell, PlatformClass};
pub use logging::{
    ChannelConfig, Configuration, ExecutionContext, HostEnvironment, MessageFormatter,
    OutputCondition, Settings, Severity,
};
pub use logging_sink::{DebugSink, LogFileError, MemorySink, StderrSink, TracingSink};
