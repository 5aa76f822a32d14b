#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` holds the decision half of the leveled logger: which severities a
//! channel accepts, which of a channel's conditions applies in the current
//! execution context, and how the emitted text is composed. Nothing in this
//! crate performs I/O; the sinks and the log file writer live in
//! `logging-sink`, and the router that ties both together lives in the
//! top-level `tierlog` crate.
//!
//! # Design
//!
//! - [`Severity`] is a six-level total order where a smaller ordinal means a
//!   more severe message.
//! - [`OutputCondition`] is a pure `enabled && level <= threshold` predicate.
//! - [`ChannelConfig`] stores three conditions per channel, selected
//!   exclusively by [`ExecutionContext`].
//! - [`Settings`] carries the persisted values; [`Configuration`] binds them
//!   to an injected [`HostEnvironment`] and owns the transient detail-mode
//!   flag.
//! - [`MessageFormatter`] renders `prefix + tag + message`.
//!
//! # Invariants
//!
//! - `OutputCondition::accept` depends only on its inputs.
//! - The development environment overrides detail mode, which overrides the
//!   default context; conditions are never combined.
//! - The header fallback and the default log file name are derived from the
//!   host identity on every call.
//!
//! # Examples
//!
//! ```
//! use branding::Identity;
//! use logging::{Configuration, HostEnvironment, MessageFormatter, Settings, Severity};
//!
//! let configuration = Configuration::new(
//!     Settings::default(),
//!     HostEnvironment::new(Identity::new("Demo", "1.0", "linux")),
//! );
//!
//! assert!(configuration.resolve_file_condition().accept(Severity::Warning));
//! assert!(!configuration.resolve_file_condition().accept(Severity::Information));
//!
//! let header = configuration.header();
//! let line = MessageFormatter::build(Some(&header), Severity::Warning, "low disk");
//! assert_eq!(line, "[Demo][Warning]low disk");
//! ```

mod condition;
mod config;
mod format;
mod severity;

pub use condition::OutputCondition;
pub use config::{ChannelConfig, Configuration, ExecutionContext, HostEnvironment, Settings};
pub use format::MessageFormatter;
pub use severity::{ParseSeverityError, Severity};
