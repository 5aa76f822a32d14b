//! src/error.rs
//! Errors surfaced while building a router.

use std::io;
use std::path::PathBuf;

/// Failure of a [`ConfigurationProvider`](crate::ConfigurationProvider).
///
/// Returned by [`LogRouter::try_new`](crate::LogRouter::try_new) and passed to
/// the [`ErrorReporter`](crate::ErrorReporter) when a router is built with
/// [`LogRouter::new`](crate::LogRouter::new).
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationLoadError {
    /// The host has no settings for the logger.
    #[error("logger settings '{source_name}' are missing")]
    Missing {
        /// Name of the settings source that was looked up.
        source_name: String,
    },

    /// Reading the settings file failed.
    #[error("failed to read logger settings '{}': {source}", .path.display())]
    Io {
        /// Settings file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The settings file was read but its content is invalid.
    #[error("failed to parse logger settings '{}': {message}", .path.display())]
    Parse {
        /// Settings file path.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// A custom provider failed.
    #[error("logger settings provider failed: {0}")]
    Provider(String),
}
