//! crates/logging-sink/src/error.rs
//! Errors raised by the log file writer.

use std::io;
use std::path::{Path, PathBuf};

use crate::file::OpenMode;

/// Failure of the log file channel.
///
/// [`Open`](Self::Open) covers an invalid path and any I/O error while
/// creating the file or writing its session header; callers can tell it apart
/// from later faults with [`is_open_failure`](Self::is_open_failure).
#[derive(Debug, thiserror::Error)]
pub enum LogFileError {
    /// The file could not be opened or its session header could not be written.
    #[error("failed to open log file '{}' in {mode} mode: {source}", .path.display())]
    Open {
        /// Resolved log file path.
        path: PathBuf,
        /// Requested open mode.
        mode: OpenMode,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing or flushing a line after a successful open failed.
    #[error("failed to write log file '{}': {source}", .path.display())]
    Write {
        /// Resolved log file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The writer was already closed.
    #[error("log file '{}' is closed", .path.display())]
    Closed {
        /// Resolved log file path.
        path: PathBuf,
    },
}

impl LogFileError {
    pub(crate) fn open(path: &Path, mode: OpenMode, source: io::Error) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            mode,
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Reports whether the error happened while opening the file.
    #[must_use]
    pub const fn is_open_failure(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Returns the log file path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::Write { path, .. } | Self::Closed { path } => path,
        }
    }
}
