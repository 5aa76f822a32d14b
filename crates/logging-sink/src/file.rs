//! crates/logging-sink/src/file.rs
//! File-backed session writer with idempotent close.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use branding::Identity;

use crate::error::LogFileError;
use crate::session::SessionWriter;

/// How an existing log file is treated on open.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OpenMode {
    /// Keep existing content and add a new session after it.
    Append,
    /// Truncate the file before writing.
    Overwrite,
}

impl OpenMode {
    /// Maps the configuration's append flag to a mode.
    #[must_use]
    pub const fn from_append(append: bool) -> Self {
        if append { Self::Append } else { Self::Overwrite }
    }

    /// Returns the lowercase label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

type SessionTarget = Box<dyn Write + Send>;

/// Owns one open log file for the duration of a session.
///
/// The file is opened and the session header written by
/// [`open`](Self::open). Each [`write_line`](Self::write_line) is flushed to
/// the operating system before returning, so no line is lost if the process
/// dies right afterwards. [`close`](Self::close) writes the footer and
/// releases the handle; further calls are no-ops, and dropping an open writer
/// closes it.
pub struct LogFileWriter {
    path: PathBuf,
    session: Option<SessionWriter<SessionTarget>>,
}

impl LogFileWriter {
    /// Opens `path` and writes the session-start block.
    ///
    /// In [`OpenMode::Append`] the block is preceded by a blank line when the
    /// file already has content.
    pub fn open(
        path: impl Into<PathBuf>,
        mode: OpenMode,
        identity: &Identity,
    ) -> Result<Self, LogFileError> {
        let path = path.into();
        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            OpenMode::Append => options.append(true),
            OpenMode::Overwrite => options.write(true).truncate(true),
        };

        let file = options
            .open(&path)
            .map_err(|error| LogFileError::open(&path, mode, error))?;
        let separate = match mode {
            OpenMode::Append => {
                file.metadata()
                    .map_err(|error| LogFileError::open(&path, mode, error))?
                    .len()
                    > 0
            }
            OpenMode::Overwrite => false,
        };
        let session = SessionWriter::start(Box::new(file) as SessionTarget, identity, separate)
            .map_err(|error| LogFileError::open(&path, mode, error))?;

        tracing::debug!(path = %path.display(), %mode, "opened log file");
        Ok(Self {
            path,
            session: Some(session),
        })
    }

    /// Starts a session on an already open `writer`, reported under `path`.
    ///
    /// No separator line is written. `mode` only labels errors raised while
    /// writing the session header.
    pub fn from_writer(
        path: impl Into<PathBuf>,
        mode: OpenMode,
        writer: impl Write + Send + 'static,
        identity: &Identity,
    ) -> Result<Self, LogFileError> {
        let path = path.into();
        let session = SessionWriter::start(Box::new(writer) as SessionTarget, identity, false)
            .map_err(|error| LogFileError::open(&path, mode, error))?;
        Ok(Self {
            path,
            session: Some(session),
        })
    }

    /// Returns the path the writer was opened with.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reports whether the file handle is still held.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Writes one timestamped line and flushes it.
    pub fn write_line(&mut self, message: &str) -> Result<(), LogFileError> {
        let Some(session) = self.session.as_mut() else {
            return Err(LogFileError::Closed {
                path: self.path.clone(),
            });
        };
        session
            .write_line(message)
            .map_err(|error| LogFileError::write(&self.path, error))
    }

    /// Writes the session-end block and releases the file handle.
    ///
    /// Calling this on an already closed writer does nothing. The handle is
    /// released even when writing the footer fails.
    pub fn close(&mut self) -> Result<(), LogFileError> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        let result = session
            .finish()
            .map(drop)
            .map_err(|error| LogFileError::write(&self.path, error));
        tracing::debug!(path = %self.path.display(), "closed log file");
        result
    }

    /// Releases the file handle without writing the session-end block.
    ///
    /// Used after a write failure, where appending more text to a broken
    /// handle could interleave with whatever state the file is in.
    pub fn abandon(&mut self) {
        self.session = None;
    }
}

impl fmt::Debug for LogFileWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFileWriter")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .finish()
    }
}

impl Drop for LogFileWriter {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
