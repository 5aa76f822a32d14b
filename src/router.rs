//! src/router.rs
//! Per-call routing of messages to the debug and file channels.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use branding::Identity;
use logging::{Configuration, MessageFormatter, Severity};
use logging_sink::{DebugSink, LogFileError, LogFileWriter, OpenMode, StderrSink};

use crate::SELF_KEYWORD;
use crate::error::ConfigurationLoadError;
use crate::provider::ConfigurationProvider;
use crate::reporter::{ErrorReporter, StderrReporter};
use crate::status::{Status, StickyStatus};

/// Opens the file channel's writer.
type LogFileOpener =
    dyn Fn(PathBuf, OpenMode, &Identity) -> Result<LogFileWriter, LogFileError> + Send + Sync;

fn open_log_file(
    path: PathBuf,
    mode: OpenMode,
    identity: &Identity,
) -> Result<LogFileWriter, LogFileError> {
    LogFileWriter::open(path, mode, identity)
}

/// File channel state guarded by the router's lock.
#[derive(Debug, Default)]
struct FileState {
    writer: Option<LogFileWriter>,
    opened: bool,
    closed: bool,
}

/// Evaluates each log call against the configuration and dispatches it.
///
/// Both channels are decided independently on every call. The debug channel
/// hands formatted lines to a [`DebugSink`]; the file channel opens its
/// [`LogFileWriter`] on the first accepted call and keeps it until
/// [`close`](Self::close) or drop.
///
/// Failures never reach the caller of [`write`](Self::write). They are
/// recorded in [`status`](Self::status) instead, and each is reported once:
///
/// - A configuration that cannot be loaded silences both channels.
/// - A log file that cannot be opened or written silences the file channel
///   only; the debug channel keeps working.
///
/// All file channel work, from the lazy open to each line, happens under one
/// lock per router, so lines from concurrent callers never interleave and
/// their elapsed stamps never go backwards.
///
/// # Examples
///
/// ```
/// use branding::Identity;
/// use logging::{HostEnvironment, Settings, Severity};
/// use logging_sink::MemorySink;
/// use tierlog::{LogRouter, StaticProvider};
///
/// let dir = tempfile::tempdir()?;
/// let settings = Settings {
///     log_file_path: dir.path().join("app.log").display().to_string(),
///     ..Settings::default()
/// };
/// let environment = HostEnvironment::new(Identity::new("App", "1.0", "linux"));
/// let sink = MemorySink::new();
///
/// let router = LogRouter::builder()
///     .debug_sink(sink.clone())
///     .build(StaticProvider::new(settings, environment));
///
/// router.write_line("details", Severity::Debug);
/// assert!(!router.log_file_opened());
///
/// router.write_line("disk almost full", Severity::Warning);
/// assert!(router.log_file_opened());
/// assert_eq!(sink.messages(), vec!["[App][Warning]disk almost full"]);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct LogRouter {
    configuration: Option<Arc<Configuration>>,
    debug_sink: Arc<dyn DebugSink>,
    open_file: Box<LogFileOpener>,
    status: StickyStatus,
    file: Mutex<FileState>,
}

impl LogRouter {
    /// Starts a builder with the stock sink and reporter.
    #[must_use]
    pub fn builder() -> LogRouterBuilder {
        LogRouterBuilder::default()
    }

    /// Builds a router, falling back to an inert one if the configuration
    /// cannot be loaded.
    ///
    /// The failure is passed to [`StderrReporter`] and recorded as
    /// [`Status::SETTINGS_LOAD_ERROR`].
    #[must_use]
    pub fn new(provider: impl ConfigurationProvider) -> Self {
        Self::builder().build(provider)
    }

    /// Builds a router, returning the configuration failure to the caller.
    pub fn try_new(provider: impl ConfigurationProvider) -> Result<Self, ConfigurationLoadError> {
        Self::builder().try_build(provider)
    }

    fn with_parts(
        configuration: Option<Configuration>,
        debug_sink: Arc<dyn DebugSink>,
        open_file: Box<LogFileOpener>,
        status: Status,
    ) -> Self {
        Self {
            configuration: configuration.map(Arc::new),
            debug_sink,
            open_file,
            status: StickyStatus::new(status),
            file: Mutex::new(FileState::default()),
        }
    }

    /// Routes `message` at `level` to every channel that accepts it.
    ///
    /// `header_override` replaces the configured debug-channel keyword for
    /// this call only. The file channel never carries a keyword.
    pub fn write(&self, message: &str, level: Severity, header_override: Option<&str>) {
        let Some(configuration) = self.configuration.as_deref() else {
            return;
        };
        if self.status.load().settings_load_error() {
            return;
        }

        if configuration.resolve_debug_condition().accept(level) {
            let line = match header_override {
                Some(header) => MessageFormatter::build(Some(header), level, message),
                None => MessageFormatter::build(Some(&configuration.header()), level, message),
            };
            self.debug_sink.write_debug_line(&line, level);
        }

        if configuration.resolve_file_condition().accept(level)
            && !self.status.load().log_file_io_error()
        {
            self.write_file(configuration, level, message);
        }
    }

    /// Routes `message` with the configured keyword.
    pub fn write_line(&self, message: &str, level: Severity) {
        self.write(message, level, None);
    }

    fn write_file(&self, configuration: &Configuration, level: Severity, message: &str) {
        let failure = {
            let mut state = self.lock_file();
            if state.closed || self.status.load().log_file_io_error() {
                return;
            }
            self.write_file_locked(&mut state, configuration, level, message)
                .err()
        };
        if let Some(error) = failure {
            self.report_file_failure(&error);
        }
    }

    fn write_file_locked(
        &self,
        state: &mut FileState,
        configuration: &Configuration,
        level: Severity,
        message: &str,
    ) -> Result<(), LogFileError> {
        if state.writer.is_none() {
            let identity = configuration.environment().identity().current();
            let mode = OpenMode::from_append(configuration.append_mode());
            match (self.open_file)(configuration.log_file_path(), mode, &identity) {
                Ok(writer) => {
                    state.writer = Some(writer);
                    state.opened = true;
                }
                Err(error) => {
                    self.status.raise(Status::LOG_FILE_IO_ERROR);
                    return Err(error);
                }
            }
        }

        let Some(writer) = state.writer.as_mut() else {
            return Ok(());
        };
        let line = MessageFormatter::build(None, level, message);
        if let Err(error) = writer.write_line(&line) {
            self.status.raise(Status::LOG_FILE_IO_ERROR);
            if let Some(mut broken) = state.writer.take() {
                broken.abandon();
            }
            return Err(error);
        }
        Ok(())
    }

    fn report_file_failure(&self, error: &LogFileError) {
        tracing::warn!(path = %error.path().display(), %error, "log file channel disabled");
        let line = MessageFormatter::build(Some(SELF_KEYWORD), Severity::Error, &error.to_string());
        self.debug_sink.write_debug_line(&line, Severity::Error);
    }

    fn lock_file(&self) -> MutexGuard<'_, FileState> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the sticky degradation flags.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status.load()
    }

    /// Returns the loaded configuration, or `None` for an inert router.
    #[must_use]
    pub const fn configuration(&self) -> Option<&Arc<Configuration>> {
        self.configuration.as_ref()
    }

    /// Switches detail mode on the loaded configuration.
    ///
    /// Does nothing on an inert router.
    pub fn set_detail_mode(&self, enabled: bool) {
        if let Some(configuration) = &self.configuration {
            configuration.set_detail_mode(enabled);
        }
    }

    /// Returns the path the file channel writes to, or `None` for an inert router.
    #[must_use]
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.configuration
            .as_deref()
            .map(Configuration::log_file_path)
    }

    /// Reports whether the file channel has opened its log file.
    ///
    /// Stays `true` after [`close`](Self::close).
    #[must_use]
    pub fn log_file_opened(&self) -> bool {
        self.lock_file().opened
    }

    /// Writes the session footer and releases the log file.
    ///
    /// The file channel stays silent afterwards. Calling this more than once,
    /// or on a router that never opened its file, does nothing.
    pub fn close(&self) {
        let mut state = self.lock_file();
        state.closed = true;
        if let Some(mut writer) = state.writer.take() {
            if let Err(error) = writer.close() {
                tracing::warn!(%error, "failed to finish log file session");
            }
        }
    }
}

impl Drop for LogRouter {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for LogRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRouter")
            .field("configuration", &self.configuration)
            .field("status", &self.status.load())
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

/// Assembles a [`LogRouter`] with custom collaborators.
///
/// Unset collaborators default to [`StderrSink`] and [`StderrReporter`].
#[derive(Default)]
pub struct LogRouterBuilder {
    debug_sink: Option<Arc<dyn DebugSink>>,
    reporter: Option<Arc<dyn ErrorReporter>>,
    open_file: Option<Box<LogFileOpener>>,
}

impl LogRouterBuilder {
    /// Sets the debug channel destination.
    #[must_use]
    pub fn debug_sink(mut self, sink: impl DebugSink + 'static) -> Self {
        self.debug_sink = Some(Arc::new(sink));
        self
    }

    /// Sets the reporter used when the configuration cannot be loaded.
    #[must_use]
    pub fn reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Some(Arc::new(reporter));
        self
    }

    /// Replaces how the file channel opens its writer.
    #[cfg(test)]
    pub(crate) fn log_file_opener(
        mut self,
        open: impl Fn(PathBuf, OpenMode, &Identity) -> Result<LogFileWriter, LogFileError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.open_file = Some(Box::new(open));
        self
    }

    fn take_opener(&mut self) -> Box<LogFileOpener> {
        self.open_file.take().unwrap_or_else(|| Box::new(open_log_file))
    }

    fn take_sink(&mut self) -> Arc<dyn DebugSink> {
        self.debug_sink
            .take()
            .unwrap_or_else(|| Arc::new(StderrSink::stderr()))
    }

    /// Loads the configuration and builds the router.
    ///
    /// On failure the error is reported once and the router is inert.
    #[must_use]
    pub fn build(mut self, provider: impl ConfigurationProvider) -> LogRouter {
        let debug_sink = self.take_sink();
        let open_file = self.take_opener();
        match provider.load() {
            Ok(configuration) => LogRouter::with_parts(
                Some(configuration),
                debug_sink,
                open_file,
                Status::FINE,
            ),
            Err(error) => {
                tracing::error!(%error, "logger settings unavailable; logging disabled");
                let reporter = self
                    .reporter
                    .take()
                    .unwrap_or_else(|| Arc::new(StderrReporter));
                reporter.report(&error);
                LogRouter::with_parts(
                    None,
                    debug_sink,
                    open_file,
                    Status::SETTINGS_LOAD_ERROR,
                )
            }
        }
    }

    /// Loads the configuration and builds the router, returning any failure.
    ///
    /// The reporter is not consulted.
    pub fn try_build(
        mut self,
        provider: impl ConfigurationProvider,
    ) -> Result<LogRouter, ConfigurationLoadError> {
        let configuration = provider.load()?;
        Ok(LogRouter::with_parts(
            Some(configuration),
            self.take_sink(),
            self.take_opener(),
            Status::FINE,
        ))
    }
}

impl fmt::Debug for LogRouterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRouterBuilder")
            .field("custom_debug_sink", &self.debug_sink.is_some())
            .field("custom_reporter", &self.reporter.is_some())
            .field("custom_log_file_opener", &self.open_file.is_some())
            .finish()
    }
}
