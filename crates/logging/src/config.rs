//! crates/logging/src/config.rs
//! Channel configuration, persisted settings, and mode-aware resolution.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use branding::{Identity, IdentityCell, PlatformClass};

use crate::condition::OutputCondition;
use crate::severity::Severity;

/// Execution context used to pick one of a channel's three conditions.
///
/// The contexts are mutually exclusive: running under the host development
/// environment wins over detail mode, and detail mode wins over the default.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ExecutionContext {
    /// Running inside the host's development environment.
    HostDevelopment,
    /// Detail mode has been switched on at runtime.
    Detail,
    /// Neither of the above.
    Default,
}

/// Output conditions of one channel, keyed by [`ExecutionContext`].
///
/// [`Default`] yields a channel that is disabled in every context. The product
/// defaults used by [`Settings::default`] are [`debug_defaults`](Self::debug_defaults)
/// and [`file_defaults`](Self::file_defaults).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelConfig {
    /// Condition used when neither detail mode nor the development environment applies.
    pub default: OutputCondition,
    /// Condition used while detail mode is on.
    pub detail: OutputCondition,
    /// Condition used inside the host development environment.
    pub host_dev: OutputCondition,
}

impl ChannelConfig {
    /// Creates a channel configuration from its three conditions.
    #[must_use]
    pub const fn new(
        default: OutputCondition,
        detail: OutputCondition,
        host_dev: OutputCondition,
    ) -> Self {
        Self {
            default,
            detail,
            host_dev,
        }
    }

    /// Uses the same condition in every context.
    #[must_use]
    pub const fn uniform(condition: OutputCondition) -> Self {
        Self::new(condition, condition, condition)
    }

    /// Returns the condition that applies in `context`.
    #[must_use]
    pub const fn select(&self, context: ExecutionContext) -> OutputCondition {
        match context {
            ExecutionContext::HostDevelopment => self.host_dev,
            ExecutionContext::Detail => self.detail,
            ExecutionContext::Default => self.default,
        }
    }

    /// Debug channel defaults: `Information` normally, `Debug` in detail mode
    /// and inside the development environment.
    #[must_use]
    pub const fn debug_defaults() -> Self {
        Self::new(
            OutputCondition::enabled(Severity::Information),
            OutputCondition::enabled(Severity::Debug),
            OutputCondition::enabled(Severity::Debug),
        )
    }

    /// File channel defaults: `Notice` normally, `Debug` in detail mode, and
    /// disabled inside the development environment.
    #[must_use]
    pub const fn file_defaults() -> Self {
        Self::new(
            OutputCondition::enabled(Severity::Notice),
            OutputCondition::enabled(Severity::Debug),
            OutputCondition::new(false, Severity::Debug),
        )
    }
}

/// Persistable logger settings.
///
/// These are the values a configuration provider loads. Runtime-only state
/// (detail mode, the host environment) lives on [`Configuration`] instead so
/// it never leaks back into stored settings.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Keyword prepended to debug-channel messages. Empty selects `"[{app name}]"`.
    pub header: String,
    /// Debug channel conditions.
    pub debug: ChannelConfig,
    /// Raw log file path as configured, before platform resolution.
    pub log_file_path: String,
    /// Append to an existing log file instead of truncating it.
    pub append: bool,
    /// File channel conditions.
    pub file: ChannelConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            header: String::new(),
            debug: ChannelConfig::debug_defaults(),
            log_file_path: String::new(),
            append: false,
            file: ChannelConfig::file_defaults(),
        }
    }
}

/// Facts about the host the logger runs in.
///
/// The environment is injected when a [`Configuration`] is built, replacing
/// compile-time platform checks so that every branch of the resolution logic
/// can be exercised on any machine.
#[derive(Clone, Debug)]
pub struct HostEnvironment {
    development: bool,
    platform: PlatformClass,
    writable_root: PathBuf,
    identity: IdentityCell,
}

impl HostEnvironment {
    /// Creates a non-development desktop environment rooted at `"."`.
    #[must_use]
    pub fn new(identity: impl Into<IdentityCell>) -> Self {
        Self {
            development: false,
            platform: PlatformClass::Desktop,
            writable_root: PathBuf::from("."),
            identity: identity.into(),
        }
    }

    /// Describes the running process: platform class from the build target,
    /// identity from the executable name and `version`, writable root from the
    /// current directory.
    #[must_use]
    pub fn detect(version: &str) -> Self {
        let writable_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(Identity::for_current_process(version))
            .with_platform(PlatformClass::current())
            .with_writable_root(writable_root)
    }

    /// Marks the host as its own development environment.
    #[must_use]
    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// Sets the platform class.
    #[must_use]
    pub fn with_platform(mut self, platform: PlatformClass) -> Self {
        self.platform = platform;
        self
    }

    /// Sets the writable storage root used by non-desktop platforms.
    #[must_use]
    pub fn with_writable_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.writable_root = root.into();
        self
    }

    /// Reports whether the host development environment is active.
    #[must_use]
    pub const fn is_development(&self) -> bool {
        self.development
    }

    /// Returns the platform class.
    #[must_use]
    pub const fn platform(&self) -> PlatformClass {
        self.platform
    }

    /// Returns the writable storage root.
    #[must_use]
    pub fn writable_root(&self) -> &Path {
        &self.writable_root
    }

    /// Returns the shared identity cell.
    #[must_use]
    pub const fn identity(&self) -> &IdentityCell {
        &self.identity
    }
}

/// Settings bound to a host environment, plus the transient detail-mode flag.
///
/// A freshly built configuration always starts with detail mode off, whatever
/// the previous instance had. The flag is atomic so it can be toggled while
/// other threads are logging through the same configuration.
#[derive(Debug)]
pub struct Configuration {
    settings: Settings,
    environment: HostEnvironment,
    detail_mode: AtomicBool,
}

impl Configuration {
    /// Binds `settings` to `environment`.
    #[must_use]
    pub fn new(settings: Settings, environment: HostEnvironment) -> Self {
        Self {
            settings,
            environment,
            detail_mode: AtomicBool::new(false),
        }
    }

    /// Returns the persisted settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the host environment.
    #[must_use]
    pub const fn environment(&self) -> &HostEnvironment {
        &self.environment
    }

    /// Reports whether detail mode is on.
    #[must_use]
    pub fn detail_mode(&self) -> bool {
        self.detail_mode.load(Ordering::Acquire)
    }

    /// Switches detail mode on or off.
    pub fn set_detail_mode(&self, enabled: bool) {
        self.detail_mode.store(enabled, Ordering::Release);
    }

    /// Returns the context that currently selects channel conditions.
    #[must_use]
    pub fn context(&self) -> ExecutionContext {
        if self.environment.is_development() {
            ExecutionContext::HostDevelopment
        } else if self.detail_mode() {
            ExecutionContext::Detail
        } else {
            ExecutionContext::Default
        }
    }

    /// Returns the debug channel condition for the current context.
    #[must_use]
    pub fn resolve_debug_condition(&self) -> OutputCondition {
        self.settings.debug.select(self.context())
    }

    /// Returns the file channel condition for the current context.
    #[must_use]
    pub fn resolve_file_condition(&self) -> OutputCondition {
        self.settings.file.select(self.context())
    }

    /// Returns the debug-channel keyword.
    ///
    /// A non-empty configured header is returned verbatim. Otherwise the
    /// keyword is `"[{app name}]"`, built from the identity at call time.
    #[must_use]
    pub fn header(&self) -> String {
        if self.settings.header.is_empty() {
            format!("[{}]", self.environment.identity().name())
        } else {
            self.settings.header.clone()
        }
    }

    /// Resolves the log file location.
    ///
    /// Desktop hosts and the development environment use the raw path as is,
    /// or `"{app name}.log"` when it is empty. Other platforms place the raw
    /// path under the writable root as `"{root}/{raw}"`; an empty raw path
    /// yields a path ending in a bare separator.
    #[must_use]
    pub fn log_file_path(&self) -> PathBuf {
        let raw = self.settings.log_file_path.as_str();
        if self.environment.is_development() || self.environment.platform().is_desktop() {
            if raw.is_empty() {
                PathBuf::from(format!("{}.log", self.environment.identity().name()))
            } else {
                PathBuf::from(raw)
            }
        } else {
            // TODO: decide on a file name for an empty raw path on non-desktop hosts.
            let mut path = self.environment.writable_root().as_os_str().to_owned();
            path.push("/");
            path.push(raw);
            PathBuf::from(path)
        }
    }

    /// Reports whether the log file is opened in append mode.
    #[must_use]
    pub const fn append_mode(&self) -> bool {
        self.settings.append
    }
}
