//! src/provider.rs
//! Sources of logger configuration.

use std::fmt;
#[cfg(feature = "serde")]
use std::path::{Path, PathBuf};

use logging::{Configuration, HostEnvironment, Settings};

use crate::error::ConfigurationLoadError;

/// Supplies the [`Configuration`] a router evaluates every call against.
///
/// The provider is consulted once, when the router is built. A failure makes
/// the router inert.
pub trait ConfigurationProvider {
    /// Loads settings and binds them to the host environment.
    fn load(&self) -> Result<Configuration, ConfigurationLoadError>;
}

impl<P: ConfigurationProvider + ?Sized> ConfigurationProvider for &P {
    fn load(&self) -> Result<Configuration, ConfigurationLoadError> {
        (**self).load()
    }
}

impl<P: ConfigurationProvider + ?Sized> ConfigurationProvider for Box<P> {
    fn load(&self) -> Result<Configuration, ConfigurationLoadError> {
        (**self).load()
    }
}

/// Hands out a fixed set of [`Settings`].
#[derive(Clone, Debug)]
pub struct StaticProvider {
    settings: Settings,
    environment: HostEnvironment,
}

impl StaticProvider {
    /// Creates a provider returning `settings` bound to `environment`.
    #[must_use]
    pub const fn new(settings: Settings, environment: HostEnvironment) -> Self {
        Self {
            settings,
            environment,
        }
    }
}

impl ConfigurationProvider for StaticProvider {
    fn load(&self) -> Result<Configuration, ConfigurationLoadError> {
        Ok(Configuration::new(
            self.settings.clone(),
            self.environment.clone(),
        ))
    }
}

/// Delegates to a closure.
pub struct FnProvider<F> {
    load: F,
}

impl<F> FnProvider<F>
where
    F: Fn() -> Result<Configuration, ConfigurationLoadError>,
{
    /// Wraps `load`.
    pub const fn new(load: F) -> Self {
        Self { load }
    }
}

impl<F> fmt::Debug for FnProvider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProvider").finish_non_exhaustive()
    }
}

impl<F> ConfigurationProvider for FnProvider<F>
where
    F: Fn() -> Result<Configuration, ConfigurationLoadError>,
{
    fn load(&self) -> Result<Configuration, ConfigurationLoadError> {
        (self.load)()
    }
}

/// Always fails with [`ConfigurationLoadError::Missing`].
///
/// Stands in for hosts that have no settings resource at all.
#[derive(Clone, Debug)]
pub struct MissingProvider {
    source_name: String,
}

impl MissingProvider {
    /// Creates a provider reporting `source_name` as missing.
    #[must_use]
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
        }
    }
}

impl ConfigurationProvider for MissingProvider {
    fn load(&self) -> Result<Configuration, ConfigurationLoadError> {
        Err(ConfigurationLoadError::Missing {
            source_name: self.source_name.clone(),
        })
    }
}

/// Reads [`Settings`] from a JSON document on disk.
///
/// Missing fields take their default values, so `{}` is a valid document.
/// Severities are spelled by name, for example:
///
/// ```json
/// {
///   "header": "[Game]",
///   "log_file_path": "game.log",
///   "append": true,
///   "file": {
///     "default": { "enabled": true, "threshold": "Warning" },
///     "detail": { "enabled": true, "threshold": "Debug" },
///     "host_dev": { "enabled": false, "threshold": "Debug" }
///   }
/// }
/// ```
#[cfg(feature = "serde")]
#[derive(Clone, Debug)]
pub struct JsonFileProvider {
    path: PathBuf,
    environment: HostEnvironment,
}

#[cfg(feature = "serde")]
impl JsonFileProvider {
    /// Creates a provider reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, environment: HostEnvironment) -> Self {
        Self {
            path: path.into(),
            environment,
        }
    }

    /// Returns the settings file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses settings from `text`, attributing errors to `path`.
    pub fn parse(path: &Path, text: &str) -> Result<Settings, ConfigurationLoadError> {
        serde_json::from_str(text).map_err(|error| ConfigurationLoadError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })
    }
}

#[cfg(feature = "serde")]
impl ConfigurationProvider for JsonFileProvider {
    fn load(&self) -> Result<Configuration, ConfigurationLoadError> {
        let text =
            std::fs::read_to_string(&self.path).map_err(|source| ConfigurationLoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        let settings = Self::parse(&self.path, &text)?;
        tracing::debug!(path = %self.path.display(), "loaded logger settings");
        Ok(Configuration::new(settings, self.environment.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use branding::Identity;

    fn environment() -> HostEnvironment {
        HostEnvironment::new(Identity::new("ProviderTest", "1.0", "LinuxPlayer"))
    }

    #[test]
    fn static_provider_clones_settings() {
        let settings = Settings {
            header: "[P]".to_owned(),
            ..Settings::default()
        };
        let provider = StaticProvider::new(settings, environment());

        let first = provider.load().expect("first load");
        first.set_detail_mode(true);
        let second = provider.load().expect("second load");
        assert_eq!(second.header(), "[P]");
        assert!(!second.detail_mode());
    }

    #[test]
    fn fn_provider_forwards_result() {
        let ok = FnProvider::new(|| Ok(Configuration::new(Settings::default(), environment())));
        assert!(ok.load().is_ok());

        let failing =
            FnProvider::new(|| Err(ConfigurationLoadError::Provider("offline".to_owned())));
        assert!(matches!(
            failing.load(),
            Err(ConfigurationLoadError::Provider(message)) if message == "offline"
        ));
    }

    #[test]
    fn missing_provider_names_source() {
        let error = MissingProvider::new("LogSettings").load().unwrap_err();
        assert!(matches!(
            error,
            ConfigurationLoadError::Missing { ref source_name } if source_name == "LogSettings"
        ));
    }

    #[test]
    fn boxed_provider_is_a_provider() {
        let boxed: Box<dyn ConfigurationProvider> = Box::new(MissingProvider::new("x"));
        assert!(boxed.load().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_parse_uses_defaults_for_missing_fields() {
        let settings =
            JsonFileProvider::parse(Path::new("log.json"), r#"{ "append": true }"#).expect("parse");
        assert!(settings.append);
        assert_eq!(settings.file, Settings::default().file);
        assert_eq!(settings.debug.default.threshold, logging::Severity::Information);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_parse_error_names_path() {
        let error = JsonFileProvider::parse(Path::new("broken.json"), "{").unwrap_err();
        assert!(matches!(error, ConfigurationLoadError::Parse { .. }));
        assert!(error.to_string().contains("broken.json"));
    }
}
