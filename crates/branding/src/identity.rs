//! crates/branding/src/identity.rs
//! Host application identity and the shared cell that publishes it.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Name, version, and platform label of the host application.
///
/// The values are rendered verbatim into log file session headers
/// (`Application: {name} {version}` and `Platform: {platform}`).
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identity {
    name: String,
    version: String,
    platform: String,
}

impl Identity {
    /// Creates an identity from explicit values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            platform: platform.into(),
        }
    }

    /// Derives an identity for the running process.
    ///
    /// The name is the executable's file stem, the version is the supplied
    /// string (typically `env!("CARGO_PKG_VERSION")` of the host), and the
    /// platform label is [`std::env::consts::OS`]. When the executable path is
    /// unavailable the name falls back to `"application"`.
    #[must_use]
    pub fn for_current_process(version: impl Into<String>) -> Self {
        let name = std::env::current_exe()
            .ok()
            .and_then(|path| {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| "application".to_owned());
        Self::new(name, version, std::env::consts::OS)
    }

    /// Returns the product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the product version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the platform label.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }
}

impl fmt::Display for Identity {
    /// Renders `"{name} {version}"`, the form used by session headers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Shared, mutable handle to an [`Identity`].
///
/// Clones share the same underlying value. Readers always take a fresh
/// snapshot through [`current`](Self::current), so updates made through any
/// clone are visible to every subsequent lookup.
#[derive(Clone, Debug, Default)]
pub struct IdentityCell {
    inner: Arc<RwLock<Identity>>,
}

impl IdentityCell {
    /// Wraps `identity` in a new cell.
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self {
            inner: Arc::new(RwLock::new(identity)),
        }
    }

    /// Returns a snapshot of the current identity.
    #[must_use]
    pub fn current(&self) -> Identity {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the whole identity.
    pub fn replace(&self, identity: Identity) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = identity;
    }

    /// Renames the product while keeping version and platform.
    pub fn set_name(&self, name: impl Into<String>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .name = name.into();
    }

    /// Returns the current product name.
    #[must_use]
    pub fn name(&self) -> String {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .name
            .clone()
    }
}

impl From<Identity> for IdentityCell {
    fn from(identity: Identity) -> Self {
        Self::new(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_name_and_version() {
        let identity = Identity::new("Demo", "2.3.4", "WindowsPlayer");
        assert_eq!(identity.to_string(), "Demo 2.3.4");
    }

    #[test]
    fn clones_of_a_cell_observe_updates() {
        let cell = IdentityCell::new(Identity::new("Before", "1", "linux"));
        let observer = cell.clone();

        cell.set_name("After");
        assert_eq!(observer.name(), "After");
        assert_eq!(observer.current().version(), "1");

        cell.replace(Identity::new("Other", "2", "macos"));
        assert_eq!(observer.current(), Identity::new("Other", "2", "macos"));
    }

    #[test]
    fn current_process_identity_uses_os_label() {
        let identity = Identity::for_current_process("0.0.1");
        assert_eq!(identity.platform(), std::env::consts::OS);
        assert_eq!(identity.version(), "0.0.1");
        assert!(!identity.name().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn identity_serialises_all_fields() {
        let identity = Identity::new("Demo", "1.0", "linux");
        let json = serde_json::to_string(&identity).expect("serialise identity");
        assert_eq!(json, r#"{"name":"Demo","version":"1.0","platform":"linux"}"#);
    }
}
