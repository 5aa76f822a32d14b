//! crates/branding/src/platform.rs
//! Platform classification used to decide where log files are written.

use ::core::str::FromStr;
use std::fmt;

use thiserror::Error;

/// Coarse class of the platform the host application runs on.
///
/// Desktop-class hosts (and the host development environment) write log files
/// relative to the working directory. Every other class writes beneath a
/// writable storage root supplied by the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlatformClass {
    /// Linux, macOS, and Windows standalone hosts.
    Desktop,
    /// Mobile, console, web, and any other host.
    Other,
}

/// Error returned when parsing a [`PlatformClass`] from an unrecognised string.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("unrecognised platform class; expected desktop or other")]
pub struct PlatformParseError;

impl PlatformClass {
    /// Returns the canonical lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Other => "other",
        }
    }

    /// Classifies an operating system name as reported by [`std::env::consts::OS`].
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" | "macos" | "windows" | "freebsd" | "netbsd" | "openbsd" => Self::Desktop,
            _ => Self::Other,
        }
    }

    /// Classifies the platform this binary was built for.
    #[must_use]
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Reports whether log paths are used as configured.
    #[must_use]
    pub const fn is_desktop(self) -> bool {
        matches!(self, Self::Desktop)
    }
}

impl FromStr for PlatformClass {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(Self::Desktop.label()) {
            return Ok(Self::Desktop);
        }
        if s.eq_ignore_ascii_case(Self::Other.label()) {
            return Ok(Self::Other);
        }
        Err(PlatformParseError)
    }
}

impl fmt::Display for PlatformClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
