//! crates/logging/src/severity.rs
//! Totally ordered log severities and their message tags.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Importance of a log message, from most to least severe.
///
/// The discriminants are part of the contract: `Fatal` is `0` and `Debug` is
/// `5`, and a *smaller* value means *more* severe. The derived [`Ord`] follows
/// the discriminants, so `Severity::Fatal < Severity::Debug` and a threshold
/// accepts every level that compares less than or equal to it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Severity {
    /// Unrecoverable failure.
    Fatal = 0,
    /// Recoverable failure.
    Error = 1,
    /// Unexpected but tolerated condition.
    Warning = 2,
    /// Significant event worth keeping in the log file.
    Notice = 3,
    /// Routine progress information.
    #[default]
    Information = 4,
    /// Verbose diagnostics.
    Debug = 5,
}

/// Error returned when a severity name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown severity: {input}")]
pub struct ParseSeverityError {
    input: String,
}

impl Severity {
    /// All severities ordered from most to least severe.
    pub const ALL: [Self; 6] = [
        Self::Fatal,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Information,
        Self::Debug,
    ];

    /// Returns the ordinal (`Fatal = 0` … `Debug = 5`).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Converts an ordinal back into a severity.
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Fatal),
            1 => Some(Self::Error),
            2 => Some(Self::Warning),
            3 => Some(Self::Notice),
            4 => Some(Self::Information),
            5 => Some(Self::Debug),
            _ => None,
        }
    }

    /// Returns the canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fatal => "Fatal",
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Notice => "Notice",
            Self::Information => "Information",
            Self::Debug => "Debug",
        }
    }

    /// Returns the tag inserted in front of a message of this severity.
    ///
    /// | Severity | Tag |
    /// |---|---|
    /// | `Fatal` | `[Error][Fatal]` |
    /// | `Error` | `[Error]` |
    /// | `Warning` | `[Warning]` |
    /// | `Notice` | none |
    /// | `Information` | none |
    /// | `Debug` | `[Debug]` |
    #[must_use]
    pub const fn tag(self) -> Option<&'static str> {
        match self {
            Self::Fatal => Some("[Error][Fatal]"),
            Self::Error => Some("[Error]"),
            Self::Warning => Some("[Warning]"),
            Self::Notice | Self::Information => None,
            Self::Debug => Some("[Debug]"),
        }
    }

    /// Reports whether `self` is at least as severe as `other`.
    #[must_use]
    pub fn is_at_least(self, other: Self) -> bool {
        self <= other
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Parses a severity name, ignoring ASCII case and surrounding whitespace.
    /// `"info"` and `"warn"` are accepted as short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let found = Self::ALL
            .into_iter()
            .find(|severity| trimmed.eq_ignore_ascii_case(severity.name()))
            .or_else(|| match trimmed.to_ascii_lowercase().as_str() {
                "info" => Some(Self::Information),
                "warn" => Some(Self::Warning),
                _ => None,
            });
        found.ok_or_else(|| ParseSeverityError {
            input: trimmed.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_match_declaration_order() {
        for (index, severity) in Severity::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(severity.ordinal()), index);
            assert_eq!(Severity::from_ordinal(index as u8), Some(severity));
        }
        assert_eq!(Severity::from_ordinal(6), None);
    }

    #[test]
    fn smaller_ordinal_is_more_severe() {
        assert!(Severity::Fatal < Severity::Error);
        assert!(Severity::Notice < Severity::Debug);
        assert!(Severity::Fatal.is_at_least(Severity::Warning));
        assert!(Severity::Warning.is_at_least(Severity::Warning));
        assert!(!Severity::Debug.is_at_least(Severity::Information));
    }

    #[test]
    fn tags_follow_table() {
        assert_eq!(Severity::Fatal.tag(), Some("[Error][Fatal]"));
        assert_eq!(Severity::Error.tag(), Some("[Error]"));
        assert_eq!(Severity::Warning.tag(), Some("[Warning]"));
        assert_eq!(Severity::Notice.tag(), None);
        assert_eq!(Severity::Information.tag(), None);
        assert_eq!(Severity::Debug.tag(), Some("[Debug]"));
    }

    #[test]
    fn parse_accepts_names_and_aliases() {
        assert_eq!("notice".parse(), Ok(Severity::Notice));
        assert_eq!(" FATAL ".parse(), Ok(Severity::Fatal));
        assert_eq!("info".parse(), Ok(Severity::Information));
        assert_eq!("warn".parse(), Ok(Severity::Warning));
        let error = "verbose".parse::<Severity>().unwrap_err();
        assert_eq!(error.to_string(), "unknown severity: verbose");
    }
}
