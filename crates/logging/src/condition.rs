//! crates/logging/src/condition.rs
//! Enabled flag plus severity threshold for one channel in one context.

use crate::severity::Severity;

/// Decides whether a message severity is worth emitting on a channel.
///
/// A condition accepts `level` when it is enabled and `level` is at least as
/// severe as `threshold` (`level <= threshold`). A disabled condition accepts
/// nothing regardless of its threshold.
///
/// # Examples
///
/// ```
/// use logging::{OutputCondition, Severity};
///
/// let notice = OutputCondition::enabled(Severity::Notice);
/// assert!(notice.accept(Severity::Error));
/// assert!(notice.accept(Severity::Notice));
/// assert!(!notice.accept(Severity::Debug));
///
/// assert!(!OutputCondition::disabled().accept(Severity::Fatal));
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputCondition {
    /// Whether the channel emits anything in this context.
    pub enabled: bool,
    /// Least severe level still emitted.
    pub threshold: Severity,
}

impl OutputCondition {
    /// Creates a condition from its parts.
    #[must_use]
    pub const fn new(enabled: bool, threshold: Severity) -> Self {
        Self { enabled, threshold }
    }

    /// Creates an enabled condition with the given threshold.
    #[must_use]
    pub const fn enabled(threshold: Severity) -> Self {
        Self::new(true, threshold)
    }

    /// Creates a disabled condition. The threshold is kept at `Debug` so that
    /// re-enabling it through the public field emits everything.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(false, Severity::Debug)
    }

    /// Returns `true` when a message of `level` should be emitted.
    #[must_use]
    pub fn accept(self, level: Severity) -> bool {
        self.enabled && level <= self.threshold
    }
}
