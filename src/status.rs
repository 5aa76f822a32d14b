//! src/status.rs
//! Sticky degradation flags of a router.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Set of degradation flags reported by a [`LogRouter`](crate::LogRouter).
///
/// Each flag names the subsystem that stopped working, so callers can tell a
/// dead file channel apart from a router that never loaded its settings.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Status {
    bits: u8,
}

impl Status {
    /// No degradation.
    pub const FINE: Self = Self { bits: 0 };
    /// Settings could not be loaded; both channels are silent.
    pub const SETTINGS_LOAD_ERROR: Self = Self { bits: 1 };
    /// The log file failed to open or write; the file channel is silent.
    pub const LOG_FILE_IO_ERROR: Self = Self { bits: 1 << 1 };

    /// Returns the raw bit pattern.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// Reports whether no flag is set.
    #[must_use]
    pub const fn is_fine(self) -> bool {
        self.bits == 0
    }

    /// Reports whether every flag in `other` is also set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }

    /// Reports whether settings failed to load.
    #[must_use]
    pub const fn settings_load_error(self) -> bool {
        self.contains(Self::SETTINGS_LOAD_ERROR)
    }

    /// Reports whether the file channel failed.
    #[must_use]
    pub const fn log_file_io_error(self) -> bool {
        self.contains(Self::LOG_FILE_IO_ERROR)
    }

    /// Returns the union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }
}

impl std::ops::BitOr for Status {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fine() {
            return f.write_str("Status(Fine)");
        }
        let mut names = Vec::with_capacity(2);
        if self.settings_load_error() {
            names.push("SettingsLoadError");
        }
        if self.log_file_io_error() {
            names.push("LogFileIOError");
        }
        write!(f, "Status({})", names.join(" | "))
    }
}

/// Thread-safe holder of a [`Status`] whose flags can only be added.
#[derive(Debug, Default)]
pub(crate) struct StickyStatus {
    bits: AtomicU8,
}

impl StickyStatus {
    pub(crate) const fn new(initial: Status) -> Self {
        Self {
            bits: AtomicU8::new(initial.bits),
        }
    }

    pub(crate) fn load(&self) -> Status {
        Status {
            bits: self.bits.load(Ordering::Acquire),
        }
    }

    /// Sets `flags` and reports whether any of them was newly set.
    pub(crate) fn raise(&self, flags: Status) -> bool {
        let previous = self.bits.fetch_or(flags.bits, Ordering::AcqRel);
        previous & flags.bits != flags.bits
    }
}
