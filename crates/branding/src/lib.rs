#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/branding/src/lib.rs
//!
//! # Overview
//!
//! `branding` centralises the identity of the host application that embeds the
//! logger: its product name, version, and platform label, together with the
//! [`PlatformClass`] used to decide where log files live. The session header of
//! every log file and the fallback debug-channel header are rendered from these
//! values, so keeping them in one place avoids string literals drifting between
//! crates.
//!
//! # Design
//!
//! [`Identity`] is a plain value. [`IdentityCell`] wraps it in a shared,
//! lock-protected cell so a host can rename itself at runtime and every reader
//! observes the change on its next lookup. Nothing in the workspace caches the
//! rendered identity.
//!
//! # Examples
//!
//! ```
//! use branding::{Identity, IdentityCell};
//!
//! let cell = IdentityCell::new(Identity::new("Demo", "1.0.0", "LinuxPlayer"));
//! assert_eq!(cell.current().name(), "Demo");
//!
//! cell.set_name("Renamed");
//! assert_eq!(cell.current().name(), "Renamed");
//! ```

mod identity;
mod platform;

pub use identity::{Identity, IdentityCell};
pub use platform::{PlatformClass, PlatformParseError};
