//! crates/logging/src/format.rs
//! Composition of the final line text from prefix, severity tag, and message.

use crate::severity::Severity;

/// Builds the text emitted on a channel.
///
/// Both channels share the same rule: `prefix + tag + message`, where an empty
/// or absent prefix is omitted and the tag comes from [`Severity::tag`]. The
/// debug channel usually passes a filtering keyword as the prefix; the file
/// channel passes none.
///
/// # Examples
///
/// ```
/// use logging::{MessageFormatter, Severity};
///
/// assert_eq!(
///     MessageFormatter::build(Some("[H]"), Severity::Fatal, "m"),
///     "[H][Error][Fatal]m"
/// );
/// assert_eq!(MessageFormatter::build(Some("[H]"), Severity::Notice, "m"), "[H]m");
/// assert_eq!(MessageFormatter::build(Some(""), Severity::Debug, "m"), "[Debug]m");
/// assert_eq!(MessageFormatter::build(None, Severity::Information, "m"), "m");
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct MessageFormatter;

impl MessageFormatter {
    /// Returns the formatted line for `message` at `level`.
    #[must_use]
    pub fn build(prefix: Option<&str>, level: Severity, message: &str) -> String {
        let mut line = String::new();
        Self::build_into(&mut line, prefix, level, message);
        line
    }

    /// Appends the formatted line to `buffer`, reusing its allocation.
    pub fn build_into(buffer: &mut String, prefix: Option<&str>, level: Severity, message: &str) {
        let prefix = prefix.unwrap_or_default();
        let tag = level.tag().unwrap_or_default();
        buffer.reserve(prefix.len() + tag.len() + message.len());
        buffer.push_str(prefix);
        buffer.push_str(tag);
        buffer.push_str(message);
    }
}
