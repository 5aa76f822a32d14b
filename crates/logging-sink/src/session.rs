//! crates/logging-sink/src/session.rs
//! Session framing and elapsed-time stamping for log file output.

use std::fmt;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use branding::Identity;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Width of the rule line that frames a session.
pub const RULE_WIDTH: usize = 80;

/// Wall-clock format used by the `Log start:` and `Log finish:` lines.
///
/// The trailing UTC offset tells a local stamp apart from the UTC fallback.
pub const SESSION_TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]/[month padding:zero]/[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero] [offset_hour sign:mandatory]:[offset_minute]"
);

/// Returns the current local time in [`SESSION_TIMESTAMP_FORMAT`].
///
/// The local offset cannot always be determined (for example in a
/// multi-threaded process on some Unix systems); UTC is used in that case and
/// the stamp ends in `+00:00`.
#[must_use]
pub fn local_timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_timestamp(now)
}

fn format_timestamp(moment: OffsetDateTime) -> String {
    moment
        .format(SESSION_TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| "1970/01/01 00:00:00 +00:00".to_owned())
}

/// Elapsed time rendered as `HH:MM:SS.mmm`.
///
/// Hours are not wrapped at 24, so a session running for four days renders as
/// `96:00:00.000`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct ElapsedStamp(pub Duration);

impl fmt::Display for ElapsedStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.0.as_secs();
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            total_secs / 3600,
            (total_secs / 60) % 60,
            total_secs % 60,
            self.0.subsec_millis()
        )
    }
}

/// Writes one log session into an [`io::Write`] target.
///
/// Construction writes the session-start block and starts a monotonic clock.
/// Every [`write_line`](Self::write_line) is prefixed with the time elapsed
/// since then and flushed before returning. [`finish`](Self::finish) writes
/// the closing block.
///
/// # Examples
///
/// ```
/// use branding::Identity;
/// use logging_sink::SessionWriter;
///
/// let identity = Identity::new("Demo", "1.0", "linux");
/// let mut session = SessionWriter::start(Vec::new(), &identity, false)?;
/// session.write_line("[Warning]low disk")?;
/// let bytes = session.finish()?;
///
/// let text = String::from_utf8(bytes).unwrap();
/// let lines: Vec<_> = text.lines().collect();
/// assert!(lines[0].starts_with("Log start: "));
/// assert_eq!(lines[1], "Application: Demo 1.0");
/// assert_eq!(lines[2], "Platform: linux");
/// assert_eq!(lines[3], "-".repeat(80));
/// assert!(lines[4].ends_with(" | [Warning]low disk"));
/// assert_eq!(lines[5], "-".repeat(80));
/// assert!(lines[6].starts_with("Log finish: "));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct SessionWriter<W: Write> {
    writer: W,
    started: Instant,
}

impl<W: Write> SessionWriter<W> {
    /// Writes the session-start block and starts the elapsed-time clock.
    ///
    /// `separate` requests a leading blank line, used when appending to a file
    /// that already has content.
    pub fn start(mut writer: W, identity: &Identity, separate: bool) -> io::Result<Self> {
        if separate {
            writer.write_all(b"\n")?;
        }
        writeln!(writer, "Log start: {}", local_timestamp())?;
        writeln!(writer, "Application: {identity}")?;
        writeln!(writer, "Platform: {}", identity.platform())?;
        write_rule(&mut writer)?;
        writer.flush()?;

        Ok(Self {
            writer,
            started: Instant::now(),
        })
    }

    /// Returns the time elapsed since the session started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Writes `"{elapsed} | {message}"` followed by a newline and flushes.
    pub fn write_line(&mut self, message: &str) -> io::Result<()> {
        let stamp = ElapsedStamp(self.elapsed());
        writeln!(self.writer, "{stamp} | {message}")?;
        self.writer.flush()
    }

    /// Writes the session-end block and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        write_rule(&mut self.writer)?;
        writeln!(self.writer, "Log finish: {}", local_timestamp())?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }
}

fn write_rule<W: Write>(writer: &mut W) -> io::Result<()> {
    let rule = [b'-'; RULE_WIDTH];
    writer.write_all(&rule)?;
    writer.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity::new("Sample", "3.1.4", "WindowsPlayer")
    }

    #[test]
    fn elapsed_stamp_formats_fields() {
        assert_eq!(ElapsedStamp(Duration::ZERO).to_string(), "00:00:00.000");
        assert_eq!(
            ElapsedStamp(Duration::from_millis(3_723_045)).to_string(),
            "01:02:03.045"
        );
        assert_eq!(
            ElapsedStamp(Duration::from_secs(100 * 3600)).to_string(),
            "100:00:00.000"
        );
        assert_eq!(
            ElapsedStamp(Duration::from_micros(999_999)).to_string(),
            "00:00:00.999"
        );
    }

    #[test]
    fn header_block_without_separator() {
        let session = SessionWriter::start(Vec::new(), &identity(), false).expect("start");
        let text = String::from_utf8(session.get_ref().clone()).expect("utf-8");
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Log start: "));
        assert_eq!(lines[1], "Application: Sample 3.1.4");
        assert_eq!(lines[2], "Platform: WindowsPlayer");
        assert_eq!(lines[3].len(), RULE_WIDTH);
        assert!(lines[3].chars().all(|c| c == '-'));
    }

    #[test]
    fn separator_adds_leading_blank_line() {
        let session = SessionWriter::start(Vec::new(), &identity(), true).expect("start");
        let text = String::from_utf8(session.get_ref().clone()).expect("utf-8");
        assert!(text.starts_with("\nLog start: "));
    }

    #[test]
    fn lines_carry_elapsed_prefix_and_single_newline() {
        let mut session = SessionWriter::start(Vec::new(), &identity(), false).expect("start");
        session.write_line("first").expect("write");
        session.write_line("second").expect("write");
        let bytes = session.finish().expect("finish");
        let text = String::from_utf8(bytes).expect("utf-8");

        assert!(text.ends_with('\n'));
        assert!(!text.ends_with("\n\n"));
        let body: Vec<_> = text.lines().skip(4).take(2).collect();
        for (line, message) in body.iter().zip(["first", "second"]) {
            let (stamp, rest) = line.split_once(" | ").expect("separator");
            assert_eq!(rest, message);
            assert_eq!(stamp.len(), "00:00:00.000".len());
        }
    }

    #[test]
    fn local_timestamp_has_fixed_shape() {
        let stamp = local_timestamp();
        assert_eq!(stamp.len(), "2024/01/31 23:59:59 +00:00".len());
        assert_eq!(&stamp[4..5], "/");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[19..20], " ");
        assert!(matches!(&stamp[20..21], "+" | "-"));
    }

    #[test]
    fn timestamp_carries_utc_offset() {
        use time::macros::{datetime, offset};

        let utc = datetime!(2024-01-31 23:59:59 UTC);
        assert_eq!(format_timestamp(utc), "2024/01/31 23:59:59 +00:00");

        let east = datetime!(2024-01-31 23:59:59).assume_offset(offset!(+09:00));
        assert_eq!(format_timestamp(east), "2024/01/31 23:59:59 +09:00");

        let west = datetime!(2024-06-01 08:05:00).assume_offset(offset!(-04:30));
        assert_eq!(format_timestamp(west), "2024/06/01 08:05:00 -04:30");
    }
}
