//! Bounded, human-readable diagnostic log for audio module bring-up.
//!
//! `DiagnosticLog<LINES, WIDTH>` holds up to `LINES` lines of at most `WIDTH`
//! bytes each, entirely without heap allocation. Every discovery run opens a
//! new *report* with [`start_report`], which clears the log, and closes it
//! with [`finish_report`]. The playback commands that follow append after the
//! report, so the log always tells the story of the latest bring-up attempt.
//!
//! # Bounds
//!
//! - Report lines are pinned. When the log is full, the oldest line written
//!   after the report is evicted and counted in [`evicted`].
//! - If the report alone fills the log, later lines are dropped and counted.
//! - While a report is still open, its own oldest line makes room.
//! - A line longer than `WIDTH` bytes is truncated on a `char` boundary.
//!
//! Every line is also mirrored to the firmware log (`defmt` or `tracing`,
//! depending on enabled features).
//!
//! [`start_report`]: DiagnosticLog::start_report
//! [`finish_report`]: DiagnosticLog::finish_report
//! [`evicted`]: DiagnosticLog::evicted

use core::fmt::{self, Write as _};

use heapless::{String, Vec};
use platform::config::{DIAGNOSTIC_LINES, DIAGNOSTIC_LINE_WIDTH};

/// Line classification, rendered as a bracketed tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    /// Progress information
    Info,
    /// A step that succeeded
    Ok,
    /// Something failed but the walk goes on
    Warn,
    /// A failure the caller will see
    Error,
}

impl Severity {
    /// Tag placed at the start of the line.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Info => "[INFO]",
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Error => "[ERROR]",
        }
    }
}

/// Fixed-capacity diagnostic text lines with a pinned bring-up report.
pub struct DiagnosticLog<
    const LINES: usize = DIAGNOSTIC_LINES,
    const WIDTH: usize = DIAGNOSTIC_LINE_WIDTH,
> {
    lines: Vec<String<WIDTH>, LINES>,
    /// Leading lines that belong to the report
    pinned: usize,
    reporting: bool,
    evicted: usize,
}

impl<const LINES: usize, const WIDTH: usize> DiagnosticLog<LINES, WIDTH> {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            pinned: 0,
            reporting: false,
            evicted: 0,
        }
    }

    /// Drop every line, including the eviction count and the report.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.pinned = 0;
        self.reporting = false;
        self.evicted = 0;
    }

    /// Clear the log and pin every line pushed until
    /// [`finish_report`](Self::finish_report).
    pub fn start_report(&mut self) {
        self.clear();
        self.reporting = true;
    }

    /// Stop pinning. Lines pushed from now on are evicted first.
    pub fn finish_report(&mut self) {
        self.reporting = false;
    }

    /// Number of leading lines that belong to the report.
    pub fn pinned(&self) -> usize {
        self.pinned
    }

    /// Append one line: `<tag> <message>`.
    pub fn push(&mut self, severity: Severity, message: fmt::Arguments<'_>) {
        let mut line = String::new();
        {
            let mut writer = Truncating {
                line: &mut line,
                full: false,
            };
            // Truncating never reports an error
            let _ = write!(writer, "{} {}", severity.tag(), message);
        }
        mirror(severity, line.as_str());

        if self.lines.is_full() && !self.make_room() {
            self.evicted = self.evicted.saturating_add(1);
            return;
        }
        if self.lines.push(line).is_ok() && self.reporting {
            self.pinned = self.pinned.saturating_add(1);
        }
    }

    /// Evict the oldest line that may go. Returns `false` if every retained
    /// line is pinned.
    fn make_room(&mut self) -> bool {
        let index = if self.reporting { 0 } else { self.pinned };
        if index >= self.lines.len() {
            return false;
        }
        let _evicted = self.lines.remove(index);
        if self.reporting {
            self.pinned = self.pinned.saturating_sub(1);
        }
        self.evicted = self.evicted.saturating_add(1);
        true
    }

    /// Iterate over the retained lines: the report, then later lines oldest
    /// first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.as_str())
    }

    /// Number of retained lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if no line was written since the last clear.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.evicted == 0
    }

    /// Lines dropped for lack of room since the last clear.
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    /// Returns `true` if any retained line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().any(|line| line.contains(needle))
    }
}

impl<const LINES: usize, const WIDTH: usize> Default for DiagnosticLog<LINES, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the log as newline-terminated lines, the format served to clients.
///
/// A note with the eviction count sits between the report and the later
/// lines.
impl<const LINES: usize, const WIDTH: usize> fmt::Display for DiagnosticLog<LINES, WIDTH> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines().enumerate() {
            if index == self.pinned && self.evicted > 0 {
                self.write_dropped(f)?;
            }
            writeln!(f, "{line}")?;
        }
        if self.pinned >= self.lines.len() && self.evicted > 0 {
            self.write_dropped(f)?;
        }
        Ok(())
    }
}

impl<const LINES: usize, const WIDTH: usize> DiagnosticLog<LINES, WIDTH> {
    fn write_dropped(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} lines dropped)",
            Severity::Info.tag(),
            self.evicted
        )
    }
}

/// `fmt::Write` adapter that silently stops at the line capacity.
struct Truncating<'a, const WIDTH: usize> {
    line: &'a mut String<WIDTH>,
    full: bool,
}

impl<const WIDTH: usize> fmt::Write for Truncating<'_, WIDTH> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.full {
                break;
            }
            self.full = self.line.push(c).is_err();
        }
        Ok(())
    }
}

fn mirror(severity: Severity, line: &str) {
    #[cfg(feature = "defmt")]
    mirror_defmt(severity, line);
    #[cfg(feature = "tracing")]
    mirror_tracing(severity, line);

    let _ = (severity, line);
}

#[cfg(feature = "defmt")]
fn mirror_defmt(severity: Severity, line: &str) {
    match severity {
        Severity::Info | Severity::Ok => defmt::info!("{=str}", line),
        Severity::Warn => defmt::warn!("{=str}", line),
        Severity::Error => defmt::error!("{=str}", line),
    }
}

#[cfg(feature = "tracing")]
fn mirror_tracing(severity: Severity, line: &str) {
    match severity {
        Severity::Info | Severity::Ok => tracing::info!(target: "audio", "{line}"),
        Severity::Warn => tracing::warn!(target: "audio", "{line}"),
        Severity::Error => tracing::error!(target: "audio", "{line}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_prefixes_tag() {
        let mut log: DiagnosticLog = DiagnosticLog::new();
        log.push(Severity::Ok, format_args!("module found on {}", "UART2"));
        assert_eq!(log.lines().next(), Some("[OK] module found on UART2"));
    }

    #[test]
    fn test_display_is_newline_terminated() {
        let mut log: DiagnosticLog = DiagnosticLog::new();
        log.push(Severity::Info, format_args!("one"));
        log.push(Severity::Warn, format_args!("two"));
        assert_eq!(log.to_string(), "[INFO] one\n[WARN] two\n");
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log: DiagnosticLog<2, 32> = DiagnosticLog::new();
        for _ in 0..5 {
            log.push(Severity::Info, format_args!("x"));
        }
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.to_string(), "");
    }

    #[test]
    fn test_full_log_evicts_oldest() {
        let mut log: DiagnosticLog<3, 32> = DiagnosticLog::new();
        for i in 0..5 {
            log.push(Severity::Info, format_args!("line {i}"));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.evicted(), 2);
        let kept: std::vec::Vec<&str> = log.lines().collect();
        assert_eq!(kept, ["[INFO] line 2", "[INFO] line 3", "[INFO] line 4"]);
        assert!(log.to_string().starts_with("[INFO] (2 lines dropped)\n"));
    }

    #[test]
    fn test_full_log_keeps_report() {
        let mut log: DiagnosticLog<4, 32> = DiagnosticLog::new();
        log.start_report();
        log.push(Severity::Info, format_args!("init"));
        log.push(Severity::Ok, format_args!("ready"));
        log.finish_report();
        for i in 0..6 {
            log.push(Severity::Info, format_args!("play {i}"));
        }

        assert_eq!(log.pinned(), 2);
        assert_eq!(log.evicted(), 4);
        let kept: std::vec::Vec<&str> = log.lines().collect();
        assert_eq!(
            kept,
            ["[INFO] init", "[OK] ready", "[INFO] play 4", "[INFO] play 5"]
        );
        assert_eq!(
            log.to_string(),
            "[INFO] init\n[OK] ready\n[INFO] (4 lines dropped)\n[INFO] play 4\n[INFO] play 5\n"
        );
    }

    #[test]
    fn test_report_filling_log_drops_later_lines() {
        let mut log: DiagnosticLog<2, 32> = DiagnosticLog::new();
        log.start_report();
        log.push(Severity::Info, format_args!("init"));
        log.push(Severity::Error, format_args!("not found"));
        log.finish_report();
        log.push(Severity::Error, format_args!("play failed"));

        assert_eq!(log.evicted(), 1);
        assert_eq!(
            log.to_string(),
            "[INFO] init\n[ERROR] not found\n[INFO] (1 lines dropped)\n"
        );
    }

    #[test]
    fn test_open_report_makes_room_from_its_oldest_line() {
        let mut log: DiagnosticLog<2, 32> = DiagnosticLog::new();
        log.start_report();
        for i in 0..3 {
            log.push(Severity::Warn, format_args!("attempt {i}"));
        }
        log.finish_report();

        assert_eq!(log.pinned(), 2);
        let kept: std::vec::Vec<&str> = log.lines().collect();
        assert_eq!(kept, ["[WARN] attempt 1", "[WARN] attempt 2"]);
        assert!(log.to_string().ends_with("[INFO] (1 lines dropped)\n"));
    }

    #[test]
    fn test_start_report_clears_previous_lines() {
        let mut log: DiagnosticLog<4, 32> = DiagnosticLog::new();
        log.push(Severity::Info, format_args!("old"));
        log.start_report();
        log.push(Severity::Info, format_args!("new"));
        log.finish_report();
        assert_eq!(log.to_string(), "[INFO] new\n");
        assert_eq!(log.pinned(), 1);
    }

    #[test]
    fn test_long_line_truncated_on_char_boundary() {
        let mut log: DiagnosticLog<4, 12> = DiagnosticLog::new();
        // "[INFO] " is 7 bytes, leaving 5; 'é' is 2 bytes
        log.push(Severity::Info, format_args!("ééé"));
        let line = log.lines().next().unwrap();
        assert_eq!(line, "[INFO] éé");
        assert!(line.len() <= 12);
    }
}
