//! Status reporting on stderr.
//!
//! Results go to stdout; everything here is progress and diagnostics, gated by
//! `--quiet` and `-v`/`-vv` so that stdout stays pipeable.

use std::io::IsTerminal;
use std::path::Path;

use crate::types::AlignmentSummary;

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Width of the rule printed around verbose sections.
const RULE_WIDTH: usize = 60;

/// Verbosity-aware stderr reporter.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    quiet: bool,
    verbosity: u8,
    color: bool,
}

impl Reporter {
    pub fn new(quiet: bool, verbosity: u8) -> Self {
        Self {
            quiet,
            verbosity,
            color: std::io::stderr().is_terminal(),
        }
    }

    /// A reporter that never writes anything.
    pub fn silent() -> Self {
        Self {
            quiet: true,
            verbosity: 0,
            color: false,
        }
    }

    pub fn verbosity(&self) -> u8 {
        if self.quiet { 0 } else { self.verbosity }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Section banner, shown at -v.
    pub fn banner(&self, title: &str) {
        if self.verbosity() >= 1 {
            let rule = "=".repeat(RULE_WIDTH);
            eprintln!("{rule}\n{title}\n{rule}");
        }
    }

    /// Progress step, shown at -v.
    pub fn step(&self, message: &str) {
        if self.verbosity() >= 1 {
            eprintln!("{}", self.paint(GREEN, &format!("✓ {message}")));
        }
    }

    /// Low-level detail, shown at -vv.
    pub fn detail(&self, message: &str) {
        if self.verbosity() >= 2 {
            eprintln!("{}", self.paint(DIM, message));
        }
    }

    /// Outcome line, shown unless quiet.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", self.paint(GREEN, message));
        }
    }

    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", self.paint(YELLOW, &format!("Warning: {message}")));
        }
    }

    /// Errors are always shown, even when quiet.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.paint(RED, &format!("✗ {message}")));
    }

    /// Report where the annotation files were read from.
    pub fn inputs(&self, lyrics: &Path, chords: &Path) {
        self.detail(&format!("lyrics: {}", lyrics.display()));
        self.detail(&format!("chords: {}", chords.display()));
    }

    /// Report the alignment counters.
    pub fn summary(&self, summary: &AlignmentSummary) {
        self.step(&format!("Extracted {} words", summary.words));
        self.step(&format!(
            "Extracted {} chords ({} no-chord intervals skipped)",
            summary.chords, summary.filtered
        ));
        self.step(&format!("Synced {} words!", summary.words));
        self.detail(&format!(
            "placed {} chords, dropped {} without an overlapping word",
            summary.placed, summary.dropped
        ));
        if summary.words > 0 && summary.chords > 0 && summary.placed == 0 {
            self.warn("no chord overlapped any word; check that both files belong to the same recording");
        }
    }
}

/// Format a time interval for -vv listings.
pub fn format_interval(start: f64, end: f64) -> String {
    format!("{start:.2}s-{end:.2}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_reporter_has_zero_verbosity() {
        let reporter = Reporter::new(true, 2);
        assert_eq!(reporter.verbosity(), 0);
    }

    #[test]
    fn verbosity_passes_through_when_not_quiet() {
        assert_eq!(Reporter::new(false, 2).verbosity(), 2);
    }

    #[test]
    fn silent_reporter_has_zero_verbosity() {
        let reporter = Reporter::silent();
        assert!(reporter.quiet);
        assert_eq!(reporter.verbosity(), 0);
    }

    #[test]
    fn paint_without_color_is_plain() {
        let reporter = Reporter::silent();
        assert_eq!(reporter.paint(GREEN, "ok"), "ok");
    }

    #[test]
    fn paint_with_color_wraps_in_escape_codes() {
        let reporter = Reporter {
            quiet: false,
            verbosity: 0,
            color: true,
        };
        assert_eq!(reporter.paint(RED, "bad"), "\x1b[31mbad\x1b[0m");
    }

    #[test]
    fn format_interval_uses_two_decimals() {
        assert_eq!(format_interval(1.0, 2.5), "1.00s-2.50s");
    }
}
