//! Default configuration constants for chordsync.
//!
//! Shared by the configuration types and the CLI so that both agree on file
//! names and sentinel values.

/// Chord label meaning "no chord is sounding".
///
/// Chord detectors emit this for silence and unpitched passages. Intervals
/// carrying it are removed before alignment and never become markers.
pub const NO_CHORD_LABEL: &str = "N";

/// Default file name for the plain-text rendering.
pub const TEXT_FILE: &str = "lyrics_with_chords.txt";

/// Default file name for the JSON rendering.
pub const JSON_FILE: &str = "synced_lyrics.json";

/// Default output directory (current working directory).
pub const OUTPUT_DIR: &str = ".";

/// Number of characters shown by the terminal preview before truncating.
pub const PREVIEW_CHARS: usize = 500;

/// Maximum line width of the chord sheet rendering.
pub const SHEET_WIDTH: usize = 80;

/// Filename keywords identifying the lyrics file in a results directory.
pub const LYRICS_KEYWORDS: &[&str] = &["lyrics"];

/// Filename keywords identifying the chords file in a results directory.
///
/// The extraction service names its chord output after the guitar stem.
pub const CHORD_KEYWORDS: &[&str] = &["guitar", "chord"];

/// Environment variable overriding `align.no_chord_label`.
pub const ENV_NO_CHORD_LABEL: &str = "CHORDSYNC_NO_CHORD_LABEL";

/// Environment variable overriding `output.directory`.
pub const ENV_OUTPUT_DIR: &str = "CHORDSYNC_OUTPUT_DIR";
