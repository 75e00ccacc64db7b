//! Data types shared by the aligner, the input decoder and the renderers.

use serde::{Deserialize, Serialize};

/// One transcribed word with its timing in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct WordEvent {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl WordEvent {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Word duration in seconds. Only meaningful when `end > start`.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// One detected chord interval.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordEvent {
    pub label: String,
    pub start: f64,
    pub end: f64,
}

impl ChordEvent {
    pub fn new(label: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }
}

/// A word decorated with zero or more inline `{LABEL}` chord markers.
///
/// Serializes with the field names downstream consumers expect:
/// `{ "word", "start", "end", "has_chord" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedWord {
    #[serde(rename = "word")]
    pub rendered_text: String,
    pub start: f64,
    pub end: f64,
    pub has_chord: bool,
}

/// Counters collected during one alignment call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentSummary {
    pub words: usize,
    /// Chords left after removing the no-chord sentinel.
    pub chords: usize,
    /// Sentinel chords removed before alignment.
    pub filtered: usize,
    /// Chords attached to a word.
    pub placed: usize,
    /// Chords that overlapped no word.
    pub dropped: usize,
}
