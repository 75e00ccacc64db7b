//! Chord-to-word alignment.
//!
//! Each chord is attached to the first word (in start-time order) whose
//! half-open interval it overlaps, and is rendered as an inline `{LABEL}`
//! marker at the character offset matching the chord onset within that word.
//! Assignment is a single greedy pass: once a chord is attached it is never
//! considered for a later word, and chords overlapping no word are dropped.
//!
//! Counts and dropped chords are emitted as `tracing` debug/trace events for
//! library consumers that install a subscriber. The `chordsync` binary does
//! not install one; its `-v`/`-vv` output comes from the returned
//! [`AlignmentSummary`] instead.

use std::cmp::Ordering;

use crate::config::AlignConfig;
use crate::defaults;
use crate::error::{ChordSyncError, Result, Stream};
use crate::marker;
use crate::types::{AlignmentSummary, AnnotatedWord, ChordEvent, WordEvent};

/// Aligns chord intervals to transcribed words.
///
/// Holds only configuration, so one instance can be shared across threads and
/// reused for any number of independent calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aligner {
    no_chord_label: String,
}

impl Default for Aligner {
    fn default() -> Self {
        Self::with_no_chord_label(defaults::NO_CHORD_LABEL)
    }
}

impl Aligner {
    pub fn new(config: &AlignConfig) -> Self {
        Self::with_no_chord_label(config.no_chord_label.clone())
    }

    pub fn with_no_chord_label(label: impl Into<String>) -> Self {
        Self {
            no_chord_label: label.into(),
        }
    }

    /// The chord label treated as "no chord" and filtered before alignment.
    pub fn no_chord_label(&self) -> &str {
        &self.no_chord_label
    }

    /// Align `chords` to `words`, returning one annotated word per input word
    /// in ascending start order.
    ///
    /// Fails without partial output on a malformed record or a word whose
    /// `end <= start`.
    pub fn align(
        &self,
        words: &[WordEvent],
        chords: &[ChordEvent],
    ) -> Result<Vec<AnnotatedWord>> {
        self.align_with_summary(words, chords)
            .map(|(annotated, _)| annotated)
    }

    /// Same as [`Aligner::align`], also returning placement counters.
    pub fn align_with_summary(
        &self,
        words: &[WordEvent],
        chords: &[ChordEvent],
    ) -> Result<(Vec<AnnotatedWord>, AlignmentSummary)> {
        validate_words(words)?;
        validate_chords(chords)?;

        let total_chords = chords.len();
        let mut chords: Vec<&ChordEvent> = chords
            .iter()
            .filter(|chord| chord.label != self.no_chord_label)
            .collect();
        let mut words: Vec<&WordEvent> = words.iter().collect();

        // Stable sorts: equal start times keep input order.
        words.sort_by(|a, b| by_start(a.start, b.start));
        chords.sort_by(|a, b| by_start(a.start, b.start));

        let mut summary = AlignmentSummary {
            words: words.len(),
            chords: chords.len(),
            filtered: total_chords - chords.len(),
            ..AlignmentSummary::default()
        };
        tracing::debug!(
            words = summary.words,
            chords = summary.chords,
            filtered = summary.filtered,
            "aligning chords to words"
        );

        let mut consumed = vec![false; chords.len()];
        let mut annotated = Vec::with_capacity(words.len());

        for word in &words {
            let mut placements: Vec<(usize, &str)> = Vec::new();

            for (idx, chord) in chords.iter().enumerate() {
                if consumed[idx] || !overlaps(word, chord) {
                    continue;
                }
                consumed[idx] = true;
                placements.push((char_offset(word, chord.start), chord.label.as_str()));
            }

            summary.placed += placements.len();
            annotated.push(AnnotatedWord {
                rendered_text: marker::insert_markers(&word.text, &placements),
                start: word.start,
                end: word.end,
                has_chord: !placements.is_empty(),
            });
        }

        summary.dropped = summary.chords - summary.placed;
        if summary.dropped > 0 {
            for (chord, _) in chords.iter().zip(&consumed).filter(|(_, used)| !**used) {
                tracing::trace!(
                    label = %chord.label,
                    start = chord.start,
                    end = chord.end,
                    "chord overlaps no word"
                );
            }
        }
        tracing::debug!(
            placed = summary.placed,
            dropped = summary.dropped,
            "alignment finished"
        );

        Ok((annotated, summary))
    }
}

/// Align with the default no-chord sentinel.
pub fn align(words: &[WordEvent], chords: &[ChordEvent]) -> Result<Vec<AnnotatedWord>> {
    Aligner::default().align(words, chords)
}

/// Half-open interval overlap between a word and a chord.
///
/// True iff the chord starts inside the word, or the word starts inside the
/// chord. A chord starting exactly at the word end does not overlap.
pub fn overlaps(word: &WordEvent, chord: &ChordEvent) -> bool {
    (word.start <= chord.start && chord.start < word.end)
        || (chord.start <= word.start && word.start < chord.end)
}

/// Character index inside `word` matching a chord that starts at `chord_start`.
///
/// A chord already sounding when the word begins maps to index 0. The result
/// is `floor(len * proportion)` clamped to `[0, len]`, with `len` counted in
/// characters.
pub fn char_offset(word: &WordEvent, chord_start: f64) -> usize {
    let len = word.text.chars().count();
    let time_offset = (chord_start - word.start).max(0.0);
    let proportion = time_offset / word.duration();
    let index = (len as f64 * proportion).floor();
    // `as` saturates: negative values become 0
    (index as usize).min(len)
}

fn by_start(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn validate_words(words: &[WordEvent]) -> Result<()> {
    for (index, word) in words.iter().enumerate() {
        if word.text.is_empty() {
            return Err(ChordSyncError::malformed(
                Stream::Words,
                index,
                "word text is empty",
            ));
        }
        if marker::contains_brace(&word.text) {
            return Err(ChordSyncError::malformed(
                Stream::Words,
                index,
                format!("word text {:?} contains a marker brace", word.text),
            ));
        }
        check_finite(Stream::Words, index, word.start, word.end)?;
        if word.end <= word.start {
            return Err(ChordSyncError::DegenerateWord {
                index,
                word: word.text.clone(),
                start: word.start,
                end: word.end,
            });
        }
    }
    Ok(())
}

fn validate_chords(chords: &[ChordEvent]) -> Result<()> {
    for (index, chord) in chords.iter().enumerate() {
        if chord.label.is_empty() {
            return Err(ChordSyncError::malformed(
                Stream::Chords,
                index,
                "chord label is empty",
            ));
        }
        if marker::contains_brace(&chord.label) {
            return Err(ChordSyncError::malformed(
                Stream::Chords,
                index,
                format!("chord label {:?} contains a marker brace", chord.label),
            ));
        }
        check_finite(Stream::Chords, index, chord.start, chord.end)?;
    }
    Ok(())
}

fn check_finite(stream: Stream, index: usize, start: f64, end: f64) -> Result<()> {
    if !start.is_finite() {
        return Err(ChordSyncError::malformed(
            stream,
            index,
            format!("start {start} is not a finite number"),
        ));
    }
    if !end.is_finite() {
        return Err(ChordSyncError::malformed(
            stream,
            index,
            format!("end {end} is not a finite number"),
        ));
    }
    Ok(())
}
