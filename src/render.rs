//! Renderings of aligned output: plain text, JSON, preview and chord sheet.

use crate::error::Result;
use crate::marker;
use crate::types::AnnotatedWord;

/// All rendered words joined by single spaces, markers included.
pub fn plain_text(words: &[AnnotatedWord]) -> String {
    join_words(words.iter().map(|w| w.rendered_text.as_str()))
}

/// The original lyrics with every marker removed.
pub fn plain_lyrics(words: &[AnnotatedWord]) -> String {
    let stripped: Vec<String> = words
        .iter()
        .map(|w| marker::strip_markers(&w.rendered_text))
        .collect();
    join_words(stripped.iter().map(String::as_str))
}

fn join_words<'a>(words: impl Iterator<Item = &'a str>) -> String {
    let mut text = String::new();
    for (i, word) in words.enumerate() {
        if i > 0 {
            text.push(' ');
        }
        text.push_str(word);
    }
    text
}

/// Pretty JSON list of `{word, start, end, has_chord}` records, indented by two spaces.
pub fn to_json(words: &[AnnotatedWord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(words)?)
}

/// Parse JSON previously produced by [`to_json`].
pub fn from_json(json: &str) -> Result<Vec<AnnotatedWord>> {
    Ok(serde_json::from_str(json)?)
}

/// Plain text truncated to `max_chars` characters, with `...` appended when cut.
pub fn preview(words: &[AnnotatedWord], max_chars: usize) -> String {
    let text = plain_text(words);
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}

/// One chord sheet line pair: chord labels above the lyrics they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SheetLine {
    /// Labels placed at the column of their marker; empty when the line has no chords.
    pub chords: String,
    pub lyrics: String,
}

#[derive(Default)]
struct LineBuilder {
    line: SheetLine,
    chord_cols: usize,
    lyric_cols: usize,
}

impl LineBuilder {
    fn is_empty(&self) -> bool {
        self.lyric_cols == 0
    }

    fn push_word(&mut self, base: &str, markers: &[marker::PlacedMarker]) {
        if !self.is_empty() {
            self.line.lyrics.push(' ');
            self.lyric_cols += 1;
        }
        let word_col = self.lyric_cols;
        self.line.lyrics.push_str(base);
        self.lyric_cols += base.chars().count();

        for placed in markers {
            // Keep a one-column gap after the previous label.
            let min_col = if self.chord_cols > 0 {
                self.chord_cols + 1
            } else {
                0
            };
            let col = (word_col + placed.offset).max(min_col);
            self.line
                .chords
                .extend(std::iter::repeat_n(' ', col - self.chord_cols));
            self.line.chords.push_str(&placed.label);
            self.chord_cols = col + placed.label.chars().count();
        }
    }
}

/// Lay words out in lines of at most `width` lyric columns, each preceded by
/// the labels of the chords placed in it.
///
/// A single word longer than `width` gets a line of its own.
pub fn chord_sheet(words: &[AnnotatedWord], width: usize) -> Vec<SheetLine> {
    let mut lines = Vec::new();
    let mut current = LineBuilder::default();

    for word in words {
        let (base, markers) = marker::parse_markers(&word.rendered_text);
        let base_cols = base.chars().count();

        if !current.is_empty() && current.lyric_cols + 1 + base_cols > width {
            lines.push(std::mem::take(&mut current).line);
        }
        current.push_word(&base, &markers);
    }

    if !current.is_empty() {
        lines.push(current.line);
    }
    lines
}

/// The chord sheet as plain text, chord lines omitted when empty.
pub fn chord_sheet_text(words: &[AnnotatedWord], width: usize) -> String {
    let mut out = String::new();
    for line in chord_sheet(words, width) {
        if !line.chords.is_empty() {
            out.push_str(&line.chords);
            out.push('\n');
        }
        out.push_str(&line.lyrics);
        out.push('\n');
    }
    out
}
