//! Decoding of the annotation service's JSON output into typed events.
//!
//! The lyrics stream arrives either as phrases (`{"words": [...]}`) or as a
//! flat list of word records; both may be mixed in one document. The chord
//! stream is a flat list of `chord_majmin` records. Extra fields are ignored.
//! Any missing or mistyped required field rejects the whole document.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ChordSyncError, Result, Stream};
use crate::types::{ChordEvent, WordEvent};

/// Key holding a phrase's word records.
const PHRASE_WORDS: &str = "words";
/// Key identifying a flat word record.
const WORD_FIELD: &str = "word";

#[derive(Debug, Deserialize)]
struct RawWord {
    word: Option<String>,
    start: Option<f64>,
    end: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawChord {
    chord_majmin: Option<String>,
    start: Option<f64>,
    end: Option<f64>,
}

/// Decode lyrics JSON text.
pub fn parse_words(json: &str) -> Result<Vec<WordEvent>> {
    let value: Value = serde_json::from_str(json)?;
    words_from_value(&value)
}

/// Decode chords JSON text.
pub fn parse_chords(json: &str) -> Result<Vec<ChordEvent>> {
    let value: Value = serde_json::from_str(json)?;
    chords_from_value(&value)
}

/// Flatten a lyrics document into word events, in document order.
///
/// Word record indices in errors count words across all phrases.
pub fn words_from_value(value: &Value) -> Result<Vec<WordEvent>> {
    let entries = top_level_list(value, Stream::Words)?;
    let mut words = Vec::new();

    for entry in entries {
        match entry.get(PHRASE_WORDS) {
            Some(Value::Array(records)) => {
                for record in records {
                    words.push(decode_word(record, words.len())?);
                }
            }
            Some(_) => {
                return Err(ChordSyncError::malformed(
                    Stream::Words,
                    words.len(),
                    "phrase `words` is not a list",
                ));
            }
            None if is_phrase_without_words(entry) => {}
            None => words.push(decode_word(entry, words.len())?),
        }
    }

    Ok(words)
}

/// Decode a chord document into chord events, keeping every label
/// (including the no-chord sentinel, which the aligner filters).
pub fn chords_from_value(value: &Value) -> Result<Vec<ChordEvent>> {
    top_level_list(value, Stream::Chords)?
        .iter()
        .enumerate()
        .map(|(index, record)| decode_chord(record, index))
        .collect()
}

fn top_level_list(value: &Value, stream: Stream) -> Result<&Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| ChordSyncError::malformed(stream, 0, "document is not a JSON list"))
}

/// A phrase entry that carries no word list contributes no words.
///
/// Only an object with a `word` key is a flat word record; any other object
/// is a phrase with phrase-level data only (`text`, `start`, `end`).
fn is_phrase_without_words(entry: &Value) -> bool {
    entry
        .as_object()
        .is_some_and(|obj| !obj.contains_key(WORD_FIELD))
}

fn decode_word(record: &Value, index: usize) -> Result<WordEvent> {
    let raw: RawWord = decode(record, Stream::Words, index)?;
    Ok(WordEvent {
        text: raw
            .word
            .ok_or_else(|| ChordSyncError::missing_field(Stream::Words, index, "word"))?,
        start: raw
            .start
            .ok_or_else(|| ChordSyncError::missing_field(Stream::Words, index, "start"))?,
        end: raw
            .end
            .ok_or_else(|| ChordSyncError::missing_field(Stream::Words, index, "end"))?,
    })
}

fn decode_chord(record: &Value, index: usize) -> Result<ChordEvent> {
    let raw: RawChord = decode(record, Stream::Chords, index)?;
    Ok(ChordEvent {
        label: raw.chord_majmin.ok_or_else(|| {
            ChordSyncError::missing_field(Stream::Chords, index, "chord_majmin")
        })?,
        start: raw
            .start
            .ok_or_else(|| ChordSyncError::missing_field(Stream::Chords, index, "start"))?,
        end: raw
            .end
            .ok_or_else(|| ChordSyncError::missing_field(Stream::Chords, index, "end"))?,
    })
}

fn decode<T>(record: &Value, stream: Stream, index: usize) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if !record.is_object() {
        return Err(ChordSyncError::malformed(
            stream,
            index,
            "record is not a JSON object",
        ));
    }
    T::deserialize(record).map_err(|e| ChordSyncError::malformed(stream, index, e.to_string()))
}
