//! Reading annotation files and writing rendered output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{DiscoverConfig, OutputConfig};
use crate::error::{ChordSyncError, Result};
use crate::input;
use crate::render;
use crate::types::{AnnotatedWord, ChordEvent, WordEvent};

/// Locations of the two annotation files for one recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationFiles {
    pub lyrics: PathBuf,
    pub chords: PathBuf,
}

/// Where [`save_outputs`] wrote the renderings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedOutputs {
    pub text: PathBuf,
    pub json: PathBuf,
}

/// Read and decode the lyrics and chords JSON files.
pub fn load_annotation_files(
    files: &AnnotationFiles,
) -> Result<(Vec<WordEvent>, Vec<ChordEvent>)> {
    let words = input::parse_words(&fs::read_to_string(&files.lyrics)?)?;
    let chords = input::parse_chords(&fs::read_to_string(&files.chords)?)?;
    Ok((words, chords))
}

/// Find the lyrics and chords files among the JSON files in `dir`.
///
/// Files are considered in name order. A file whose lowercase name contains a
/// lyrics keyword is a lyrics candidate; otherwise it is a chords candidate if
/// it contains a chord keyword. The first candidate of each kind wins.
pub fn discover_result_files(dir: &Path, discover: &DiscoverConfig) -> Result<AnnotationFiles> {
    let mut names: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_json_extension(path))
        .collect();
    names.sort();

    let mut lyrics = None;
    let mut chords = None;
    for path in names {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_lowercase()) else {
            continue;
        };
        if matches_any(&name, &discover.lyrics_keywords) {
            if lyrics.is_none() {
                lyrics = Some(path);
            }
        } else if chords.is_none() && matches_any(&name, &discover.chord_keywords) {
            chords = Some(path);
        }
    }

    let not_found = |kind| ChordSyncError::ResultFileNotFound {
        kind,
        dir: dir.display().to_string(),
    };
    Ok(AnnotationFiles {
        lyrics: lyrics.ok_or_else(|| not_found("lyrics"))?,
        chords: chords.ok_or_else(|| not_found("chords"))?,
    })
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn matches_any(name: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|keyword| name.contains(&keyword.to_lowercase()))
}

/// Write the plain-text and JSON renderings into the output directory,
/// creating it if needed.
pub fn save_outputs(words: &[AnnotatedWord], output: &OutputConfig) -> Result<SavedOutputs> {
    fs::create_dir_all(&output.directory)?;

    let saved = SavedOutputs {
        text: output.text_path(),
        json: output.json_path(),
    };
    fs::write(&saved.text, render::plain_text(words))?;
    fs::write(&saved.json, render::to_json(words)?)?;
    Ok(saved)
}

/// Read a JSON rendering written by [`save_outputs`].
pub fn load_synced_output(path: &Path) -> Result<Vec<AnnotatedWord>> {
    render::from_json(&fs::read_to_string(path)?)
}
