//! Error types for chordsync.

use std::fmt;
use thiserror::Error;

/// Which annotation stream a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Words,
    Chords,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Words => f.write_str("word"),
            Stream::Chords => f.write_str("chord"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ChordSyncError {
    // Alignment input errors
    #[error("Malformed {stream} record {index}: {message}")]
    MalformedInput {
        stream: Stream,
        index: usize,
        message: String,
    },

    #[error("Degenerate word {index} ({word:?}): end {end} must be greater than start {start}")]
    DegenerateWord {
        index: usize,
        word: String,
        start: f64,
        end: f64,
    },

    // Configuration errors
    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Result file discovery
    #[error("No {kind} file found in {dir}")]
    ResultFileNotFound { kind: &'static str, dir: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChordSyncError {
    pub(crate) fn malformed(stream: Stream, index: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            stream,
            index,
            message: message.into(),
        }
    }

    pub(crate) fn missing_field(stream: Stream, index: usize, field: &str) -> Self {
        Self::malformed(stream, index, format!("missing field `{field}`"))
    }
}

pub type Result<T> = std::result::Result<T, ChordSyncError>;
