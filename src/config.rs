use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults;
use crate::error::{ChordSyncError, Result};
use crate::marker;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub align: AlignConfig,
    pub output: OutputConfig,
    pub discover: DiscoverConfig,
}

/// Alignment configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlignConfig {
    /// Chord label meaning "no chord"; such intervals are never placed.
    pub no_chord_label: String,
}

/// Output file and rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub text_file: String,
    pub json_file: String,
    pub preview_chars: usize,
    pub sheet_width: usize,
}

/// Filename keywords used to find the lyrics and chords files in a results directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiscoverConfig {
    pub lyrics_keywords: Vec<String>,
    pub chord_keywords: Vec<String>,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            no_chord_label: defaults::NO_CHORD_LABEL.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(defaults::OUTPUT_DIR),
            text_file: defaults::TEXT_FILE.to_string(),
            json_file: defaults::JSON_FILE.to_string(),
            preview_chars: defaults::PREVIEW_CHARS,
            sheet_width: defaults::SHEET_WIDTH,
        }
    }
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            lyrics_keywords: to_strings(defaults::LYRICS_KEYWORDS),
            chord_keywords: to_strings(defaults::CHORD_KEYWORDS),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl OutputConfig {
    pub fn text_path(&self) -> PathBuf {
        self.directory.join(&self.text_file)
    }

    pub fn json_path(&self) -> PathBuf {
        self.directory.join(&self.json_file)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML or invalid values.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents).map_err(ChordSyncError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e)
                if e.downcast_ref::<std::io::Error>()
                    .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound) =>
            {
                Ok(Self::default())
            }
            Err(e) => Err(e.context(format!("Failed to load config from {}", path.display()))),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - CHORDSYNC_NO_CHORD_LABEL → align.no_chord_label
    /// - CHORDSYNC_OUTPUT_DIR → output.directory
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(label) = std::env::var(defaults::ENV_NO_CHORD_LABEL)
            && !label.is_empty()
        {
            self.align.no_chord_label = label;
        }

        if let Ok(dir) = std::env::var(defaults::ENV_OUTPUT_DIR)
            && !dir.is_empty()
        {
            self.output.directory = PathBuf::from(dir);
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/chordsync/config.toml on Linux, or a path relative to
    /// the working directory when no config directory can be determined.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chordsync")
            .join("config.toml")
    }

    /// Reject values the aligner or the file layer cannot work with.
    pub fn validate(&self) -> Result<()> {
        let label = &self.align.no_chord_label;
        if label.is_empty() {
            return Err(invalid("align.no_chord_label", "must not be empty"));
        }
        if marker::contains_brace(label) {
            return Err(invalid(
                "align.no_chord_label",
                "must not contain '{' or '}'",
            ));
        }
        if self.output.text_file.is_empty() {
            return Err(invalid("output.text_file", "must not be empty"));
        }
        if self.output.json_file.is_empty() {
            return Err(invalid("output.json_file", "must not be empty"));
        }
        if self.output.sheet_width == 0 {
            return Err(invalid("output.sheet_width", "must be positive"));
        }
        if self.discover.lyrics_keywords.is_empty() {
            return Err(invalid("discover.lyrics_keywords", "must list at least one keyword"));
        }
        if self.discover.chord_keywords.is_empty() {
            return Err(invalid("discover.chord_keywords", "must list at least one keyword"));
        }
        Ok(())
    }

    /// Look up a value by dotted key (e.g. `output.json_file`) and render it as TOML.
    pub fn get_value_by_path(&self, key: &str) -> Result<String> {
        let root = toml::Value::try_from(self).map_err(|e| ChordSyncError::ConfigParse {
            message: e.to_string(),
        })?;

        let mut current = &root;
        for part in key.split('.') {
            current = current
                .get(part)
                .ok_or_else(|| invalid(key, "no such configuration key"))?;
        }

        Ok(match current {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Serialize the effective configuration as TOML.
    pub fn to_display_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ChordSyncError::ConfigParse {
            message: e.to_string(),
        })
    }

    /// A commented configuration template with every default spelled out.
    pub fn dump_template() -> String {
        format!(
            r#"# chordsync configuration

[align]
# Chord label meaning "no chord"; these intervals are never placed.
no_chord_label = "{label}"

[output]
# Directory receiving the text and JSON renderings.
directory = "{dir}"
text_file = "{text}"
json_file = "{json}"
# Characters shown by the terminal preview.
preview_chars = {preview}
# Maximum line width of the chord sheet.
sheet_width = {width}

[discover]
# Lowercase filename keywords for locating files in a results directory.
lyrics_keywords = {lyrics:?}
chord_keywords = {chords:?}
"#,
            label = defaults::NO_CHORD_LABEL,
            dir = defaults::OUTPUT_DIR,
            text = defaults::TEXT_FILE,
            json = defaults::JSON_FILE,
            preview = defaults::PREVIEW_CHARS,
            width = defaults::SHEET_WIDTH,
            lyrics = defaults::LYRICS_KEYWORDS,
            chords = defaults::CHORD_KEYWORDS,
        )
    }
}

fn invalid(key: &str, message: &str) -> ChordSyncError {
    ChordSyncError::ConfigInvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
