//! Command-line interface for chordsync
//!
//! Provides argument parsing using clap derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Anchor detected chords inside the words of a timed lyrics transcript
#[derive(Parser, Debug)]
#[command(
    name = "chordsync",
    version,
    about = "Anchor detected chords inside the words of a timed lyrics transcript"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: progress, -vv: full diagnostics)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Align a chords file to a lyrics file and save the result
    Sync(SyncArgs),

    /// Re-render a previously saved JSON result
    Show {
        /// JSON file written by `sync`
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// What to print on stdout
        #[arg(long, short = 'p', value_enum, default_value_t = ShowFormat::Sheet)]
        print: ShowFormat,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Arguments of the `sync` command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Lyrics JSON file (word timings)
    #[arg(long, value_name = "FILE", requires = "chords", conflicts_with = "results_dir")]
    pub lyrics: Option<PathBuf>,

    /// Chords JSON file (chord_majmin intervals)
    #[arg(long, value_name = "FILE", requires = "lyrics", conflicts_with = "results_dir")]
    pub chords: Option<PathBuf>,

    /// Directory with downloaded results; lyrics and chords files are found by name
    #[arg(long, short = 'd', value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    /// Directory for the text and JSON output (overrides output.directory)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not write output files
    #[arg(long)]
    pub no_save: bool,

    /// What to print on stdout
    #[arg(long, short = 'p', value_enum, default_value_t = SyncFormat::Preview)]
    pub print: SyncFormat,
}

/// Stdout rendering after `sync`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SyncFormat {
    /// Truncated plain text
    Preview,
    /// Full plain text with inline markers
    Text,
    /// JSON records
    Json,
    /// Chord labels above the lyrics
    Sheet,
    /// Nothing
    None,
}

/// Stdout rendering for `show`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    Text,
    Json,
    Sheet,
    /// Lyrics with markers removed
    Lyrics,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value by key (e.g., output.json_file)
    Get {
        /// Dotted key path (e.g., align.no_chord_label)
        key: String,
    },
    /// Show the effective configuration
    List,
    /// Print the configuration file path
    Path,
    /// Dump a commented configuration template
    Dump,
}
