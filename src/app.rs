//! Command implementations for the chordsync binary.

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;

use crate::aligner::Aligner;
use crate::cli::{ShowFormat, SyncArgs, SyncFormat};
use crate::config::{Config, OutputConfig};
use crate::files::{
    AnnotationFiles, discover_result_files, load_annotation_files, load_synced_output,
    save_outputs,
};
use crate::output::{Reporter, format_interval};
use crate::render;
use crate::types::AnnotatedWord;

/// Load both annotation files, align them, save and print the result.
pub fn run_sync_command(config: Config, args: SyncArgs, reporter: Reporter) -> Result<()> {
    reporter.banner("Synchronizing Lyrics with Chords");

    let files = resolve_files(&args, &config)?;
    reporter.inputs(&files.lyrics, &files.chords);

    let (words, chords) = load_annotation_files(&files).with_context(|| {
        format!(
            "Failed to load {} and {}",
            files.lyrics.display(),
            files.chords.display()
        )
    })?;

    let aligner = Aligner::new(&config.align);
    let (synced, summary) = aligner
        .align_with_summary(&words, &chords)
        .context("Failed to synchronize lyrics with chords")?;
    reporter.summary(&summary);

    if reporter.verbosity() >= 2 {
        for word in synced.iter().filter(|w| w.has_chord) {
            reporter.detail(&format!(
                "  {} {}",
                format_interval(word.start, word.end),
                word.rendered_text
            ));
        }
    }

    let mut output = config.output;
    if let Some(dir) = args.output_dir {
        output.directory = dir;
    }

    if !args.no_save {
        let saved = save_outputs(&synced, &output).with_context(|| {
            format!("Failed to write output to {}", output.directory.display())
        })?;
        reporter.success(&format!(
            "Synced lyrics saved to '{}' and '{}'",
            saved.text.display(),
            saved.json.display()
        ));
    }

    print_sync_result(&synced, args.print, &output)
}

/// Pick the annotation files from explicit paths or a results directory.
fn resolve_files(args: &SyncArgs, config: &Config) -> Result<AnnotationFiles> {
    match (&args.lyrics, &args.chords, &args.results_dir) {
        (Some(lyrics), Some(chords), _) => Ok(AnnotationFiles {
            lyrics: lyrics.clone(),
            chords: chords.clone(),
        }),
        (_, _, Some(dir)) => discover_result_files(dir, &config.discover)
            .with_context(|| format!("Failed to find annotation files in {}", dir.display())),
        _ => bail!("Provide --lyrics and --chords, or --results-dir"),
    }
}

fn print_sync_result(
    synced: &[AnnotatedWord],
    format: SyncFormat,
    output: &OutputConfig,
) -> Result<()> {
    match format {
        SyncFormat::Preview => {
            let rule = "-".repeat(60);
            println!("{rule}");
            println!("{}", render::preview(synced, output.preview_chars));
            println!("{rule}");
        }
        SyncFormat::Text => println!("{}", render::plain_text(synced)),
        SyncFormat::Json => println!("{}", render::to_json(synced)?),
        SyncFormat::Sheet => print_sheet(synced, output.sheet_width),
        SyncFormat::None => {}
    }
    Ok(())
}

/// Re-render a saved JSON result.
pub fn run_show_command(
    config: &Config,
    input: &Path,
    format: ShowFormat,
    reporter: Reporter,
) -> Result<()> {
    let synced = load_synced_output(input)
        .with_context(|| format!("Failed to read synced lyrics from {}", input.display()))?;
    reporter.detail(&format!(
        "{} words, {} with chords",
        synced.len(),
        synced.iter().filter(|w| w.has_chord).count()
    ));

    match format {
        ShowFormat::Text => println!("{}", render::plain_text(&synced)),
        ShowFormat::Json => println!("{}", render::to_json(&synced)?),
        ShowFormat::Sheet => print_sheet(&synced, config.output.sheet_width),
        ShowFormat::Lyrics => println!("{}", render::plain_lyrics(&synced)),
    }
    Ok(())
}

/// Print the chord sheet, highlighting chord lines on a terminal.
fn print_sheet(words: &[AnnotatedWord], width: usize) {
    let color = std::io::stdout().is_terminal();
    for line in render::chord_sheet(words, width) {
        if !line.chords.is_empty() {
            if color {
                println!("{}", line.chords.cyan().bold());
            } else {
                println!("{}", line.chords);
            }
        }
        println!("{}", line.lyrics);
    }
}
