//! Alignment behavior checked end to end through the public API.

use std::collections::HashSet;
use std::path::PathBuf;

use chordsync::files::{AnnotationFiles, load_annotation_files};
use chordsync::marker::{parse_markers, split_marker, strip_markers};
use chordsync::render::{plain_lyrics, plain_text, to_json};
use chordsync::{Aligner, AnnotatedWord, ChordEvent, ChordSyncError, WordEvent, align};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn rendered(output: &[AnnotatedWord]) -> Vec<&str> {
    output.iter().map(|w| w.rendered_text.as_str()).collect()
}

const CASE_SEED: u64 = 42;
const CASE_COUNT: usize = 300;
/// Timestamps sit on a 0.05s grid so that exact boundary ties occur often.
const STEP: f64 = 0.05;

const LABELS: &[&str] = &["C", "G", "Am", "F", "D7", "N", "Em", "B♭"];
const TEXTS: &[&str] = &["love", "you", "yellow", "canção", "a", "stars", "日本", "shine"];

fn grid_time(rng: &mut StdRng, max_steps: u32) -> f64 {
    f64::from(rng.random_range(0..max_steps)) * STEP
}

fn random_case(rng: &mut StdRng) -> (Vec<WordEvent>, Vec<ChordEvent>) {
    let word_count = rng.random_range(0..12);
    let words = (0..word_count)
        .map(|_| {
            let start = grid_time(rng, 100);
            let len = f64::from(rng.random_range(1..=20u32)) * STEP;
            let text = TEXTS.choose(rng).copied().unwrap_or("la");
            WordEvent::new(text, start, start + len)
        })
        .collect();

    let chord_count = rng.random_range(0..12);
    let chords = (0..chord_count)
        .map(|_| {
            let start = grid_time(rng, 110);
            let len = f64::from(rng.random_range(1..=30u32)) * STEP;
            let label = LABELS.choose(rng).copied().unwrap_or("C");
            ChordEvent::new(label, start, start + len)
        })
        .collect();

    (words, chords)
}

fn random_cases() -> Vec<(Vec<WordEvent>, Vec<ChordEvent>)> {
    let mut rng = StdRng::seed_from_u64(CASE_SEED);
    (0..CASE_COUNT).map(|_| random_case(&mut rng)).collect()
}

#[test]
fn scenario_chord_at_word_start() {
    let out = align(
        &[WordEvent::new("hello", 0.0, 1.0)],
        &[ChordEvent::new("C", 0.0, 1.0)],
    )
    .unwrap();
    assert_eq!(out[0].rendered_text, "{C}hello");
    assert!(out[0].has_chord);
}

#[test]
fn scenario_chord_halfway_through_word() {
    let out = align(
        &[WordEvent::new("world", 1.0, 2.0)],
        &[ChordEvent::new("G", 1.5, 2.0)],
    )
    .unwrap();
    assert_eq!(out[0].rendered_text, "wo{G}rld");
}

#[test]
fn scenario_two_chords_in_one_word() {
    let out = align(
        &[WordEvent::new("test", 0.0, 1.0)],
        &[ChordEvent::new("C", 0.0, 0.5), ChordEvent::new("G", 0.5, 1.0)],
    )
    .unwrap();
    assert_eq!(out[0].rendered_text, "{C}te{G}st");
}

#[test]
fn scenario_unmatched_chord_is_dropped() {
    let words = [WordEvent::new("hello", 0.0, 1.0)];
    let out = align(&words, &[ChordEvent::new("Am", 2.0, 3.0)]).unwrap();
    assert_eq!(rendered(&out), vec!["hello"]);
    assert!(!out[0].has_chord);
}

#[test]
fn scenario_no_chord_sentinel_never_appears() {
    let words = [
        WordEvent::new("one", 0.0, 1.0),
        WordEvent::new("two", 1.0, 2.0),
    ];
    let chords = [
        ChordEvent::new("N", 0.0, 1.0),
        ChordEvent::new("N", 1.2, 1.8),
    ];
    let out = align(&words, &chords).unwrap();
    assert_eq!(rendered(&out), vec!["one", "two"]);
}

#[test]
fn scenario_chord_touching_word_end() {
    let words = [
        WordEvent::new("one", 0.0, 1.0),
        WordEvent::new("two", 1.0, 2.0),
    ];
    let out = align(&words, &[ChordEvent::new("D", 1.0, 1.5)]).unwrap();
    assert_eq!(rendered(&out), vec!["one", "{D}two"]);
}

#[test]
fn fixture_song_aligns_like_reference_output() {
    let files = AnnotationFiles {
        lyrics: fixture("yellow--lyricsOutput.json"),
        chords: fixture("yellow--guitarOutput.json"),
    };
    let (words, chords) = load_annotation_files(&files).unwrap();
    let (out, summary) = Aligner::default()
        .align_with_summary(&words, &chords)
        .unwrap();

    assert_eq!(
        plain_text(&out),
        "{B}Look at the st{F#}ars Lo{E}ok how they sh{B}ine for you"
    );
    assert_eq!(
        plain_lyrics(&out),
        "Look at the stars Look how they shine for you"
    );
    assert_eq!(summary.words, 10);
    assert_eq!(summary.filtered, 2);
    assert_eq!(summary.placed, 4);
    assert_eq!(summary.dropped, 1);

    let json = to_json(&out).unwrap();
    assert!(json.starts_with("[\n  {\n    \"word\": \"{B}Look\",\n    \"start\": 0.5,"));
}

#[test]
fn property_each_chord_placed_at_most_once() {
    for (words, chords) in random_cases() {
        let out = align(&words, &chords).unwrap();
        let real_chords = chords.iter().filter(|c| c.label != "N").count();

        let markers: usize = out
            .iter()
            .map(|w| parse_markers(&w.rendered_text).1.len())
            .sum();
        assert!(
            markers <= real_chords,
            "{markers} markers from {real_chords} chords"
        );

        // A chord overlapping some word is never dropped.
        let overlapping = chords
            .iter()
            .filter(|c| c.label != "N")
            .filter(|c| words.iter().any(|w| chordsync::aligner::overlaps(w, c)))
            .count();
        assert_eq!(markers, overlapping);
    }
}

#[test]
fn property_output_sorted_and_stable() {
    for (words, chords) in random_cases() {
        let out = align(&words, &chords).unwrap();

        let mut expected: Vec<(usize, &WordEvent)> = words.iter().enumerate().collect();
        expected.sort_by(|a, b| a.1.start.partial_cmp(&b.1.start).unwrap());

        assert_eq!(out.len(), words.len());
        for ((_, word), annotated) in expected.iter().zip(&out) {
            assert_eq!(strip_markers(&annotated.rendered_text), word.text);
            assert_eq!(annotated.start, word.start);
            assert_eq!(annotated.end, word.end);
        }
        assert!(out.windows(2).all(|pair| pair[0].start <= pair[1].start));
    }
}

#[test]
fn property_has_chord_matches_markers() {
    for (words, chords) in random_cases() {
        for word in align(&words, &chords).unwrap() {
            let markers = parse_markers(&word.rendered_text).1;
            assert_eq!(word.has_chord, !markers.is_empty());
            assert!(markers.iter().all(|m| m.label != "N"));
        }
    }
}

#[test]
fn property_rendering_recovers_lyrics() {
    for (words, chords) in random_cases() {
        let out = align(&words, &chords).unwrap();
        let mut sorted = words.clone();
        sorted.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap());
        let lyrics: Vec<&str> = sorted.iter().map(|w| w.text.as_str()).collect();

        assert_eq!(plain_lyrics(&out), lyrics.join(" "));
    }
}

#[test]
fn property_markers_sit_in_left_to_right_order() {
    for (words, chords) in random_cases() {
        for word in align(&words, &chords).unwrap() {
            let offsets: Vec<usize> = parse_markers(&word.rendered_text)
                .1
                .iter()
                .map(|m| m.offset)
                .collect();
            assert!(offsets.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }
}

#[test]
fn last_brace_rule_reads_single_marker_words() {
    let out = align(
        &[WordEvent::new("world", 1.0, 2.0)],
        &[ChordEvent::new("G", 1.5, 2.0)],
    )
    .unwrap();
    let marker = split_marker(&out[0].rendered_text).unwrap();
    assert_eq!(marker.label, "G");
    assert_eq!(marker.text, "world");
}

#[test]
fn malformed_input_produces_no_partial_output() {
    let words = [
        WordEvent::new("fine", 0.0, 1.0),
        WordEvent::new("zero", 1.0, 1.0),
    ];
    let result = align(&words, &[ChordEvent::new("C", 0.0, 1.0)]);
    assert!(matches!(
        result,
        Err(ChordSyncError::DegenerateWord { index: 1, .. })
    ));
}

#[test]
fn aligner_is_shareable_across_threads() {
    let aligner = Aligner::default();
    let labels: HashSet<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["C", "G", "D"]
            .iter()
            .map(|label| {
                let aligner = &aligner;
                scope.spawn(move || {
                    aligner
                        .align(
                            &[WordEvent::new("la", 0.0, 1.0)],
                            &[ChordEvent::new(*label, 0.0, 1.0)],
                        )
                        .unwrap()[0]
                        .rendered_text
                        .clone()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let expected: HashSet<String> = ["{C}la", "{G}la", "{D}la"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(labels, expected);
}
