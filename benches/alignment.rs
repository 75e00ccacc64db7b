use chordsync::render::{chord_sheet, plain_text};
use chordsync::{Aligner, ChordEvent, WordEvent};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const TEXTS: &[&str] = &["look", "at", "the", "stars", "how", "they", "shine", "for", "you"];
const LABELS: &[&str] = &["B", "F#", "E", "N", "G#m", "C#"];

/// A song-shaped transcript: words 0.4s long with small gaps, chords every 1.3s.
fn synthetic_song(word_count: usize) -> (Vec<WordEvent>, Vec<ChordEvent>) {
    let words = (0..word_count)
        .map(|i| {
            let start = i as f64 * 0.45;
            WordEvent::new(TEXTS[i % TEXTS.len()], start, start + 0.4)
        })
        .collect();

    let song_length = word_count as f64 * 0.45;
    let chord_count = (song_length / 1.3).ceil() as usize;
    let chords = (0..chord_count)
        .map(|i| {
            let start = i as f64 * 1.3;
            ChordEvent::new(LABELS[i % LABELS.len()], start, start + 1.3)
        })
        .collect();

    (words, chords)
}

fn bench_align(c: &mut Criterion) {
    let aligner = Aligner::default();
    let mut group = c.benchmark_group("align");

    for word_count in [100, 1_000, 10_000] {
        let (words, chords) = synthetic_song(word_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(word_count),
            &(words, chords),
            |b, (words, chords)| {
                b.iter(|| aligner.align(black_box(words), black_box(chords)));
            },
        );
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let (words, chords) = synthetic_song(1_000);
    let Ok(synced) = Aligner::default().align(&words, &chords) else {
        eprintln!("Skipping render benchmarks: synthetic song failed to align");
        return;
    };

    c.bench_function("render/plain_text", |b| {
        b.iter(|| plain_text(black_box(&synced)))
    });
    c.bench_function("render/chord_sheet", |b| {
        b.iter(|| chord_sheet(black_box(&synced), 80))
    });
}

criterion_group!(benches, bench_align, bench_render);
criterion_main!(benches);
