//! Diff and overlay performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use redraft::EditBuffer;
use redraft::diff::{AlignMode, CompareOptions, align, compare, consolidate, tokenize};
use redraft::markup::Overlay;
use std::hint::black_box;

/// A passage of `sentences` sentences and a rewrite touching every third word.
fn passage(sentences: usize) -> (String, String) {
    let mut original = String::new();
    let mut rewritten = String::new();
    for s in 0..sentences {
        for w in 0..12 {
            let word = format!("word{s}x{w}");
            original.push_str(&word);
            if w % 3 == 0 {
                rewritten.push_str(&format!("changed{s}x{w}"));
            } else {
                rewritten.push_str(&word);
            }
            original.push(' ');
            rewritten.push(' ');
        }
        original.push_str("end. ");
        rewritten.push_str("end. ");
    }
    (original, rewritten)
}

fn tokenizer(c: &mut Criterion) {
    let (original, _) = passage(100);
    c.bench_function("tokenize_100_sentences", |b| {
        b.iter(|| tokenize(black_box(&original)));
    });
}

fn alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("align");
    for sentences in [1, 4, 16] {
        let (original, rewritten) = passage(sentences);
        let a = tokenize(&original);
        let b = tokenize(&rewritten);
        group.bench_with_input(BenchmarkId::from_parameter(sentences), &(a, b), |bench, (a, b)| {
            bench.iter(|| consolidate(&align(black_box(a), black_box(b))));
        });
    }
    group.finish();
}

fn compare_modes(c: &mut Criterion) {
    let (original, rewritten) = passage(32);
    let mut group = c.benchmark_group("compare_32_sentences");
    for mode in [AlignMode::Sentences, AlignMode::Whole] {
        let options = CompareOptions::default().with_mode(mode);
        group.bench_function(format!("{mode:?}"), |b| {
            b.iter(|| compare(black_box(&original), black_box(&rewritten), &options));
        });
    }
    group.finish();
}

fn overlay_edits(c: &mut Criterion) {
    let (original, rewritten) = passage(16);
    let cmp = compare(&original, &rewritten, &CompareOptions::default());
    let len = original.chars().count();

    c.bench_function("overlay_on_edit_insert_delete", |b| {
        let mut overlay = Overlay::new();
        overlay.rebuild(&cmp.actions, &cmp.tokens, 0, len);
        b.iter(|| {
            overlay.on_edit(black_box(len / 2), 1);
            overlay.on_edit(black_box(len / 2), -1);
        });
    });

    c.bench_function("editbuffer_type_inside_scope", |b| {
        let mut buf = EditBuffer::with_text(&original);
        buf.compare_range(&rewritten, 0..len, &CompareOptions::default());
        b.iter(|| {
            let _ = buf.insert(black_box(10), "x");
            let _ = buf.delete(black_box(10), 1);
        });
    });
}

criterion_group!(benches, tokenizer, alignment, compare_modes, overlay_edits);
criterion_main!(benches);
