//! Performance benchmarks for Tokenizer
//!
//! Run with: cargo bench --bench tokenizer_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spansplit_core::{SpacePolicy, Tokenizer};
use std::hint::black_box;

/// Generate test text of specified size
fn generate_text(size: usize) -> String {
    let base_sentence = "Mr. Smith didn't say (much) about the well-known U.S. plan, did he? ";
    let repeat_count = size / base_sentence.len() + 1;

    let mut text = base_sentence.repeat(repeat_count);
    let mut cut = size.min(text.len());
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    text
}

/// Benchmark different text sizes
fn bench_text_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_sizes");

    let tokenizer = Tokenizer::for_language("en").unwrap();

    for size in [1024, 10_240, 102_400, 1_024_000] {
        let text = generate_text(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("tokenize", size), &text, |b, text| {
            b.iter(|| {
                let _ = tokenizer.tokenize(black_box(text)).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark rule sets against whitespace-only splitting
fn bench_rule_sets(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_sets");
    let text = generate_text(102_400);
    group.throughput(Throughput::Bytes(text.len() as u64));

    let whitespace = Tokenizer::default();
    group.bench_with_input(BenchmarkId::new("rules", "whitespace"), &text, |b, text| {
        b.iter(|| {
            let _ = whitespace.tokenize(black_box(text)).unwrap();
        });
    });

    let english = Tokenizer::for_language("en").unwrap();
    group.bench_with_input(BenchmarkId::new("rules", "english"), &text, |b, text| {
        b.iter(|| {
            let _ = english.tokenize(black_box(text)).unwrap();
        });
    });

    let absorbing = Tokenizer::builder()
        .language("en")
        .space_policy(SpacePolicy::Absorb)
        .build()
        .unwrap();
    group.bench_with_input(
        BenchmarkId::new("rules", "english_absorb"),
        &text,
        |b, text| {
            b.iter(|| {
                let _ = absorbing.tokenize(black_box(text)).unwrap();
            });
        },
    );

    group.finish();
}

/// Benchmark the verification pass
fn bench_verify(c: &mut Criterion) {
    let text = generate_text(102_400);
    let doc = Tokenizer::for_language("en").unwrap().tokenize(&text).unwrap();

    c.bench_function("verify_100kb", |b| {
        b.iter(|| black_box(&doc).verify().unwrap());
    });
}

/// Benchmark batch tokenization with different thread counts
fn bench_batch_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_threads");
    let texts: Vec<String> = (0..64).map(|_| generate_text(16_384)).collect();
    let total: usize = texts.iter().map(String::len).sum();

    for threads in [1, 2, 4, 8] {
        let tokenizer = Tokenizer::builder()
            .language("en")
            .threads(Some(threads))
            .build()
            .unwrap();

        group.throughput(Throughput::Bytes(total as u64));
        group.bench_with_input(BenchmarkId::new("threads", threads), &texts, |b, texts| {
            b.iter(|| {
                let _ = tokenizer.tokenize_batch(black_box(texts)).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_text_sizes,
    bench_rule_sets,
    bench_verify,
    bench_batch_threads
);
criterion_main!(benches);
