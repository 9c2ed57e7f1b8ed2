//! Benchmarks for CPR matching and redaction.
//!
//! Benchmark targets:
//! - Short text without candidates: <1us
//! - 100KB document with scattered CPR numbers: <5ms

// Criterion macros generate items without docs - this is expected for benchmarks
#![allow(missing_docs)]

use cpr_redact::Redactor;
use cpr_redact::cpr::candidates;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

const PLAIN: &str = "The quick brown fox jumps over the lazy dog.";
const SHORT: &str = "Patient CPR 010203-1234, ref 1234567890, phone 12 34 56 78.";

/// Builds a document of roughly `size` bytes with a CPR number in every line.
fn document(size: usize) -> String {
    let line = "Lorem ipsum dolor sit amet 0102031234 consectetur 311299-9999 elit.\n";
    line.repeat(size / line.len() + 1)
}

fn bench_redact(c: &mut Criterion) {
    let redactor = Redactor::new();
    let mut group = c.benchmark_group("redact");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("plain", |b| {
        b.iter(|| redactor.redact(black_box(PLAIN)));
    });

    group.bench_function("short", |b| {
        b.iter(|| redactor.redact(black_box(SHORT)));
    });

    for size in [1_024, 10_240, 102_400] {
        let doc = document(size);
        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(BenchmarkId::new("document", size), &doc, |b, doc| {
            b.iter(|| redactor.redact(black_box(doc)));
        });
    }

    group.finish();
}

fn bench_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");
    let doc = document(102_400);
    group.throughput(Throughput::Bytes(doc.len() as u64));

    group.bench_function("candidates_100k", |b| {
        b.iter(|| candidates(black_box(&doc)).count());
    });

    group.finish();
}

criterion_group!(benches, bench_redact, bench_match);
criterion_main!(benches);
