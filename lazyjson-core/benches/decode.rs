//! Benchmarks for stream decoding.
//!
//! Compares:
//! - whitespace-separated and array-wrapped framing through `decode_to_sequence`
//! - typed records against the dynamic `Value`
//! - serde_json's `StreamDeserializer` on the same whitespace-separated input
//!
//! Run with: cargo bench --bench decode

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lazyjson_core::{decode_to_sequence, encode_sequence, FramingMode, StreamConfig, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Event {
    id: u64,
    kind: String,
    tags: Vec<String>,
    score: f64,
    parent: Option<u64>,
}

fn events(count: u64) -> Vec<Event> {
    (0..count)
        .map(|id| Event {
            id,
            kind: if id % 3 == 0 { "click".into() } else { "view \"page\"\n".into() },
            tags: (0..id % 4).map(|t| format!("tag-{t}")).collect(),
            score: id as f64 / 7.0,
            parent: id.checked_sub(1),
        })
        .collect()
}

fn whitespace_input(count: u64) -> Vec<u8> {
    let mut out = Vec::new();
    StreamConfig::default()
        .with_newline_delimited(true)
        .encode_sequence(events(count), &mut out)
        .unwrap();
    out
}

fn wrapped_input(count: u64) -> Vec<u8> {
    let mut out = Vec::new();
    encode_sequence([events(count)], &mut out).unwrap();
    out
}

fn bench_framing(c: &mut Criterion) {
    let mut group = c.benchmark_group("framing");

    for count in [100u64, 10_000] {
        let lines = whitespace_input(count);
        group.throughput(Throughput::Bytes(lines.len() as u64));
        group.bench_with_input(BenchmarkId::new("whitespace", count), &lines, |b, input| {
            b.iter(|| {
                decode_to_sequence::<Event, _>(black_box(input.as_slice()), FramingMode::WhitespaceSeparated)
                    .map(|e| e.unwrap().id)
                    .sum::<u64>()
            })
        });

        let wrapped = wrapped_input(count);
        group.throughput(Throughput::Bytes(wrapped.len() as u64));
        group.bench_with_input(BenchmarkId::new("array", count), &wrapped, |b, input| {
            b.iter(|| {
                decode_to_sequence::<Event, _>(black_box(input.as_slice()), FramingMode::AutoDetect)
                    .map(|e| e.unwrap().id)
                    .sum::<u64>()
            })
        });
    }

    group.finish();
}

fn bench_vs_serde_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("vs_serde_json");
    let input = whitespace_input(10_000);
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("lazyjson_typed", |b| {
        b.iter(|| {
            decode_to_sequence::<Event, _>(black_box(input.as_slice()), FramingMode::AutoDetect)
                .map(|e| e.unwrap().id)
                .sum::<u64>()
        })
    });

    group.bench_function("lazyjson_value", |b| {
        b.iter(|| {
            decode_to_sequence::<Value, _>(black_box(input.as_slice()), FramingMode::AutoDetect)
                .filter(|v| v.as_ref().map_or(false, |v| v.get("parent").is_some()))
                .count()
        })
    });

    group.bench_function("serde_json_stream", |b| {
        b.iter(|| {
            serde_json::Deserializer::from_reader(black_box(input.as_slice()))
                .into_iter::<Event>()
                .map(|e| e.unwrap().id)
                .sum::<u64>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_framing, bench_vs_serde_json);
criterion_main!(benches);
