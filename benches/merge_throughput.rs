//! Benchmarks for the deep-assign hot path.
//!
//! These benchmarks measure:
//! - Recursive mapping union at varying depth and fan-out
//! - Wholesale array replacement with deep element copies

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mergeweave::{Value, merged};
use serde_json::json;

/// Build a mapping `depth` levels deep with `width` leaves per level.
fn build_nested(depth: usize, width: usize, marker: &str) -> Value {
    let mut level = serde_json::Map::new();
    for i in 0..width {
        level.insert(format!("leaf_{i}"), json!(format!("{marker}_{i}")));
    }
    let mut current = serde_json::Value::Object(level);
    for d in 0..depth {
        let mut wrapper = serde_json::Map::new();
        wrapper.insert(format!("level_{d}"), current);
        for i in 0..width {
            wrapper.insert(format!("leaf_{i}"), json!(format!("{marker}_{d}_{i}")));
        }
        current = serde_json::Value::Object(wrapper);
    }
    Value::from(current)
}

fn build_array_heavy(len: usize) -> Value {
    let items: Vec<serde_json::Value> = (0..len)
        .map(|i| json!({"idx": i, "tags": ["a", "b"], "meta": {"nested": i}}))
        .collect();
    Value::from(json!({"items": items}))
}

fn bench_nested_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_union");
    for depth in [2_usize, 8, 32] {
        let left = build_nested(depth, 4, "left");
        let right = build_nested(depth, 4, "right");
        group.bench_with_input(
            BenchmarkId::from_parameter(depth),
            &(left, right),
            |b, (left, right)| {
                b.iter(|| black_box(merged(left, std::slice::from_ref(right))));
            },
        );
    }
    group.finish();
}

fn bench_array_replacement(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_replacement");
    for len in [8_usize, 64, 512] {
        let target = build_array_heavy(len);
        let source = build_array_heavy(len);
        group.bench_with_input(
            BenchmarkId::from_parameter(len),
            &(target, source),
            |b, (target, source)| {
                b.iter(|| black_box(merged(target, std::slice::from_ref(source))));
            },
        );
    }
    group.finish();
}

fn bench_many_sources(c: &mut Criterion) {
    let sources: Vec<Value> = (0..16)
        .map(|i| build_nested(4, 4, &format!("src_{i}")))
        .collect();
    c.bench_function("sixteen_sources", |b| {
        b.iter(|| black_box(merged(&Value::mapping(), &sources)));
    });
}

criterion_group!(
    benches,
    bench_nested_union,
    bench_array_replacement,
    bench_many_sources
);
criterion_main!(benches);
