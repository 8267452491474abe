//! Benchmarks for logindex
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use logindex::*;
use std::path::Path;
use tempfile::tempdir;

const LEVELS: [&str; 5] = ["DEBUG", "INFO", "WARN", "ERROR", "FATAL"];

fn write_test_log(path: &Path, lines: usize) {
    let mut log = String::with_capacity(lines * 64);
    for i in 0..lines {
        if i % 50 == 49 {
            log.push_str("    at com.example.Handler.run(Handler.java:42)\n");
            continue;
        }
        log.push_str(&format!(
            "2024-01-01 {:02}:{:02}:{:02} [{}] request {} handled\n",
            (i / 3600) % 24,
            (i / 60) % 60,
            i % 60,
            LEVELS[i % LEVELS.len()],
            i
        ));
    }
    std::fs::write(path, log).unwrap();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let record = IndexRecord::new(123_456, 1_704_103_200, "ERROR", 87);

    group.bench_function("encode", |b| b.iter(|| black_box(&record).to_bytes()));

    let bytes = record.to_bytes();
    group.bench_function("decode", |b| {
        b.iter(|| IndexRecord::from_bytes(black_box(&bytes)))
    });

    group.bench_function("parse_line", |b| {
        b.iter(|| parse_log_line(black_box(b"2024-01-01 10:05:00 [ERROR] connection failed")))
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in [1_000, 10_000] {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("bench.log");
        let index_path = dir.path().join("bench.idx");
        write_test_log(&log_path, size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("build_{}", size), |b| {
            b.iter(|| build_index(&log_path, &index_path).unwrap())
        });
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    let dir = tempdir().unwrap();
    let log_path = dir.path().join("bench.log");
    let index_path = dir.path().join("bench.idx");
    write_test_log(&log_path, 10_000);
    build_index(&log_path, &index_path).unwrap();

    let engine = QueryEngine::new(&log_path, &index_path);

    group.bench_function("by_level", |b| {
        b.iter(|| engine.by_level(black_box("ERROR"), |_| Ok(())).unwrap())
    });

    group.bench_function("by_time_hour", |b| {
        b.iter(|| {
            engine
                .by_time(black_box(1_704_067_200), black_box(1_704_070_800), |_| Ok(()))
                .unwrap()
        })
    });

    group.bench_function("stats", |b| b.iter(|| index_stats(&index_path).unwrap()));

    group.finish();
}

criterion_group!(benches, bench_codec, bench_build, bench_query);
criterion_main!(benches);
