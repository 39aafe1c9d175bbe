//! Throughput benchmarks for the streaming engine.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flato::compress;

fn make_pattern(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let pattern = b"The quick brown fox jumps over the lazy dog. ";
    while out.len() < len {
        out.extend_from_slice(pattern);
    }
    out.truncate(len);
    out
}

fn make_random(len: usize, mut seed: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
        out.push((seed >> 16) as u8);
    }
    out.truncate(len);
    out
}

fn bench_levels(c: &mut Criterion) {
    let compressible = make_pattern(1 << 20);
    let random = make_random(1 << 20, 0x1234_5678);

    let mut group = c.benchmark_group("deflate");
    group.throughput(Throughput::Bytes(compressible.len() as u64));

    for level in [1u32, 6, 9] {
        group.bench_with_input(
            BenchmarkId::new("compressible", level),
            &compressible,
            |b, data| {
                b.iter(|| black_box(compress(black_box(data), level).unwrap()));
            },
        );

        group.bench_with_input(BenchmarkId::new("random", level), &random, |b, data| {
            b.iter(|| black_box(compress(black_box(data), level).unwrap()));
        });
    }

    group.finish();
}

fn bench_stored(c: &mut Criterion) {
    let random = make_random(1 << 20, 0x9E37_79B9);

    let mut group = c.benchmark_group("stored");
    group.throughput(Throughput::Bytes(random.len() as u64));
    group.bench_with_input(BenchmarkId::new("level", 0u32), &random, |b, data| {
        b.iter(|| black_box(compress(black_box(data), 0).unwrap()));
    });
    group.finish();
}

criterion_group!(benches, bench_levels, bench_stored);
criterion_main!(benches);
