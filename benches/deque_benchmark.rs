use chunk_deque::Deque;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::VecDeque;

fn bench_push_both_ends(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque_push_both_ends");

    group.bench_function("std_vec_deque", |b| {
        b.iter(|| {
            let mut d = VecDeque::new();
            for i in 0..10_000u64 {
                d.push_back(i);
                d.push_front(i);
            }
            black_box(d.len());
        });
    });

    group.bench_function("chunk_deque", |b| {
        b.iter(|| {
            let mut d: Deque<u64> = Deque::new();
            for i in 0..10_000u64 {
                d.push_back(i);
                d.push_front(i);
            }
            black_box(d.len());
        });
    });

    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque_random_access");
    let n = 100_000u64;
    let std_deque: VecDeque<u64> = (0..n).collect();
    let chunked: Deque<u64> = (0..n).collect();
    // Fixed stride through the index space.
    let indices: Vec<usize> = (0..n as usize).map(|i| (i * 7919) % n as usize).collect();

    group.bench_function("std_vec_deque", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for &i in &indices {
                sum = sum.wrapping_add(std_deque[i]);
            }
            black_box(sum);
        });
    });

    group.bench_function("chunk_deque", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for &i in &indices {
                sum = sum.wrapping_add(chunked[i]);
            }
            black_box(sum);
        });
    });

    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque_iterate");
    let n = 100_000u64;
    let std_deque: VecDeque<u64> = (0..n).collect();
    let chunked: Deque<u64> = (0..n).collect();

    group.bench_function("std_vec_deque", |b| {
        b.iter(|| black_box(std_deque.iter().sum::<u64>()));
    });

    group.bench_function("chunk_deque", |b| {
        b.iter(|| black_box(chunked.iter().sum::<u64>()));
    });

    group.bench_function("chunk_deque_rev", |b| {
        b.iter(|| black_box(chunked.iter().rev().sum::<u64>()));
    });

    group.finish();
}

fn bench_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque_chunk_size_push_back");

    fn fill<const CHUNK: usize>(n: u64) -> usize {
        let mut d: Deque<u64, CHUNK> = Deque::new();
        for i in 0..n {
            d.push_back(i);
        }
        d.len()
    }

    for n in [1_000u64, 100_000] {
        group.bench_with_input(BenchmarkId::new("chunk_16", n), &n, |b, &n| {
            b.iter(|| black_box(fill::<16>(n)));
        });
        group.bench_with_input(BenchmarkId::new("chunk_64", n), &n, |b, &n| {
            b.iter(|| black_box(fill::<64>(n)));
        });
        group.bench_with_input(BenchmarkId::new("chunk_256", n), &n, |b, &n| {
            b.iter(|| black_box(fill::<256>(n)));
        });
    }

    group.finish();
}

fn bench_insert_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque_insert_middle");

    group.bench_function("std_vec_deque", |b| {
        b.iter(|| {
            let mut d: VecDeque<u32> = (0..1_000).collect();
            for i in 0..100 {
                d.insert(d.len() / 2, i);
            }
            black_box(d.len());
        });
    });

    group.bench_function("chunk_deque", |b| {
        b.iter(|| {
            let mut d: Deque<u32> = (0..1_000).collect();
            for i in 0..100 {
                d.insert(d.len() / 2, i);
            }
            black_box(d.len());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_push_both_ends,
    bench_random_access,
    bench_iterate,
    bench_chunk_sizes,
    bench_insert_middle
);
criterion_main!(benches);
