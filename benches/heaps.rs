//! Benchmarks for the shortest-path heaps.
//!
//! Compares Dijkstra over the dial heap and the radix heap, with the
//! label-correcting variants as a baseline, on seeded uniform graphs.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use digraph_engine::algorithm::dijkstra::{DialDijkstra, RadixDijkstra};
use digraph_engine::algorithm::label_correcting::deque_label_correcting;
use digraph_engine::graph::generators::{random_weighted_graph, DEFAULT_SEED};
use digraph_engine::ShortestPathAlgorithm;
use std::hint::black_box;

const SIZES: [usize; 3] = [1_000, 10_000, 50_000];

/// Dijkstra with both heaps on weights in 1..=100.
fn bench_dijkstra_heaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");
    for &n in SIZES.iter() {
        let graph = random_weighted_graph(n, n * 4, 100u64, DEFAULT_SEED);

        group.bench_with_input(BenchmarkId::new("dial", n), &graph, |b, g| {
            let algorithm = DialDijkstra::<u64>::new();
            b.iter(|| black_box(algorithm.compute_shortest_paths(black_box(g), 0).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("radix", n), &graph, |b, g| {
            let algorithm = RadixDijkstra::<u64>::new();
            b.iter(|| black_box(algorithm.compute_shortest_paths(black_box(g), 0).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("deque_lc", n), &graph, |b, g| {
            b.iter(|| black_box(deque_label_correcting(black_box(g), 0).unwrap()));
        });
    }
    group.finish();
}

/// Wide weights, where the dial ring gets long and the radix heap does not.
fn bench_wide_weights(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra_wide_weights");
    let n = 10_000;
    let graph = random_weighted_graph(n, n * 4, 100_000u64, DEFAULT_SEED);

    group.bench_function("dial", |b| {
        let algorithm = DialDijkstra::<u64>::new();
        b.iter(|| black_box(algorithm.compute_shortest_paths(black_box(&graph), 0).unwrap()));
    });
    group.bench_function("radix", |b| {
        let algorithm = RadixDijkstra::<u64>::new();
        b.iter(|| black_box(algorithm.compute_shortest_paths(black_box(&graph), 0).unwrap()));
    });
    group.finish();
}

criterion_group!(benches, bench_dijkstra_heaps, bench_wide_weights);
criterion_main!(benches);
