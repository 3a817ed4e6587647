use bitvec::vec::BitVec;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graphwalk::algorithms::ConnectivityOracle;
use graphwalk::prelude::*;
use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// Closed random walk over `n` vertices, so the graph always has an Eulerian circuit.
fn circuit_graph(n: usize, steps: usize, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut walk: Vec<i32> = (0..steps).map(|_| rng.gen_range(0..n as i32)).collect();
    walk.push(walk[0]);

    let vertices: Vec<i32> = walk.iter().copied().unique().collect();
    let edges: Vec<(i32, i32)> = walk.iter().copied().tuple_windows().collect();
    Graph::new(vertices, edges, false).unwrap()
}

fn complete_graph(n: usize, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let edges = (0..n as i32)
        .tuple_combinations::<(i32, i32)>()
        .map(|pair| (pair, rng.gen_range(1.0..100.0)))
        .collect::<Vec<_>>();
    Graph::new_weighted(0..n as i32, edges, false).unwrap()
}

fn bench_fleury(c: &mut Criterion) {
    let mut group = c.benchmark_group("fleury");
    for (n, steps) in [(8, 32), (16, 64), (32, 128)] {
        let graph = circuit_graph(n, steps, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, graph| {
            b.iter(|| black_box(fleury(graph, None).unwrap()))
        });
    }
    group.finish();
}

fn bench_connectivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("connectivity");
    for n in [8, 32, 64] {
        let graph = circuit_graph(n, 4 * n, 7);
        let matrix = graph.adjacency_matrix().clone();
        let ignore = BitVec::<usize>::repeat(false, matrix.order());
        let mut oracle = ConnectivityOracle::with_order(matrix.order());
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| black_box(oracle.is_connected(&matrix, &ignore)))
        });
    }
    group.finish();
}

fn bench_nearest_neighbor(c: &mut Criterion) {
    let graph = complete_graph(64, 3);
    c.bench_function("nearest_neighbor_every_start_64", |b| {
        b.iter(|| black_box(best_nearest_neighbor_cycle(&graph).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_fleury,
    bench_connectivity,
    bench_nearest_neighbor
);
criterion_main!(benches);
