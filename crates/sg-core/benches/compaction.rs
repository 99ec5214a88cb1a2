use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sg_core::{Graph, Node, StaticGraph};

/// Grid of nodes where each one links to `degree` random others.
fn build_edges(nodes: usize, degree: usize) -> (Vec<Node>, Vec<Vec<usize>>, Vec<Vec<f32>>) {
    let mut rng = SmallRng::seed_from_u64(7);
    let side = (nodes as f64).sqrt().ceil() as usize;
    let positions: Vec<Node> = (0..nodes)
        .map(|i| Node::new((i % side) as f32, (i / side) as f32, 0.0))
        .collect();
    let children: Vec<Vec<usize>> = (0..nodes)
        .map(|_| (0..degree).map(|_| rng.random_range(0..nodes)).collect())
        .collect();
    let weights: Vec<Vec<f32>> = children
        .iter()
        .map(|row| row.iter().map(|_| rng.random_range(0.5f32..10.0)).collect())
        .collect();
    (positions, children, weights)
}

fn bench_compaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &nodes in &[1_000usize, 10_000] {
        let (positions, children, weights) = build_edges(nodes, 8);

        group.bench_with_input(BenchmarkId::new("stage_compact", nodes), &nodes, |b, _| {
            b.iter(|| {
                let mut graph = Graph::new();
                for (i, row) in children.iter().enumerate() {
                    for (&child, &weight) in row.iter().zip(&weights[i]) {
                        graph.stage_edge(positions[i], positions[child], weight);
                    }
                }
                graph.compact();
                black_box(graph.csr_view().nnz)
            })
        });

        group.bench_with_input(BenchmarkId::new("bulk_load", nodes), &nodes, |b, _| {
            b.iter(|| {
                let graph = StaticGraph::from_adjacency(&children, &weights, &positions)
                    .expect("bench input is well-formed");
                black_box(graph.csr_view().nnz)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compaction);
criterion_main!(benches);
