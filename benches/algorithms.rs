//! Criterion benchmarks for lexgraph.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lexgraph::algorithm::{LexBfs, MaximumMatching, PerfectElimination, SearchStrategy};
use lexgraph::dot;
use lexgraph::graph::{Graph, VertexId};

/// Random undirected graph with roughly `edges_per_node` edges per vertex.
fn make_random_graph(node_count: usize, edges_per_node: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(42);
    let mut g = Graph::undirected("bench");
    for i in 0..node_count {
        g.insert_vertex(format!("v{}", i));
    }
    for i in 0..node_count {
        for _ in 0..edges_per_node {
            let target = rng.gen_range(0..node_count);
            if target != i {
                let _ = g.insert_edge(VertexId::new(i), VertexId::new(target), 0);
            }
        }
    }
    g
}

/// Random bipartite graph: left side `l*`, right side `r*`.
fn make_bipartite_graph(side: usize, edges_per_node: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(7);
    let mut g = Graph::undirected("bipartite");
    for i in 0..side {
        g.insert_vertex(format!("l{}", i));
    }
    for i in 0..side {
        g.insert_vertex(format!("r{}", i));
    }
    for i in 0..side {
        for _ in 0..edges_per_node {
            let target = side + rng.gen_range(0..side);
            let _ = g.insert_edge(VertexId::new(i), VertexId::new(target), 0);
        }
    }
    g
}

fn bench_lex_bfs(c: &mut Criterion) {
    let g = make_random_graph(1_000, 4);
    c.bench_function("lex_bfs_1k", |b| {
        b.iter(|| black_box(LexBfs::new(&g).order()))
    });
}

fn bench_chordality(c: &mut Criterion) {
    let g = make_random_graph(1_000, 4);
    c.bench_function("is_chordal_1k", |b| {
        b.iter(|| black_box(PerfectElimination::new(&g).is_chordal()))
    });
}

fn bench_matching(c: &mut Criterion) {
    let g = make_bipartite_graph(500, 3);
    c.bench_function("matching_dfs_500x500", |b| {
        b.iter(|| black_box(MaximumMatching::new(&g).run().size()))
    });
    c.bench_function("matching_frontier_500x500", |b| {
        b.iter(|| {
            black_box(
                MaximumMatching::new(&g)
                    .with_strategy(SearchStrategy::FrontierTree)
                    .run()
                    .size(),
            )
        })
    });
}

fn bench_dot_roundtrip(c: &mut Criterion) {
    let text = dot::to_dot_string(&make_random_graph(1_000, 4));
    c.bench_function("dot_read_1k", |b| {
        b.iter(|| black_box(dot::read_graph(&text).map(|g| g.edge_count())))
    });
}

criterion_group!(
    benches,
    bench_lex_bfs,
    bench_chordality,
    bench_matching,
    bench_dot_roundtrip
);
criterion_main!(benches);
