//! Synthetic graph generators
//!
//! Every generator is seeded and takes an edge-generator callback that turns
//! a `(source, target, rng)` triple into an edge, so the same shapes can be
//! produced for basic and weighted edges alike.

use std::collections::HashSet;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::graph::{DirectedEdge, DirectedGraph, Edge, NodeId, Weight, WeightedEdge};

/// Seed used when callers do not care about the exact graph
pub const DEFAULT_SEED: u64 = 5675;

/// Generates `edge_count` edges over `node_count` nodes, uniformly at random
///
/// Endpoint pairs are distinct and self-loops are skipped, so `edge_count`
/// must not exceed `node_count * (node_count - 1)`.
pub fn uniform<E, F>(node_count: usize, edge_count: usize, seed: u64, mut edge_generator: F) -> DirectedGraph<E>
where
    E: DirectedEdge,
    F: FnMut(NodeId, NodeId, &mut StdRng) -> E,
{
    assert!(node_count > 1 || edge_count == 0, "need two nodes to place an edge");
    assert!(
        edge_count <= node_count * node_count.saturating_sub(1),
        "more edges requested than distinct pairs"
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = DirectedGraph::with_nodes(node_count);
    let mut already_in = HashSet::with_capacity(edge_count);

    while already_in.len() < edge_count {
        let source = rng.gen_range(0..node_count);
        let target = rng.gen_range(0..node_count);
        if source != target && already_in.insert((source, target)) {
            let edge = edge_generator(source, target, &mut rng);
            graph.add_edge(edge);
        }
    }

    graph
}

/// Generates a graph where each ordered pair `(s, t)` is an edge with `probability`
///
/// With probability 1.0 this is the complete graph including self-loops; low
/// values give nearly sparse graphs.
pub fn epsilon_dense<E, F>(node_count: usize, probability: f64, seed: u64, mut edge_generator: F) -> DirectedGraph<E>
where
    E: DirectedEdge,
    F: FnMut(NodeId, NodeId, &mut StdRng) -> E,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = DirectedGraph::with_nodes(node_count);
    let probability = probability.clamp(0.0, 1.0);

    for s in 0..node_count {
        for t in 0..node_count {
            if rng.gen_bool(probability) {
                let edge = edge_generator(s, t, &mut rng);
                graph.add_edge(edge);
            }
        }
    }

    graph
}

/// Generates a 2-D clustered graph
///
/// Nodes are scattered around `clusters` random centres in the unit square;
/// every ordered pair closer than `radius` becomes an edge. The callback also
/// receives the Euclidean distance so weights can follow geometry.
pub fn clustered_2d<E, F>(
    node_count: usize,
    clusters: usize,
    radius: f64,
    seed: u64,
    mut edge_generator: F,
) -> DirectedGraph<E>
where
    E: DirectedEdge,
    F: FnMut(NodeId, NodeId, f64) -> E,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = DirectedGraph::with_nodes(node_count);
    let clusters = clusters.max(1);

    let centres: Vec<(f64, f64)> = (0..clusters)
        .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect();
    let spread = 1.0 / (clusters as f64).sqrt() / 2.0;

    let points: Vec<(f64, f64)> = (0..node_count)
        .map(|i| {
            let (cx, cy) = centres[i % clusters];
            let x = (cx + rng.gen_range(-spread..=spread)).clamp(0.0, 1.0);
            let y = (cy + rng.gen_range(-spread..=spread)).clamp(0.0, 1.0);
            (x, y)
        })
        .collect();

    for i in 0..node_count {
        for j in 0..node_count {
            if i != j {
                let (x1, y1) = points[i];
                let (x2, y2) = points[j];
                let dist = ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt();
                if dist <= radius {
                    graph.add_edge(edge_generator(i, j, dist));
                }
            }
        }
    }

    graph
}

/// Uniform random graph of basic edges
pub fn random_graph(node_count: usize, edge_count: usize, seed: u64) -> DirectedGraph<Edge> {
    uniform(node_count, edge_count, seed, |s, t, _| Edge::new(s, t))
}

/// Uniform random graph with weights drawn from `1..=max_weight`
pub fn random_weighted_graph<W>(node_count: usize, edge_count: usize, max_weight: W, seed: u64) -> DirectedGraph<WeightedEdge<W>>
where
    W: Weight + rand::distributions::uniform::SampleUniform,
{
    uniform(node_count, edge_count, seed, |s, t, rng| {
        WeightedEdge::new(s, t, rng.gen_range(W::one()..=max_weight))
    })
}
