use std::collections::HashMap;

use digraph_engine::graph::generators::random_weighted_graph;
use digraph_engine::graph::reverse_edge;
use digraph_engine::{DirectedEdge, DirectedGraph, Edge, Error, NodeId, WeightedEdge};

// Test helper counting edges per (source, target, weight)
fn multiset(g: &DirectedGraph<WeightedEdge<u32>>) -> HashMap<(NodeId, NodeId, u32), usize> {
    let mut counts = HashMap::new();
    for e in g.iter() {
        *counts.entry((e.source, e.target, e.weight)).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_dual_of_dual_keeps_edges() {
    let mut g = random_weighted_graph(80, 400, 9u32, 21);
    // parallel edges survive too
    g.add_edge(WeightedEdge::new(3, 4, 1)).add_edge(WeightedEdge::new(3, 4, 1));

    let dual = g.dual();
    assert_eq!(dual.edge_count(), g.edge_count());
    for e in g.iter() {
        assert!(dual.contains_edge(e.target, e.source));
    }
    assert_eq!(multiset(&dual.dual()), multiset(&g));
}

#[test]
fn test_reverse_edge_twice() {
    let g = random_weighted_graph(30, 100, 50u32, 2);
    for e in g.iter() {
        let r = reverse_edge(*e);
        assert_eq!((r.source(), r.target()), (e.target, e.source));
        assert_eq!(reverse_edge(r), *e);
    }
}

#[test]
fn test_delete_every_edge() {
    let mut g = random_weighted_graph(40, 200, 5u32, 8);
    let edges: Vec<WeightedEdge<u32>> = g.iter().copied().collect();

    for (removed, e) in edges.iter().enumerate() {
        assert!(g.contains_edge(e.source, e.target));
        let before = g.edge_count();
        assert_eq!(g.delete_edge(e.source, e.target).unwrap(), *e);

        assert_eq!(g.edge_count(), before - 1);
        assert!(!g.contains_edge(e.source, e.target));
        assert!(g.edges(e.source).all(|x| x.target != e.target));
        assert_eq!(g.iter().count(), edges.len() - removed - 1);
    }
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.node_count(), 40);
}

#[test]
fn test_delete_missing_edge() {
    let mut g: DirectedGraph<Edge> = DirectedGraph::from_edges(vec![Edge::new(0, 1)]);
    assert_eq!(
        g.delete_edge(1, 0).unwrap_err(),
        Error::EdgeNotFound { from: 1, to: 0 }
    );
    assert_eq!(
        g.delete_edge(7, 8).unwrap_err(),
        Error::EdgeNotFound { from: 7, to: 8 }
    );
    g.delete_edge(0, 1).unwrap();
    assert!(g.delete_edge(0, 1).is_err());
}

#[test]
fn test_edge_text_forms() {
    assert_eq!(Edge::new(2, 5).to_string(), "{2,5}");
    assert_eq!(WeightedEdge::new(2, 5, 11u32).to_string(), "{2,5}(11)");
}
