use std::collections::{HashMap, VecDeque};

use crate::data_structures::bucket_arena::{BucketArena, SlotId};
use crate::graph::traits::{DirectedEdge, NodeId, Weighted};
use crate::{Error, Result};

/// A directed multigraph using per-node adjacency lists
///
/// Each node's edges live in one bucket of a shared slot arena, so any edge
/// can be unlinked in O(1). A location index maps `(source, target)` to the
/// live edges with that endpoint pair, oldest first.
#[derive(Debug, Clone)]
pub struct DirectedGraph<E>
where
    E: DirectedEdge,
{
    /// Outgoing edges: bucket `n` holds the edges leaving node `n`
    edges: BucketArena<E>,

    /// (source, target) -> slots of the live edges with those endpoints
    index: HashMap<(NodeId, NodeId), VecDeque<SlotId>>,
}

impl<E> Default for DirectedGraph<E>
where
    E: DirectedEdge,
{
    fn default() -> Self {
        DirectedGraph::new()
    }
}

impl<E> DirectedGraph<E>
where
    E: DirectedEdge,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            edges: BucketArena::new(0),
            index: HashMap::new(),
        }
    }

    /// Creates a graph whose node range already covers `0..nodes`
    pub fn with_nodes(nodes: usize) -> Self {
        DirectedGraph {
            edges: BucketArena::new(nodes),
            index: HashMap::new(),
        }
    }

    /// Builds a graph from a literal edge list
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<E>,
    {
        let mut graph = DirectedGraph::new();
        for e in edges {
            graph.add_edge(e.into());
        }
        graph
    }

    /// Number of nodes, one past the largest node id ever referenced
    pub fn node_count(&self) -> usize {
        self.edges.bucket_count()
    }

    /// Number of stored edges, parallel edges included
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if `node` is inside the node range
    pub fn has_node(&self, node: NodeId) -> bool {
        node < self.node_count()
    }

    /// Adds an edge, growing the node range to cover both endpoints
    pub fn add_edge(&mut self, edge: E) -> &mut Self {
        let (source, target) = (edge.source(), edge.target());
        self.edges.ensure_buckets(source.max(target) + 1);
        let slot = self.edges.push_front(source, edge);
        self.index.entry((source, target)).or_default().push_back(slot);
        self
    }

    /// Edges leaving `node`, most recently added first
    ///
    /// Nodes outside the range have no edges.
    pub fn edges(&self, node: NodeId) -> impl Iterator<Item = &E> + '_ {
        let bucket = if self.has_node(node) { Some(node) } else { None };
        bucket.into_iter().flat_map(move |n| self.edges.iter(n))
    }

    /// Number of edges leaving `node`
    pub fn out_degree(&self, node: NodeId) -> usize {
        if self.has_node(node) {
            self.edges.bucket_len(node)
        } else {
            0
        }
    }

    /// All edges, by increasing source node, each node's edges newest first
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        (0..self.node_count()).flat_map(move |n| self.edges.iter(n))
    }

    /// Returns true if an edge from `source` to `target` is stored
    pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.index.contains_key(&(source, target))
    }

    /// The oldest live edge from `source` to `target`
    pub fn edge(&self, source: NodeId, target: NodeId) -> Option<&E> {
        let slot = self.index.get(&(source, target))?.front()?;
        Some(self.edges.get(*slot))
    }

    /// Mutable access to the oldest live edge from `source` to `target`
    pub fn edge_at(&mut self, source: NodeId, target: NodeId) -> Result<&mut E> {
        let slot = self
            .index
            .get(&(source, target))
            .and_then(|slots| slots.front().copied())
            .ok_or(Error::EdgeNotFound {
                from: source,
                to: target,
            })?;
        Ok(self.edges.get_mut(slot))
    }

    /// Removes the oldest live edge from `source` to `target` and returns it
    pub fn delete_edge(&mut self, source: NodeId, target: NodeId) -> Result<E> {
        let key = (source, target);
        let slots = self.index.get_mut(&key).ok_or(Error::EdgeNotFound {
            from: source,
            to: target,
        })?;
        let slot = slots.pop_front().ok_or(Error::EdgeNotFound {
            from: source,
            to: target,
        })?;
        if slots.is_empty() {
            self.index.remove(&key);
        }
        Ok(self.edges.remove(slot))
    }

    /// The graph with every edge reversed
    pub fn dual(&self) -> Self {
        let mut result = DirectedGraph::with_nodes(self.node_count());
        for e in self.iter() {
            result.add_edge(e.reversed());
        }
        result
    }

    /// Cursor to the first edge of `node`, used by iterative walks
    pub(crate) fn first_slot(&self, node: NodeId) -> Option<SlotId> {
        self.edges.front(node)
    }

    /// Edge behind a cursor and the cursor to the following edge
    pub(crate) fn slot_edge(&self, slot: SlotId) -> (&E, Option<SlotId>) {
        (self.edges.get(slot), self.edges.next(slot))
    }
}

impl<E> DirectedGraph<E>
where
    E: Weighted,
{
    /// Largest edge weight, or `None` for a graph without edges
    pub fn max_weight(&self) -> Option<E::Weight> {
        self.iter().map(|e| e.weight()).max()
    }
}

impl<E> FromIterator<E> for DirectedGraph<E>
where
    E: DirectedEdge,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut graph = DirectedGraph::new();
        for e in iter {
            graph.add_edge(e);
        }
        graph
    }
}

impl<E> Extend<E> for DirectedGraph<E>
where
    E: DirectedEdge,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for e in iter {
            self.add_edge(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, WeightedEdge};

    fn sample() -> DirectedGraph<WeightedEdge<u64>> {
        let edges: Vec<(NodeId, NodeId, u64)> = vec![
            (0, 1, 2),
            (0, 2, 8),
            (1, 2, 5),
            (1, 3, 3),
            (2, 1, 6),
            (2, 4, 0),
            (3, 2, 1),
            (3, 4, 7),
            (3, 5, 6),
            (4, 3, 4),
            (5, 4, 2),
        ];
        DirectedGraph::from_edges(edges)
    }

    fn sorted_weights(g: &DirectedGraph<WeightedEdge<u64>>) -> Vec<u64> {
        let mut weights: Vec<u64> = g.iter().map(|e| e.weight).collect();
        weights.sort_unstable();
        weights
    }

    #[test]
    fn test_empty_graph() {
        let g: DirectedGraph<Edge> = DirectedGraph::new();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.iter().count(), 0);
        assert_eq!(g.edges(3).count(), 0);
    }

    #[test]
    fn test_iteration_order() {
        let g = sample();
        assert_eq!(g.node_count(), 6);
        assert_eq!(g.edge_count(), 11);
        let node3: Vec<u64> = g.edges(3).map(|e| e.weight).collect();
        assert_eq!(node3, vec![6, 7, 1]);
        let sources: Vec<NodeId> = g.iter().map(|e| e.source).collect();
        assert!(sources.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_auto_grow_to_target() {
        let mut g: DirectedGraph<Edge> = DirectedGraph::new();
        g.add_edge(Edge::new(1, 9));
        assert_eq!(g.node_count(), 10);
        assert_eq!(g.out_degree(9), 0);
    }

    #[test]
    fn test_contains_edge() {
        let g = sample();
        assert!(g.contains_edge(1, 2));
        assert!(g.contains_edge(2, 1));
        assert!(g.contains_edge(1, 3));
        assert!(!g.contains_edge(3, 3));
        assert!(!g.contains_edge(0, 3));
    }

    #[test]
    fn test_delete_edges() {
        let mut g = sample();
        for (s, t) in [(1, 2), (5, 4), (1, 3)] {
            g.delete_edge(s, t).unwrap();
            assert!(!g.contains_edge(s, t));
        }
        assert_eq!(g.edge_count(), 8);
        assert_eq!(sorted_weights(&g), vec![0, 1, 2, 4, 6, 6, 7, 8]);
        assert_eq!(
            g.delete_edge(1, 2),
            Err(Error::EdgeNotFound { from: 1, to: 2 })
        );
    }

    #[test]
    fn test_edge_at_modifies_in_place() {
        let mut g = sample();
        *g.edge_at(0, 1).unwrap().weight_mut() = 7;
        g.edge_at(5, 4).unwrap().weight = 7;
        assert_eq!(sorted_weights(&g), vec![0, 1, 3, 4, 5, 6, 6, 7, 7, 7, 8]);
        assert!(g.edge_at(3, 3).is_err());
    }

    #[test]
    fn test_parallel_edges_oldest_first() {
        let mut g: DirectedGraph<WeightedEdge<u64>> = DirectedGraph::new();
        g.add_edge(WeightedEdge::new(0, 1, 5));
        g.add_edge(WeightedEdge::new(0, 1, 9));
        assert_eq!(g.edge(0, 1).map(|e| e.weight), Some(5));
        assert_eq!(g.delete_edge(0, 1).unwrap().weight, 5);
        assert!(g.contains_edge(0, 1));
        assert_eq!(g.edge(0, 1).map(|e| e.weight), Some(9));
        g.delete_edge(0, 1).unwrap();
        assert!(!g.contains_edge(0, 1));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_dual_round_trip() {
        let g = sample();
        let dd = g.dual().dual();
        assert_eq!(dd.node_count(), g.node_count());
        let mut a: Vec<_> = g.iter().copied().map(|e| (e.source, e.target, e.weight)).collect();
        let mut b: Vec<_> = dd.iter().copied().map(|e| (e.source, e.target, e.weight)).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
        assert!(g.dual().contains_edge(4, 2));
    }

    #[test]
    fn test_max_weight() {
        assert_eq!(sample().max_weight(), Some(8));
        assert_eq!(DirectedGraph::<WeightedEdge<u64>>::new().max_weight(), None);
    }
}
