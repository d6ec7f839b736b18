use std::collections::HashSet;

use log::warn;

use crate::graph::{DirectedGraph, NodeId, Weight, Weighted};
use crate::Result;

/// Result of a shortest path algorithm execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathResult<W>
where
    W: Weight,
{
    /// Cost from the source to each vertex, `None` when unreachable
    pub costs: Vec<Option<W>>,

    /// Parent of each vertex in the shortest path tree: the edge
    /// `{parents[n], n}` is the last edge on the path to `n`
    pub parents: Vec<Option<NodeId>>,

    /// Source vertex ID
    pub source: NodeId,
}

impl<W> ShortestPathResult<W>
where
    W: Weight,
{
    /// Fresh result for `node_count` vertices with only the source reached
    pub(crate) fn seeded(node_count: usize, source: NodeId) -> Self {
        let mut costs = vec![None; node_count];
        costs[source] = Some(W::zero());
        ShortestPathResult {
            costs,
            parents: vec![None; node_count],
            source,
        }
    }

    /// Cost of reaching `target`
    pub fn cost(&self, target: NodeId) -> Option<W> {
        self.costs.get(target).copied().flatten()
    }

    /// Number of vertices reachable from the source, the source included
    pub fn reachable_count(&self) -> usize {
        self.costs.iter().filter(|c| c.is_some()).count()
    }

    /// Vertices on the path from the source to `target`, both included
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if target >= self.parents.len() || self.costs[target].is_none() {
            return None;
        }

        let mut path = Vec::new();
        let mut current = target;
        let mut visited = HashSet::new();

        // Build path in reverse order
        while current != self.source {
            if !visited.insert(current) {
                warn!("cycle in parent links at vertex {}", current);
                return None;
            }
            path.push(current);
            current = self.parents[current]?;
        }

        path.push(self.source);
        path.reverse();
        Some(path)
    }
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<E>
where
    E: Weighted,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(
        &self,
        graph: &DirectedGraph<E>,
        source: NodeId,
    ) -> Result<ShortestPathResult<E::Weight>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from source to target as a sequence of vertices
    fn get_path(&self, result: &ShortestPathResult<E::Weight>, target: NodeId) -> Option<Vec<NodeId>> {
        result.path_to(target)
    }
}
