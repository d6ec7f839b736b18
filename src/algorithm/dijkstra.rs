use std::fmt::Debug;
use std::marker::PhantomData;

use log::debug;
use num_traits::{CheckedAdd, Zero};

use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::{DialHeap, MonotoneHeap, RadixHeap};
use crate::graph::{DirectedGraph, NodeId, Weight, Weighted};
use crate::{Error, Result};

/// Dijkstra's algorithm over a pluggable monotone heap
///
/// Edge weights must be non-negative. A negative weight is not defended
/// against; it usually surfaces as `Error::RangeViolation` from the heap.
pub struct Dijkstra<H, W> {
    /// Bound handed to the heap; computed from the graph when unset
    max_edge_cost: Option<W>,
    _heap: PhantomData<fn() -> H>,
}

/// Dijkstra's algorithm with a bucket queue
pub type DialDijkstra<W> = Dijkstra<DialHeap<W, NodeId>, W>;

/// Dijkstra's algorithm with a radix heap
pub type RadixDijkstra<W> = Dijkstra<RadixHeap<W, NodeId>, W>;

impl<H, W> Dijkstra<H, W>
where
    W: Weight,
    H: MonotoneHeap<W, NodeId>,
{
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra {
            max_edge_cost: None,
            _heap: PhantomData,
        }
    }

    /// Use `cost` as the heap bound instead of scanning the graph for it
    pub fn with_max_edge_cost(mut self, cost: W) -> Self {
        self.max_edge_cost = Some(cost);
        self
    }
}

impl<H, W> Default for Dijkstra<H, W>
where
    W: Weight,
    H: MonotoneHeap<W, NodeId>,
{
    fn default() -> Self {
        Dijkstra::new()
    }
}

impl<H, W: Debug> Debug for Dijkstra<H, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dijkstra")
            .field("heap", &std::any::type_name::<H>())
            .field("max_edge_cost", &self.max_edge_cost)
            .finish()
    }
}

impl<H, W> Clone for Dijkstra<H, W>
where
    W: Copy,
{
    fn clone(&self) -> Self {
        Dijkstra {
            max_edge_cost: self.max_edge_cost,
            _heap: PhantomData,
        }
    }
}

impl<E, H> ShortestPathAlgorithm<E> for Dijkstra<H, E::Weight>
where
    E: Weighted,
    H: MonotoneHeap<E::Weight, NodeId>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(
        &self,
        graph: &DirectedGraph<E>,
        source: NodeId,
    ) -> Result<ShortestPathResult<E::Weight>> {
        let max_edge_cost = self
            .max_edge_cost
            .or_else(|| graph.max_weight())
            .unwrap_or_else(E::Weight::zero);
        shortest_paths::<E, H>(graph, source, max_edge_cost)
    }
}

/// Runs Dijkstra from `source` using heap type `H` sized for `max_edge_cost`
pub fn shortest_paths<E, H>(
    graph: &DirectedGraph<E>,
    source: NodeId,
    max_edge_cost: E::Weight,
) -> Result<ShortestPathResult<E::Weight>>
where
    E: Weighted,
    H: MonotoneHeap<E::Weight, NodeId>,
{
    if !graph.has_node(source) {
        return Err(Error::SourceNotFound(source));
    }

    let n = graph.node_count();
    let mut result = ShortestPathResult::seeded(n, source);

    // a heap to track the best next node, and each node's place in it
    let mut heap = H::with_bounds(n, max_edge_cost)?;
    let mut handles: Vec<Option<H::Handle>> = vec![None; n];
    handles[source] = Some(heap.insert(E::Weight::zero(), source)?);

    let mut settled = 0;
    while !heap.is_empty() {
        let (cost, node) = {
            let (key, node) = heap.find_min()?;
            (key, *node)
        };
        heap.delete_min()?;
        handles[node] = None;
        settled += 1;

        for edge in graph.edges(node) {
            let target = edge.target();
            let candidate = cost
                .checked_add(&edge.weight())
                .ok_or(Error::CostOverflow(target))?;
            match result.costs[target] {
                None => {
                    result.costs[target] = Some(candidate);
                    result.parents[target] = Some(node);
                    handles[target] = Some(heap.insert(candidate, target)?);
                }
                Some(current) if candidate < current => {
                    let handle = handles[target].ok_or_else(|| {
                        Error::RangeViolation(format!(
                            "vertex {} already settled at cost {}, offered {}",
                            target, current, candidate
                        ))
                    })?;
                    heap.decrease_key(handle, current, candidate)?;
                    result.costs[target] = Some(candidate);
                    result.parents[target] = Some(node);
                }
                Some(_) => {}
            }
        }
    }

    debug!("dijkstra from {} settled {} of {} vertices", source, settled, n);
    Ok(result)
}
