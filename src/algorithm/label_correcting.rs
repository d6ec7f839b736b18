use std::collections::{HashMap, VecDeque};

use log::debug;
use num_traits::CheckedAdd;

use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::graph::{DirectedGraph, NodeId, Weight, Weighted};
use crate::{Error, Result};

/// A node whose label kept improving, with the parent links at that moment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegativeCycle {
    pub node: NodeId,
    pub parents: Vec<Option<NodeId>>,
}

impl NegativeCycle {
    /// Nodes of an improving cycle in edge order, or `None` when the parent
    /// chain from `node` ends without repeating
    ///
    /// Consecutive nodes `a, b` of the result are joined by an edge `a -> b`,
    /// and the last node leads back to the first.
    pub fn cycle(&self) -> Option<Vec<NodeId>> {
        let mut seen: HashMap<NodeId, usize> = HashMap::new();
        let mut chain = Vec::new();
        let mut current = self.node;
        loop {
            if let Some(&start) = seen.get(&current) {
                let mut cycle = chain.split_off(start);
                cycle.reverse();
                return Some(cycle);
            }
            seen.insert(current, chain.len());
            chain.push(current);
            current = self.parents.get(current).copied().flatten()?;
        }
    }
}

/// Outcome of the queue-based label-correcting algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelOutcome<W: Weight> {
    /// Every label is final
    Paths(ShortestPathResult<W>),
    /// A negative cycle is reachable from the source
    NegativeCycle(NegativeCycle),
}

impl<W: Weight> LabelOutcome<W> {
    /// Converts a negative cycle into `Error::NegativeCycleFound`
    pub fn into_result(self) -> Result<ShortestPathResult<W>> {
        match self {
            LabelOutcome::Paths(result) => Ok(result),
            LabelOutcome::NegativeCycle(found) => Err(Error::NegativeCycleFound {
                node: found.node,
                parents: found.parents,
            }),
        }
    }

    pub fn has_negative_cycle(&self) -> bool {
        matches!(self, LabelOutcome::NegativeCycle(_))
    }
}

/// Relaxes the out-edges of `node`, calling `improved` for every target whose
/// label went down
fn relax<E, F>(
    graph: &DirectedGraph<E>,
    result: &mut ShortestPathResult<E::Weight>,
    node: NodeId,
    mut improved: F,
) -> Result<()>
where
    E: Weighted,
    F: FnMut(NodeId),
{
    let cost = match result.costs[node] {
        Some(cost) => cost,
        None => return Ok(()),
    };
    for edge in graph.edges(node) {
        let target = edge.target();
        let candidate = cost
            .checked_add(&edge.weight())
            .ok_or(Error::CostOverflow(target))?;
        if result.costs[target].map_or(true, |current| candidate < current) {
            result.costs[target] = Some(candidate);
            result.parents[target] = Some(node);
            improved(target);
        }
    }
    Ok(())
}

/// FIFO label-correcting shortest paths (Bellman-Ford-Moore)
///
/// Accepts negative weights. A node dequeued `max(node_count, 2)` times
/// means some label improves without bound, which is reported as
/// [`LabelOutcome::NegativeCycle`].
pub fn queue_label_correcting<E>(
    graph: &DirectedGraph<E>,
    source: NodeId,
) -> Result<LabelOutcome<E::Weight>>
where
    E: Weighted,
{
    if !graph.has_node(source) {
        return Err(Error::SourceNotFound(source));
    }

    let n = graph.node_count();
    let limit = n.max(2);
    let mut result = ShortestPathResult::seeded(n, source);
    let mut in_queue = vec![false; n];
    let mut dequeued = vec![0usize; n];
    let mut queue = VecDeque::with_capacity(n);

    queue.push_back(source);
    in_queue[source] = true;

    while let Some(node) = queue.pop_front() {
        in_queue[node] = false;
        dequeued[node] += 1;
        if dequeued[node] >= limit {
            debug!(
                "negative cycle detected: vertex {} dequeued {} times",
                node, dequeued[node]
            );
            return Ok(LabelOutcome::NegativeCycle(NegativeCycle {
                node,
                parents: result.parents,
            }));
        }

        relax(graph, &mut result, node, |target| {
            if !in_queue[target] {
                in_queue[target] = true;
                queue.push_back(target);
            }
        })?;
    }

    Ok(LabelOutcome::Paths(result))
}

/// Deque label-correcting shortest paths (d'Esopo-Pape)
///
/// A node entering the deque for the first time goes to the back; a node
/// that has been examined before goes to the front. There is no relaxation
/// counting, so a reachable negative cycle makes this loop forever. Use
/// [`queue_label_correcting`] when weights may form one.
pub fn deque_label_correcting<E>(
    graph: &DirectedGraph<E>,
    source: NodeId,
) -> Result<ShortestPathResult<E::Weight>>
where
    E: Weighted,
{
    if !graph.has_node(source) {
        return Err(Error::SourceNotFound(source));
    }

    let n = graph.node_count();
    let mut result = ShortestPathResult::seeded(n, source);
    let mut in_deque = vec![false; n];
    let mut seen = vec![false; n];
    let mut deque = VecDeque::with_capacity(n);

    deque.push_back(source);
    in_deque[source] = true;
    seen[source] = true;

    let mut examined = 0usize;
    while let Some(node) = deque.pop_front() {
        in_deque[node] = false;
        examined += 1;

        relax(graph, &mut result, node, |target| {
            if in_deque[target] {
                return;
            }
            in_deque[target] = true;
            if seen[target] {
                deque.push_front(target);
            } else {
                seen[target] = true;
                deque.push_back(target);
            }
        })?;
    }

    debug!("deque label-correcting examined {} vertices", examined);
    Ok(result)
}

/// [`queue_label_correcting`] behind the common algorithm interface
///
/// A negative cycle surfaces as `Error::NegativeCycleFound`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueLabelCorrecting;

impl QueueLabelCorrecting {
    pub fn new() -> Self {
        QueueLabelCorrecting
    }
}

impl<E: Weighted> ShortestPathAlgorithm<E> for QueueLabelCorrecting {
    fn name(&self) -> &'static str {
        "Queue label-correcting"
    }

    fn compute_shortest_paths(
        &self,
        graph: &DirectedGraph<E>,
        source: NodeId,
    ) -> Result<ShortestPathResult<E::Weight>> {
        queue_label_correcting(graph, source)?.into_result()
    }
}

/// [`deque_label_correcting`] behind the common algorithm interface
#[derive(Debug, Clone, Copy, Default)]
pub struct DequeLabelCorrecting;

impl DequeLabelCorrecting {
    pub fn new() -> Self {
        DequeLabelCorrecting
    }
}

impl<E: Weighted> ShortestPathAlgorithm<E> for DequeLabelCorrecting {
    fn name(&self) -> &'static str {
        "Deque label-correcting"
    }

    fn compute_shortest_paths(
        &self,
        graph: &DirectedGraph<E>,
        source: NodeId,
    ) -> Result<ShortestPathResult<E::Weight>> {
        deque_label_correcting(graph, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightedEdge;

    fn graph(edges: &[(NodeId, NodeId, i64)]) -> DirectedGraph<WeightedEdge<i64>> {
        DirectedGraph::from_edges(edges.iter().copied())
    }

    #[test]
    fn test_negative_weights_without_cycle() {
        let g = graph(&[(0, 1, 4), (0, 2, 2), (2, 1, -3), (1, 3, 1), (2, 3, 5)]);
        let queue = queue_label_correcting(&g, 0).unwrap().into_result().unwrap();
        let deque = deque_label_correcting(&g, 0).unwrap();
        assert_eq!(queue.costs, vec![Some(0), Some(-1), Some(2), Some(0)]);
        assert_eq!(queue, deque);
        assert_eq!(queue.path_to(3), Some(vec![0, 2, 1, 3]));
    }

    #[test]
    fn test_detects_negative_cycle() {
        let g = graph(&[(0, 1, 1), (1, 2, -3), (2, 1, 1)]);
        let outcome = queue_label_correcting(&g, 0).unwrap();
        assert!(outcome.has_negative_cycle());

        let found = match outcome {
            LabelOutcome::NegativeCycle(found) => found,
            LabelOutcome::Paths(result) => panic!("cycle missed: {:?}", result.costs),
        };
        assert_eq!(found.node, 1);

        let cycle = found.cycle().unwrap();
        assert_eq!(cycle.len(), 2);
        let total: i64 = (0..cycle.len())
            .map(|i| {
                let (a, b) = (cycle[i], cycle[(i + 1) % cycle.len()]);
                g.edge(a, b).expect("cycle edge missing").weight
            })
            .sum();
        assert!(total < 0);
    }

    #[test]
    fn test_into_result_reports_error() {
        let g = graph(&[(0, 0, -1)]);
        let err = QueueLabelCorrecting::new()
            .compute_shortest_paths(&g, 0)
            .unwrap_err();
        assert!(matches!(err, Error::NegativeCycleFound { node: 0, .. }));
    }

    #[test]
    fn test_single_node_is_not_a_cycle() {
        let g: DirectedGraph<WeightedEdge<i64>> = DirectedGraph::with_nodes(1);
        let result = queue_label_correcting(&g, 0).unwrap().into_result().unwrap();
        assert_eq!(result.costs, vec![Some(0)]);
    }

    #[test]
    fn test_unreachable_cycle_is_ignored() {
        let g = graph(&[(0, 1, 2), (2, 3, -5), (3, 2, 1)]);
        let result = queue_label_correcting(&g, 0).unwrap().into_result().unwrap();
        assert_eq!(result.costs, vec![Some(0), Some(2), None, None]);
    }

    #[test]
    fn test_source_not_found() {
        let g = graph(&[(0, 1, 1)]);
        assert_eq!(
            deque_label_correcting(&g, 9).unwrap_err(),
            Error::SourceNotFound(9)
        );
        assert_eq!(
            queue_label_correcting(&g, 9).unwrap_err(),
            Error::SourceNotFound(9)
        );
    }
}
