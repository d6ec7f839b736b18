use log::debug;

use crate::algorithm::walk::{DepthFirstWalk, EdgeClass, Flow, Visitor};
use crate::graph::{DirectedEdge, DirectedGraph, NodeId};
use crate::{Error, Result};

/// A back edge found while sorting, with the depth-first parents at that moment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleWitness<E> {
    pub edge: E,
    pub parents: Vec<Option<NodeId>>,
}

impl<E: DirectedEdge> CycleWitness<E> {
    /// Nodes of the cycle closed by `edge`, starting at its target
    ///
    /// The target is an ancestor of the source, so following parents from
    /// the source reaches it.
    pub fn cycle(&self) -> Vec<NodeId> {
        let (source, target) = (self.edge.source(), self.edge.target());
        let mut nodes = vec![source];
        let mut current = source;
        while current != target && nodes.len() <= self.parents.len() {
            match self.parents.get(current).copied().flatten() {
                Some(parent) => {
                    nodes.push(parent);
                    current = parent;
                }
                None => break,
            }
        }
        nodes.reverse();
        nodes
    }
}

/// Outcome of a topological sort
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOutcome<E> {
    /// Every edge `(u, v)` has `u` before `v`
    Sorted(Vec<NodeId>),
    /// The graph has a directed cycle
    Cycle(CycleWitness<E>),
}

impl<E: DirectedEdge> SortOutcome<E> {
    /// Converts a cycle into `Error::CycleFound`
    pub fn into_result(self) -> Result<Vec<NodeId>> {
        match self {
            SortOutcome::Sorted(order) => Ok(order),
            SortOutcome::Cycle(witness) => Err(Error::CycleFound {
                from: witness.edge.source(),
                to: witness.edge.target(),
                parents: witness.parents,
            }),
        }
    }

    pub fn is_sorted(&self) -> bool {
        matches!(self, SortOutcome::Sorted(_))
    }
}

struct TopSort<E> {
    finish_order: Vec<NodeId>,
    cycle: Option<CycleWitness<E>>,
}

impl<E: DirectedEdge> Visitor<E> for TopSort<E> {
    fn edge(&mut self, walk: &DepthFirstWalk, edge: &E) -> Result<Flow> {
        if walk.classify_edge(edge)? == EdgeClass::Back {
            self.cycle = Some(CycleWitness {
                edge: *edge,
                parents: walk.parents().to_vec(),
            });
            return Ok(Flow::Finish);
        }
        Ok(Flow::Continue)
    }

    fn post(&mut self, _walk: &DepthFirstWalk, node: NodeId) -> Result<Flow> {
        self.finish_order.push(node);
        Ok(Flow::Continue)
    }
}

/// Topological sort by depth-first finish order
///
/// Stops at the first back edge and reports it as [`SortOutcome::Cycle`];
/// otherwise returns the reverse of the post-order sequence.
pub fn topological_sort<E>(graph: &DirectedGraph<E>) -> Result<SortOutcome<E>>
where
    E: DirectedEdge,
{
    let mut visitor = TopSort {
        finish_order: Vec::with_capacity(graph.node_count()),
        cycle: None,
    };
    DepthFirstWalk::for_graph(graph).walk_all(graph, &mut visitor)?;

    if let Some(witness) = visitor.cycle {
        debug!(
            "topological sort stopped at back edge {} -> {}",
            witness.edge.source(),
            witness.edge.target()
        );
        return Ok(SortOutcome::Cycle(witness));
    }

    let mut order = visitor.finish_order;
    order.reverse();
    Ok(SortOutcome::Sorted(order))
}
