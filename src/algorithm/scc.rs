use std::mem;

use log::debug;

use crate::algorithm::walk::{DepthFirstWalk, Flow, Visitor};
use crate::graph::{DirectedEdge, DirectedGraph, NodeId};
use crate::Result;

/// Records nodes in the order they complete
#[derive(Debug, Default)]
struct FinishOrder(Vec<NodeId>);

impl<E> Visitor<E> for FinishOrder {
    fn post(&mut self, _walk: &DepthFirstWalk, node: NodeId) -> Result<Flow> {
        self.0.push(node);
        Ok(Flow::Continue)
    }
}

/// Records nodes in the order they are discovered
#[derive(Debug, Default)]
struct Preorder(Vec<NodeId>);

impl<E> Visitor<E> for Preorder {
    fn pre(&mut self, _walk: &DepthFirstWalk, node: NodeId) -> Result<Flow> {
        self.0.push(node);
        Ok(Flow::Continue)
    }
}

/// Strongly connected components of `graph` (Kosaraju)
///
/// Every node appears in exactly one component; two nodes share a component
/// iff each is reachable from the other.
pub fn strongly_connected_components<E>(graph: &DirectedGraph<E>) -> Result<Vec<Vec<NodeId>>>
where
    E: DirectedEdge,
{
    let dual = graph.dual();
    strongly_connected_components_with_dual(graph, &dual)
}

/// As [`strongly_connected_components`], with the dual supplied by the caller
pub fn strongly_connected_components_with_dual<E>(
    graph: &DirectedGraph<E>,
    dual: &DirectedGraph<E>,
) -> Result<Vec<Vec<NodeId>>>
where
    E: DirectedEdge,
{
    // completion order in the primary graph
    let mut finish = FinishOrder::default();
    DepthFirstWalk::for_graph(graph).walk_all(graph, &mut finish)?;

    // collect components in the dual, latest finisher first
    let mut components = Vec::new();
    let mut current = Preorder::default();
    let mut walk = DepthFirstWalk::new(graph.node_count().max(dual.node_count()));
    for &n in finish.0.iter().rev() {
        if !dual.has_node(n) {
            // no edges touch n in the dual
            components.push(vec![n]);
            continue;
        }
        if !walk.discovered(n) {
            walk.run(dual, n, &mut current)?;
            components.push(mem::take(&mut current.0));
        }
    }

    debug!(
        "found {} strongly connected components over {} nodes",
        components.len(),
        graph.node_count()
    );
    Ok(components)
}
