//! Depth-first walks with discovery/finish ticks and edge classification
//!
//! A [`DepthFirstWalk`] holds the bookkeeping of one walk context:
//!
//! - `parents[n]`: the node from which `n` was discovered
//! - `entered[n]`: tick at which `n` was discovered
//! - `exited[n]`: tick at which `n` was completed
//!
//! Ticks keep advancing across repeated [`DepthFirstWalk::run`] calls on the
//! same context, which is what keeps edge classification correct when a
//! driver starts one walk per undiscovered node. The walk uses an explicit
//! stack, so deep graphs do not exhaust the call stack.

use log::debug;

use crate::data_structures::SlotId;
use crate::graph::{DirectedEdge, DirectedGraph, NodeId};
use crate::{Error, Result};

/// Timestamp of a discovery or completion event
pub type Tick = u64;

/// Classification of an edge relative to the depth-first forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeClass {
    /// The edge that discovered its target
    Tree,
    /// Leads to an already completed descendant
    Forward,
    /// Leads to an ancestor on the active path; closes a directed cycle
    Back,
    /// Leads into an already completed, unrelated subtree
    Cross,
}

/// Returned by visitor callbacks to continue or halt the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Finish,
}

/// Callbacks fired during a walk
///
/// Each callback sees the walk state as it is at that instant, so `edge`
/// can call [`DepthFirstWalk::classify_edge`]. Returning an error aborts the
/// walk and propagates the error.
pub trait Visitor<E> {
    /// Fired when `node` is discovered, after its entry tick is assigned
    fn pre(&mut self, _walk: &DepthFirstWalk, _node: NodeId) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    /// Fired once per edge examined
    fn edge(&mut self, _walk: &DepthFirstWalk, _edge: &E) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    /// Fired when every edge of `node` has been examined, before its exit tick
    fn post(&mut self, _walk: &DepthFirstWalk, _node: NodeId) -> Result<Flow> {
        Ok(Flow::Continue)
    }
}

/// The no-op visitor, for walks run only for their bookkeeping
impl<E> Visitor<E> for () {}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    cursor: Option<SlotId>,
}

/// State of a depth-first walk over one graph
#[derive(Debug, Clone, Default)]
pub struct DepthFirstWalk {
    parents: Vec<Option<NodeId>>,
    entered: Vec<Option<Tick>>,
    exited: Vec<Option<Tick>>,
    ticks: Tick,
    finished: bool,
    undirected: bool,
}

impl DepthFirstWalk {
    /// Creates a walk context for nodes `0..node_count`
    pub fn new(node_count: usize) -> Self {
        let mut walk = DepthFirstWalk::default();
        walk.reset(node_count);
        walk
    }

    /// Creates a walk context sized for `graph`
    pub fn for_graph<E: DirectedEdge>(graph: &DirectedGraph<E>) -> Self {
        DepthFirstWalk::new(graph.node_count())
    }

    /// Treat the graph as undirected
    ///
    /// Edges into an already processed node are then skipped without a
    /// callback, since their reverse was reported when that node was walked.
    pub fn with_directed(mut self, directed: bool) -> Self {
        self.undirected = !directed;
        self
    }

    /// Forgets all discoveries and restarts the tick counter
    pub fn reset(&mut self, node_count: usize) {
        self.parents = vec![None; node_count];
        self.entered = vec![None; node_count];
        self.exited = vec![None; node_count];
        self.ticks = 0;
        self.finished = false;
    }

    /// Parent of every node in the depth-first forest
    pub fn parents(&self) -> &[Option<NodeId>] {
        &self.parents
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(node).copied().flatten()
    }

    /// Tick at which `node` was discovered
    pub fn entered(&self, node: NodeId) -> Option<Tick> {
        self.entered.get(node).copied().flatten()
    }

    /// Tick at which `node` was completed
    pub fn exited(&self, node: NodeId) -> Option<Tick> {
        self.exited.get(node).copied().flatten()
    }

    pub fn discovered(&self, node: NodeId) -> bool {
        self.entered(node).is_some()
    }

    pub fn processed(&self, node: NodeId) -> bool {
        self.exited(node).is_some()
    }

    /// True if `n` was discovered strictly before `m`
    pub fn entered_before(&self, n: NodeId, m: NodeId) -> bool {
        matches!((self.entered(n), self.entered(m)), (Some(a), Some(b)) if a < b)
    }

    /// True if `n` was completed strictly before `m`
    pub fn exited_before(&self, n: NodeId, m: NodeId) -> bool {
        matches!((self.exited(n), self.exited(m)), (Some(a), Some(b)) if a < b)
    }

    /// Number of ticks handed out so far
    pub fn ticks(&self) -> Tick {
        self.ticks
    }

    /// True once a visitor has halted the walk
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Classifies `edge` against the walk state at this instant
    pub fn classify_edge<E: DirectedEdge>(&self, edge: &E) -> Result<EdgeClass> {
        let (source, target) = (edge.source(), edge.target());
        if self.parent(target) == Some(source) {
            return Ok(EdgeClass::Tree);
        }
        if self.discovered(target) && !self.processed(target) {
            return Ok(EdgeClass::Back);
        }
        if self.processed(target) && self.entered_before(source, target) {
            return Ok(EdgeClass::Forward);
        }
        if self.processed(target) && self.entered_before(target, source) {
            return Ok(EdgeClass::Cross);
        }
        Err(Error::UnclassifiedEdge {
            from: source,
            to: target,
        })
    }

    /// Walks everything reachable from `root` that is still undiscovered
    pub fn run<E, V>(&mut self, graph: &DirectedGraph<E>, root: NodeId, visitor: &mut V) -> Result<()>
    where
        E: DirectedEdge,
        V: Visitor<E> + ?Sized,
    {
        if !graph.has_node(root) {
            return Err(Error::InvalidVertex(root));
        }
        self.fit(graph.node_count());
        if self.finished || self.discovered(root) {
            return Ok(());
        }

        let mut stack = Vec::new();
        self.enter(graph, root, visitor, &mut stack)?;

        while let Some(frame) = stack.last_mut() {
            if self.finished {
                break;
            }
            let node = frame.node;
            match frame.cursor {
                Some(slot) => {
                    let (edge, next) = graph.slot_edge(slot);
                    frame.cursor = next;
                    let target = edge.target();
                    if !self.discovered(target) {
                        self.parents[target] = Some(node);
                        let flow = visitor.edge(self, edge)?;
                        self.apply(flow);
                        if self.finished {
                            break;
                        }
                        self.enter(graph, target, visitor, &mut stack)?;
                    } else if !self.undirected || !self.processed(target) {
                        let flow = visitor.edge(self, edge)?;
                        self.apply(flow);
                    }
                }
                None => {
                    stack.pop();
                    let flow = visitor.post(self, node)?;
                    self.apply(flow);
                    self.exited[node] = Some(self.tick());
                }
            }
        }
        Ok(())
    }

    /// Restarts this context and walks every node of `graph`
    ///
    /// Roots are taken in increasing node id; one walk starts at each node
    /// still undiscovered, all sharing one tick counter.
    pub fn walk_all<E, V>(mut self, graph: &DirectedGraph<E>, visitor: &mut V) -> Result<Self>
    where
        E: DirectedEdge,
        V: Visitor<E> + ?Sized,
    {
        self.reset(graph.node_count());
        let mut roots = 0;
        for n in 0..graph.node_count() {
            if self.finished {
                break;
            }
            if !self.discovered(n) {
                roots += 1;
                self.run(graph, n, visitor)?;
            }
        }
        debug!(
            "depth-first walk over {} nodes: {} roots, {} ticks, finished early: {}",
            graph.node_count(),
            roots,
            self.ticks,
            self.finished
        );
        Ok(self)
    }

    fn enter<E, V>(
        &mut self,
        graph: &DirectedGraph<E>,
        node: NodeId,
        visitor: &mut V,
        stack: &mut Vec<Frame>,
    ) -> Result<()>
    where
        E: DirectedEdge,
        V: Visitor<E> + ?Sized,
    {
        self.entered[node] = Some(self.tick());
        let flow = visitor.pre(self, node)?;
        self.apply(flow);
        stack.push(Frame {
            node,
            cursor: graph.first_slot(node),
        });
        Ok(())
    }

    fn tick(&mut self) -> Tick {
        let t = self.ticks;
        self.ticks += 1;
        t
    }

    fn apply(&mut self, flow: Flow) {
        if flow == Flow::Finish {
            self.finished = true;
        }
    }

    fn fit(&mut self, node_count: usize) {
        if node_count > self.parents.len() {
            self.parents.resize(node_count, None);
            self.entered.resize(node_count, None);
            self.exited.resize(node_count, None);
        }
    }
}

/// Walks all nodes of `graph` with a fresh directed walk context
pub fn walk_all<E, V>(graph: &DirectedGraph<E>, visitor: &mut V) -> Result<DepthFirstWalk>
where
    E: DirectedEdge,
    V: Visitor<E> + ?Sized,
{
    DepthFirstWalk::for_graph(graph).walk_all(graph, visitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        classes: Vec<(NodeId, NodeId, EdgeClass)>,
    }

    impl Visitor<Edge> for Recorder {
        fn pre(&mut self, _walk: &DepthFirstWalk, node: NodeId) -> Result<Flow> {
            self.events.push(format!("pre {}", node));
            Ok(Flow::Continue)
        }

        fn edge(&mut self, walk: &DepthFirstWalk, edge: &Edge) -> Result<Flow> {
            self.events.push(format!("edge {}", edge));
            self.classes.push((edge.source, edge.target, walk.classify_edge(edge)?));
            Ok(Flow::Continue)
        }

        fn post(&mut self, _walk: &DepthFirstWalk, node: NodeId) -> Result<Flow> {
            self.events.push(format!("post {}", node));
            Ok(Flow::Continue)
        }
    }

    fn graph(pairs: &[(NodeId, NodeId)]) -> DirectedGraph<Edge> {
        DirectedGraph::from_edges(pairs.iter().copied())
    }

    fn class_of(rec: &Recorder, s: NodeId, t: NodeId) -> EdgeClass {
        rec.classes
            .iter()
            .find(|(a, b, _)| *a == s && *b == t)
            .map(|(_, _, c)| *c)
            .unwrap()
    }

    #[test]
    fn test_event_order_matches_recursive_walk() {
        // Edge lists are newest first: 0 visits 2 before 1.
        let g = graph(&[(0, 1), (0, 2), (2, 1)]);
        let mut rec = Recorder::default();
        walk_all(&g, &mut rec).unwrap();
        assert_eq!(
            rec.events,
            vec![
                "pre 0", "edge {0,2}", "pre 2", "edge {2,1}", "pre 1", "post 1", "post 2",
                "edge {0,1}", "post 0",
            ]
        );
    }

    #[test]
    fn test_classifies_all_four_kinds() {
        // 0 -> 1 -> 2 -> 0 is a cycle, 0 -> 2 is forward, 3 -> 1 is cross.
        let g = graph(&[(0, 2), (0, 1), (1, 2), (2, 0), (3, 1)]);
        let mut rec = Recorder::default();
        let walk = walk_all(&g, &mut rec).unwrap();

        assert_eq!(class_of(&rec, 0, 1), EdgeClass::Tree);
        assert_eq!(class_of(&rec, 1, 2), EdgeClass::Tree);
        assert_eq!(class_of(&rec, 2, 0), EdgeClass::Back);
        assert_eq!(class_of(&rec, 0, 2), EdgeClass::Forward);
        assert_eq!(class_of(&rec, 3, 1), EdgeClass::Cross);
        assert_eq!(walk.parents(), &[None, Some(0), Some(1), None]);
        assert_eq!(walk.ticks(), 8);
    }

    #[test]
    fn test_ticks_continue_across_runs() {
        let g = graph(&[(0, 1), (2, 3)]);
        let mut walk = DepthFirstWalk::for_graph(&g);
        walk.run(&g, 2, &mut ()).unwrap();
        walk.run(&g, 0, &mut ()).unwrap();
        assert_eq!(walk.entered(2), Some(0));
        assert_eq!(walk.exited(2), Some(3));
        assert_eq!(walk.entered(0), Some(4));
        assert!(walk.exited_before(3, 2));
        assert!(walk.entered_before(2, 0));
        assert!(!walk.discovered(9));
    }

    #[test]
    fn test_finish_unwinds_immediately() {
        struct StopAt(NodeId, Vec<NodeId>);
        impl Visitor<Edge> for StopAt {
            fn pre(&mut self, _walk: &DepthFirstWalk, node: NodeId) -> Result<Flow> {
                self.1.push(node);
                Ok(if node == self.0 { Flow::Finish } else { Flow::Continue })
            }
        }

        let g = graph(&[(0, 1), (1, 2), (2, 3), (4, 0)]);
        let mut stop = StopAt(2, Vec::new());
        let walk = walk_all(&g, &mut stop).unwrap();
        assert_eq!(stop.1, vec![0, 1, 2]);
        assert!(walk.is_finished());
        assert!(!walk.processed(0));
        assert!(!walk.discovered(4));
    }

    #[test]
    fn test_undirected_skips_edges_into_processed_nodes() {
        // a triangle stored in both directions
        let g = graph(&[(0, 1), (1, 0), (1, 2), (2, 1), (0, 2), (2, 0)]);

        let mut rec = Recorder::default();
        walk_all(&g, &mut rec).unwrap();
        assert_eq!(rec.classes.len(), 6);
        assert_eq!(class_of(&rec, 0, 1), EdgeClass::Forward);

        let mut rec = Recorder::default();
        DepthFirstWalk::for_graph(&g)
            .with_directed(false)
            .walk_all(&g, &mut rec)
            .unwrap();
        assert_eq!(rec.classes.len(), 5);
        assert!(rec.classes.iter().all(|&(s, t, _)| (s, t) != (0, 1)));
        assert_eq!(class_of(&rec, 1, 0), EdgeClass::Back);
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let g: DirectedGraph<Edge> = (0..200_000).map(|n| Edge::new(n, n + 1)).collect();
        let walk = walk_all(&g, &mut ()).unwrap();
        assert!(walk.processed(0));
        assert_eq!(walk.parent(200_000), Some(199_999));
    }

    #[test]
    fn test_invalid_root() {
        let g = graph(&[(0, 1)]);
        let mut walk = DepthFirstWalk::for_graph(&g);
        assert_eq!(walk.run(&g, 5, &mut ()), Err(Error::InvalidVertex(5)));
    }
}
