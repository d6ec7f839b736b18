use std::fmt;

use crate::graph::traits::{DirectedEdge, NodeId, Weight, Weighted};

/// A basic unweighted edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Edge { source, target }
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((source, target): (NodeId, NodeId)) -> Self {
        Edge { source, target }
    }
}

impl DirectedEdge for Edge {
    fn source(&self) -> NodeId {
        self.source
    }

    fn target(&self) -> NodeId {
        self.target
    }

    fn reversed(&self) -> Self {
        Edge {
            source: self.target,
            target: self.source,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{}}}", self.source, self.target)
    }
}

/// A weighted edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeightedEdge<W> {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: W,
}

impl<W: Weight> WeightedEdge<W> {
    pub fn new(source: NodeId, target: NodeId, weight: W) -> Self {
        WeightedEdge {
            source,
            target,
            weight,
        }
    }
}

impl<W: Weight> From<(NodeId, NodeId, W)> for WeightedEdge<W> {
    fn from((source, target, weight): (NodeId, NodeId, W)) -> Self {
        WeightedEdge {
            source,
            target,
            weight,
        }
    }
}

impl<W: Weight> DirectedEdge for WeightedEdge<W> {
    fn source(&self) -> NodeId {
        self.source
    }

    fn target(&self) -> NodeId {
        self.target
    }

    fn reversed(&self) -> Self {
        WeightedEdge {
            source: self.target,
            target: self.source,
            weight: self.weight,
        }
    }
}

impl<W: Weight> Weighted for WeightedEdge<W> {
    type Weight = W;

    fn weight(&self) -> W {
        self.weight
    }

    fn weight_mut(&mut self) -> &mut W {
        &mut self.weight
    }
}

impl<W: Weight> fmt::Display for WeightedEdge<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{}}}({})", self.source, self.target, self.weight)
    }
}

/// Returns `e` with its direction flipped
pub fn reverse_edge<E: DirectedEdge>(e: E) -> E {
    e.reversed()
}
