use std::fmt::{Debug, Display};
use std::hash::Hash;
use num_traits::PrimInt;

/// Dense, zero-based node identifier
pub type NodeId = usize;

/// Numeric type usable as an edge weight and as a heap key
///
/// Integer weights keep bucket arithmetic exact. Signed types are accepted
/// so that label-correcting algorithms can see negative edges.
pub trait Weight: PrimInt + Hash + Debug + Display {}

impl<T> Weight for T where T: PrimInt + Hash + Debug + Display {}

/// Trait representing a directed edge stored in a graph
pub trait DirectedEdge: Copy + Debug {
    /// Node the edge leaves
    fn source(&self) -> NodeId;

    /// Node the edge enters
    fn target(&self) -> NodeId;

    /// Returns the same edge with source and target swapped
    fn reversed(&self) -> Self;
}

/// Trait for edges carrying a weight
pub trait Weighted: DirectedEdge {
    type Weight: Weight;

    /// Returns the weight of the edge
    fn weight(&self) -> Self::Weight;

    /// Mutable access to the weight, used through `DirectedGraph::edge_at`
    fn weight_mut(&mut self) -> &mut Self::Weight;
}
