//! digraph_engine - directed graph store and walk-based graph algorithms
//!
//! The crate provides a multigraph store with O(1) edge lookup and deletion,
//! an iterative depth-first walk engine with edge classification, and the
//! algorithms built on it: topological sort, strongly connected components
//! (Kosaraju), Dijkstra's algorithm over pluggable monotone heaps (dial and
//! radix), and label-correcting shortest paths for general weights.

pub mod algorithm;
pub mod data_structures;
pub mod graph;

pub use algorithm::{
    dijkstra::{DialDijkstra, Dijkstra, RadixDijkstra},
    label_correcting::{DequeLabelCorrecting, LabelOutcome, NegativeCycle, QueueLabelCorrecting},
    scc::strongly_connected_components,
    topo_sort::{topological_sort, CycleWitness, SortOutcome},
    walk::{DepthFirstWalk, EdgeClass, Flow, Visitor},
    ShortestPathAlgorithm, ShortestPathResult,
};
pub use data_structures::{DialHeap, MonotoneHeap, RadixHeap};
/// Re-export main types for convenient use
pub use graph::{DirectedEdge, DirectedGraph, Edge, NodeId, Weight, Weighted, WeightedEdge};

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(NodeId),

    #[error("Source vertex {0} not found in graph")]
    SourceNotFound(NodeId),

    #[error("No edge from {from} to {to}")]
    EdgeNotFound { from: NodeId, to: NodeId },

    #[error("Edge from {from} to {to} fits no classification")]
    UnclassifiedEdge { from: NodeId, to: NodeId },

    #[error("Cycle found at edge from {from} to {to}")]
    CycleFound {
        from: NodeId,
        to: NodeId,
        parents: Vec<Option<NodeId>>,
    },

    #[error("Negative cycle found through vertex {node}")]
    NegativeCycleFound {
        node: NodeId,
        parents: Vec<Option<NodeId>>,
    },

    #[error("Heap is empty")]
    HeapExhausted,

    #[error("Heap range violation: {0}")]
    RangeViolation(String),

    #[error("Path cost overflows the weight type at vertex {0}")]
    CostOverflow(NodeId),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
