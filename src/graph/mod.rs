pub mod traits;
pub mod edge;
pub mod directed;
pub mod generators;

pub use traits::{DirectedEdge, NodeId, Weight, Weighted};
pub use edge::{reverse_edge, Edge, WeightedEdge};
pub use directed::DirectedGraph;
