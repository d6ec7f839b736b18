pub mod traits;
pub mod walk;
pub mod topo_sort;
pub mod scc;
pub mod dijkstra;
pub mod label_correcting;

pub use traits::{ShortestPathAlgorithm, ShortestPathResult};
