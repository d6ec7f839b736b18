use std::fmt::Debug;

use crate::graph::Weight;
use crate::Result;

/// A priority queue specialised to Dijkstra's access pattern
///
/// Implementations may rely on the following calling convention:
///
/// 1. `delete_min` follows a `find_min` with no mutation in between.
/// 2. Once a key `k` has been returned by `find_min`, no key smaller than
///    `k` is inserted or produced by `decrease_key`.
/// 3. A new key never exceeds the current minimum plus the maximum edge
///    cost the heap was built for.
///
/// Keys outside the window the heap can represent are rejected with
/// `Error::RangeViolation`; an empty heap answers `Error::HeapExhausted`.
pub trait MonotoneHeap<K, V>: Sized
where
    K: Weight,
{
    /// Stable reference to an element, valid until the element is deleted
    type Handle: Copy + Debug;

    /// Creates a heap able to serve a graph of `node_count` nodes whose edge
    /// weights are at most `max_edge_cost`
    fn with_bounds(node_count: usize, max_edge_cost: K) -> Result<Self>;

    /// Inserts `value` with priority `key`
    fn insert(&mut self, key: K, value: V) -> Result<Self::Handle>;

    /// Lowers the key of the element behind `handle` from `old_key` to `new_key`
    fn decrease_key(&mut self, handle: Self::Handle, old_key: K, new_key: K) -> Result<()>;

    /// Returns the smallest key and its value without removing it
    fn find_min(&mut self) -> Result<(K, &V)>;

    /// Removes the element reported by the preceding `find_min`
    fn delete_min(&mut self) -> Result<(K, V)>;

    /// Number of elements in the heap
    fn len(&self) -> usize;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
