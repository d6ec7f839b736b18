pub mod bucket_arena;
pub mod traits;
pub mod dial_heap;
pub mod radix_heap;

pub use bucket_arena::{BucketArena, SlotId};
pub use traits::MonotoneHeap;
pub use dial_heap::DialHeap;
pub use radix_heap::RadixHeap;
