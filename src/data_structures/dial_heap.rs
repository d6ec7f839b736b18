use num_traits::NumCast;

use crate::data_structures::bucket_arena::{BucketArena, SlotId};
use crate::data_structures::traits::MonotoneHeap;
use crate::graph::Weight;
use crate::{Error, Result};

/// Dial's bucket queue
///
/// A ring of `max_edge_cost + 1` buckets indexed by `key mod size`. Under the
/// monotone calling convention every live key lies in `[floor, floor + size)`,
/// so each bucket holds a single key value and the ring order starting at
/// `base` is the key order.
///
/// Insert and decrease-key are O(1). `find_min` advances `base` forward
/// only, so the scanning cost is amortized over the whole run.
#[derive(Debug, Clone)]
pub struct DialHeap<K, V> {
    buckets: BucketArena<(K, V)>,
    /// Number of buckets
    size: usize,
    /// `size` as a key, `None` when it exceeds the key type
    size_key: Option<K>,
    /// Bucket of the last minimum found
    base: usize,
    /// Key of the last minimum found
    floor: K,
}

impl<K, V> DialHeap<K, V>
where
    K: Weight,
{
    /// Creates a heap whose keys never spread further than `max_edge_cost`
    pub fn new(max_edge_cost: K) -> Result<Self> {
        let size = max_edge_cost
            .to_usize()
            .and_then(|m| m.checked_add(1))
            .ok_or_else(|| {
                Error::RangeViolation(format!("dial heap cannot span edge cost {}", max_edge_cost))
            })?;
        let size_key: Option<K> = NumCast::from(size);
        Ok(DialHeap {
            buckets: BucketArena::new(size),
            size,
            size_key,
            base: 0,
            floor: K::zero(),
        })
    }

    /// Number of buckets in the ring
    pub fn bucket_count(&self) -> usize {
        self.size
    }

    fn check_window(&self, key: K) -> Result<()> {
        if key < self.floor {
            return Err(Error::RangeViolation(format!(
                "dial heap, key {} below current minimum {}",
                key, self.floor
            )));
        }
        if let Some(size) = self.size_key {
            if key - self.floor >= size {
                return Err(Error::RangeViolation(format!(
                    "dial heap, key {} beyond window of {} buckets above {}",
                    key, self.size, self.floor
                )));
            }
        }
        Ok(())
    }

    fn bucket_of_key(&self, key: K) -> Result<usize> {
        let offset = match self.size_key {
            Some(size) => key % size,
            None => key,
        };
        offset
            .to_usize()
            .ok_or_else(|| Error::RangeViolation(format!("dial heap, key {} has no bucket", key)))
    }

    /// Moves `base` forward to the first non-empty bucket
    fn rebase(&mut self) -> Result<SlotId> {
        if self.buckets.is_empty() {
            return Err(Error::HeapExhausted);
        }
        for c in 0..self.size {
            let i = (self.base + c) % self.size;
            if let Some(front) = self.buckets.front(i) {
                self.base = i;
                self.floor = self.buckets.get(front).0;
                return Ok(front);
            }
        }
        Err(Error::HeapExhausted)
    }
}

impl<K, V> MonotoneHeap<K, V> for DialHeap<K, V>
where
    K: Weight,
{
    type Handle = SlotId;

    fn with_bounds(_node_count: usize, max_edge_cost: K) -> Result<Self> {
        DialHeap::new(max_edge_cost)
    }

    fn insert(&mut self, key: K, value: V) -> Result<SlotId> {
        self.check_window(key)?;
        let index = self.bucket_of_key(key)?;
        Ok(self.buckets.push_front(index, (key, value)))
    }

    fn decrease_key(&mut self, handle: SlotId, old_key: K, new_key: K) -> Result<()> {
        if new_key > old_key {
            return Err(Error::RangeViolation(format!(
                "dial heap, attempted key increase from {} to {}",
                old_key, new_key
            )));
        }
        self.check_window(new_key)?;
        let index = self.bucket_of_key(new_key)?;
        self.buckets.get_mut(handle).0 = new_key;
        self.buckets.move_to_front(handle, index);
        Ok(())
    }

    fn find_min(&mut self) -> Result<(K, &V)> {
        let front = self.rebase()?;
        let (key, value) = self.buckets.get(front);
        Ok((*key, value))
    }

    fn delete_min(&mut self) -> Result<(K, V)> {
        self.rebase()?;
        self.buckets.pop_front(self.base).ok_or(Error::HeapExhausted)
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }
}
