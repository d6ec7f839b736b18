use log::trace;
use num_traits::NumCast;

use crate::data_structures::bucket_arena::{BucketArena, SlotId};
use crate::data_structures::traits::MonotoneHeap;
use crate::graph::Weight;
use crate::{Error, Result};

/// Radix heap over exponentially widening key ranges
///
/// `bounds[i]` is the inclusive upper key of bucket `i`; bucket `i > 0`
/// covers `(bounds[i - 1], bounds[i]]`. Bucket 0 holds exactly the floor
/// key, which is the smallest key ever reported by `find_min` and only
/// increases. Widths start at 1, 2, 4, ... so the bucket count is
/// logarithmic in `node_count * max_edge_cost`.
///
/// When the minimum sits in a wider bucket, that bucket is drained and its
/// elements are redistributed over bounds re-anchored at their true minimum.
#[derive(Debug, Clone)]
pub struct RadixHeap<K, V> {
    buckets: BucketArena<(K, V)>,
    bounds: Vec<K>,
}

impl<K, V> RadixHeap<K, V>
where
    K: Weight,
{
    /// Creates a heap whose keys range over `0..=limit`
    pub fn new(limit: K) -> Result<Self> {
        if limit < K::zero() {
            return Err(Error::RangeViolation(format!("radix heap, negative limit {}", limit)));
        }
        let total_bits = K::zero().count_zeros();
        let value_bits = (total_bits - limit.leading_zeros()) as usize;
        let bucket_count = (value_bits + 1).max(2);

        let mut heap = RadixHeap {
            buckets: BucketArena::new(bucket_count),
            bounds: vec![K::zero(); bucket_count],
        };
        heap.anchor(K::zero(), limit, bucket_count - 1);
        Ok(heap)
    }

    /// Number of buckets
    pub fn bucket_count(&self) -> usize {
        self.bounds.len()
    }

    /// The smallest key the heap currently accepts
    pub fn floor(&self) -> K {
        self.bounds[0]
    }

    /// Rewrites `bounds[0..=upto]` as `start, start+1, start+3, start+7, ...`
    /// clamped to `end`
    fn anchor(&mut self, start: K, end: K, upto: usize) {
        self.bounds[0] = start;
        let mut upper = start;
        let mut width = K::one();
        for bound in self.bounds.iter_mut().take(upto + 1).skip(1) {
            upper = upper.checked_add(&width).map_or(end, |u| u.min(end));
            *bound = upper;
            width = width.checked_add(&width).unwrap_or_else(K::max_value);
        }
    }

    fn find_bucket(&self, key: K) -> Result<usize> {
        if key < self.floor() {
            return Err(Error::RangeViolation(format!(
                "radix heap, key {} below floor {}",
                key,
                self.floor()
            )));
        }
        let last = self.bounds[self.bounds.len() - 1];
        if key > last {
            return Err(Error::RangeViolation(format!(
                "radix heap, key {} beyond limit {}",
                key, last
            )));
        }
        Ok(self.bounds.partition_point(|bound| *bound < key))
    }

    fn first_occupied(&self) -> Result<usize> {
        (0..self.bounds.len())
            .find(|&i| !self.buckets.is_bucket_empty(i))
            .ok_or(Error::HeapExhausted)
    }

    /// Brings the minimum into bucket 0 and returns its slot
    fn settle(&mut self) -> Result<SlotId> {
        let first = self.first_occupied()?;
        if first > 0 {
            let drained = self.buckets.slot_ids(first);
            let min = drained
                .iter()
                .map(|&id| self.buckets.get(id).0)
                .min()
                .ok_or(Error::HeapExhausted)?;
            let end = self.bounds[first];
            self.anchor(min, end, first - 1);
            for id in &drained {
                let bucket = self.find_bucket(self.buckets.get(*id).0)?;
                self.buckets.move_to_front(*id, bucket);
            }
            trace!(
                "radix heap redistributed {} elements from bucket {} at floor {}",
                drained.len(),
                first,
                min
            );
        }
        self.buckets.front(0).ok_or(Error::HeapExhausted)
    }
}

impl<K, V> MonotoneHeap<K, V> for RadixHeap<K, V>
where
    K: Weight,
{
    type Handle = SlotId;

    fn with_bounds(node_count: usize, max_edge_cost: K) -> Result<Self> {
        let nodes: Option<K> = NumCast::from(node_count);
        let limit = nodes
            .and_then(|n| n.checked_mul(&max_edge_cost))
            .unwrap_or_else(K::max_value);
        RadixHeap::new(limit)
    }

    fn insert(&mut self, key: K, value: V) -> Result<SlotId> {
        let bucket = self.find_bucket(key)?;
        Ok(self.buckets.push_front(bucket, (key, value)))
    }

    fn decrease_key(&mut self, handle: SlotId, old_key: K, new_key: K) -> Result<()> {
        if new_key > old_key {
            return Err(Error::RangeViolation(format!(
                "radix heap, attempted key increase from {} to {}",
                old_key, new_key
            )));
        }
        let bucket = self.find_bucket(new_key)?;
        self.buckets.get_mut(handle).0 = new_key;
        if self.buckets.bucket_of(handle) != bucket {
            self.buckets.move_to_front(handle, bucket);
        }
        Ok(())
    }

    fn find_min(&mut self) -> Result<(K, &V)> {
        let front = self.settle()?;
        let (key, value) = self.buckets.get(front);
        Ok((*key, value))
    }

    fn delete_min(&mut self) -> Result<(K, V)> {
        self.settle()?;
        self.buckets.pop_front(0).ok_or(Error::HeapExhausted)
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }
}
