use std::fmt::Debug;

/// Stable reference to a value stored in a [`BucketArena`]
///
/// A slot id stays valid while its value is moved between buckets and is
/// invalidated when the value is removed. The generation catches reuse of a
/// freed slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    value: Option<T>,
    generation: u32,
    bucket: usize,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    head: Option<usize>,
    len: usize,
}

/// A set of doubly-linked buckets sharing one slot arena
///
/// This data structure supports:
/// - push_front into any bucket in O(1)
/// - removal of any element by slot id in O(1)
/// - splicing an element to the front of another bucket in O(1)
///
/// Freed slots are recycled, so memory stays proportional to the peak
/// number of live elements.
#[derive(Debug, Clone)]
pub struct BucketArena<T> {
    slots: Vec<Slot<T>>,
    buckets: Vec<Bucket>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Default for BucketArena<T> {
    fn default() -> Self {
        BucketArena::new(0)
    }
}

impl<T> BucketArena<T> {
    /// Creates an arena with `bucket_count` empty buckets
    pub fn new(bucket_count: usize) -> Self {
        BucketArena {
            slots: Vec::new(),
            buckets: vec![Bucket::default(); bucket_count],
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Grows the bucket vector so that `bucket_count() >= count`
    pub fn ensure_buckets(&mut self, count: usize) {
        if count > self.buckets.len() {
            self.buckets.resize(count, Bucket::default());
        }
    }

    /// Total number of live values across all buckets
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_len(&self, bucket: usize) -> usize {
        self.buckets[bucket].len
    }

    pub fn is_bucket_empty(&self, bucket: usize) -> bool {
        self.buckets[bucket].head.is_none()
    }

    /// Inserts a value at the front of `bucket` and returns its slot id
    pub fn push_front(&mut self, bucket: usize, value: T) -> SlotId {
        let index = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.value = Some(value);
                slot.bucket = bucket;
                index
            }
            None => {
                self.slots.push(Slot {
                    value: Some(value),
                    generation: 0,
                    bucket,
                    prev: None,
                    next: None,
                });
                self.slots.len() - 1
            }
        };
        self.link_front(bucket, index);
        self.len += 1;
        SlotId {
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Removes the value behind `id`, invalidating the id
    pub fn remove(&mut self, id: SlotId) -> T {
        let index = self.live_index(id);
        self.unlink(index);
        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;
        match slot.value.take() {
            Some(value) => value,
            None => unreachable!("live slot without a value"),
        }
    }

    /// Moves the value behind `id` to the front of `bucket`; `id` stays valid
    pub fn move_to_front(&mut self, id: SlotId, bucket: usize) {
        let index = self.live_index(id);
        self.unlink(index);
        self.slots[index].bucket = bucket;
        self.link_front(bucket, index);
    }

    /// Slot id of the first value in `bucket`
    pub fn front(&self, bucket: usize) -> Option<SlotId> {
        self.buckets[bucket].head.map(|index| self.id_of(index))
    }

    /// Removes and returns the first value in `bucket`
    pub fn pop_front(&mut self, bucket: usize) -> Option<T> {
        let id = self.front(bucket)?;
        Some(self.remove(id))
    }

    /// Slot id following `id` within its bucket
    pub fn next(&self, id: SlotId) -> Option<SlotId> {
        let index = self.live_index(id);
        self.slots[index].next.map(|next| self.id_of(next))
    }

    /// Bucket currently holding `id`
    pub fn bucket_of(&self, id: SlotId) -> usize {
        self.slots[self.live_index(id)].bucket
    }

    pub fn get(&self, id: SlotId) -> &T {
        match &self.slots[self.live_index(id)].value {
            Some(value) => value,
            None => unreachable!("live slot without a value"),
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> &mut T {
        let index = self.live_index(id);
        match &mut self.slots[index].value {
            Some(value) => value,
            None => unreachable!("live slot without a value"),
        }
    }

    /// Returns true if `id` still refers to a live value
    pub fn contains(&self, id: SlotId) -> bool {
        self.slots
            .get(id.index)
            .map_or(false, |slot| slot.generation == id.generation && slot.value.is_some())
    }

    /// Iterates over the values of `bucket`, front to back
    pub fn iter(&self, bucket: usize) -> BucketIter<'_, T> {
        BucketIter {
            arena: self,
            cursor: self.buckets[bucket].head,
        }
    }

    /// Collects the slot ids of `bucket`, front to back
    pub fn slot_ids(&self, bucket: usize) -> Vec<SlotId> {
        let mut ids = Vec::with_capacity(self.buckets[bucket].len);
        let mut cursor = self.buckets[bucket].head;
        while let Some(index) = cursor {
            ids.push(self.id_of(index));
            cursor = self.slots[index].next;
        }
        ids
    }

    fn id_of(&self, index: usize) -> SlotId {
        SlotId {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn live_index(&self, id: SlotId) -> usize {
        let slot = &self.slots[id.index];
        assert!(
            slot.generation == id.generation && slot.value.is_some(),
            "stale slot id {:?}",
            id
        );
        id.index
    }

    fn link_front(&mut self, bucket: usize, index: usize) {
        let head = self.buckets[bucket].head;
        {
            let slot = &mut self.slots[index];
            slot.prev = None;
            slot.next = head;
        }
        if let Some(head) = head {
            self.slots[head].prev = Some(index);
        }
        let bucket = &mut self.buckets[bucket];
        bucket.head = Some(index);
        bucket.len += 1;
    }

    fn unlink(&mut self, index: usize) {
        let (prev, next, bucket) = {
            let slot = &self.slots[index];
            (slot.prev, slot.next, slot.bucket)
        };
        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => self.buckets[bucket].head = next,
        }
        if let Some(next) = next {
            self.slots[next].prev = prev;
        }
        self.buckets[bucket].len -= 1;
        let slot = &mut self.slots[index];
        slot.prev = None;
        slot.next = None;
    }
}

/// Iterator over the values of one bucket
pub struct BucketIter<'a, T> {
    arena: &'a BucketArena<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for BucketIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let slot = &self.arena.slots[index];
        self.cursor = slot.next;
        slot.value.as_ref()
    }
}
