//! Ordered time index
//!
//! A sorted sequence of timestamp buckets. Each bucket holds every key that
//! shares its timestamp, in insertion order. Buckets are strictly ascending
//! by timestamp, there is at most one bucket per timestamp, and a bucket
//! exists only while it holds at least one key.
//!
//! # Design
//!
//! - `Vec<Bucket>` located by binary search on the timestamp
//! - Appends at the tail (the common case for wall-clock stamps) skip the search
//! - Spare capacity is topped up in chunks once it drops under a slack
//!   threshold, so splicing buckets does not reallocate on every insert
//! - Keys of a bucket live in a `SmallVec`, as most timestamps are unique
//!
//! # Traversal
//!
//! [`OrderedIndex::ascending`] and [`OrderedIndex::descending`] copy the key
//! order out while the index lock is held and then release it. A slow
//! consumer never blocks concurrent inserts or removes; the traversal sees
//! the index as of the moment it was taken.

use parking_lot::Mutex;
use smallvec::SmallVec;
use std::fmt;
use std::iter::FusedIterator;

/// Default initial bucket capacity
pub const DEFAULT_INDEX_CAPACITY: usize = 100;

/// Default spare capacity under which the bucket vector grows
pub const DEFAULT_GROWTH_SLACK: usize = 15;

/// Default number of buckets reserved per growth step
pub const DEFAULT_GROWTH_CHUNK: usize = 100;

// ============================================================================
// Bucket
// ============================================================================

/// Keys sharing one timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    timestamp: i64,
    keys: SmallVec<[String; 1]>,
}

impl Bucket {
    fn new(timestamp: i64, key: String) -> Self {
        let mut keys = SmallVec::new();
        keys.push(key);
        Self { timestamp, keys }
    }

    /// Timestamp shared by every key in the bucket
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Keys in insertion order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

// ============================================================================
// OrderedIndex
// ============================================================================

/// Sorted timestamp → keys index
///
/// # Thread Safety
///
/// All operations take the index's own lock, independent of any lock held
/// by the owning store.
pub struct OrderedIndex {
    buckets: Mutex<Vec<Bucket>>,
    growth_slack: usize,
    growth_chunk: usize,
}

impl OrderedIndex {
    /// Create an empty index with default capacity
    pub fn new() -> Self {
        Self::with_growth(
            DEFAULT_INDEX_CAPACITY,
            DEFAULT_GROWTH_SLACK,
            DEFAULT_GROWTH_CHUNK,
        )
    }

    /// Create an empty index with explicit sizing.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Initial bucket capacity
    /// * `growth_slack` - Grow once spare capacity falls below this
    /// * `growth_chunk` - Buckets reserved per growth step
    pub fn with_growth(capacity: usize, growth_slack: usize, growth_chunk: usize) -> Self {
        Self {
            buckets: Mutex::new(Vec::with_capacity(capacity)),
            growth_slack,
            growth_chunk: growth_chunk.max(1),
        }
    }

    /// Insert `key` at `timestamp`.
    ///
    /// Joins the existing bucket for that timestamp (after its current keys)
    /// or splices a new single-key bucket in order. The caller guarantees
    /// `key` is not already present.
    pub fn insert(&self, key: impl Into<String>, timestamp: i64) {
        let key = key.into();
        let mut buckets = self.buckets.lock();

        if buckets.capacity() - buckets.len() < self.growth_slack {
            buckets.reserve(self.growth_chunk);
        }

        // Tail append
        if buckets.last().map_or(true, |last| last.timestamp < timestamp) {
            buckets.push(Bucket::new(timestamp, key));
            return;
        }

        let pos = buckets.partition_point(|b| b.timestamp < timestamp);
        match buckets.get_mut(pos) {
            Some(bucket) if bucket.timestamp == timestamp => bucket.keys.push(key),
            _ => buckets.insert(pos, Bucket::new(timestamp, key)),
        }
    }

    /// Remove `key` from the bucket at `timestamp`.
    ///
    /// Returns false without touching the index when no bucket exists at
    /// `timestamp` or the bucket does not hold `key`. Removing a bucket's
    /// last key drops the bucket.
    pub fn remove(&self, key: &str, timestamp: i64) -> bool {
        let mut buckets = self.buckets.lock();

        let pos = buckets.partition_point(|b| b.timestamp < timestamp);
        let Some(bucket) = buckets.get_mut(pos) else {
            return false;
        };
        if bucket.timestamp != timestamp {
            return false;
        }
        let Some(slot) = bucket.keys.iter().position(|k| k == key) else {
            return false;
        };

        if bucket.keys.len() == 1 {
            buckets.remove(pos);
        } else {
            bucket.keys.remove(slot);
        }
        true
    }

    /// True if `key` is stored at `timestamp`
    pub fn contains(&self, key: &str, timestamp: i64) -> bool {
        let buckets = self.buckets.lock();
        let pos = buckets.partition_point(|b| b.timestamp < timestamp);
        buckets
            .get(pos)
            .map(|b| b.timestamp == timestamp && b.keys.iter().any(|k| k == key))
            .unwrap_or(false)
    }

    /// Keys from oldest to newest timestamp
    pub fn ascending(&self) -> Keys {
        let buckets = self.buckets.lock();
        let keys: Vec<String> = buckets
            .iter()
            .flat_map(|b| b.keys.iter().cloned())
            .collect();
        Keys::new(keys)
    }

    /// Keys from newest to oldest timestamp.
    ///
    /// Keys sharing a timestamp keep their insertion order.
    pub fn descending(&self) -> Keys {
        let buckets = self.buckets.lock();
        let keys: Vec<String> = buckets
            .iter()
            .rev()
            .flat_map(|b| b.keys.iter().cloned())
            .collect();
        Keys::new(keys)
    }

    /// Copy of the bucket sequence
    pub fn buckets(&self) -> Vec<Bucket> {
        self.buckets.lock().clone()
    }

    /// Number of buckets (distinct timestamps)
    pub fn bucket_count(&self) -> usize {
        self.buckets.lock().len()
    }

    /// Number of keys across all buckets
    pub fn len(&self) -> usize {
        self.buckets.lock().iter().map(|b| b.keys.len()).sum()
    }

    /// True if no key is indexed
    pub fn is_empty(&self) -> bool {
        self.buckets.lock().is_empty()
    }

    /// Current bucket capacity
    pub fn capacity(&self) -> usize {
        self.buckets.lock().capacity()
    }
}

impl Default for OrderedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OrderedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedIndex")
            .field("bucket_count", &self.bucket_count())
            .field("len", &self.len())
            .finish()
    }
}

// ============================================================================
// Keys
// ============================================================================

/// Finite, single-pass sequence of keys from one traversal
#[derive(Debug)]
pub struct Keys {
    inner: std::vec::IntoIter<String>,
}

impl Keys {
    fn new(keys: Vec<String>) -> Self {
        Self {
            inner: keys.into_iter(),
        }
    }
}

impl Iterator for Keys {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Keys {}

impl FusedIterator for Keys {}
