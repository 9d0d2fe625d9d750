//! BoundedHashMap: fixed-capacity, string-keyed map with chained buckets.

use crate::chain::{Arena, Chain, Entry, EntryKey};
use crate::error::{CapacityError, InsertError};
use core::hash::BuildHasher;
use log::{debug, trace};
use std::collections::hash_map::RandomState;

/// Smallest power of two `>= n`, with `0` mapping to `0`.
pub fn next_power_of_two(n: usize) -> Option<usize> {
    if n == 0 {
        Some(0)
    } else {
        n.checked_next_power_of_two()
    }
}

pub struct BoundedHashMap<V, S = RandomState> {
    hasher: S,
    // Length is always zero or a power of two.
    buckets: Box<[Option<Chain>]>,
    entries: Arena<V>,
    capacity: usize,
}

impl<V> BoundedHashMap<V> {
    /// An uninitialized map: no buckets, every operation reports
    /// failure or absence.
    pub fn new() -> Self {
        Self::uninit_with_hasher(RandomState::new())
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }

    /// Like [`with_capacity`](Self::with_capacity) for callers holding a
    /// signed count; negative values are rejected.
    pub fn try_with_capacity(capacity: i64) -> Result<Self, CapacityError> {
        let capacity = usize::try_from(capacity).map_err(|_| CapacityError::Negative(capacity))?;
        Self::with_capacity(capacity)
    }
}

impl<V> Default for BoundedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> BoundedHashMap<V, S>
where
    S: BuildHasher,
{
    pub fn uninit_with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            buckets: Box::default(),
            entries: Arena::with_key(),
            capacity: 0,
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, CapacityError> {
        let bucket_count = next_power_of_two(capacity).ok_or(CapacityError::TooLarge(capacity))?;
        let mut buckets: Vec<Option<Chain>> = Vec::new();
        buckets.try_reserve_exact(bucket_count)?;
        buckets.resize(bucket_count, None);
        debug!("bounded map created: capacity={capacity} buckets={bucket_count}");
        Ok(Self {
            hasher,
            buckets: buckets.into_boxed_slice(),
            entries: Arena::with_key(),
            capacity,
        })
    }

    /// Declared capacity, the user-facing maximum number of keys.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Length of the bucket array.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_initialized(&self) -> bool {
        !self.buckets.is_empty()
    }

    /// Number of keys currently stored.
    pub fn occupancy(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occupancy over declared capacity; `0.0` when there is nothing to
    /// divide by.
    pub fn load(&self) -> f64 {
        if !self.is_initialized() || self.capacity == 0 {
            return 0.0;
        }
        self.entries.len() as f64 / self.capacity as f64
    }

    /// Bucket a key maps to, or `None` for an uninitialized map.
    pub fn bucket_index(&self, key: &str) -> Option<usize> {
        let n = self.buckets.len();
        if n == 0 {
            return None;
        }
        let hash = self.hasher.hash_one(key) as usize;
        Some(hash & (n - 1))
    }

    /// Number of entries chained in bucket `index` (0 if out of range).
    pub fn chain_len(&self, index: usize) -> usize {
        self.buckets
            .get(index)
            .and_then(|slot| slot.as_ref())
            .map_or(0, Chain::len)
    }

    fn locate(&self, key: &str) -> Option<(usize, EntryKey)> {
        let idx = self.bucket_index(key)?;
        let chain = self.buckets[idx].as_ref()?;
        let k = chain.find(&self.entries, key)?;
        Some((idx, k))
    }

    /// Store `value` under `key`.
    ///
    /// An existing key has its value replaced in place and the old value
    /// returned; this path ignores the capacity gate. A new key is refused
    /// once `occupancy() == capacity()`.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>, InsertError> {
        let key = key.into();
        let Some(idx) = self.bucket_index(&key) else {
            trace!("insert of {key:?} refused: map uninitialized");
            return Err(InsertError::Uninitialized);
        };

        if let Some(chain) = &self.buckets[idx] {
            if let Some(k) = chain.find(&self.entries, &key) {
                let old = core::mem::replace(&mut self.entries[k].value, value);
                return Ok(Some(old));
            }
        }

        if self.entries.len() >= self.capacity {
            trace!("insert of {key:?} refused: map is full");
            return Err(InsertError::CapacityExhausted {
                capacity: self.capacity,
            });
        }

        let k = self.entries.insert(Entry::new(key, value));
        if let Some(chain) = &mut self.buckets[idx] {
            chain.push_back(&mut self.entries, k);
        } else {
            self.buckets[idx] = Some(Chain::single(k));
        }
        Ok(None)
    }

    /// [`insert`](Self::insert) reduced to success/failure.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> bool {
        self.insert(key, value).is_ok()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let (_, k) = self.locate(key)?;
        self.entries.get(k).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let (_, k) = self.locate(key)?;
        self.entries.get_mut(k).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.locate(key).is_some()
    }

    /// Remove `key` and return its value. Absent keys leave the map
    /// untouched.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        let Some((idx, k)) = self.locate(key) else {
            trace!("delete of {key:?}: not found");
            return None;
        };
        let slot = &mut self.buckets[idx];
        let keep = match slot.as_mut() {
            Some(chain) => chain.unlink(&mut self.entries, k),
            None => return None,
        };
        if !keep {
            *slot = None;
        }
        self.entries.remove(k).map(|e| e.value)
    }

    /// Entries in bucket order, chain insertion order within a bucket.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            entries: &self.entries,
            buckets: self.buckets.iter(),
            chain: None,
        }
    }
}

impl<'a, V, S> IntoIterator for &'a BoundedHashMap<V, S>
where
    S: BuildHasher,
{
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, S> core::fmt::Debug for BoundedHashMap<V, S>
where
    V: core::fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(key, value)` pairs of a `BoundedHashMap`.
pub struct Iter<'a, V> {
    entries: &'a Arena<V>,
    buckets: core::slice::Iter<'a, Option<Chain>>,
    chain: Option<crate::chain::ChainKeys<'a, V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.chain.as_mut().and_then(Iterator::next) {
                let e = &self.entries[k];
                return Some((e.key.as_str(), &e.value));
            }
            let chain = self.buckets.find_map(|slot| slot.as_ref())?;
            self.chain = Some(chain.keys(self.entries));
        }
    }
}

#[cfg(test)]
impl<V, S> BoundedHashMap<V, S>
where
    S: BuildHasher,
{
    /// Structural self-check used by tests: chain lengths sum to the
    /// occupancy, every key lives in the bucket it hashes to, links are
    /// symmetric, and keys are unique.
    pub(crate) fn assert_consistent(&self) {
        let mut seen = std::collections::HashSet::new();
        let mut total = 0;
        for (idx, slot) in self.buckets.iter().enumerate() {
            let Some(chain) = slot else { continue };
            let fwd: Vec<_> = chain.keys(&self.entries).collect();
            assert_eq!(fwd.len(), chain.len(), "chain length bookkeeping");
            assert!(chain.len() > 0, "empty chain left in a bucket");
            let mut rev = crate::chain::keys_rev(chain, &self.entries);
            rev.reverse();
            assert_eq!(fwd, rev, "prev links mirror next links");
            for k in fwd {
                let key = &self.entries[k].key;
                assert_eq!(self.bucket_index(key), Some(idx), "entry in wrong bucket");
                assert!(seen.insert(key.clone()), "duplicate key {key:?}");
            }
            total += chain.len();
        }
        assert_eq!(total, self.entries.len());
        assert!(self.entries.len() <= self.capacity);
        assert_eq!(next_power_of_two(self.capacity), Some(self.buckets.len()));
    }
}
