//! Bucket chains: doubly linked lists threaded through one arena.
//!
//! Every entry of a table lives in a single `SlotMap` owned by the table;
//! a `Chain` only records the head/tail keys of one bucket's list and its
//! length. Links never leave a chain, so plain arena keys are enough and
//! no shared ownership is needed.

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Arena key of one entry.
    pub(crate) struct EntryKey;
}

#[derive(Debug)]
pub(crate) struct Entry<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    prev: Option<EntryKey>,
    next: Option<EntryKey>,
}

impl<V> Entry<V> {
    pub(crate) fn new(key: String, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }
}

pub(crate) type Arena<V> = SlotMap<EntryKey, Entry<V>>;

/// A non-empty chain. Empty buckets hold no `Chain` at all.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Chain {
    head: EntryKey,
    tail: EntryKey,
    len: usize,
}

impl Chain {
    /// Start a chain with an entry that is already in the arena.
    pub(crate) fn single(k: EntryKey) -> Self {
        Self {
            head: k,
            tail: k,
            len: 1,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Linear search by exact key equality.
    pub(crate) fn find<V>(&self, arena: &Arena<V>, key: &str) -> Option<EntryKey> {
        self.keys(arena).find(|&k| arena[k].key == key)
    }

    /// Link an arena entry after the current tail.
    pub(crate) fn push_back<V>(&mut self, arena: &mut Arena<V>, k: EntryKey) {
        let old_tail = self.tail;
        arena[old_tail].next = Some(k);
        let e = &mut arena[k];
        e.prev = Some(old_tail);
        e.next = None;
        self.tail = k;
        self.len += 1;
    }

    /// Unlink `k` from this chain, keeping the remaining order. Returns
    /// `false` when the chain is now empty and should be dropped.
    ///
    /// `k` must belong to this chain; the entry stays in the arena.
    pub(crate) fn unlink<V>(&mut self, arena: &mut Arena<V>, k: EntryKey) -> bool {
        let (prev, next) = {
            let e = &arena[k];
            (e.prev, e.next)
        };
        match prev {
            Some(p) => arena[p].next = next,
            None => {
                if let Some(n) = next {
                    self.head = n;
                }
            }
        }
        match next {
            Some(n) => arena[n].prev = prev,
            None => {
                if let Some(p) = prev {
                    self.tail = p;
                }
            }
        }
        self.len -= 1;
        self.len > 0
    }

    /// Entry keys from head to tail.
    pub(crate) fn keys<'a, V>(&self, arena: &'a Arena<V>) -> ChainKeys<'a, V> {
        ChainKeys {
            arena,
            cur: Some(self.head),
        }
    }

    #[cfg(test)]
    pub(crate) fn tail(&self) -> EntryKey {
        self.tail
    }
}

pub(crate) struct ChainKeys<'a, V> {
    arena: &'a Arena<V>,
    cur: Option<EntryKey>,
}

impl<'a, V> Iterator for ChainKeys<'a, V> {
    type Item = EntryKey;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cur?;
        self.cur = self.arena.get(k).and_then(|e| e.next);
        Some(k)
    }
}

/// Walk backwards from the tail; used to check link symmetry in tests.
#[cfg(test)]
pub(crate) fn keys_rev<V>(chain: &Chain, arena: &Arena<V>) -> Vec<EntryKey> {
    let mut out = Vec::new();
    let mut cur = Some(chain.tail());
    while let Some(k) = cur {
        out.push(k);
        cur = arena[k].prev;
    }
    out
}
