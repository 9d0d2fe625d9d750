//! bounded-hashmap: a fixed-capacity map from string keys to values,
//! using separate chaining over a power-of-two bucket array.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a map whose maximum number of keys is declared once, up front,
//!   and never grows. Full maps refuse new keys instead of resizing.
//! - Layers:
//!   - `chain`: per-bucket doubly linked lists threaded through one
//!     table-wide `SlotMap` arena. Append at the tail, unlink anywhere.
//!   - `BoundedHashMap<V, S>`: bucket sizing, hash-to-index masking,
//!     duplicate-key override, the capacity gate and load accounting.
//!   - `shell`: a line-oriented driver over any `BufRead`/`Write` pair.
//!
//! Sizing
//! - `bucket_count = next_power_of_two(capacity)`, fixed at construction,
//!   so the bucket index is `hash & (bucket_count - 1)`.
//! - Capacity 0 (or `BoundedHashMap::new()`) yields no buckets; every
//!   operation then reports failure or absence.
//!
//! Insert semantics
//! - Setting an existing key replaces its value in place and never fails
//!   for capacity reasons.
//! - Setting a new key fails once `occupancy() == capacity()`.
//!
//! Load factor
//! - `occupancy / declared capacity`, not over the bucket count.
//!
//! Notes and non-goals
//! - No resizing or rehashing.
//! - Single-threaded; wrap the whole map in a lock for shared use.
//! - Keys are `String`; lookups take `&str`.
//! - Iteration order is bucket order, then insertion order within a
//!   chain; nothing stronger is promised.

pub mod bounded_hash_map;
mod bounded_hash_map_proptest;
mod chain;
pub mod error;
pub mod hasher;
pub mod shell;

// Public surface
pub use bounded_hash_map::{next_power_of_two, BoundedHashMap, Iter};
pub use error::{CapacityError, InsertError, ShellError};
pub use hasher::{BuildPolyHasher, PolyHasher};
pub use shell::{Shell, ShellConfig, ShellValue, ValueKind};
