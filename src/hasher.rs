//! Deterministic polynomial string hash.
//!
//! `h = h * 31 + byte` over the key bytes with 32-bit wrapping, the same
//! recurrence used by the classic string hash code. Unlike `RandomState`
//! it is stable across runs, which makes bucket placement reproducible
//! (and lets tests pick colliding keys such as `"Aa"` and `"BB"`).

use core::hash::{BuildHasher, Hasher};

#[derive(Debug, Default, Clone, Copy)]
pub struct PolyHasher(u32);

impl Hasher for PolyHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.wrapping_mul(31).wrapping_add(u32::from(b));
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.0)
    }
}

/// `BuildHasher` for [`PolyHasher`]; usable as the `S` parameter of
/// `BoundedHashMap`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildPolyHasher;

impl BuildHasher for BuildPolyHasher {
    type Hasher = PolyHasher;
    fn build_hasher(&self) -> Self::Hasher {
        PolyHasher::default()
    }
}
