#![cfg(test)]

// Property tests for BoundedHashMap kept inside the crate so they can call
// the structural self-check.

use crate::bounded_hash_map::BoundedHashMap;
use crate::error::InsertError;
use crate::hasher::BuildPolyHasher;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations so shrinking moves toward earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Get(usize),
    Delete(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (0usize..=10, proptest::collection::vec("[a-zA-Z]{0,4}", 1..=12)).prop_flat_map(
        |(capacity, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let op = prop_oneof![
                3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
                1 => idx.clone().prop_map(OpI::Get),
                2 => idx.clone().prop_map(OpI::Delete),
                1 => "[a-zA-Z]{0,4}".prop_map(OpI::Contains),
                1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
                1 => Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..80).prop_map(move |ops| (capacity, pool.clone(), ops))
        },
    )
}

// Model: std HashMap plus the declared capacity.
// - New keys are admitted iff the model holds fewer than `capacity` keys
//   (and capacity > 0); existing keys are always overridden.
// - get/delete/contains agree with the model; delete returns the model's value.
// - iter yields exactly the model's key set.
// - occupancy, load and the structural self-check hold after every op.
fn run_scenario<S: BuildHasher>(
    mut sut: BoundedHashMap<i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let capacity = sut.capacity();
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Set(i, v) => {
                let k = &pool[i];
                let already = model.contains_key(k);
                match sut.insert(k.as_str(), v) {
                    Ok(prev) => {
                        prop_assert!(already || model.len() < capacity);
                        prop_assert_eq!(prev, model.insert(k.clone(), v));
                    }
                    Err(InsertError::Uninitialized) => {
                        prop_assert_eq!(capacity, 0);
                    }
                    Err(InsertError::CapacityExhausted { capacity: c }) => {
                        prop_assert_eq!(c, capacity);
                        prop_assert!(!already, "override must bypass the capacity gate");
                        prop_assert_eq!(model.len(), capacity);
                    }
                }
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Delete(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.delete(k), model.remove(k));
                prop_assert!(sut.get(k).is_none());
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.saturating_add(d);
                    let mv = model.get_mut(k).expect("present in model");
                    *mv = mv.saturating_add(d);
                } else {
                    prop_assert!(!model.contains_key(k));
                }
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<_> = sut.iter().map(|(k, _)| k.to_string()).collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        prop_assert_eq!(sut.occupancy(), model.len());
        prop_assert!(sut.occupancy() <= capacity);
        if capacity > 0 {
            prop_assert_eq!(sut.load(), model.len() as f64 / capacity as f64);
        } else {
            prop_assert_eq!(sut.load(), 0.0);
        }
        sut.assert_consistent();
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let sut = BoundedHashMap::with_capacity(capacity).unwrap();
        run_scenario(sut, &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_poly_hash((capacity, pool, ops) in arb_scenario()) {
        let sut = BoundedHashMap::with_capacity_and_hasher(capacity, BuildPolyHasher).unwrap();
        run_scenario(sut, &pool, ops)?;
    }
}

// Collision variant: every key hashes to bucket 0, so all operations go
// through one long chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((capacity, pool, ops) in arb_scenario()) {
        let sut = BoundedHashMap::with_capacity_and_hasher(capacity, ConstBuildHasher).unwrap();
        run_scenario(sut, &pool, ops)?;
    }

    // Property: sizing is a pure function of the requested capacity.
    #[test]
    fn prop_bucket_count_is_next_power_of_two(capacity in 0usize..100_000) {
        let m: BoundedHashMap<u8> = BoundedHashMap::with_capacity(capacity).unwrap();
        prop_assert_eq!(m.capacity(), capacity);
        let n = m.bucket_count();
        if capacity == 0 {
            prop_assert_eq!(n, 0);
        } else {
            prop_assert!(n.is_power_of_two());
            prop_assert!(n >= capacity);
            prop_assert!(n / 2 < capacity);
        }
    }
}
