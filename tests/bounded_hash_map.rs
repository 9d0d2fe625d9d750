// BoundedHashMap unit test suite (public API).
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Sizing: bucket_count == next_power_of_two(capacity), fixed for life.
// - Uniqueness: setting an existing key overrides in place.
// - Capacity gate: only new keys are refused once the map is full.
// - Absence: get/delete on missing keys return None without mutation.
// - Collisions: keys sharing a bucket stay independent.
// - Load factor: occupancy over declared capacity.
use bounded_hashmap::{BoundedHashMap, BuildPolyHasher, CapacityError, InsertError};

// Test: sizing of the bucket array.
// Verifies: capacities 0, 4, 129, 900 give 0, 4, 256, 1024 buckets while
// capacity() reports the requested figure.
#[test]
fn bucket_count_rounds_up() {
    for (cap, buckets) in [(0, 0), (4, 4), (129, 256), (900, 1024)] {
        let m: BoundedHashMap<String> = BoundedHashMap::with_capacity(cap).unwrap();
        assert_eq!(m.bucket_count(), buckets, "capacity {cap}");
        assert_eq!(m.capacity(), cap);
    }
}

// Test: string values round-trip.
#[test]
fn basic_string_set_and_get() {
    let mut m = BoundedHashMap::with_capacity(5).unwrap();
    assert!(m.set("1", "first".to_string()));
    assert!(m.set("2", "second".to_string()));
    assert!(m.set("3", "third".to_string()));
    assert_eq!(m.get("1").map(String::as_str), Some("first"));
    assert_eq!(m.get("2").map(String::as_str), Some("second"));
    assert_eq!(m.get("3").map(String::as_str), Some("third"));
    assert_eq!(m.occupancy(), 3);
}

// Test: integer values round-trip, filling the map exactly.
#[test]
fn integer_values_fill_to_capacity() {
    let mut m: BoundedHashMap<i64> = BoundedHashMap::with_capacity(100).unwrap();
    for i in 0..100 {
        assert!(m.set(format!("key{i}"), i * 7));
    }
    for i in 0..100 {
        assert_eq!(m.get(&format!("key{i}")), Some(&(i * 7)));
    }
    assert_eq!(m.occupancy(), 100);
    assert!(!m.set("one-more", 0));
}

// Test: override semantics.
// Verifies: occupancy is unchanged and the newest value wins.
#[test]
fn override_keeps_occupancy() {
    let mut m = BoundedHashMap::with_capacity(3).unwrap();
    assert!(m.set("k", 1));
    let before = m.occupancy();
    assert!(m.set("k", 2));
    assert_eq!(m.occupancy(), before);
    assert_eq!(m.get("k"), Some(&2));
}

// Test: capacity gate.
// Assumes: capacity 2.
// Verifies: the third distinct key is refused, re-setting an existing key
// still succeeds at full capacity.
#[test]
fn capacity_gate() {
    let mut m = BoundedHashMap::with_capacity(2).unwrap();
    assert!(m.set("a", 1));
    assert!(m.set("b", 2));
    assert!(!m.set("c", 3));
    assert_eq!(m.occupancy(), 2);
    assert_eq!(m.get("c"), None);
    assert!(m.set("b", 20));
    assert_eq!(m.get("b"), Some(&20));
    match m.insert("d", 4) {
        Err(InsertError::CapacityExhausted { capacity: 2 }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

// Test: deletion.
// Verifies: deleted keys become absent and occupancy drops by one;
// deleting an absent key is a no-op.
#[test]
fn delete_present_and_absent() {
    let mut m = BoundedHashMap::with_capacity(4).unwrap();
    m.set("a", "x".to_string());
    m.set("b", "y".to_string());
    assert_eq!(m.delete("a").as_deref(), Some("x"));
    assert_eq!(m.get("a"), None);
    assert_eq!(m.occupancy(), 1);

    assert_eq!(m.delete("a"), None);
    assert_eq!(m.delete("never"), None);
    assert_eq!(m.occupancy(), 1);
    assert_eq!(m.get("b").map(String::as_str), Some("y"));
}

// Test: a value that looks empty is still distinguishable from absence.
#[test]
fn empty_value_is_not_absence() {
    let mut m = BoundedHashMap::with_capacity(2).unwrap();
    m.set("blank", String::new());
    assert_eq!(m.get("blank").map(String::as_str), Some(""));
    assert_eq!(m.get("other"), None);
    assert!(m.set("", "empty key".to_string()));
    assert_eq!(m.get("").map(String::as_str), Some("empty key"));
}

// Test: collision handling with the deterministic string hash.
// Assumes: "Aa" and "BB" share a hash value.
// Verifies: one bucket holds both; each is retrievable and independently
// deletable.
#[test]
fn colliding_keys_are_independent() {
    let mut m = BoundedHashMap::with_capacity_and_hasher(8, BuildPolyHasher).unwrap();
    assert!(m.set("Aa", 1));
    assert!(m.set("BB", 2));
    let idx = m.bucket_index("Aa").unwrap();
    assert_eq!(m.bucket_index("BB"), Some(idx));
    assert_eq!(m.chain_len(idx), 2);

    assert_eq!(m.delete("BB"), Some(2));
    assert_eq!(m.get("Aa"), Some(&1));
    assert_eq!(m.chain_len(idx), 1);

    assert!(m.set("BB", 3));
    assert_eq!(m.delete("Aa"), Some(1));
    assert_eq!(m.get("BB"), Some(&3));
    assert_eq!(m.chain_len(idx), 1);
}

// Test: load factor.
// Verifies: 3 of 5 is 0.6, unchanged by an override; 3 of 3 is 1.0; an
// uninitialized map reports 0.
#[test]
fn load_factor() {
    let mut m = BoundedHashMap::with_capacity(5).unwrap();
    m.set("a", 1);
    m.set("b", 2);
    m.set("c", 3);
    assert_eq!(m.load(), 0.6);
    m.set("a", 10);
    assert_eq!(m.load(), 0.6);

    let mut full = BoundedHashMap::with_capacity(3).unwrap();
    full.set("a", 1);
    full.set("b", 2);
    full.set("c", 3);
    assert_eq!(full.load(), 1.0);

    let empty: BoundedHashMap<i32> = BoundedHashMap::new();
    assert_eq!(empty.load(), 0.0);
}

// Test: uninitialized maps.
// Verifies: no buckets, every operation fails quietly.
#[test]
fn uninitialized_map() {
    let mut m: BoundedHashMap<i32> = BoundedHashMap::default();
    assert_eq!(m.bucket_count(), 0);
    assert_eq!(m.capacity(), 0);
    assert!(!m.set("a", 1));
    assert_eq!(m.insert("a", 1), Err(InsertError::Uninitialized));
    assert_eq!(m.get("a"), None);
    assert_eq!(m.delete("a"), None);
    assert_eq!(m.occupancy(), 0);
}

// Test: invalid construction arguments are errors, not coercions.
#[test]
fn negative_capacity_rejected() {
    let err = BoundedHashMap::<i32>::try_with_capacity(-5).unwrap_err();
    assert!(matches!(err, CapacityError::Negative(-5)));
    assert_eq!(err.to_string(), "capacity must not be negative (got -5)");
}

// Test: iteration and Debug formatting cover exactly the live entries.
#[test]
fn iteration_matches_contents() {
    let mut m = BoundedHashMap::with_capacity(10).unwrap();
    for (i, k) in ["x", "y", "z", "w"].iter().enumerate() {
        m.set(*k, i);
    }
    m.delete("y");
    let mut seen: Vec<_> = (&m).into_iter().map(|(k, v)| (k.to_string(), *v)).collect();
    seen.sort();
    assert_eq!(
        seen,
        [
            ("w".to_string(), 3),
            ("x".to_string(), 0),
            ("z".to_string(), 2)
        ]
    );
}
