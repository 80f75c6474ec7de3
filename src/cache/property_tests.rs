//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the store's accounting, capacity and eviction
//! behavior over generated operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::CacheStore;
use crate::config::CacheConfig;
use regex::Regex;

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;

fn test_store(max_entries: usize) -> CacheStore<String> {
    CacheStore::new(&CacheConfig {
        max_entries,
        default_ttl: Duration::from_secs(300),
        ..CacheConfig::default()
    })
}

// == Strategies ==
/// Generates valid cache keys (non-empty, within length limit)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}"
}

/// Generates cache values
fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,256}"
}

/// A cache operation for sequence-based properties
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        valid_key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations, the counters reflect exactly the
    // hits, misses, sets and successful deletes that occurred.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = test_store(TEST_MAX_ENTRIES);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_sets: u64 = 0;
        let mut expected_deletes: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key, value, None).unwrap();
                    expected_sets += 1;
                }
                CacheOp::Get { key } => {
                    match store.get(&key) {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                }
                CacheOp::Delete { key } => {
                    if store.delete(&key) {
                        expected_deletes += 1;
                    }
                }
            }
        }

        let snapshot = store.snapshot();
        prop_assert_eq!(snapshot.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(snapshot.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(snapshot.sets, expected_sets, "Sets mismatch");
        prop_assert_eq!(snapshot.deletes, expected_deletes, "Deletes mismatch");
        prop_assert_eq!(snapshot.total_items, store.len(), "Total items mismatch");
    }

    // Storing a pair and retrieving it before expiration returns the exact
    // value that was stored.
    #[test]
    fn prop_roundtrip_storage(key in valid_key_strategy(), value in valid_value_strategy()) {
        let mut store = test_store(TEST_MAX_ENTRIES);

        store.set(key.clone(), value.clone(), None).unwrap();

        prop_assert_eq!(store.get(&key), Some(value), "Round-trip value mismatch");
    }

    // After a delete, a subsequent get misses.
    #[test]
    fn prop_delete_removes_entry(key in valid_key_strategy(), value in valid_value_strategy()) {
        let mut store = test_store(TEST_MAX_ENTRIES);

        store.set(key.clone(), value, None).unwrap();
        prop_assert!(store.get(&key).is_some(), "Key should exist before delete");

        prop_assert!(store.delete(&key), "Delete should report a removal");
        prop_assert!(store.get(&key).is_none(), "Key should not exist after delete");
    }

    // Storing V1 then V2 under the same key yields V2.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        v1 in valid_value_strategy(),
        v2 in valid_value_strategy(),
    ) {
        let mut store = test_store(TEST_MAX_ENTRIES);

        store.set(key.clone(), v1, None).unwrap();
        store.set(key.clone(), v2.clone(), None).unwrap();

        prop_assert_eq!(store.get(&key), Some(v2));
        prop_assert_eq!(store.len(), 1);
    }

    // The table never holds more than max_entries entries, whatever the
    // sequence of sets.
    #[test]
    fn prop_capacity_never_exceeded(
        max_entries in 1usize..10,
        ops in prop::collection::vec(
            (valid_key_strategy(), valid_value_strategy()),
            1..40,
        ),
    ) {
        let mut store = test_store(max_entries);

        for (key, value) in ops {
            store.set(key, value, None).unwrap();
            prop_assert!(
                store.len() <= max_entries,
                "Capacity exceeded: {} > {}", store.len(), max_entries
            );
        }
    }

    // Filling a cache of size n with n distinct keys and then inserting one
    // more evicts the first (never re-accessed) key and only that key.
    #[test]
    fn prop_eviction_removes_least_recently_used(n in 2usize..8) {
        let mut store = test_store(n);

        for i in 0..=n {
            store.set(format!("key{}", i), format!("value{}", i), None).unwrap();
        }

        prop_assert_eq!(store.len(), n);
        prop_assert!(!store.contains("key0"), "Least recently used key should be evicted");
        for i in 1..=n {
            prop_assert!(store.contains(&format!("key{}", i)), "Newer key should survive");
        }
        prop_assert_eq!(store.snapshot().evictions, 1);
    }

    // Pattern deletion removes exactly the matching keys.
    #[test]
    fn prop_pattern_delete_exactness(
        user_keys in prop::collection::hash_set("user_[a-z0-9]{1,16}", 0..10),
        other_keys in prop::collection::hash_set("post_[a-z0-9]{1,16}", 0..10),
    ) {
        let mut store = test_store(TEST_MAX_ENTRIES);

        for key in user_keys.iter().chain(other_keys.iter()) {
            store.set(key.clone(), "value".to_string(), None).unwrap();
        }

        let pattern = Regex::new("^user_").unwrap();
        let removed = store.delete_pattern(&pattern);

        prop_assert_eq!(removed, user_keys.len());
        for key in &user_keys {
            prop_assert!(!store.contains(key), "Matching key should be removed");
        }
        let survivors: HashSet<_> = other_keys.iter()
            .filter(|key| store.contains(key))
            .cloned()
            .collect();
        prop_assert_eq!(survivors, other_keys, "Non-matching keys must be intact");
    }
}
