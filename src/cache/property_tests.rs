//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the weight bound, LRU order and accounting under
//! arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_CAPACITY: u64 = 100;

type WeightStore = CacheStore<i64, fn(&i64) -> i64>;

/// Values carry their own weight.
fn weight_store(capacity: u64) -> WeightStore {
    CacheStore::new(capacity, (|v: &i64| *v) as fn(&i64) -> i64).unwrap()
}

// == Strategies ==
/// Small key space so puts regularly replace and gets regularly hit
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, weight: i64 },
    Get { key: String },
    Remove { key: String },
    Clear,
}

fn cache_op_strategy(max_weight: i64) -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        6 => (key_strategy(), 0..=max_weight)
            .prop_map(|(key, weight)| CacheOp::Put { key, weight }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
        1 => Just(CacheOp::Clear),
    ]
}

/// Straightforward list-based model: front = most recently used.
#[derive(Default)]
struct Model {
    order: Vec<(String, u64)>,
}

impl Model {
    fn total(&self) -> u64 {
        self.order.iter().map(|(_, w)| w).sum()
    }

    fn take(&mut self, key: &str) -> Option<(String, u64)> {
        let pos = self.order.iter().position(|(k, _)| k == key)?;
        Some(self.order.remove(pos))
    }

    fn put(&mut self, key: String, weight: u64, capacity: u64) {
        self.take(&key);
        self.order.insert(0, (key, weight));
        while self.total() > capacity && self.order.len() > 1 {
            self.order.pop();
        }
    }

    fn get(&mut self, key: &str) -> bool {
        match self.take(key) {
            Some(entry) => {
                self.order.insert(0, entry);
                true
            }
            None => false,
        }
    }

    fn keys(&self) -> Vec<String> {
        self.order.iter().map(|(k, _)| k.clone()).collect()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Entries individually within capacity never push the total over it.
    #[test]
    fn prop_weight_bound_holds(
        ops in prop::collection::vec(cache_op_strategy(TEST_CAPACITY as i64), 1..200)
    ) {
        let mut store = weight_store(TEST_CAPACITY);

        for op in ops {
            match op {
                CacheOp::Put { key, weight } => store.put(key, Arc::new(weight)).unwrap(),
                CacheOp::Get { key } => { store.get(&key); }
                CacheOp::Remove { key } => { store.remove(&key); }
                CacheOp::Clear => { store.clear(); }
            }
            prop_assert!(
                store.current_weight() <= TEST_CAPACITY,
                "weight {} exceeds capacity {}",
                store.current_weight(),
                TEST_CAPACITY
            );
        }
    }

    // Residency, recency order and total weight track a naive model exactly,
    // including the oversized single-entry case.
    #[test]
    fn prop_matches_reference_model(
        ops in prop::collection::vec(cache_op_strategy(150), 1..150)
    ) {
        let mut store = weight_store(TEST_CAPACITY);
        let mut model = Model::default();
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Put { key, weight } => {
                    store.put(key.clone(), Arc::new(weight)).unwrap();
                    model.put(key, weight as u64, TEST_CAPACITY);
                }
                CacheOp::Get { key } => {
                    let hit = store.get(&key).is_some();
                    prop_assert_eq!(hit, model.get(&key));
                    if hit { expected_hits += 1 } else { expected_misses += 1 }
                }
                CacheOp::Remove { key } => {
                    prop_assert_eq!(store.remove(&key).is_some(), model.take(&key).is_some());
                }
                CacheOp::Clear => {
                    store.clear();
                    model.order.clear();
                }
            }
            prop_assert_eq!(store.keys(), model.keys());
            prop_assert_eq!(store.current_weight(), model.total());
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, store.len());
        prop_assert_eq!(stats.current_weight, store.current_weight());
    }

    // The most recent put always survives its own call.
    #[test]
    fn prop_put_never_evicts_itself(
        seed in prop::collection::vec((key_strategy(), 0..=100i64), 0..30),
        key in key_strategy(),
        weight in 0..=300i64
    ) {
        let mut store = weight_store(TEST_CAPACITY);
        for (k, w) in seed {
            store.put(k, Arc::new(w)).unwrap();
        }

        store.put(key.clone(), Arc::new(weight)).unwrap();

        let keys = store.keys();
        prop_assert_eq!(keys.first(), Some(&key));
        let stored = store.get(&key);
        prop_assert_eq!(stored.as_deref(), Some(&weight));
        if weight as u64 > TEST_CAPACITY {
            prop_assert_eq!(store.len(), 1);
            prop_assert_eq!(store.current_weight(), weight as u64);
        }
    }

    // Replacing a key leaves one entry whose weight is the new value's.
    #[test]
    fn prop_replacement_semantics(
        key in key_strategy(),
        first in 0..=50i64,
        second in 0..=50i64
    ) {
        let mut store = weight_store(TEST_CAPACITY);

        store.put(key.clone(), Arc::new(first)).unwrap();
        store.put(key.clone(), Arc::new(second)).unwrap();

        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(store.weight_of(&key), Some(second as u64));
        prop_assert_eq!(store.current_weight(), second as u64);
    }

    // Negative weights are refused without touching existing state.
    #[test]
    fn prop_negative_weight_leaves_store_untouched(
        seed in prop::collection::hash_map(key_strategy(), 0..=30i64, 0..10),
        key in key_strategy(),
        weight in i64::MIN..0
    ) {
        let mut store = weight_store(TEST_CAPACITY);
        for (k, w) in seed {
            store.put(k, Arc::new(w)).unwrap();
        }
        let before: HashMap<String, Option<u64>> = store
            .keys()
            .into_iter()
            .map(|k| {
                let w = store.weight_of(&k);
                (k, w)
            })
            .collect();
        let keys_before = store.keys();
        let weight_before = store.current_weight();

        prop_assert!(store.put(key, Arc::new(weight)).is_err());

        prop_assert_eq!(store.keys(), keys_before);
        prop_assert_eq!(store.current_weight(), weight_before);
        for (k, w) in before {
            prop_assert_eq!(store.weight_of(&k), w);
        }
    }
}
