//! Cache Store Module
//!
//! Single-threaded cache engine combining HashMap storage with LRU tracking
//! and weight-based eviction. [`BoundedCache`](super::BoundedCache) wraps it
//! in a lock for shared use.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, LruTracker, Weigher};
use crate::error::{ImageCacheError, Result};

/// Largest accepted capacity. With every weight and the resident total at or
/// below this, `total - replaced + weight` always fits in a `u64`.
pub const MAX_CAPACITY: u64 = i64::MAX as u64;

// == Cache Store ==
/// Weighted LRU storage.
///
/// `current_weight` always equals the sum of `weight` over `entries`, and
/// `lru` tracks exactly the keys of `entries`.
#[derive(Debug)]
pub struct CacheStore<V, W> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Sum of resident weights
    current_weight: u64,
    /// Maximum total weight
    capacity: u64,
    /// Cost function applied once per `put`
    weigher: W,
}

impl<V, W: Weigher<V>> CacheStore<V, W> {
    // == Constructor ==
    /// Creates a new CacheStore bounded by `capacity` weight units.
    ///
    /// # Errors
    /// `ImageCacheError::Configuration` if `capacity` is zero or above
    /// `i64::MAX`, the largest weight a weigher can report.
    pub fn new(capacity: u64, weigher: W) -> Result<Self> {
        if capacity == 0 {
            return Err(ImageCacheError::Configuration(
                "capacity must be a positive integer".to_string(),
            ));
        }
        if capacity > MAX_CAPACITY {
            return Err(ImageCacheError::Configuration(format!(
                "capacity {} exceeds the maximum of {}",
                capacity, MAX_CAPACITY
            )));
        }

        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(capacity),
            current_weight: 0,
            capacity,
            weigher,
        })
    }

    // == Put ==
    /// Stores a value under `key`, replacing any previous value.
    ///
    /// The key becomes the most recently used. Afterwards, least recently used
    /// entries are evicted until the total weight fits the capacity again. The
    /// entry just stored is never evicted by its own `put`; if it alone exceeds
    /// the capacity it stays resident by itself.
    ///
    /// # Errors
    /// `ImageCacheError::InvariantViolation` if the weigher returns a negative
    /// weight. The store is unchanged.
    pub fn put(&mut self, key: String, value: Arc<V>) -> Result<()> {
        let raw = self.weigher.weigh(&value);
        let weight = u64::try_from(raw).map_err(|_| {
            ImageCacheError::InvariantViolation(format!(
                "weigher returned negative weight {} for key '{}'",
                raw, key
            ))
        })?;

        let replaced = self.entries.get(&key).map_or(0, |entry| entry.weight);
        let total = self.current_weight - replaced + weight;

        self.lru.touch(&key);
        self.entries.insert(key.clone(), CacheEntry::new(value, weight));
        self.current_weight = total;
        self.stats.record_put();
        debug!(key = %key, weight, replaced, total, "cache put");

        self.trim_to_capacity();

        if self.current_weight > self.capacity {
            warn!(
                key = %key,
                weight,
                capacity = self.capacity,
                "entry exceeds capacity on its own; kept resident alone"
            );
        }

        self.sync_residency();
        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// A miss returns `None`; it is counted but is not an error.
    pub fn get(&mut self, key: &str) -> Option<Arc<V>> {
        match self.entries.get(key) {
            Some(entry) => {
                let value = entry.share();
                self.lru.touch(key);
                self.stats.record_hit();
                debug!(key, "cache hit");
                Some(value)
            }
            None => {
                self.stats.record_miss();
                debug!(key, "cache miss");
                None
            }
        }
    }

    // == Contains ==
    /// Checks residency without touching recency or stats.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Remove ==
    /// Drops a single entry, returning the cache's handle to its value.
    pub fn remove(&mut self, key: &str) -> Option<Arc<V>> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(key);
        self.current_weight -= entry.weight;
        self.sync_residency();
        Some(entry.value)
    }

    // == Clear ==
    /// Drops every entry and resets the weight to zero.
    ///
    /// Returns the number of entries that were resident.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.current_weight = 0;
        self.sync_residency();
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    /// Resident keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.lru.iter().cloned().collect()
    }

    /// Weight charged for `key`, if resident.
    pub fn weight_of(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.weight)
    }

    pub fn current_weight(&self) -> u64 {
        self.current_weight
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evicts LRU entries while over capacity and more than one entry remains.
    fn trim_to_capacity(&mut self) {
        while self.current_weight > self.capacity && self.entries.len() > 1 {
            let Some(victim) = self.lru.evict_oldest() else {
                break;
            };
            if let Some(entry) = self.entries.remove(&victim) {
                self.current_weight -= entry.weight;
                self.stats.record_eviction();
                debug!(key = %victim, weight = entry.weight, "evicted least recently used entry");
            }
        }
    }

    fn sync_residency(&mut self) {
        self.stats.set_residency(self.entries.len(), self.current_weight);
    }
}
