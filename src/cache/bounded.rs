//! Thread-safe bounded cache
//!
//! Wraps [`CacheStore`] in a single exclusive lock. Every call, lookups
//! included, takes the lock because a hit rewrites the recency order.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::cache::{CacheStats, CacheStore, Weigher};
use crate::error::Result;

// == Bounded Cache ==
/// A weight-bounded LRU cache safe to share across threads.
///
/// Values are handed out as `Arc<V>`: a caller's handle stays valid after the
/// cache evicts its own slot.
#[derive(Debug)]
pub struct BoundedCache<V, W> {
    inner: Mutex<CacheStore<V, W>>,
}

impl<V, W: Weigher<V>> BoundedCache<V, W> {
    /// Creates a cache bounded by `capacity` weight units.
    ///
    /// # Errors
    /// `ImageCacheError::Configuration` if `capacity` is zero.
    pub fn new(capacity: u64, weigher: W) -> Result<Self> {
        let store = CacheStore::new(capacity, weigher)?;
        info!(capacity, "bounded cache created");
        Ok(Self {
            inner: Mutex::new(store),
        })
    }

    /// Stores `value` under `key`, evicting LRU entries as needed.
    pub fn put(&self, key: impl Into<String>, value: V) -> Result<()> {
        self.put_shared(key, Arc::new(value))
    }

    /// Like [`put`](Self::put) for a value the caller already shares.
    pub fn put_shared(&self, key: impl Into<String>, value: Arc<V>) -> Result<()> {
        let key = key.into();
        self.inner.lock().put(key, value)
    }

    /// Looks up `key`, refreshing its recency on a hit.
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        self.inner.lock().get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Invalidates a single key.
    pub fn remove(&self, key: &str) -> Option<Arc<V>> {
        self.inner.lock().remove(key)
    }

    /// Drops every resident entry. Calling it on an empty cache does nothing.
    pub fn clear(&self) {
        let dropped = self.inner.lock().clear();
        if dropped > 0 {
            info!(dropped, "cache cleared");
        }
    }

    /// Snapshot of the counters, taken under the lock.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Resident keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys()
    }

    pub fn current_weight(&self) -> u64 {
        self.inner.lock().current_weight()
    }

    pub fn capacity(&self) -> u64 {
        self.inner.lock().capacity()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
