//! Cache Entry Module
//!
//! Defines the structure for individual resident entries.

use std::sync::Arc;

// == Cache Entry ==
/// A resident value together with the weight charged for it.
///
/// The weight is computed once at insertion and never recomputed, so the
/// amount subtracted on removal always matches the amount that was added.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// The stored value, shared read-only with callers of `get`
    pub value: Arc<V>,
    /// Cost charged against the capacity, in the cache's weight unit
    pub weight: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    pub fn new(value: Arc<V>, weight: u64) -> Self {
        Self { value, weight }
    }

    /// Returns another handle to the stored value.
    pub fn share(&self) -> Arc<V> {
        Arc::clone(&self.value)
    }
}
