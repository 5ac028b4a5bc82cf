//! Cache Module
//!
//! Weight-bounded LRU storage for decoded images and other weighable payloads.

mod bounded;
mod entry;
mod lru;
mod stats;
mod store;
mod weigher;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use bounded::BoundedCache;
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use store::MAX_CAPACITY;
pub use weigher::Weigher;
