//! Entry weigher: assigns a cost to each cached value.
//!
//! The cache enforces `Σ weight(entry) ≤ capacity`. Weights are signed so
//! that a misbehaving cost function can be detected and rejected instead of
//! silently wrapping the running total.
//!
//! # Example
//! ```
//! use image_lru::cache::BoundedCache;
//!
//! // Cap at 64 KiB of payload, charging whole KiB per value.
//! let cache = BoundedCache::<Vec<u8>, _>::new(64, |v: &Vec<u8>| (v.len() / 1024) as i64).unwrap();
//! cache.put("blob", vec![0u8; 4096]).unwrap();
//! assert_eq!(cache.current_weight(), 4);
//! ```

/// Computes the cost of a cached value.
///
/// Implementations must be pure: the same value always weighs the same.
/// A negative result is a contract violation and makes `put` fail.
pub trait Weigher<V>: Send + Sync {
    fn weigh(&self, value: &V) -> i64;
}

impl<V, F> Weigher<V> for F
where
    F: Fn(&V) -> i64 + Send + Sync,
{
    #[inline]
    fn weigh(&self, value: &V) -> i64 {
        self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_weigher() {
        let weigher = |v: &String| v.len() as i64;
        assert_eq!(weigher.weigh(&"abcd".to_string()), 4);
    }
}
