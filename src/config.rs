//! Configuration Module
//!
//! Derives the cache budget and runtime knobs from environment variables.

use std::env;

use crate::error::{ImageCacheError, Result};

/// Runtime configuration parameters.
///
/// Available memory is measured by the host and handed in; this module only
/// turns it into a cache capacity.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum usable memory reported by the host, in KiB
    pub max_memory_kib: u64,
    /// Divisor applied to `max_memory_kib` to obtain the cache capacity
    pub cache_fraction: u64,
    /// Interval in seconds between stats reports
    pub report_interval: u64,
    /// Number of concurrent loaders driven by the simulation binary
    pub loader_workers: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_MEMORY_KIB` - Host-reported max memory in KiB (default: 524288)
    /// - `CACHE_FRACTION` - Divisor for the cache share (default: 8)
    /// - `REPORT_INTERVAL` - Stats report frequency in seconds (default: 5)
    /// - `LOADER_WORKERS` - Concurrent loaders in the simulation (default: 4)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_memory_kib: parse_var("MAX_MEMORY_KIB").unwrap_or(defaults.max_memory_kib),
            cache_fraction: parse_var("CACHE_FRACTION").unwrap_or(defaults.cache_fraction),
            report_interval: parse_var("REPORT_INTERVAL").unwrap_or(defaults.report_interval),
            loader_workers: parse_var("LOADER_WORKERS").unwrap_or(defaults.loader_workers),
        }
    }

    // == Capacity ==
    /// Cache capacity in KiB: one `cache_fraction`-th of the reported memory.
    pub fn capacity_kib(&self) -> u64 {
        self.max_memory_kib / self.cache_fraction.max(1)
    }

    // == Validate ==
    /// Rejects configurations that would yield a zero-capacity cache.
    pub fn validate(&self) -> Result<()> {
        if self.capacity_kib() == 0 {
            return Err(ImageCacheError::Configuration(format!(
                "derived capacity is 0 KiB (max_memory_kib={}, cache_fraction={})",
                self.max_memory_kib, self.cache_fraction
            )));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_memory_kib: 512 * 1024,
            cache_fraction: 8,
            report_interval: 5,
            loader_workers: 4,
        }
    }
}
