//! Stats Report Task
//!
//! Background task that periodically logs a cache statistics snapshot.
//! It only reads; eviction always happens inline in `put`.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::{BoundedCache, Weigher};

/// Spawns a background task that logs cache statistics every interval.
///
/// The lock is held only while the snapshot is copied, never across an
/// await point.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `report_interval_secs` - Interval in seconds between reports
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(BoundedImageCache::with_capacity_kib(65_536)?);
/// let reporter = spawn_stats_reporter(cache.clone(), 5);
/// // Later, during shutdown:
/// reporter.abort();
/// ```
pub fn spawn_stats_reporter<V, W>(
    cache: Arc<BoundedCache<V, W>>,
    report_interval_secs: u64,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
    W: Weigher<V> + 'static,
{
    let interval = Duration::from_secs(report_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting stats reporter with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let stats = cache.stats();
            info!(
                hits = stats.hits,
                misses = stats.misses,
                evictions = stats.evictions,
                entries = stats.total_entries,
                weight = stats.current_weight,
                capacity = stats.capacity,
                hit_rate = stats.hit_rate(),
                "cache stats"
            );
        }
    })
}
