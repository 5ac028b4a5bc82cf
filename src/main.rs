//! Image LRU - browse simulation
//!
//! Drives a shared image cache with several concurrent loaders scrolling over
//! overlapping page windows, then prints the final statistics as JSON.

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinSet;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use image_lru::{
    spawn_stats_reporter, BoundedImageCache, Config, ImageCacheError, ImageDecoder, ImageLoader,
    PixelFormat, RasterImage,
};

/// Pages in the simulated gallery
const PAGES: usize = 240;
/// Load requests issued by each worker
const STEPS_PER_WORKER: usize = 2_000;

/// Stands in for a real decoder: every fifth page is a full-resolution
/// image, the rest are thumbnails.
struct SyntheticDecoder;

impl ImageDecoder for SyntheticDecoder {
    fn decode(&self, path: &str) -> image_lru::Result<RasterImage> {
        let index: usize = path
            .strip_prefix("page-")
            .and_then(|rest| rest.strip_suffix(".png"))
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| ImageCacheError::Decode {
                path: path.to_string(),
                reason: "not a gallery page".to_string(),
            })?;

        let side = if index % 5 == 0 { 512 } else { 128 };
        Ok(RasterImage::blank(side, side, PixelFormat::Rgba8888))
    }
}

/// Main entry point for the browse simulation.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the image cache sized from the configured memory figures
/// 4. Start the background stats reporter
/// 5. Run the loader workers until done or interrupted
/// 6. Print final statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting image cache browse simulation");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_memory={}KiB, fraction=1/{}, capacity={}KiB, workers={}",
        config.max_memory_kib,
        config.cache_fraction,
        config.capacity_kib(),
        config.loader_workers
    );

    let cache = Arc::new(
        BoundedImageCache::from_config(&config).context("failed to size the image cache")?,
    );
    let reporter = spawn_stats_reporter(cache.clone(), config.report_interval);

    let mut workers = JoinSet::new();
    for worker in 0..config.loader_workers {
        let loader = ImageLoader::new(cache.clone(), SyntheticDecoder)
            .with_horizontal_mirror(worker % 2 == 1);
        workers.spawn(browse(worker, loader));
    }

    let interrupted = tokio::select! {
        _ = async { while workers.join_next().await.is_some() {} } => false,
        _ = signal::ctrl_c() => true,
    };
    if interrupted {
        warn!("Received Ctrl+C, stopping loaders");
        workers.abort_all();
    } else {
        info!("All loaders finished");
    }

    reporter.abort();

    let stats = cache.stats();
    println!(
        "{}",
        serde_json::to_string_pretty(&stats).context("failed to serialize stats")?
    );
    info!(hit_rate = stats.hit_rate(), "Simulation complete");
    Ok(())
}

/// Scrolls back and forth over a window of pages that drifts forward.
async fn browse(worker: usize, loader: ImageLoader<SyntheticDecoder>) {
    let window = 24;
    for step in 0..STEPS_PER_WORKER {
        let base = (worker * 11 + step / 40) % PAGES;
        let offset = if (step / window) % 2 == 0 {
            step % window
        } else {
            window - 1 - step % window
        };
        let path = format!("page-{}.png", (base + offset) % PAGES);

        if let Err(err) = loader.load(&path) {
            warn!(worker, path, error = %err, "load failed");
        }
        tokio::task::yield_now().await;
    }
}
