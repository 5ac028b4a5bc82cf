//! Image LRU - A bounded in-memory cache of decoded images
//!
//! Stores decoded images keyed by source path and evicts least recently used
//! entries once their combined weight exceeds a memory budget.

pub mod cache;
pub mod config;
pub mod error;
pub mod image;
pub mod tasks;

pub use cache::{BoundedCache, CacheStats, Weigher};
pub use config::Config;
pub use error::{ImageCacheError, Result};
pub use image::{BoundedImageCache, ImageDecoder, ImageLoader, PixelFormat, RasterImage};
pub use tasks::spawn_stats_reporter;
