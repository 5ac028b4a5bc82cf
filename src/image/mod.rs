//! Image Module
//!
//! Decoded raster values, their KiB weigher, and a cache-first loader.

mod loader;
mod raster;

pub use loader::{ImageDecoder, ImageLoader, HORIZONTAL_MIRROR_PREFIX};
pub use raster::{BoundedImageCache, PixelFormat, RasterImage, RasterWeigher};
