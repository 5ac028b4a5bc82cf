//! Decoded raster images and their cache weight.

use crate::cache::{BoundedCache, Weigher};
use crate::config::Config;
use crate::error::{ImageCacheError, Result};

/// In-memory pixel layout of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba8888,
    Rgb565,
    Alpha8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8888 => 4,
            PixelFormat::Rgb565 => 2,
            PixelFormat::Alpha8 => 1,
        }
    }
}

// == Raster Image ==
/// A decoded image held as a tightly packed, row-major pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wraps an already decoded buffer.
    ///
    /// # Errors
    /// `ImageCacheError::InvariantViolation` if the buffer length does not
    /// match `width * height * bytes_per_pixel`.
    pub fn new(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(ImageCacheError::InvariantViolation(format!(
                "{}x{} {:?} image needs {} bytes, got {}",
                width,
                height,
                format,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// A zero-filled image of the given size.
    pub fn blank(width: u32, height: u32, format: PixelFormat) -> Self {
        let len = width as usize * height as usize * format.bytes_per_pixel();
        Self {
            width,
            height,
            format,
            pixels: vec![0; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_count(&self) -> u64 {
        self.pixels.len() as u64
    }

    /// Returns a copy flipped around the vertical axis.
    pub fn mirrored_horizontally(&self) -> Self {
        let bpp = self.format.bytes_per_pixel();
        let row_len = self.width as usize * bpp;
        let mut pixels = Vec::with_capacity(self.pixels.len());

        if row_len > 0 {
            for row in self.pixels.chunks_exact(row_len) {
                for pixel in row.chunks_exact(bpp).rev() {
                    pixels.extend_from_slice(pixel);
                }
            }
        }

        Self {
            width: self.width,
            height: self.height,
            format: self.format,
            pixels,
        }
    }
}

// == Raster Weigher ==
/// Charges an image its pixel buffer size in whole KiB, rounding down.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterWeigher;

impl Weigher<RasterImage> for RasterWeigher {
    fn weigh(&self, image: &RasterImage) -> i64 {
        i64::try_from(image.byte_count() / 1024).unwrap_or(i64::MAX)
    }
}

/// Decoded images keyed by source path, bounded in KiB.
pub type BoundedImageCache = BoundedCache<RasterImage, RasterWeigher>;

impl BoundedCache<RasterImage, RasterWeigher> {
    /// Creates an image cache holding at most `capacity_kib` KiB of pixels.
    pub fn with_capacity_kib(capacity_kib: u64) -> Result<Self> {
        Self::new(capacity_kib, RasterWeigher)
    }

    /// Sizes the cache from the host memory figures in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::with_capacity_kib(config.capacity_kib())
    }
}
