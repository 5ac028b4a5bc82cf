//! Image Loader
//!
//! Cache-first loading of decoded images: look the path up, and only on a
//! miss hand it to the external decoder and store the result.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{ImageCacheError, Result};
use crate::image::{BoundedImageCache, RasterImage};

/// Key prefix for the horizontally mirrored variant of a path.
pub const HORIZONTAL_MIRROR_PREFIX: &str = "horizontal_mirror_prefix";

// == Image Decoder ==
/// Produces a decoded image from a source path.
///
/// File access and format decoding live behind this trait; the loader never
/// touches the filesystem itself.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, path: &str) -> Result<RasterImage>;
}

// == Image Loader ==
/// Loads images through a shared [`BoundedImageCache`].
pub struct ImageLoader<D> {
    cache: Arc<BoundedImageCache>,
    decoder: D,
    horizontal_mirror: bool,
}

impl<D: ImageDecoder> ImageLoader<D> {
    pub fn new(cache: Arc<BoundedImageCache>, decoder: D) -> Self {
        Self {
            cache,
            decoder,
            horizontal_mirror: false,
        }
    }

    /// Serve mirrored copies, cached under their own prefixed key.
    pub fn with_horizontal_mirror(mut self, enabled: bool) -> Self {
        self.horizontal_mirror = enabled;
        self
    }

    pub fn cache(&self) -> &Arc<BoundedImageCache> {
        &self.cache
    }

    /// The cache key used for `path` under this loader's settings.
    pub fn cache_key(&self, path: &str) -> String {
        if self.horizontal_mirror {
            format!("{}{}", HORIZONTAL_MIRROR_PREFIX, path)
        } else {
            path.to_string()
        }
    }

    // == Load ==
    /// Returns the decoded image for `path`, decoding at most once while it
    /// stays resident.
    ///
    /// # Errors
    /// `ImageCacheError::Decode` if the decoder fails; nothing is cached then.
    pub fn load(&self, path: &str) -> Result<Arc<RasterImage>> {
        let key = self.cache_key(path);
        if let Some(image) = self.cache.get(&key) {
            debug!(path, "served from cache");
            return Ok(image);
        }

        let decoded = self.decoder.decode(path).map_err(|err| {
            warn!(path, error = %err, "decode failed");
            match err {
                ImageCacheError::Decode { .. } => err,
                other => ImageCacheError::Decode {
                    path: path.to_string(),
                    reason: other.to_string(),
                },
            }
        })?;

        let image = if self.horizontal_mirror {
            decoded.mirrored_horizontally()
        } else {
            decoded
        };
        info!(
            path,
            width = image.width(),
            height = image.height(),
            format = ?image.format(),
            "decoded image"
        );

        let image = Arc::new(image);
        self.cache.put_shared(key, Arc::clone(&image))?;
        Ok(image)
    }

    // == Load Sequence ==
    /// Loads a frame sequence in order, skipping frames that fail to decode.
    pub fn load_sequence<I, S>(&self, paths: I) -> Vec<Arc<RasterImage>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .filter_map(|path| match self.load(path.as_ref()) {
                Ok(image) => Some(image),
                Err(err) => {
                    warn!(path = path.as_ref(), error = %err, "skipping frame");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PixelFormat;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Decodes `*.png` into a 2x1 image whose first pixel encodes the path
    /// length; anything else fails.
    #[derive(Default)]
    struct CountingDecoder {
        calls: AtomicUsize,
    }

    impl ImageDecoder for CountingDecoder {
        fn decode(&self, path: &str) -> Result<RasterImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !path.ends_with(".png") {
                return Err(ImageCacheError::Decode {
                    path: path.to_string(),
                    reason: "unsupported format".to_string(),
                });
            }
            RasterImage::new(2, 1, PixelFormat::Alpha8, vec![path.len() as u8, 0])
        }
    }

    fn loader(capacity_kib: u64) -> ImageLoader<CountingDecoder> {
        let cache = Arc::new(BoundedImageCache::with_capacity_kib(capacity_kib).unwrap());
        ImageLoader::new(cache, CountingDecoder::default())
    }

    #[test]
    fn test_load_decodes_once() {
        let loader = loader(16);

        let first = loader.load("bubble/1.png").unwrap();
        let second = loader.load("bubble/1.png").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.decoder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(loader.cache().stats().hits, 1);
    }

    #[test]
    fn test_mirror_uses_prefixed_key() {
        let plain = loader(16);
        let cache = Arc::clone(plain.cache());
        let mirrored = ImageLoader::new(Arc::clone(&cache), CountingDecoder::default())
            .with_horizontal_mirror(true);

        let a = plain.load("f.png").unwrap();
        let b = mirrored.load("f.png").unwrap();

        assert_eq!(a.pixels(), &[5, 0]);
        assert_eq!(b.pixels(), &[0, 5]);
        assert!(cache.contains("f.png"));
        assert!(cache.contains("horizontal_mirror_prefixf.png"));
    }

    #[test]
    fn test_decode_failure_is_not_cached() {
        let loader = loader(16);

        let result = loader.load("notes.txt");

        assert!(matches!(result, Err(ImageCacheError::Decode { .. })));
        assert!(loader.cache().is_empty());
    }

    #[test]
    fn test_load_sequence_skips_failures() {
        let loader = loader(16);

        let frames = loader.load_sequence(["1.png", "broken.gif", "2.png"]);

        assert_eq!(frames.len(), 2);
        assert_eq!(loader.cache().keys(), vec!["2.png", "1.png"]);
    }
}
