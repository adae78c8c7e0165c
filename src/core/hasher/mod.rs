//! # Hasher Module
//!
//! Computes 64-bit difference hashes for in-memory images.
//!
//! ## How It Works
//! 1. Convert the source to a 16-bit grayscale plane (parallel per row)
//! 2. Reduce the plane to a 9x8 grid (block averaging or Lanczos3)
//! 3. Compare each cell to the one on its right, one bit per comparison
//! 4. Compare fingerprints using Hamming distance
//!
//! Stage 2 only starts once every row of stage 1 has been written.
//!
//! ## Downsample Strategies
//! - **Block averaging** - self-contained, parallel per cell (default)
//! - **Lanczos3** - SIMD-accelerated resize via `fast_image_resize`
//!
//! The two strategies produce measurably different fingerprints for the
//! same image. Only compare fingerprints made with the same strategy.
//!
//! ## Example
//! ```rust,ignore
//! use dhash_core::core::hasher::{DownsampleKind, HasherConfig};
//!
//! let hasher = HasherConfig::new()
//!     .downsample(DownsampleKind::BlockAverage)
//!     .max_workers(4)
//!     .build()?;
//!
//! let fingerprint = hasher.hash(&image)?;
//! ```

mod algorithms;
pub mod fast_resize;
mod fingerprint;
mod grid;
mod luminance;
mod traits;

pub use algorithms::{encode, BlockAverager};
pub use fast_resize::LanczosResizer;
pub use fingerprint::{hamming_distance, Fingerprint};
pub use grid::{check_dimensions, DownsampleGrid, GRID_HEIGHT, GRID_WIDTH};
pub use luminance::{luminance, to_grayscale, GrayPlane};
pub use traits::{DownsampleKind, Downsampler};

use crate::core::source::PixelSource;
use crate::error::{FingerprintError, HashError};
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

/// Configuration builder for hashers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    /// Downsampling strategy
    downsample: DownsampleKind,
    /// Upper bound on worker threads; `None` uses rayon's global pool
    max_workers: Option<usize>,
}

impl HasherConfig {
    /// Create a new hasher configuration with defaults
    pub fn new() -> Self {
        Self {
            downsample: DownsampleKind::BlockAverage,
            max_workers: None,
        }
    }

    /// Set the downsampling strategy
    pub fn downsample(mut self, kind: DownsampleKind) -> Self {
        self.downsample = kind;
        self
    }

    /// Cap the number of worker threads used per image.
    ///
    /// `1` runs every stage on a single worker, which is what a single-core
    /// machine would see.
    pub fn max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Build the hasher
    pub fn build(self) -> Result<DifferenceHasher, FingerprintError> {
        let pool = match self.max_workers {
            Some(0) => {
                return Err(FingerprintError::Config(
                    "max_workers must be at least 1".to_string(),
                ))
            }
            Some(workers) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(|index| format!("dhash-worker-{}", index))
                    .build()
                    .map_err(HashError::from)?,
            ),
            None => None,
        };

        let downsampler: Box<dyn Downsampler> = match self.downsample {
            DownsampleKind::BlockAverage => Box::new(BlockAverager::new()),
            DownsampleKind::Lanczos => Box::new(LanczosResizer::new()),
        };

        Ok(DifferenceHasher { downsampler, pool })
    }
}

/// Difference hasher: grayscale, downsample, encode
pub struct DifferenceHasher {
    downsampler: Box<dyn Downsampler>,
    /// Bounded pool for this hasher; `None` runs on the global pool
    pool: Option<ThreadPool>,
}

impl DifferenceHasher {
    /// Create a block-averaging hasher on the global thread pool
    pub fn new() -> Self {
        Self {
            downsampler: Box::new(BlockAverager::new()),
            pool: None,
        }
    }

    /// Get the downsampling strategy
    pub fn kind(&self) -> DownsampleKind {
        self.downsampler.kind()
    }

    /// Compute the fingerprint of an image.
    ///
    /// Blocks until the fingerprint is ready. Fails only if the image is
    /// smaller than the 9x8 grid or the resampler rejects it.
    pub fn hash<S: PixelSource + ?Sized>(&self, source: &S) -> Result<Fingerprint, HashError> {
        match &self.pool {
            Some(pool) => pool.install(|| self.hash_stages(source)),
            None => self.hash_stages(source),
        }
    }

    fn hash_stages<S: PixelSource + ?Sized>(&self, source: &S) -> Result<Fingerprint, HashError> {
        let bounds = source.bounds();
        check_dimensions(bounds.width, bounds.height)?;

        let start = Instant::now();

        // Returns only after every row task has joined
        let plane = to_grayscale(source);
        let grid = self.downsampler.downsample(&plane)?;
        let fingerprint = encode(&grid);

        debug!(
            strategy = %self.downsampler.kind(),
            width = bounds.width,
            height = bounds.height,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fingerprint computed"
        );
        trace!(%fingerprint, "Fingerprint value");

        Ok(fingerprint)
    }
}

impl Default for DifferenceHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DifferenceHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DifferenceHasher")
            .field("kind", &self.kind())
            .field("workers", &self.pool.as_ref().map(|pool| pool.current_num_threads()))
            .finish()
    }
}

/// Compute the block-averaged fingerprint of an image on the global pool
pub fn compute_fingerprint<S: PixelSource + ?Sized>(source: &S) -> Result<Fingerprint, HashError> {
    DifferenceHasher::new().hash(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn create_left_to_right_gradient() -> RgbImage {
        // Gradient: left is dark, right is bright (left < right)
        RgbImage::from_fn(90, 80, |x, _| {
            let brightness = (x * 255 / 89) as u8;
            Rgb([brightness, brightness, brightness])
        })
    }

    fn create_right_to_left_gradient() -> RgbImage {
        // Gradient: right is dark, left is bright (left > right)
        RgbImage::from_fn(90, 80, |x, _| {
            let brightness = ((89 - x) * 255 / 89) as u8;
            Rgb([brightness, brightness, brightness])
        })
    }

    #[test]
    fn config_defaults_to_block_average() {
        let config = HasherConfig::new();
        assert_eq!(config.downsample, DownsampleKind::BlockAverage);
        assert_eq!(config.max_workers, None);
        assert_eq!(config, HasherConfig::default());
    }

    #[test]
    fn config_builder_works() {
        let config = HasherConfig::new()
            .downsample(DownsampleKind::Lanczos)
            .max_workers(2);

        assert_eq!(config.downsample, DownsampleKind::Lanczos);
        assert_eq!(config.max_workers, Some(2));
    }

    #[test]
    fn build_creates_hasher() {
        let hasher = HasherConfig::new().build().unwrap();
        assert_eq!(hasher.kind(), DownsampleKind::BlockAverage);

        let hasher = HasherConfig::new()
            .downsample(DownsampleKind::Lanczos)
            .build()
            .unwrap();
        assert_eq!(hasher.kind(), DownsampleKind::Lanczos);
    }

    #[test]
    fn zero_workers_is_rejected() {
        let result = HasherConfig::new().max_workers(0).build();
        assert!(matches!(result, Err(FingerprintError::Config(_))));
    }

    #[test]
    fn opposite_gradients_produce_opposite_hashes() {
        let hasher = DifferenceHasher::new();

        // Brightness rises to the right: no cell beats its neighbour
        let rising = hasher.hash(&create_left_to_right_gradient()).unwrap();
        // Brightness falls to the right: every cell beats its neighbour
        let falling = hasher.hash(&create_right_to_left_gradient()).unwrap();

        assert_eq!(rising.value(), 0);
        assert_eq!(falling.value(), u64::MAX);
        assert_eq!(rising.distance(&falling), 64);
    }

    #[test]
    fn lanczos_agrees_on_strong_gradients() {
        let hasher = HasherConfig::new()
            .downsample(DownsampleKind::Lanczos)
            .build()
            .unwrap();

        assert_eq!(hasher.hash(&create_right_to_left_gradient()).unwrap().value(), u64::MAX);
    }

    #[test]
    fn single_worker_matches_global_pool() {
        let image = RgbImage::from_fn(120, 90, |x, y| {
            Rgb([(x * 2) as u8, (y * 3) as u8, ((x * y) % 256) as u8])
        });
        let bounded = HasherConfig::new().max_workers(1).build().unwrap();

        assert_eq!(
            bounded.hash(&image).unwrap(),
            compute_fingerprint(&image).unwrap()
        );
    }

    #[test]
    fn too_small_image_is_rejected() {
        let image = GrayImage::from_pixel(8, 20, Luma([10]));
        let result = compute_fingerprint(&image);
        assert!(matches!(
            result,
            Err(HashError::ImageTooSmall { width: 8, height: 20 })
        ));
    }

    #[test]
    fn smallest_image_hashes() {
        let image = GrayImage::from_fn(9, 8, |x, _| Luma([(x * 20) as u8]));
        // Every cell is dimmer than its right neighbour
        assert_eq!(compute_fingerprint(&image).unwrap().value(), 0);
    }

    #[test]
    fn hasher_accepts_trait_objects() {
        let image = create_right_to_left_gradient();
        let source: &dyn PixelSource = &image;
        assert_eq!(compute_fingerprint(source).unwrap().value(), u64::MAX);
    }

    #[test]
    fn debug_shows_strategy() {
        let hasher = HasherConfig::new().max_workers(1).build().unwrap();
        let debug = format!("{:?}", hasher);
        assert!(debug.contains("BlockAverage"));
        assert!(debug.contains("Some(1)"));
    }
}
