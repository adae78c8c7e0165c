//! Lanczos3 resampling downsampler.
//!
//! Uses fast_image_resize, which picks AVX2/SSE4.1/NEON kernels when
//! available. The plane is resized as a single 16-bit channel, so each
//! resampled pixel is already the mean of its (one) channel and is read
//! directly as a grid cell.

use super::grid::{check_dimensions, DownsampleGrid, GRID_HEIGHT, GRID_WIDTH};
use super::luminance::GrayPlane;
use super::traits::{DownsampleKind, Downsampler};
use crate::error::HashError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use std::time::Instant;
use tracing::debug;

/// Downsampler that delegates to a Lanczos3 convolution resize
#[derive(Debug, Clone, Copy, Default)]
pub struct LanczosResizer;

impl LanczosResizer {
    /// Create a new Lanczos resizer
    pub fn new() -> Self {
        Self
    }
}

impl Downsampler for LanczosResizer {
    fn downsample(&self, plane: &GrayPlane) -> Result<DownsampleGrid, HashError> {
        check_dimensions(plane.width(), plane.height())?;

        let start = Instant::now();
        let bytes = plane
            .samples()
            .iter()
            .flat_map(|sample| sample.to_ne_bytes())
            .collect();

        let src_image = Image::from_vec_u8(plane.width(), plane.height(), bytes, PixelType::U16)
            .map_err(|e| HashError::Resample(format!("Failed to create source image: {}", e)))?;

        let mut dst_image = Image::new(GRID_WIDTH as u32, GRID_HEIGHT as u32, PixelType::U16);

        let options =
            ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));

        // A Resizer caches per-size buffers behind &mut self; one per call keeps
        // the downsampler shareable across threads
        Resizer::new()
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| HashError::Resample(format!("Resize failed: {}", e)))?;

        let cells = dst_image
            .buffer()
            .chunks_exact(2)
            .map(|pair| u32::from(u16::from_ne_bytes([pair[0], pair[1]])));

        debug!(
            src_width = plane.width(),
            src_height = plane.height(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Lanczos3 resize complete"
        );

        Ok(DownsampleGrid::from_row_major(cells))
    }

    fn kind(&self) -> DownsampleKind {
        DownsampleKind::Lanczos
    }
}
