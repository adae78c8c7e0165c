//! Block-averaging downsampler.
//!
//! Splits the plane into 9x8 blocks of `floor(width / 9) x floor(height / 8)`
//! samples placed at fixed strides from the origin. Any remainder along the
//! right and bottom edges is not sampled. Each cell is the truncated integer
//! mean of its block; cells are computed in parallel, one task per cell.

use super::super::grid::{check_dimensions, DownsampleGrid, GRID_HEIGHT, GRID_WIDTH};
use super::super::luminance::GrayPlane;
use super::super::traits::{DownsampleKind, Downsampler};
use crate::error::HashError;
use rayon::prelude::*;
use std::time::Instant;
use tracing::debug;

/// Self-contained block-averaging downsampler (the default strategy)
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockAverager;

impl BlockAverager {
    /// Create a new block averager
    pub fn new() -> Self {
        Self
    }
}

impl Downsampler for BlockAverager {
    fn downsample(&self, plane: &GrayPlane) -> Result<DownsampleGrid, HashError> {
        check_dimensions(plane.width(), plane.height())?;

        let start = Instant::now();
        let block_width = plane.width() as usize / GRID_WIDTH;
        let block_height = plane.height() as usize / GRID_HEIGHT;

        let means: Vec<u32> = (0..GRID_WIDTH * GRID_HEIGHT)
            .into_par_iter()
            .map(|cell| {
                let left = (cell % GRID_WIDTH) * block_width;
                let top = (cell / GRID_WIDTH) * block_height;
                block_mean(plane, left, top, block_width, block_height)
            })
            .collect();

        debug!(
            block_width,
            block_height,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Block averages computed"
        );

        Ok(DownsampleGrid::from_row_major(means))
    }

    fn kind(&self) -> DownsampleKind {
        DownsampleKind::BlockAverage
    }
}

/// Truncated mean of the `width x height` block at `(left, top)`
fn block_mean(plane: &GrayPlane, left: usize, top: usize, width: usize, height: usize) -> u32 {
    let sum: u64 = (top..top + height)
        .map(|y| {
            plane.row(y)[left..left + width]
                .iter()
                .map(|&sample| u64::from(sample))
                .sum::<u64>()
        })
        .sum();
    (sum / (width * height) as u64) as u32
}
