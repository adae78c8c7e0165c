//! Grayscale conversion.
//!
//! Builds a 16-bit luminance plane from any [`PixelSource`], one rayon task
//! per row. Each task owns a disjoint row slice of the plane, so the only
//! synchronization is the join at the end of the parallel iterator.

use crate::core::source::PixelSource;
use rayon::prelude::*;
use std::time::Instant;
use tracing::debug;

/// Dense row-major plane of 16-bit luminance samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayPlane {
    width: u32,
    height: u32,
    samples: Vec<u16>,
}

impl GrayPlane {
    /// Wrap existing samples; `None` if the length is not `width * height`
    pub fn from_samples(width: u32, height: u32, samples: Vec<u16>) -> Option<Self> {
        if samples.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            samples,
        })
    }

    /// Plane width in samples
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Plane height in rows
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance in samples between the starts of two rows
    pub fn stride(&self) -> usize {
        self.width as usize
    }

    /// All samples, row-major
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// One row of samples; panics if `y` is out of range
    pub fn row(&self, y: usize) -> &[u16] {
        let start = y * self.stride();
        &self.samples[start..start + self.stride()]
    }

    /// Sample at `(x, y)` relative to the plane origin
    pub fn get(&self, x: u32, y: u32) -> u16 {
        self.row(y as usize)[x as usize]
    }
}

/// ITU-R BT.601 luma of 16-bit channels, rounded to nearest
pub fn luminance(r: u16, g: u16, b: u16) -> u16 {
    let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b) + 500;
    (weighted / 1000) as u16
}

/// Convert a source to a grayscale plane covering its bounds.
///
/// Sources exposing a luma plane are copied row by row; all others go
/// through [`luminance`] per pixel.
pub fn to_grayscale<S: PixelSource + ?Sized>(source: &S) -> GrayPlane {
    let bounds = source.bounds();
    let width = bounds.width as usize;
    let mut samples = vec![0u16; width * bounds.height as usize];

    if samples.is_empty() {
        return GrayPlane {
            width: bounds.width,
            height: bounds.height,
            samples,
        };
    }

    let start = Instant::now();
    let fast_path = match source.luma_plane() {
        Some(plane) => {
            samples
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(row, out)| plane.copy_row(row, out));
            true
        }
        None => {
            samples
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(row, out)| {
                    let y = bounds.min_y + row as u32;
                    for (col, dst) in out.iter_mut().enumerate() {
                        let [r, g, b] = source.rgb16(bounds.min_x + col as u32, y);
                        *dst = luminance(r, g, b);
                    }
                });
            false
        }
    };

    debug!(
        width = bounds.width,
        height = bounds.height,
        luma_fast_path = fast_path,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Grayscale plane built"
    );

    GrayPlane {
        width: bounds.width,
        height: bounds.height,
        samples,
    }
}
