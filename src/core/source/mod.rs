//! # Source Module
//!
//! Abstractions over already-decoded, in-memory pixel data.
//!
//! A [`PixelSource`] is anything that can report its bounds and answer
//! "what color is the pixel at `(x, y)`?". Sources that store luminance
//! directly (grayscale buffers, planar YCbCr from JPEG decoders) also expose
//! a [`LumaPlane`], which the hasher copies instead of converting each pixel.
//!
//! ## Provided Sources
//! - `image::ImageBuffer` with `u8`, `u16` or `f32` subpixels
//! - `image::DynamicImage`
//! - [`YCbCrImage`] - planar luma + subsampled chroma

mod buffer;
mod ycbcr;

pub use ycbcr::{ChromaSubsampling, YCbCrImage};

/// Rectangular region covered by a pixel source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Left-most column
    pub min_x: u32,
    /// Top-most row
    pub min_y: u32,
    /// Number of columns
    pub width: u32,
    /// Number of rows
    pub height: u32,
}

impl Bounds {
    /// Bounds anchored at the origin
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_origin(0, 0, width, height)
    }

    /// Bounds anchored at `(min_x, min_y)`
    pub fn with_origin(min_x: u32, min_y: u32, width: u32, height: u32) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// One past the right-most column
    pub fn max_x(&self) -> u32 {
        self.min_x + self.width
    }

    /// One past the bottom row
    pub fn max_y(&self) -> u32 {
        self.min_y + self.height
    }

    /// Whether the region contains no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Borrowed luma samples at their native depth
#[derive(Debug, Clone, Copy)]
pub enum LumaSamples<'a> {
    /// 8-bit luma, widened by `v * 257` when copied
    U8(&'a [u8]),
    /// 16-bit luma, copied as is
    U16(&'a [u16]),
}

/// A source's native luma channel, laid out row-major with a stride.
///
/// Row `0` is the first row of the source's bounds, and `offset` is the
/// index of the sample at the bounds origin.
#[derive(Debug, Clone, Copy)]
pub struct LumaPlane<'a> {
    samples: LumaSamples<'a>,
    stride: usize,
    offset: usize,
}

impl<'a> LumaPlane<'a> {
    /// Create a plane whose first sample is the bounds origin
    pub fn new(samples: LumaSamples<'a>, stride: usize) -> Self {
        Self {
            samples,
            stride,
            offset: 0,
        }
    }

    /// Start reading at `offset` instead of the first sample
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Distance in samples between the starts of two rows
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Copy `out.len()` samples of `row` into `out` as 16-bit luminance.
    ///
    /// Panics if the row extends past the end of the plane.
    pub(crate) fn copy_row(&self, row: usize, out: &mut [u16]) {
        let start = self.offset + row * self.stride;
        let end = start + out.len();
        match self.samples {
            LumaSamples::U8(samples) => {
                for (dst, &value) in out.iter_mut().zip(&samples[start..end]) {
                    *dst = u16::from(value) * 257;
                }
            }
            LumaSamples::U16(samples) => out.copy_from_slice(&samples[start..end]),
        }
    }
}

/// A realized, in-memory grid of pixels.
///
/// Coordinates passed to [`PixelSource::rgb16`] are absolute: they lie inside
/// `[min_x, max_x) x [min_y, max_y)` of [`PixelSource::bounds`]. Querying
/// outside the bounds is a programming error and may panic.
pub trait PixelSource: Sync {
    /// The region covered by this source
    fn bounds(&self) -> Bounds;

    /// Red, green and blue at `(x, y)`, each normalized to 16 bits.
    ///
    /// Alpha, if any, is ignored.
    fn rgb16(&self, x: u32, y: u32) -> [u16; 3];

    /// The native luma channel, if this source stores one.
    ///
    /// When present the hasher copies it directly and never calls `rgb16`.
    fn luma_plane(&self) -> Option<LumaPlane<'_>> {
        None
    }
}

/// Subpixel types that can be normalized to 16 bits
pub trait Channel16: Copy {
    /// Scale to the full `u16` range
    fn to_u16(self) -> u16;

    /// View a single-channel buffer as luma samples, when the depth allows it
    fn luma_samples(samples: &[Self]) -> Option<LumaSamples<'_>>;
}

impl Channel16 for u8 {
    fn to_u16(self) -> u16 {
        u16::from(self) * 257
    }

    fn luma_samples(samples: &[Self]) -> Option<LumaSamples<'_>> {
        Some(LumaSamples::U8(samples))
    }
}

impl Channel16 for u16 {
    fn to_u16(self) -> u16 {
        self
    }

    fn luma_samples(samples: &[Self]) -> Option<LumaSamples<'_>> {
        Some(LumaSamples::U16(samples))
    }
}

impl Channel16 for f32 {
    fn to_u16(self) -> u16 {
        (self.clamp(0.0, 1.0) * f32::from(u16::MAX)).round() as u16
    }

    fn luma_samples(_samples: &[Self]) -> Option<LumaSamples<'_>> {
        None
    }
}
