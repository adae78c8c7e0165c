//! Planar YCbCr images, the native output of JPEG decoders.
//!
//! Luma is stored at full resolution; chroma may be subsampled. The Y plane
//! doubles as the source's luma channel, so hashing never touches chroma.

use super::{Bounds, LumaPlane, LumaSamples, PixelSource};
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Chroma subsampling ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChromaSubsampling {
    /// Full-resolution chroma
    Ratio444,
    /// Half horizontal chroma resolution
    Ratio422,
    /// Half horizontal and half vertical chroma resolution
    Ratio420,
}

impl ChromaSubsampling {
    /// Horizontal and vertical chroma divisors
    fn factors(&self) -> (u32, u32) {
        match self {
            ChromaSubsampling::Ratio444 => (1, 1),
            ChromaSubsampling::Ratio422 => (2, 1),
            ChromaSubsampling::Ratio420 => (2, 2),
        }
    }

    /// Chroma plane dimensions for a `width x height` luma plane
    pub fn chroma_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let (fx, fy) = self.factors();
        (width.div_ceil(fx), height.div_ceil(fy))
    }
}

/// A planar 8-bit YCbCr image
#[derive(Debug, Clone)]
pub struct YCbCrImage {
    width: u32,
    height: u32,
    subsampling: ChromaSubsampling,
    y: Vec<u8>,
    cb: Vec<u8>,
    cr: Vec<u8>,
}

impl YCbCrImage {
    /// Wrap existing planes.
    ///
    /// Returns `None` if a plane's length does not match the dimensions
    /// implied by `width`, `height` and `subsampling`.
    pub fn from_planes(
        width: u32,
        height: u32,
        subsampling: ChromaSubsampling,
        y: Vec<u8>,
        cb: Vec<u8>,
        cr: Vec<u8>,
    ) -> Option<Self> {
        let (cw, ch) = subsampling.chroma_dimensions(width, height);
        let luma_len = width as usize * height as usize;
        let chroma_len = cw as usize * ch as usize;
        if y.len() != luma_len || cb.len() != chroma_len || cr.len() != chroma_len {
            return None;
        }

        Some(Self {
            width,
            height,
            subsampling,
            y,
            cb,
            cr,
        })
    }

    /// Convert an RGB image using JFIF coefficients.
    ///
    /// Subsampled chroma samples are the mean of the pixels they cover.
    pub fn from_rgb(image: &RgbImage, subsampling: ChromaSubsampling) -> Self {
        let (width, height) = image.dimensions();
        let (cw, ch) = subsampling.chroma_dimensions(width, height);
        let (fx, fy) = subsampling.factors();

        let y: Vec<u8> = image.pixels().map(|p| rgb_to_y(p.0)).collect();

        let mut cb = Vec::with_capacity(cw as usize * ch as usize);
        let mut cr = Vec::with_capacity(cw as usize * ch as usize);
        for cy in 0..ch {
            for cx in 0..cw {
                let (mut sum_cb, mut sum_cr, mut count) = (0u32, 0u32, 0u32);
                for py in (cy * fy)..((cy + 1) * fy).min(height) {
                    for px in (cx * fx)..((cx + 1) * fx).min(width) {
                        let (b, r) = rgb_to_chroma(image.get_pixel(px, py).0);
                        sum_cb += u32::from(b);
                        sum_cr += u32::from(r);
                        count += 1;
                    }
                }
                cb.push(((sum_cb + count / 2) / count) as u8);
                cr.push(((sum_cr + count / 2) / count) as u8);
            }
        }

        Self {
            width,
            height,
            subsampling,
            y,
            cb,
            cr,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Chroma subsampling ratio
    pub fn subsampling(&self) -> ChromaSubsampling {
        self.subsampling
    }

    /// Full-resolution luma samples, row-major
    pub fn y_plane(&self) -> &[u8] {
        &self.y
    }

    /// Blue-difference chroma samples, row-major
    pub fn cb_plane(&self) -> &[u8] {
        &self.cb
    }

    /// Red-difference chroma samples, row-major
    pub fn cr_plane(&self) -> &[u8] {
        &self.cr
    }

    fn chroma_index(&self, x: u32, y: u32) -> usize {
        let (fx, fy) = self.subsampling.factors();
        let (cw, _) = self.subsampling.chroma_dimensions(self.width, self.height);
        (y / fy) as usize * cw as usize + (x / fx) as usize
    }
}

impl PixelSource for YCbCrImage {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    fn rgb16(&self, x: u32, y: u32) -> [u16; 3] {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside image");
        let luma = self.y[y as usize * self.width as usize + x as usize];
        let chroma = self.chroma_index(x, y);
        ycbcr_to_rgb(luma, self.cb[chroma], self.cr[chroma]).map(|c| u16::from(c) * 257)
    }

    fn luma_plane(&self) -> Option<LumaPlane<'_>> {
        Some(LumaPlane::new(
            LumaSamples::U8(&self.y),
            self.width as usize,
        ))
    }
}

// JFIF conversions in 16.16 fixed point

fn rgb_to_y([r, g, b]: [u8; 3]) -> u8 {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    ((19595 * r + 38470 * g + 7471 * b + (1 << 15)) >> 16) as u8
}

fn rgb_to_chroma([r, g, b]: [u8; 3]) -> (u8, u8) {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    let cb = (-11056 * r - 21712 * g + 32768 * b + (257 << 15)) >> 16;
    let cr = (32768 * r - 27440 * g - 5328 * b + (257 << 15)) >> 16;
    (cb.clamp(0, 255) as u8, cr.clamp(0, 255) as u8)
}

fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> [u8; 3] {
    let yy = i32::from(y) * 0x10101;
    let cb = i32::from(cb) - 128;
    let cr = i32::from(cr) - 128;

    let r = (yy + 91881 * cr) >> 16;
    let g = (yy - 22554 * cb - 46802 * cr) >> 16;
    let b = (yy + 116130 * cb) >> 16;
    [r, g, b].map(|c| c.clamp(0, 255) as u8)
}
