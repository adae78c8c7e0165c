//! `PixelSource` implementations for the `image` crate's buffer types.

use super::{Bounds, Channel16, LumaPlane, PixelSource};
use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, Rgb, Rgba};
use std::ops::Deref;

impl<P, C> PixelSource for ImageBuffer<P, C>
where
    P: Pixel + Sync,
    P::Subpixel: Channel16 + Sync,
    C: Deref<Target = [P::Subpixel]> + Sync,
{
    fn bounds(&self) -> Bounds {
        Bounds::new(self.width(), self.height())
    }

    fn rgb16(&self, x: u32, y: u32) -> [u16; 3] {
        let Rgb([r, g, b]) = self.get_pixel(x, y).to_rgb();
        [r.to_u16(), g.to_u16(), b.to_u16()]
    }

    fn luma_plane(&self) -> Option<LumaPlane<'_>> {
        // Only a single-channel buffer stores luma contiguously
        if P::CHANNEL_COUNT != 1 {
            return None;
        }
        let raw: &[P::Subpixel] = self.as_raw();
        let samples = P::Subpixel::luma_samples(raw)?;
        Some(LumaPlane::new(samples, self.width() as usize))
    }
}

/// The concrete buffer behind a `DynamicImage`, if it is a known layout
fn inner_source(image: &DynamicImage) -> Option<&dyn PixelSource> {
    let source: &dyn PixelSource = match image {
        DynamicImage::ImageLuma8(buffer) => buffer,
        DynamicImage::ImageLumaA8(buffer) => buffer,
        DynamicImage::ImageRgb8(buffer) => buffer,
        DynamicImage::ImageRgba8(buffer) => buffer,
        DynamicImage::ImageLuma16(buffer) => buffer,
        DynamicImage::ImageLumaA16(buffer) => buffer,
        DynamicImage::ImageRgb16(buffer) => buffer,
        DynamicImage::ImageRgba16(buffer) => buffer,
        DynamicImage::ImageRgb32F(buffer) => buffer,
        DynamicImage::ImageRgba32F(buffer) => buffer,
        _ => return None,
    };
    Some(source)
}

impl PixelSource for DynamicImage {
    fn bounds(&self) -> Bounds {
        let (width, height) = self.dimensions();
        Bounds::new(width, height)
    }

    fn rgb16(&self, x: u32, y: u32) -> [u16; 3] {
        match inner_source(self) {
            Some(source) => source.rgb16(x, y),
            None => {
                let Rgba([r, g, b, _]) = self.get_pixel(x, y);
                [r.to_u16(), g.to_u16(), b.to_u16()]
            }
        }
    }

    fn luma_plane(&self) -> Option<LumaPlane<'_>> {
        inner_source(self)?.luma_plane()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, LumaA, RgbImage};

    #[test]
    fn rgb8_buffer_widens_channels() {
        let image = RgbImage::from_pixel(2, 2, Rgb([0, 128, 255]));
        assert_eq!(image.rgb16(1, 1), [0, 128 * 257, u16::MAX]);
        assert!(image.luma_plane().is_none());
    }

    #[test]
    fn gray8_buffer_exposes_luma_plane() {
        let image = GrayImage::from_fn(3, 2, |x, y| Luma([(y * 3 + x) as u8]));
        let plane = image.luma_plane().expect("gray buffer has a luma plane");
        assert_eq!(plane.stride(), 3);

        let mut out = [0u16; 3];
        plane.copy_row(1, &mut out);
        assert_eq!(out, [3 * 257, 4 * 257, 5 * 257]);
    }

    #[test]
    fn gray16_buffer_exposes_luma_plane() {
        let image: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_fn(2, 2, |x, _| Luma([1000 + x as u16]));
        let mut out = [0u16; 2];
        image.luma_plane().unwrap().copy_row(0, &mut out);
        assert_eq!(out, [1000, 1001]);
    }

    #[test]
    fn gray_with_alpha_uses_generic_path() {
        let image: ImageBuffer<LumaA<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(2, 2, LumaA([10, 0]));
        assert!(image.luma_plane().is_none());
        assert_eq!(image.rgb16(0, 0), [10 * 257; 3]);
    }

    #[test]
    fn float_gray_has_no_luma_plane() {
        let image: ImageBuffer<Luma<f32>, Vec<f32>> = ImageBuffer::from_pixel(2, 2, Luma([1.0]));
        assert!(image.luma_plane().is_none());
        assert_eq!(image.rgb16(0, 0), [u16::MAX; 3]);
    }

    #[test]
    fn dynamic_image_delegates_to_buffer() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 3, Luma([7])));
        assert_eq!(gray.bounds(), Bounds::new(4, 3));
        assert!(gray.luma_plane().is_some());

        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([1, 2, 3])));
        assert!(rgb.luma_plane().is_none());
        assert_eq!(rgb.rgb16(3, 2), [257, 514, 771]);
    }
}
