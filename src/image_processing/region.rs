//! Rectangular crops clamped to image bounds.

use crate::{constants::PLACEHOLDER_INTENSITY, utils::safe_cast::i64_to_u32_clamp};
use image::{imageops, GrayImage, Luma};

/// Copy the window `[x, x + width) x [y, y + height)` out of `gray`.
///
/// The window is intersected with the image first. When nothing is left a
/// 1x1 image holding the neutral intensity 128 is returned so downstream
/// passes always receive a non-empty image.
#[must_use]
pub fn crop_region(gray: &GrayImage, x: i64, y: i64, width: i64, height: i64) -> GrayImage {
    let (img_w, img_h) = gray.dimensions();

    let x1 = i64_to_u32_clamp(x, 0, img_w);
    let y1 = i64_to_u32_clamp(y, 0, img_h);
    let x2 = i64_to_u32_clamp(x.saturating_add(width), 0, img_w);
    let y2 = i64_to_u32_clamp(y.saturating_add(height), 0, img_h);

    if x2 <= x1 || y2 <= y1 {
        return GrayImage::from_pixel(1, 1, Luma([PLACEHOLDER_INTENSITY]));
    }

    imageops::crop_imm(gray, x1, y1, x2 - x1, y2 - y1).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([(y * width + x) as u8]))
    }

    #[test]
    fn test_crop_inside() {
        let gray = ramp(10, 10);
        let crop = crop_region(&gray, 2, 3, 4, 5);
        assert_eq!(crop.dimensions(), (4, 5));
        assert_eq!(crop.get_pixel(0, 0)[0], 32);
        assert_eq!(crop.get_pixel(3, 4)[0], 75);
    }

    #[test]
    fn test_crop_clamped_to_bounds() {
        let gray = ramp(10, 10);
        let crop = crop_region(&gray, -3, 7, 6, 10);
        assert_eq!(crop.dimensions(), (3, 3));
        assert_eq!(crop.get_pixel(0, 0)[0], 70);
    }

    #[test]
    fn test_empty_crop_gives_placeholder() {
        let gray = ramp(10, 10);
        for crop in [
            crop_region(&gray, 20, 0, 5, 5),
            crop_region(&gray, 0, 0, 0, 5),
            crop_region(&gray, 0, 3, 5, -2),
            crop_region(&GrayImage::new(0, 0), 0, 0, 5, 5),
        ] {
            assert_eq!(crop.dimensions(), (1, 1));
            assert_eq!(crop.get_pixel(0, 0)[0], 128);
        }
    }
}
