//! Colour conversions from RGBA frames.

use crate::constants::{LUMA_WEIGHT_B, LUMA_WEIGHT_G, LUMA_WEIGHT_R, LUMA_WEIGHT_SUM};
use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbaImage};

use super::{BACKGROUND, FOREGROUND};

/// A camera frame: 8-bit RGBA, row-major
pub type Frame = RgbaImage;

/// HSV image on the OpenCV 8-bit scale: H in [0,180), S and V in [0,255]
pub type HsvImage = ImageBuffer<Rgb<u8>, Vec<u8>>;

/// Convert a frame to grayscale with `floor(0.299 R + 0.587 G + 0.114 B)`.
///
/// The weights are applied in integer per-mille arithmetic so the floor is
/// exact; a pixel with R = G = B = v always maps to v. Alpha is ignored.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // weighted mean of u8 values is <= 255
pub fn rgb_to_gray(frame: &Frame) -> GrayImage {
    let (width, height) = frame.dimensions();
    let mut gray = GrayImage::new(width, height);

    for (src, dst) in frame.pixels().zip(gray.pixels_mut()) {
        let [r, g, b, _] = src.0;
        let weighted =
            LUMA_WEIGHT_R * u32::from(r) + LUMA_WEIGHT_G * u32::from(g) + LUMA_WEIGHT_B * u32::from(b);
        *dst = Luma([(weighted / LUMA_WEIGHT_SUM) as u8]);
    }

    gray
}

/// Convert a frame to HSV on the OpenCV 8-bit scale.
///
/// Hue is stored in half-degrees so it fits a byte; saturation is
/// `255 * (max - min) / max` and value is the largest channel.
#[must_use]
pub fn rgb_to_hsv(frame: &Frame) -> HsvImage {
    let (width, height) = frame.dimensions();
    let mut hsv = HsvImage::new(width, height);

    for (src, dst) in frame.pixels().zip(hsv.pixels_mut()) {
        let [r, g, b, _] = src.0;
        *dst = Rgb(pixel_to_hsv(r, g, b));
    }

    hsv
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // values are rounded into [0,255]
fn pixel_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = f64::from(max - min);

    let saturation = if max == 0 {
        0.0
    } else {
        255.0 * delta / f64::from(max)
    };

    let hue_degrees = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (f64::from(g) - f64::from(b)) / delta
    } else if max == g {
        120.0 + 60.0 * (f64::from(b) - f64::from(r)) / delta
    } else {
        240.0 + 60.0 * (f64::from(r) - f64::from(g)) / delta
    };
    let hue_degrees = if hue_degrees < 0.0 { hue_degrees + 360.0 } else { hue_degrees };

    let hue = ((hue_degrees / 2.0).round() as u32 % 180) as u8;
    [hue, saturation.round().clamp(0.0, 255.0) as u8, max]
}

/// Mask pixels whose three channels all fall inside the inclusive ranges.
#[must_use]
pub fn mask_by_color_range(hsv: &HsvImage, lower: [u8; 3], upper: [u8; 3]) -> GrayImage {
    let (width, height) = hsv.dimensions();
    let mut mask = GrayImage::new(width, height);

    for (src, dst) in hsv.pixels().zip(mask.pixels_mut()) {
        let inside = src
            .0
            .iter()
            .zip(lower.iter().zip(upper.iter()))
            .all(|(&v, (&lo, &hi))| (lo..=hi).contains(&v));
        *dst = Luma([if inside { FOREGROUND } else { BACKGROUND }]);
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use proptest::prelude::*;

    #[test]
    fn test_gray_weights() {
        let frame = Frame::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        let gray = rgb_to_gray(&frame);
        // floor(0.299 * 255) = 76
        assert_eq!(gray.get_pixel(1, 1)[0], 76);

        let frame = Frame::from_pixel(1, 1, Rgba([10, 20, 30, 0]));
        // 2.99 + 11.74 + 3.42 = 18.15
        assert_eq!(rgb_to_gray(&frame).get_pixel(0, 0)[0], 18);
    }

    #[test]
    fn test_hsv_primary_colors() {
        assert_eq!(pixel_to_hsv(255, 0, 0), [0, 255, 255]);
        assert_eq!(pixel_to_hsv(0, 255, 0), [60, 255, 255]);
        assert_eq!(pixel_to_hsv(0, 0, 255), [120, 255, 255]);
        assert_eq!(pixel_to_hsv(0, 0, 0), [0, 0, 0]);
        assert_eq!(pixel_to_hsv(128, 128, 128), [0, 0, 128]);
    }

    #[test]
    fn test_hsv_skin_tone() {
        // hue 22.5 degrees -> 11 on the half-degree scale
        let [h, s, v] = pixel_to_hsv(230, 180, 150);
        assert_eq!(h, 11);
        assert_eq!(s, 89);
        assert_eq!(v, 230);
    }

    #[test]
    fn test_hsv_hue_wraps_below_180() {
        // hue just below 360 degrees must not round up to 180
        let [h, _, _] = pixel_to_hsv(255, 0, 1);
        assert!(h < 180);
    }

    #[test]
    fn test_mask_by_color_range_inclusive() {
        let mut hsv = HsvImage::new(3, 1);
        hsv.put_pixel(0, 0, Rgb([0, 20, 70]));
        hsv.put_pixel(1, 0, Rgb([20, 255, 255]));
        hsv.put_pixel(2, 0, Rgb([21, 100, 100]));

        let mask = mask_by_color_range(&hsv, [0, 20, 70], [20, 255, 255]);
        assert_eq!(mask.get_pixel(0, 0)[0], 255);
        assert_eq!(mask.get_pixel(1, 0)[0], 255);
        assert_eq!(mask.get_pixel(2, 0)[0], 0);
    }

    proptest! {
        #[test]
        fn prop_uniform_gray_is_identity(v in any::<u8>(), w in 1u32..8, h in 1u32..8) {
            let frame = Frame::from_pixel(w, h, Rgba([v, v, v, 255]));
            let gray = rgb_to_gray(&frame);
            prop_assert!(gray.pixels().all(|p| p[0] == v));
        }

        #[test]
        fn prop_hue_in_range(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let [h, _, v] = pixel_to_hsv(r, g, b);
            prop_assert!(h < 180);
            prop_assert_eq!(v, r.max(g).max(b));
        }
    }
}
