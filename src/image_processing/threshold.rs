//! Global and local thresholding.
//!
//! All binarisations here mark *dark* pixels as foreground: the pupil is
//! the darkest blob in the eye region and is what the contour pass looks
//! for.

use crate::constants::HISTOGRAM_BINS;
use image::{GrayImage, Luma};

use super::{BACKGROUND, FOREGROUND};

/// Count pixels per intensity level.
#[must_use]
pub fn compute_histogram(gray: &GrayImage) -> [u32; HISTOGRAM_BINS] {
    let mut hist = [0u32; HISTOGRAM_BINS];
    for pixel in gray.pixels() {
        hist[usize::from(pixel[0])] += 1;
    }
    hist
}

/// Otsu's threshold: the level `t` maximising the between-class variance
/// `w_bg * w_fg * (mean_bg - mean_fg)^2`, where the background holds all
/// levels `<= t`.
///
/// Levels are scanned from 0 upwards and the first maximum wins. An empty
/// or single-valued image yields 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // t < 256
#[allow(clippy::cast_precision_loss)] // pixel counts are far below 2^52
pub fn otsu_threshold(gray: &GrayImage) -> u8 {
    let hist = compute_histogram(gray);
    let total: u64 = hist.iter().map(|&c| u64::from(c)).sum();
    let sum_total: u64 = hist
        .iter()
        .enumerate()
        .map(|(level, &count)| level as u64 * u64::from(count))
        .sum();

    let mut sum_background = 0u64;
    let mut weight_background = 0u64;
    let mut max_variance = 0.0f64;
    let mut threshold = 0usize;

    for (t, &count) in hist.iter().enumerate() {
        weight_background += u64::from(count);
        if weight_background == 0 {
            continue;
        }

        let weight_foreground = total - weight_background;
        if weight_foreground == 0 {
            break;
        }

        sum_background += t as u64 * u64::from(count);
        let mean_background = sum_background as f64 / weight_background as f64;
        let mean_foreground = (sum_total - sum_background) as f64 / weight_foreground as f64;

        let variance = weight_background as f64
            * weight_foreground as f64
            * (mean_background - mean_foreground).powi(2);

        if variance > max_variance {
            max_variance = variance;
            threshold = t;
        }
    }

    threshold as u8
}

/// Binarise with [`otsu_threshold`] followed by [`manual_threshold`].
#[must_use]
pub fn otsu_binarize(gray: &GrayImage) -> GrayImage {
    manual_threshold(gray, otsu_threshold(gray))
}

/// Pixels strictly darker than `threshold` become foreground.
#[must_use]
pub fn manual_threshold(gray: &GrayImage, threshold: u8) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut binary = GrayImage::new(width, height);

    for (src, dst) in gray.pixels().zip(binary.pixels_mut()) {
        *dst = Luma([if src[0] < threshold { FOREGROUND } else { BACKGROUND }]);
    }

    binary
}

/// Local-mean thresholding.
///
/// For each pixel the mean is taken over a `block_size x block_size`
/// window centred on it and clipped to the image; the pixel is foreground
/// when its intensity is below `mean - c`. Window sums come from a
/// summed-area table so the cost does not depend on `block_size`.
#[must_use]
#[allow(clippy::cast_precision_loss)] // window sums are far below 2^52
pub fn adaptive_threshold(gray: &GrayImage, block_size: u32, c: f64) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut binary = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return binary;
    }

    let integral = SummedAreaTable::new(gray);
    let half = block_size / 2;

    for y in 0..height {
        let y0 = y.saturating_sub(half);
        let y1 = y.saturating_add(half).saturating_add(1).min(height);
        for x in 0..width {
            let x0 = x.saturating_sub(half);
            let x1 = x.saturating_add(half).saturating_add(1).min(width);

            let count = u64::from(x1 - x0) * u64::from(y1 - y0);
            let local_mean = integral.sum(x0, y0, x1, y1) as f64 / count as f64;

            let value = f64::from(gray.get_pixel(x, y)[0]);
            if value < local_mean - c {
                binary.put_pixel(x, y, Luma([FOREGROUND]));
            }
        }
    }

    binary
}

/// Inclusive prefix sums with a zero row and column in front.
struct SummedAreaTable {
    stride: usize,
    data: Vec<u64>,
}

impl SummedAreaTable {
    fn new(gray: &GrayImage) -> Self {
        let (width, height) = gray.dimensions();
        let stride = width as usize + 1;
        let mut data = vec![0u64; stride * (height as usize + 1)];

        for y in 0..height as usize {
            let mut row_sum = 0u64;
            for x in 0..width as usize {
                // Coordinates come from the image's own dimensions.
                #[allow(clippy::cast_possible_truncation)]
                let value = gray.get_pixel(x as u32, y as u32)[0];
                row_sum += u64::from(value);
                data[(y + 1) * stride + x + 1] = data[y * stride + x + 1] + row_sum;
            }
        }

        Self { stride, data }
    }

    /// Sum over the half-open rectangle `[x0, x1) x [y0, y1)`.
    fn sum(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> u64 {
        let (x0, y0, x1, y1) = (x0 as usize, y0 as usize, x1 as usize, y1 as usize);
        let s = self.stride;
        self.data[y1 * s + x1] + self.data[y0 * s + x0] - self.data[y0 * s + x1] - self.data[y1 * s + x0]
    }
}
