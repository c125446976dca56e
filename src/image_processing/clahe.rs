//! Contrast-limited adaptive histogram equalisation.
//!
//! The image is cut into non-overlapping square tiles and each tile is
//! equalised on its own clipped histogram. There is no interpolation
//! between neighbouring tiles, so tile seams may show; the pupil threshold
//! that follows is local and tolerates them. Rows and columns that do not
//! fill a whole tile at the right and bottom edges are copied unchanged.

use crate::{constants::HISTOGRAM_BINS, utils::safe_cast::f64_floor_to_u32_clamp};
use image::{GrayImage, Luma};

/// Equalise `gray` tile by tile.
///
/// Histogram bins above `floor(clip_limit * tile_pixels / 256)` are cut to
/// that height and `excess / 256` (integer division) is added back to every
/// bin before the CDF is built. A tile whose clipped histogram is empty is
/// left as is, which is what the default 2.0 clip does to 8x8 tiles. A
/// non-positive `clip_limit` disables clipping and a zero `tile_size`
/// returns the input unchanged.
#[must_use]
pub fn clahe(gray: &GrayImage, clip_limit: f64, tile_size: u32) -> GrayImage {
    let mut enhanced = gray.clone();
    if tile_size == 0 {
        return enhanced;
    }

    let (width, height) = gray.dimensions();
    let tiles_x = width / tile_size;
    let tiles_y = height / tile_size;
    let tile_pixels = f64::from(tile_size) * f64::from(tile_size);

    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let x0 = tx * tile_size;
            let y0 = ty * tile_size;

            let mut hist = [0u32; HISTOGRAM_BINS];
            for y in y0..y0 + tile_size {
                for x in x0..x0 + tile_size {
                    hist[usize::from(gray.get_pixel(x, y)[0])] += 1;
                }
            }

            if clip_limit > 0.0 {
                #[allow(clippy::cast_precision_loss)]
                let threshold = clip_limit * tile_pixels / HISTOGRAM_BINS as f64;
                clip_histogram(&mut hist, f64_floor_to_u32_clamp(threshold, 0, u32::MAX));
            }

            let Some(lut) = build_lut(&hist) else {
                continue;
            };

            for y in y0..y0 + tile_size {
                for x in x0..x0 + tile_size {
                    let value = gray.get_pixel(x, y)[0];
                    enhanced.put_pixel(x, y, Luma([lut[usize::from(value)]]));
                }
            }
        }
    }

    enhanced
}

/// Cut bins at `clip_threshold` and hand back the whole part of the
/// excess spread over all bins. The remainder is dropped.
#[allow(clippy::cast_possible_truncation)] // 256 fits in u32
fn clip_histogram(hist: &mut [u32; HISTOGRAM_BINS], clip_threshold: u32) {
    let mut excess = 0u32;
    for bin in hist.iter_mut() {
        if *bin > clip_threshold {
            excess += *bin - clip_threshold;
            *bin = clip_threshold;
        }
    }

    let share = excess / HISTOGRAM_BINS as u32;
    for bin in hist.iter_mut() {
        *bin += share;
    }
}

/// Map each level through the normalised CDF; `None` for an empty histogram.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)] // clamped to [0,255]
fn build_lut(hist: &[u32; HISTOGRAM_BINS]) -> Option<[u8; HISTOGRAM_BINS]> {
    let mut cdf = [0u64; HISTOGRAM_BINS];
    let mut running = 0u64;
    for (slot, &count) in cdf.iter_mut().zip(hist.iter()) {
        running += u64::from(count);
        *slot = running;
    }

    let total = cdf[HISTOGRAM_BINS - 1];
    if total == 0 {
        return None;
    }

    let mut lut = [0u8; HISTOGRAM_BINS];
    for (entry, &c) in lut.iter_mut().zip(cdf.iter()) {
        *entry = (c as f64 / total as f64 * 255.0).floor().clamp(0.0, 255.0) as u8;
    }
    Some(lut)
}
