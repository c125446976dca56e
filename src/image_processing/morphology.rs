//! Binary morphology with square kernels.
//!
//! Pixels closer than half a kernel to any image border have no complete
//! neighbourhood and are forced to background in both operations; there is
//! no edge replication or wraparound.

use image::{GrayImage, Luma};

#[derive(Clone, Copy)]
enum Extremum {
    Min,
    Max,
}

/// Minimum filter over a `kernel_size x kernel_size` window.
#[must_use]
pub fn erode(mask: &GrayImage, kernel_size: u32) -> GrayImage {
    square_filter(mask, kernel_size, Extremum::Min)
}

/// Maximum filter over a `kernel_size x kernel_size` window.
#[must_use]
pub fn dilate(mask: &GrayImage, kernel_size: u32) -> GrayImage {
    square_filter(mask, kernel_size, Extremum::Max)
}

fn square_filter(mask: &GrayImage, kernel_size: u32, extremum: Extremum) -> GrayImage {
    let (width, height) = mask.dimensions();
    let half = kernel_size / 2;
    let mut result = GrayImage::new(width, height);

    if width <= 2 * half || height <= 2 * half {
        return result;
    }

    for y in half..height - half {
        for x in half..width - half {
            let mut value = match extremum {
                Extremum::Min => u8::MAX,
                Extremum::Max => u8::MIN,
            };
            for ky in y - half..=y + half {
                for kx in x - half..=x + half {
                    let sample = mask.get_pixel(kx, ky)[0];
                    value = match extremum {
                        Extremum::Min => value.min(sample),
                        Extremum::Max => value.max(sample),
                    };
                }
            }
            result.put_pixel(x, y, Luma([value]));
        }
    }

    result
}
