//! Sobel edge magnitude.

use image::{GrayImage, Luma};

const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Gradient magnitude `min(255, floor(sqrt(gx^2 + gy^2)))` of the 3x3
/// Sobel operators. The outermost rows and columns are left at zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to [0,255]
pub fn sobel_edges(gray: &GrayImage) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut edges = GrayImage::new(width, height);
    if width < 3 || height < 3 {
        return edges;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut gx = 0i32;
            let mut gy = 0i32;
            for (ky, (row_x, row_y)) in SOBEL_X.iter().zip(SOBEL_Y.iter()).enumerate() {
                for kx in 0..3 {
                    let pixel = i32::from(gray.get_pixel(x + kx as u32 - 1, y + ky as u32 - 1)[0]);
                    gx += pixel * row_x[kx];
                    gy += pixel * row_y[kx];
                }
            }

            let magnitude = f64::from(gx * gx + gy * gy).sqrt().floor().min(255.0);
            edges.put_pixel(x, y, Luma([magnitude as u8]));
        }
    }

    edges
}
