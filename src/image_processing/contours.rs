//! Connected components of binary masks and their centroids.

use crate::constants::{MIN_CENTROID_POINTS, MIN_CONTOUR_PIXELS};
use image::GrayImage;
use nalgebra::Point2;

use super::FOREGROUND;

/// One 4-connected foreground component.
///
/// Points are `(row, col)` pixel coordinates in discovery order; callers
/// must not rely on that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    points: Vec<(u32, u32)>,
}

impl Contour {
    /// Wrap a set of `(row, col)` points
    #[must_use]
    pub fn new(points: Vec<(u32, u32)>) -> Self {
        Self { points }
    }

    /// Component pixels as `(row, col)`
    #[must_use]
    pub fn points(&self) -> &[(u32, u32)] {
        &self.points
    }

    /// Number of pixels in the component
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the component holds no pixels
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Centroid of the component, see [`fit_centroid`]
    #[must_use]
    pub fn centroid(&self) -> Option<Point2<f64>> {
        fit_centroid(&self.points)
    }
}

/// Extract the 4-connected foreground components of `mask`.
///
/// Seeds are visited in row-major order and each component is grown with
/// an explicit stack, so deep blobs cannot overflow the call stack.
/// Components of `MIN_CONTOUR_PIXELS` pixels or fewer are dropped.
#[must_use]
pub fn find_contours(mask: &GrayImage) -> Vec<Contour> {
    let (width, height) = mask.dimensions();
    let index = |row: u32, col: u32| row as usize * width as usize + col as usize;
    let mut visited = vec![false; width as usize * height as usize];
    let mut contours = Vec::new();
    let mut stack: Vec<(u32, u32)> = Vec::new();

    for row in 0..height {
        for col in 0..width {
            if visited[index(row, col)] || mask.get_pixel(col, row)[0] != FOREGROUND {
                continue;
            }

            let mut points = Vec::new();
            stack.push((row, col));

            while let Some((r, c)) = stack.pop() {
                let idx = index(r, c);
                if visited[idx] || mask.get_pixel(c, r)[0] != FOREGROUND {
                    continue;
                }
                visited[idx] = true;
                points.push((r, c));

                if r > 0 {
                    stack.push((r - 1, c));
                }
                if r + 1 < height {
                    stack.push((r + 1, c));
                }
                if c > 0 {
                    stack.push((r, c - 1));
                }
                if c + 1 < width {
                    stack.push((r, c + 1));
                }
            }

            if points.len() > MIN_CONTOUR_PIXELS {
                contours.push(Contour::new(points));
            }
        }
    }

    contours
}

/// Arithmetic mean of `(row, col)` points, returned as `(x = col, y = row)`.
///
/// This stands in for an ellipse fit: it is the centre of mass of the
/// points, not of a fitted conic. Fewer than `MIN_CENTROID_POINTS` points
/// give `None`.
#[must_use]
#[allow(clippy::cast_precision_loss)] // point counts are far below 2^52
pub fn fit_centroid(points: &[(u32, u32)]) -> Option<Point2<f64>> {
    if points.len() < MIN_CENTROID_POINTS {
        return None;
    }

    let n = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &(row, col)| (sx + f64::from(col), sy + f64::from(row)));

    Some(Point2::new(sum_x / n, sum_y / n))
}

/// The contour with the most pixels; the earliest one wins ties.
#[must_use]
pub fn largest_contour(contours: &[Contour]) -> Option<&Contour> {
    contours
        .iter()
        .fold(None, |best: Option<&Contour>, contour| match best {
            Some(b) if contour.len() <= b.len() => Some(b),
            _ => Some(contour),
        })
}
