//! Utility functions for pixel conversions and screen coordinate handling.

pub mod image_conversion;
pub mod safe_cast;

use nalgebra::Point2;

/// Keep a point at least `margin` pixels inside a `width x height` screen
///
/// If the screen is too small for the margin the point collapses to the
/// screen centre on that axis.
#[must_use]
pub fn clamp_to_screen(point: Point2<f64>, width: f64, height: f64, margin: f64) -> Point2<f64> {
    let clamp_axis = |value: f64, extent: f64| {
        let (lo, hi) = (margin, extent - margin);
        if lo > hi {
            extent / 2.0
        } else {
            value.clamp(lo, hi)
        }
    };

    Point2::new(clamp_axis(point.x, width), clamp_axis(point.y, height))
}
