//! Display smoothing for the tracked gaze point.
//!
//! The mapped gaze point jumps a few pixels between frames even when the
//! eye is still. Filters here smooth the sequence of screen points before
//! it is shown.

/// Exponential smoothing of screen points
pub mod exponential;

use crate::{Error, Result};

/// Trait for gaze point filters
pub trait GazeFilter: Send + Sync {
    /// Feed one screen point and get the smoothed point back
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64);

    /// Forget all previous points
    fn reset(&mut self);

    /// Continue smoothing from `(x, y)` as if it were the last output
    fn seed(&mut self, x: f64, y: f64);

    /// Get filter name
    fn name(&self) -> &str;
}

/// Pass-through filter
pub struct NoFilter;

impl GazeFilter for NoFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }

    fn reset(&mut self) {}

    fn seed(&mut self, _x: f64, _y: f64) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a gaze filter by type name
///
/// `alpha` is only used by the exponential filter.
///
/// # Errors
/// * Returns error for an unknown filter name or an invalid `alpha`
pub fn create_filter(filter_type: &str, alpha: f64) -> Result<Box<dyn GazeFilter>> {
    match filter_type.to_lowercase().as_str() {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "exponential" | "ema" => Ok(Box::new(exponential::ExponentialFilter::new(alpha)?)),
        _ => Err(Error::InvalidInput(format!("Unknown filter type: {filter_type}"))),
    }
}
