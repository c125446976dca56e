use super::GazeFilter;
use crate::{Error, Result};

/// Exponential moving average of screen points
///
/// The first point passes through unchanged; each later point moves the
/// output `alpha` of the way towards the new input.
pub struct ExponentialFilter {
    alpha: f64,
    last: Option<(f64, f64)>,
}

impl ExponentialFilter {
    /// Create a filter with smoothing factor `alpha`
    ///
    /// # Errors
    /// * Returns error if `alpha` is not in (0, 1]
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(Error::InvalidInput(format!("Alpha must be in (0, 1], got {alpha}")));
        }

        Ok(Self { alpha, last: None })
    }

    /// Last smoothed point, if any
    #[must_use]
    pub const fn last(&self) -> Option<(f64, f64)> {
        self.last
    }
}

impl GazeFilter for ExponentialFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        let filtered = match self.last {
            Some((last_x, last_y)) => (
                last_x + self.alpha * (x - last_x),
                last_y + self.alpha * (y - last_y),
            ),
            None => (x, y),
        };

        self.last = Some(filtered);
        filtered
    }

    fn reset(&mut self) {
        self.last = None;
    }

    fn seed(&mut self, x: f64, y: f64) {
        self.last = Some((x, y));
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}
