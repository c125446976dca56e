//! Gaze feature vectors and their polynomial expansion.

use crate::{constants::POLYNOMIAL_TERMS, pupil_detection::PupilData};
use nalgebra::SVector;

/// Regression input: the polynomial terms of one feature vector
pub type BasisVector = SVector<f64, POLYNOMIAL_TERMS>;

/// Pupil position relative to the eye corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeFeatures {
    /// Pupil x minus the x of the corner midpoint
    pub dx: f64,
    /// Pupil y minus the y of the corner midpoint
    pub dy: f64,
    /// Right corner x minus left corner x
    pub width: f64,
}

impl GazeFeatures {
    /// Number of raw channels
    pub const CHANNELS: usize = 3;

    /// Create a feature vector from its raw channels
    #[must_use]
    pub const fn new(dx: f64, dy: f64, width: f64) -> Self {
        Self { dx, dy, width }
    }

    /// Features of a detection, or `None` when the pupil or a corner is missing
    #[must_use]
    pub fn from_pupil_data(data: &PupilData) -> Option<Self> {
        let pupil = data.pupil_center?;
        let (Some(left), Some(right)) = data.eye_corners else {
            return None;
        };

        Some(Self {
            dx: pupil.x - (left.x + right.x) / 2.0,
            dy: pupil.y - (left.y + right.y) / 2.0,
            width: right.x - left.x,
        })
    }

    /// Channels in `[dx, dy, width]` order
    #[must_use]
    pub const fn to_array(self) -> [f64; Self::CHANNELS] {
        [self.dx, self.dy, self.width]
    }

    /// Expand to `(dx, dy, dx^2, dy^2, dx*dy, 1)`.
    ///
    /// The eye width takes part in outlier rejection only, not in the fit.
    #[must_use]
    pub fn polynomial_basis(&self) -> BasisVector {
        BasisVector::new(
            self.dx,
            self.dy,
            self.dx * self.dx,
            self.dy * self.dy,
            self.dx * self.dy,
            1.0,
        )
    }

    /// Channel-wise mean, `None` for an empty input
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // sample counts are small
    pub fn mean<I: IntoIterator<Item = Self>>(features: I) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = [0.0; Self::CHANNELS];
        for f in features {
            for (acc, v) in sum.iter_mut().zip(f.to_array()) {
                *acc += v;
            }
            count += 1;
        }

        if count == 0 {
            return None;
        }

        let n = count as f64;
        Some(Self::new(sum[0] / n, sum[1] / n, sum[2] / n))
    }
}
