//! Gaze calibration: sample collection, outlier rejection and the
//! polynomial mapping from eye features to screen coordinates.
//!
//! Samples are grouped into buckets by the exact screen point they were
//! taken for. A fit collapses every bucket to one representative and then
//! solves two independent least-squares problems (screen x and screen y)
//! over the basis `(dx, dy, dx^2, dy^2, dx*dy, 1)`.

pub mod features;
pub mod outliers;
pub mod solver;

pub use features::{BasisVector, GazeFeatures};

use crate::{
    constants::{CALIBRATION_GRID_SIZE, CALIBRATION_MARGIN, MIN_CALIBRATION_SAMPLES},
    pupil_detection::PupilData,
    Error, Result,
};
use log::{debug, info, warn};
use nalgebra::Point2;
use std::collections::HashMap;

/// One observation taken while the user looked at a calibration target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationSample {
    /// Target point on the screen
    pub screen: Point2<f64>,
    /// Eye features measured for the target
    pub features: GazeFeatures,
    /// Raw pupil position in frame pixels
    pub pupil: Point2<f64>,
}

/// All samples collected for one screen target
#[derive(Debug, Clone)]
pub struct CalibrationPointBucket {
    /// Target point shared by every sample in the bucket
    pub screen: Point2<f64>,
    /// Samples in arrival order
    pub samples: Vec<CalibrationSample>,
}

/// Fitted coefficients for screen x and screen y
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappingModel {
    /// Coefficients producing the screen x coordinate
    pub x_coeffs: BasisVector,
    /// Coefficients producing the screen y coordinate
    pub y_coeffs: BasisVector,
}

impl MappingModel {
    /// Map a feature vector to a screen point. The result is not clamped.
    #[must_use]
    pub fn apply(&self, features: &GazeFeatures) -> Point2<f64> {
        let basis = features.polynomial_basis();
        Point2::new(basis.dot(&self.x_coeffs), basis.dot(&self.y_coeffs))
    }
}

/// Lifecycle of a calibration engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationState {
    /// No samples yet
    Idle,
    /// Samples collected, no mapping fitted
    Collecting,
    /// A mapping is available
    Fitted,
}

/// Exact coordinate key; `-0.0` and `+0.0` share a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PointKey(u64, u64);

impl PointKey {
    fn new(point: Point2<f64>) -> Self {
        // Adding +0.0 turns -0.0 into +0.0 and leaves every other value alone.
        Self((point.x + 0.0).to_bits(), (point.y + 0.0).to_bits())
    }
}

/// Generate the 24 calibration targets for a `width x height` screen.
///
/// A 4x4 grid inset by 100 px (row-major) is followed by the four edge
/// midpoints and the four inset corners.
#[must_use]
#[allow(clippy::cast_precision_loss)] // grid indices are tiny
pub fn generate_calibration_points(width: f64, height: f64) -> Vec<Point2<f64>> {
    let margin = CALIBRATION_MARGIN;
    let steps = (CALIBRATION_GRID_SIZE - 1) as f64;
    let step_x = (width - 2.0 * margin) / steps;
    let step_y = (height - 2.0 * margin) / steps;

    let mut points = Vec::with_capacity(CALIBRATION_GRID_SIZE * CALIBRATION_GRID_SIZE + 8);
    for row in 0..CALIBRATION_GRID_SIZE {
        for col in 0..CALIBRATION_GRID_SIZE {
            points.push(Point2::new(
                margin + col as f64 * step_x,
                margin + row as f64 * step_y,
            ));
        }
    }

    points.extend([
        Point2::new(margin, height / 2.0),
        Point2::new(width - margin, height / 2.0),
        Point2::new(width / 2.0, margin),
        Point2::new(width / 2.0, height - margin),
        Point2::new(margin, margin),
        Point2::new(width - margin, height - margin),
        Point2::new(margin, height - margin),
        Point2::new(width - margin, margin),
    ]);

    points
}

/// Accumulates calibration samples and owns the fitted mapping
#[derive(Debug, Default)]
pub struct CalibrationSystem {
    buckets: Vec<CalibrationPointBucket>,
    index: HashMap<PointKey, usize>,
    sample_count: usize,
    mapping: Option<MappingModel>,
}

impl CalibrationSystem {
    /// Create an empty engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample for `screen_point`.
    ///
    /// Detections without a pupil or without both eye corners are ignored.
    pub fn add_sample(&mut self, screen_point: Point2<f64>, pupil: &PupilData) {
        let (Some(features), Some(center)) = (GazeFeatures::from_pupil_data(pupil), pupil.pupil_center) else {
            debug!("Ignoring incomplete detection for target ({:.1}, {:.1})", screen_point.x, screen_point.y);
            return;
        };

        let sample = CalibrationSample {
            screen: screen_point,
            features,
            pupil: center,
        };

        let key = PointKey::new(screen_point);
        let slot = *self.index.entry(key).or_insert_with(|| {
            self.buckets.push(CalibrationPointBucket {
                screen: screen_point,
                samples: Vec::new(),
            });
            self.buckets.len() - 1
        });
        self.buckets[slot].samples.push(sample);
        self.sample_count += 1;
    }

    /// Fit a mapping from the collected samples without storing it.
    ///
    /// # Errors
    ///
    /// * `Error::InsufficientSamples` if fewer than 10 raw samples were
    ///   collected or fewer than 10 buckets survive outlier rejection
    /// * `Error::SingularSystem` if the solve produces non-finite values
    pub fn fit(&self) -> Result<MappingModel> {
        if self.sample_count < MIN_CALIBRATION_SAMPLES {
            return Err(Error::InsufficientSamples {
                stage: "raw samples",
                found: self.sample_count,
                required: MIN_CALIBRATION_SAMPLES,
            });
        }

        let representatives: Vec<CalibrationSample> = self
            .buckets
            .iter()
            .filter_map(|bucket| outliers::representative_sample(&bucket.samples))
            .collect();

        if representatives.len() < MIN_CALIBRATION_SAMPLES {
            return Err(Error::InsufficientSamples {
                stage: "clean buckets",
                found: representatives.len(),
                required: MIN_CALIBRATION_SAMPLES,
            });
        }

        let x_coeffs = solver::least_squares(
            representatives
                .iter()
                .map(|s| (s.features.polynomial_basis(), s.screen.x)),
        )?;
        let y_coeffs = solver::least_squares(
            representatives
                .iter()
                .map(|s| (s.features.polynomial_basis(), s.screen.y)),
        )?;

        Ok(MappingModel { x_coeffs, y_coeffs })
    }

    /// Fit and store a mapping. Returns `false` and keeps any previous
    /// mapping if the fit fails.
    pub fn compute_mapping(&mut self) -> bool {
        match self.fit() {
            Ok(model) => {
                info!(
                    "Calibration fitted from {} samples in {} buckets",
                    self.sample_count,
                    self.buckets.len()
                );
                self.mapping = Some(model);
                true
            }
            Err(e) => {
                warn!("Calibration fit failed: {e}");
                false
            }
        }
    }

    /// Map a detection to a screen point, `None` without a mapping or
    /// with an incomplete detection
    #[must_use]
    pub fn map_gaze_to_screen(&self, pupil: &PupilData) -> Option<Point2<f64>> {
        let model = self.mapping.as_ref()?;
        let features = GazeFeatures::from_pupil_data(pupil)?;
        Some(model.apply(&features))
    }

    /// Total number of accepted samples
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Number of distinct screen targets with samples
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Buckets in the order their targets were first seen
    #[must_use]
    pub fn buckets(&self) -> &[CalibrationPointBucket] {
        &self.buckets
    }

    /// True once a mapping has been fitted
    #[must_use]
    pub fn is_calibrated(&self) -> bool {
        self.mapping.is_some()
    }

    /// The fitted mapping, if any
    #[must_use]
    pub fn mapping(&self) -> Option<&MappingModel> {
        self.mapping.as_ref()
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> CalibrationState {
        if self.mapping.is_some() {
            CalibrationState::Fitted
        } else if self.sample_count > 0 {
            CalibrationState::Collecting
        } else {
            CalibrationState::Idle
        }
    }
}
