//! Eye gaze tracking from webcam frames using classical image processing.
//!
//! This library estimates where on the screen a user is looking without
//! any learned model:
//! - Pixel-level primitives (grayscale, CLAHE, thresholding, morphology,
//!   Sobel edges, connected components) on `image` buffers
//! - Pupil and eye-corner detection
//! - Head alignment checking from a skin-tone blob
//! - A calibration engine fitting a second-order polynomial from eye
//!   features to screen coordinates by least squares
//!
//! The tracking pipeline consists of:
//! 1. Head alignment: wait until the head is centred in the camera view
//! 2. Calibration: sample the eye while the user looks at 24 known targets
//! 3. Fitting: reject outliers per target and solve for the mapping
//! 4. Tracking: map each new detection to the screen, smooth and clamp it
//!
//! # Examples
//!
//! ## Pupil Detection
//!
//! ```no_run
//! use eye_gaze_tracking::{pupil_detection::PupilDetector, utils::image_conversion::load_frame};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frame = load_frame("eye.png")?;
//! let detector = PupilDetector::default();
//!
//! let data = detector.detect(&frame);
//! if let Some(pupil) = data.pupil_center {
//!     println!("Pupil at ({:.1}, {:.1})", pupil.x, pupil.y);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Calibration
//!
//! ```
//! use eye_gaze_tracking::{
//!     calibration::{generate_calibration_points, CalibrationSystem},
//!     frame_source::{FrameSource, SyntheticEyeCamera},
//!     pupil_detection::PupilDetector,
//! };
//!
//! let mut camera = SyntheticEyeCamera::new(0, 42);
//! let detector = PupilDetector::default();
//! let mut calibration = CalibrationSystem::new();
//!
//! for target in generate_calibration_points(1920.0, 1080.0) {
//!     if let Some(frame) = camera.next_frame() {
//!         calibration.add_sample(target, &detector.detect(&frame));
//!     }
//! }
//!
//! if calibration.compute_mapping() {
//!     let frame = camera.next_frame().unwrap();
//!     let gaze = calibration.map_gaze_to_screen(&detector.detect(&frame));
//!     println!("Gaze: {gaze:?}");
//! }
//! ```
//!
//! ## Complete Session
//!
//! ```no_run
//! use eye_gaze_tracking::{app::EyeTrackerApp, config::Config, frame_source::SyntheticEyeCamera};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::default();
//! config.disable_delays();
//!
//! let mut app = EyeTrackerApp::new(config, Box::new(SyntheticEyeCamera::new(0, 42)))?;
//! let summary = app.run(false, 120)?;
//! println!("Calibrated: {}, tracked {} frames", summary.calibrated(), summary.gaze_points.len());
//! # Ok(())
//! # }
//! ```

/// Stateless pixel-array operations
pub mod image_processing;

/// Pupil and eye-corner detection
pub mod pupil_detection;

/// Head alignment check
pub mod head_position;

/// Gaze calibration and screen mapping
pub mod calibration;

/// Smoothing filters for the displayed gaze point
pub mod filters;

/// Camera frame sources
pub mod frame_source;

/// Utility functions for image conversion and coordinate handling
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Command-line arguments
pub mod cli;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
pub use nalgebra::Point2;
