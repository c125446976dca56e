//! Error types for the eye gaze tracking library.
//!
//! Missing signals (no face, no pupil, too few calibration samples) are not
//! errors: detectors return `Option` and the calibration engine returns
//! `bool`. The variants below cover everything around that core.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding failed
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not enough calibration data to fit a mapping
    #[error("Insufficient calibration samples: {stage} has {found}, need at least {required}")]
    InsufficientSamples {
        /// Which stage of the fit ran short ("raw samples" or "clean buckets")
        stage: &'static str,
        /// Number of samples available at that stage
        found: usize,
        /// Minimum number required
        required: usize,
    },

    /// The least-squares system produced non-finite values
    #[error("Singular calibration system: {0}")]
    SingularSystem(String),

    /// Tracking was requested before a mapping was fitted
    #[error("Gaze mapping is not calibrated")]
    NotCalibrated,

    /// Frame source could not be opened or read
    #[error("Frame source error: {0}")]
    FrameSource(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
