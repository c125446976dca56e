//! Configuration management for the eye gaze tracker

use crate::{
    constants::{
        DEFAULT_DWELL_MS, DEFAULT_EDGE_MARGIN, DEFAULT_HEAD_CHECK_INTERVAL_MS, DEFAULT_HEAD_TOLERANCE,
        DEFAULT_REQUIRED_ALIGNED_CHECKS, DEFAULT_SMOOTHING_ALPHA, DEFAULT_TRACKING_INTERVAL_MS,
    },
    filters::{create_filter, GazeFilter},
    pupil_detection::PupilDetectorConfig,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Screen the gaze is mapped onto
    pub screen: ScreenConfig,

    /// Pupil detector parameters
    pub pupil: PupilDetectorConfig,

    /// Head alignment check
    pub head: HeadCheckConfig,

    /// Calibration phase
    pub calibration: CalibrationConfig,

    /// Tracking phase
    pub tracking: TrackingConfig,

    /// Synthetic camera
    pub camera: CameraConfig,
}

/// Screen dimensions in pixels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScreenConfig {
    /// Screen width
    pub width: f64,

    /// Screen height
    pub height: f64,
}

/// Head alignment parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeadCheckConfig {
    /// Allowed offset from the frame centre as a fraction of each dimension
    pub tolerance: f64,

    /// Consecutive aligned checks needed to pass
    pub required_aligned_checks: u32,

    /// Pause between checks
    pub check_interval_ms: u64,

    /// Give up after this many checks
    pub max_checks: u32,
}

/// Calibration parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Time each target is shown before a sample is taken
    pub dwell_ms: u64,
}

/// Tracking parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackingConfig {
    /// Pause between tracking ticks
    pub frame_interval_ms: u64,

    /// Display filter: "exponential" or "none"
    pub filter: String,

    /// Exponential smoothing factor (0.0-1.0]
    pub smoothing_alpha: f64,

    /// Minimum distance of the displayed point from the screen edge
    pub edge_margin: f64,
}

/// Synthetic camera parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Uniform noise amplitude added to each colour channel
    pub noise_level: u8,

    /// Seed for the noise generator
    pub seed: u64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl Default for HeadCheckConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_HEAD_TOLERANCE,
            required_aligned_checks: DEFAULT_REQUIRED_ALIGNED_CHECKS,
            check_interval_ms: DEFAULT_HEAD_CHECK_INTERVAL_MS,
            max_checks: 300,
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            dwell_ms: DEFAULT_DWELL_MS,
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: DEFAULT_TRACKING_INTERVAL_MS,
            filter: "exponential".to_string(),
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            edge_margin: DEFAULT_EDGE_MARGIN,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            noise_level: 0,
            seed: 42,
        }
    }
}

impl HeadCheckConfig {
    /// Pause between checks
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }
}

impl CalibrationConfig {
    /// Dwell per target
    #[must_use]
    pub const fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }
}

impl TrackingConfig {
    /// Pause between tracking ticks
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// * Returns error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    /// * Returns error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create the display filter from configuration
    ///
    /// # Errors
    /// * Returns error for an unknown filter name or invalid alpha
    pub fn create_filter(&self) -> Result<Box<dyn GazeFilter>> {
        create_filter(&self.tracking.filter, self.tracking.smoothing_alpha)
    }

    /// Zero every pause so the phases run as fast as frames arrive
    pub fn disable_delays(&mut self) {
        self.head.check_interval_ms = 0;
        self.calibration.dwell_ms = 0;
        self.tracking.frame_interval_ms = 0;
    }

    /// Validate configuration
    ///
    /// # Errors
    /// * Returns error describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        // Screen
        if !(self.screen.width > 0.0 && self.screen.height > 0.0) {
            return Err(Error::ConfigError("Screen dimensions must be greater than 0".to_string()));
        }

        // Pupil detector
        if !(self.pupil.clahe_clip_limit > 0.0) {
            return Err(Error::ConfigError("CLAHE clip limit must be greater than 0".to_string()));
        }
        if self.pupil.clahe_tile_size == 0 {
            return Err(Error::ConfigError("CLAHE tile size must be greater than 0".to_string()));
        }
        if self.pupil.adaptive_block_size == 0 || self.pupil.adaptive_block_size % 2 == 0 {
            return Err(Error::ConfigError(
                "Adaptive threshold block size must be odd and greater than 0".to_string(),
            ));
        }
        if self.pupil.morph_kernel == 0 || self.pupil.morph_kernel % 2 == 0 {
            return Err(Error::ConfigError(
                "Morphology kernel must be odd and greater than 0".to_string(),
            ));
        }

        // Head check
        if !(self.head.tolerance > 0.0 && self.head.tolerance <= 1.0) {
            return Err(Error::ConfigError("Head tolerance must be in (0.0, 1.0]".to_string()));
        }
        if self.head.required_aligned_checks == 0 {
            return Err(Error::ConfigError(
                "Required aligned checks must be greater than 0".to_string(),
            ));
        }

        // Tracking
        if !(self.tracking.smoothing_alpha > 0.0 && self.tracking.smoothing_alpha <= 1.0) {
            return Err(Error::ConfigError("Smoothing alpha must be in (0.0, 1.0]".to_string()));
        }
        let margin = self.tracking.edge_margin;
        if !(margin >= 0.0 && 2.0 * margin < self.screen.width && 2.0 * margin < self.screen.height) {
            return Err(Error::ConfigError(
                "Edge margin must be non-negative and smaller than half the screen".to_string(),
            ));
        }
        self.create_filter()?;

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Eye Gaze Tracking Configuration

# Screen the gaze is mapped onto (pixels)
screen:
  width: 1920.0
  height: 1080.0

# Pupil detector
pupil:
  clahe_clip_limit: 2.0
  clahe_tile_size: 8
  adaptive_block_size: 11
  adaptive_c: 5.0
  morph_kernel: 3
  corner_search_radius: 100

# Head alignment check
head:
  tolerance: 0.2
  required_aligned_checks: 30
  check_interval_ms: 100
  max_checks: 300

# Calibration
calibration:
  dwell_ms: 1500

# Tracking
tracking:
  frame_interval_ms: 33
  filter: "exponential"
  smoothing_alpha: 0.3
  edge_margin: 10.0

# Synthetic camera
camera:
  noise_level: 0
  seed: 42
"#;
