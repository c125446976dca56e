//! Command-line arguments of the `eye-gaze-tracking` binary.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Headless eye gaze tracking: head check, calibration and tracking
#[derive(Parser, Debug, Clone)]
#[command(name = "eye-gaze-tracking", author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Directory of PNG/JPEG frames to use instead of the synthetic camera
    #[arg(long)]
    pub frames: Option<PathBuf>,

    /// Screen width in pixels
    #[arg(long)]
    pub screen_width: Option<f64>,

    /// Screen height in pixels
    #[arg(long)]
    pub screen_height: Option<f64>,

    /// Head alignment tolerance as a fraction of the frame size
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Go straight to calibration
    #[arg(long)]
    pub skip_head_check: bool,

    /// Number of frames to track after calibration
    #[arg(long, default_value = "120")]
    pub tracking_frames: usize,

    /// Run without pauses between ticks
    #[arg(long)]
    pub no_delay: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Override configuration values given on the command line
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(width) = self.screen_width {
            config.screen.width = width;
        }
        if let Some(height) = self.screen_height {
            config.screen.height = height;
        }
        if let Some(tolerance) = self.tolerance {
            config.head.tolerance = tolerance;
        }
        if self.no_delay {
            config.disable_delays();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "eye-gaze-tracking",
            "--screen-width",
            "1280",
            "--tolerance",
            "0.3",
            "--no-delay",
        ]);
        let mut config = Config::default();
        args.apply_to(&mut config);
        assert_eq!(config.screen.width, 1280.0);
        assert_eq!(config.screen.height, 1080.0);
        assert_eq!(config.head.tolerance, 0.3);
        assert_eq!(config.calibration.dwell_ms, 0);
    }
}
