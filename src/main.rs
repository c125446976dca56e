//! Eye gaze tracking application: head alignment, calibration and tracking.

use anyhow::{bail, Result};
use clap::Parser;
use eye_gaze_tracking::{
    app::EyeTrackerApp,
    cli::Args,
    config::Config,
    frame_source::{FrameSource, ImageSequenceSource, SyntheticEyeCamera},
};
use log::{info, warn};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Eye Gaze Tracking");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };
    args.apply_to(&mut config);

    let source: Box<dyn FrameSource> = if let Some(dir) = &args.frames {
        info!("Reading frames from {}", dir.display());
        Box::new(ImageSequenceSource::new(dir)?)
    } else {
        info!("Using synthetic eye camera");
        Box::new(SyntheticEyeCamera::new(config.camera.noise_level, config.camera.seed))
    };

    // Create and run application
    let mut app = EyeTrackerApp::new(config, source)?;
    let summary = app.run(args.skip_head_check, args.tracking_frames)?;

    if !summary.calibrated() {
        bail!("Calibration did not complete");
    }

    if let Some(last) = summary.gaze_points.last() {
        info!(
            "Tracked {} frames, final gaze point ({:.1}, {:.1})",
            summary.gaze_points.len(),
            last.x,
            last.y
        );
    }

    Ok(())
}
