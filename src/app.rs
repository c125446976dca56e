//! Headless eye tracking session: head alignment, calibration and tracking.
//!
//! The application pulls frames from a [`FrameSource`] one tick at a time.
//! Nothing is drawn; progress and results are reported through `log` and
//! returned to the caller.

use crate::{
    calibration::{generate_calibration_points, CalibrationSystem},
    config::Config,
    filters::GazeFilter,
    frame_source::FrameSource,
    head_position::{HeadPositionChecker, HeadPositionResult},
    pupil_detection::PupilDetector,
    utils::clamp_to_screen,
    Error, Result,
};
use log::{debug, info, warn};
use nalgebra::Point2;
use std::time::Duration;

/// Outcome of the head alignment phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentReport {
    /// Required number of consecutive aligned checks was reached
    pub aligned: bool,
    /// Checks performed, including ticks without a frame
    pub checks: u32,
    /// Last result from the head checker, if any frame arrived
    pub last_result: Option<HeadPositionResult>,
}

/// Outcome of the calibration phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationReport {
    /// Number of targets shown
    pub targets: usize,
    /// Samples accepted by the calibration engine
    pub samples: usize,
    /// A mapping was fitted
    pub success: bool,
}

/// Outcome of a full session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// Head alignment result, `None` when the check was skipped
    pub alignment: Option<AlignmentReport>,
    /// Calibration result, `None` when the session stopped before calibrating
    pub calibration: Option<CalibrationReport>,
    /// Displayed gaze points, one per tracked frame
    pub gaze_points: Vec<Point2<f64>>,
}

impl SessionSummary {
    /// True if calibration ran and produced a mapping
    #[must_use]
    pub fn calibrated(&self) -> bool {
        self.calibration.is_some_and(|c| c.success)
    }
}

/// Main application struct
pub struct EyeTrackerApp {
    config: Config,
    source: Box<dyn FrameSource>,
    head_checker: HeadPositionChecker,
    pupil_detector: PupilDetector,
    calibration: CalibrationSystem,
    filter: Box<dyn GazeFilter>,
}

impl EyeTrackerApp {
    /// Create a new eye tracking application
    ///
    /// # Errors
    /// * Returns error if the configuration is invalid
    pub fn new(config: Config, source: Box<dyn FrameSource>) -> Result<Self> {
        info!("Initializing eye tracking application");
        config.validate()?;

        let filter = config.create_filter()?;
        info!("Display filter: {}", filter.name());

        Ok(Self {
            head_checker: HeadPositionChecker::new(config.head.tolerance),
            pupil_detector: PupilDetector::new(config.pupil.clone()),
            calibration: CalibrationSystem::new(),
            filter,
            source,
            config,
        })
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Calibration engine owned by this session
    #[must_use]
    pub const fn calibration(&self) -> &CalibrationSystem {
        &self.calibration
    }

    /// Run all phases.
    ///
    /// Stops early if the head never lines up or calibration fails.
    ///
    /// # Errors
    /// * Propagates errors from the tracking phase
    pub fn run(&mut self, skip_head_check: bool, tracking_frames: usize) -> Result<SessionSummary> {
        let mut summary = SessionSummary {
            alignment: None,
            calibration: None,
            gaze_points: Vec::new(),
        };

        if skip_head_check {
            info!("Skipping head alignment check");
        } else {
            let alignment = self.run_head_alignment();
            summary.alignment = Some(alignment);
            if !alignment.aligned {
                warn!("Head alignment not reached after {} checks", alignment.checks);
                return Ok(summary);
            }
        }

        let calibration = self.run_calibration();
        summary.calibration = Some(calibration);
        if !calibration.success {
            return Ok(summary);
        }

        summary.gaze_points = self.run_tracking(tracking_frames)?;
        Ok(summary)
    }

    /// Check the head position until it stays aligned long enough.
    ///
    /// Every misaligned check restarts the countdown. Ticks without a frame
    /// leave the countdown alone. Gives up after `max_checks` ticks.
    pub fn run_head_alignment(&mut self) -> AlignmentReport {
        let head = self.config.head.clone();
        info!(
            "Head alignment: need {} consecutive aligned checks (tolerance {:.2})",
            head.required_aligned_checks, head.tolerance
        );

        let mut streak = 0u32;
        let mut report = AlignmentReport {
            aligned: false,
            checks: 0,
            last_result: None,
        };

        while report.checks < head.max_checks {
            pause(head.interval());
            report.checks += 1;

            let Some(frame) = self.source.next_frame() else {
                debug!("No frame for head check {}", report.checks);
                continue;
            };

            let result = self
                .head_checker
                .check(&frame, self.config.screen.width, self.config.screen.height);
            report.last_result = Some(result);

            if result.is_aligned {
                streak += 1;
                debug!("Aligned check {streak}/{}", head.required_aligned_checks);
                if streak >= head.required_aligned_checks {
                    info!("Head aligned after {} checks", report.checks);
                    report.aligned = true;
                    return report;
                }
            } else {
                if streak > 0 {
                    debug!("Alignment lost, restarting countdown");
                }
                streak = 0;
            }
        }

        report
    }

    /// Show every calibration target, sample once per target and fit.
    pub fn run_calibration(&mut self) -> CalibrationReport {
        let points = generate_calibration_points(self.config.screen.width, self.config.screen.height);
        info!("Calibration: {} targets", points.len());

        for (i, point) in points.iter().enumerate() {
            debug!("Target {}/{} at ({:.0}, {:.0})", i + 1, points.len(), point.x, point.y);
            pause(self.config.calibration.dwell());

            match self.source.next_frame() {
                Some(frame) => {
                    let data = self.pupil_detector.detect(&frame);
                    self.calibration.add_sample(*point, &data);
                }
                None => warn!("No frame for calibration target {}", i + 1),
            }
        }

        let success = self.calibration.compute_mapping();
        let report = CalibrationReport {
            targets: points.len(),
            samples: self.calibration.sample_count(),
            success,
        };

        if success {
            info!("Calibration complete with {} samples", report.samples);
        } else {
            warn!("Calibration failed with {} samples", report.samples);
        }
        report
    }

    /// Track the gaze for `frames` ticks.
    ///
    /// The displayed point starts at the screen centre, is smoothed by the
    /// display filter and kept `edge_margin` pixels inside the screen.
    /// Ticks without a frame or without a mapped point repeat the last
    /// displayed point.
    ///
    /// # Errors
    /// * `Error::NotCalibrated` if no mapping has been fitted
    pub fn run_tracking(&mut self, frames: usize) -> Result<Vec<Point2<f64>>> {
        if !self.calibration.is_calibrated() {
            return Err(Error::NotCalibrated);
        }

        let screen = self.config.screen.clone();
        let margin = self.config.tracking.edge_margin;
        let mut displayed = Point2::new(screen.width / 2.0, screen.height / 2.0);
        self.filter.reset();
        self.filter.seed(displayed.x, displayed.y);

        info!("Tracking for {frames} frames");
        let mut points = Vec::with_capacity(frames);
        for tick in 0..frames {
            pause(self.config.tracking.interval());

            let mapped = self.source.next_frame().and_then(|frame| {
                let data = self.pupil_detector.detect(&frame);
                self.calibration.map_gaze_to_screen(&data)
            });

            if let Some(gaze) = mapped {
                let (x, y) = self.filter.apply(gaze.x, gaze.y);
                displayed = clamp_to_screen(Point2::new(x, y), screen.width, screen.height, margin);
                self.filter.seed(displayed.x, displayed.y);
                debug!(
                    "Tick {tick}: gaze ({:.1}, {:.1}) shown at ({:.1}, {:.1})",
                    gaze.x, gaze.y, displayed.x, displayed.y
                );
            } else {
                debug!("Tick {tick}: no gaze estimate");
            }

            points.push(displayed);
        }

        info!("Tracking finished");
        Ok(points)
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        std::thread::sleep(duration);
    }
}
