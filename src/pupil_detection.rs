//! Pupil and eye-corner detection on a single frame.
//!
//! The pupil is found in a horizontal band through the middle of the frame:
//! the band is contrast-equalised, thresholded against its local mean and
//! cleaned with an opening, and the centroid of the largest dark blob is
//! taken as the pupil centre. Eye corners are the strongest Sobel responses
//! on the pupil's row to either side of it.

use crate::{
    constants::{
        DEFAULT_ADAPTIVE_BLOCK_SIZE, DEFAULT_ADAPTIVE_C, DEFAULT_CLAHE_CLIP_LIMIT, DEFAULT_CLAHE_TILE_SIZE,
        DEFAULT_CORNER_SEARCH_RADIUS, DEFAULT_PUPIL_MORPH_KERNEL,
    },
    image_processing::{
        adaptive_threshold, clahe, crop_region, dilate, erode, find_contours, largest_contour, rgb_to_gray,
        sobel_edges, Frame,
    },
    utils::safe_cast::f64_floor_to_u32_clamp,
};
use image::GrayImage;
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Result of one detection. Every field is `None` when no pupil was found.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PupilData {
    /// Pupil centre in frame pixels
    pub pupil_center: Option<Point2<f64>>,
    /// Left and right eye corners in frame pixels
    pub eye_corners: (Option<Point2<f64>>, Option<Point2<f64>>),
}

impl PupilData {
    /// A detection with nothing found
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            pupil_center: None,
            eye_corners: (None, None),
        }
    }

    /// True if the pupil and both corners are present
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.pupil_center.is_some() && self.eye_corners.0.is_some() && self.eye_corners.1.is_some()
    }
}

/// Tuning parameters for the pupil detector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PupilDetectorConfig {
    /// CLAHE clip limit, as a multiple of the mean bin height
    pub clahe_clip_limit: f64,
    /// CLAHE tile edge length in pixels
    pub clahe_tile_size: u32,
    /// Adaptive threshold window size (odd)
    pub adaptive_block_size: u32,
    /// Offset subtracted from the local mean
    pub adaptive_c: f64,
    /// Opening kernel size (odd)
    pub morph_kernel: u32,
    /// Horizontal distance scanned for each eye corner
    pub corner_search_radius: u32,
}

impl Default for PupilDetectorConfig {
    fn default() -> Self {
        Self {
            clahe_clip_limit: DEFAULT_CLAHE_CLIP_LIMIT,
            clahe_tile_size: DEFAULT_CLAHE_TILE_SIZE,
            adaptive_block_size: DEFAULT_ADAPTIVE_BLOCK_SIZE,
            adaptive_c: DEFAULT_ADAPTIVE_C,
            morph_kernel: DEFAULT_PUPIL_MORPH_KERNEL,
            corner_search_radius: DEFAULT_CORNER_SEARCH_RADIUS,
        }
    }
}

/// Locates the pupil and eye corners in camera frames
#[derive(Debug, Clone, Default)]
pub struct PupilDetector {
    config: PupilDetectorConfig,
}

impl PupilDetector {
    /// Create a detector with the given parameters
    #[must_use]
    pub const fn new(config: PupilDetectorConfig) -> Self {
        Self { config }
    }

    /// Parameters in use
    #[must_use]
    pub const fn config(&self) -> &PupilDetectorConfig {
        &self.config
    }

    /// Detect the pupil and eye corners in `frame`.
    ///
    /// Returns [`PupilData::absent`] for an empty frame or when the eye band
    /// holds no usable dark blob.
    #[must_use]
    pub fn detect(&self, frame: &Frame) -> PupilData {
        let gray = rgb_to_gray(frame);
        let (width, height) = gray.dimensions();
        if width == 0 || height == 0 {
            debug!("Empty frame, skipping pupil detection");
            return PupilData::absent();
        }

        let band_top = height / 3;
        let band_height = height / 2;
        let band = crop_region(
            &gray,
            0,
            i64::from(band_top),
            i64::from(width),
            i64::from(band_height),
        );

        let Some(center) = self.locate_pupil(&band) else {
            debug!("No pupil candidate in eye band");
            return PupilData::absent();
        };
        let pupil = Point2::new(center.x, center.y + f64::from(band_top));

        let edges = sobel_edges(&gray);
        let (left, right) = self.find_eye_corners(&edges, pupil);
        debug!(
            "Pupil at ({:.1}, {:.1}), corners at x={:.1} and x={:.1}",
            pupil.x, pupil.y, left.x, right.x
        );

        PupilData {
            pupil_center: Some(pupil),
            eye_corners: (Some(left), Some(right)),
        }
    }

    /// Centroid of the largest dark blob in the eye band, in band coordinates
    fn locate_pupil(&self, band: &GrayImage) -> Option<Point2<f64>> {
        let cfg = &self.config;
        let enhanced = clahe(band, cfg.clahe_clip_limit, cfg.clahe_tile_size);
        let mask = adaptive_threshold(&enhanced, cfg.adaptive_block_size, cfg.adaptive_c);
        let opened = dilate(&erode(&mask, cfg.morph_kernel), cfg.morph_kernel);

        let contours = find_contours(&opened);
        largest_contour(&contours)?.centroid()
    }

    /// Find the eye corners on the pupil's row of an edge map.
    ///
    /// Scans left and right of the pupil up to the search radius and takes
    /// the first strongest edge on each side. A side without any edge keeps
    /// the pupil's x. Both corners use the pupil's y.
    #[must_use]
    pub fn find_eye_corners(&self, edges: &GrayImage, pupil: Point2<f64>) -> (Point2<f64>, Point2<f64>) {
        let (width, height) = edges.dimensions();
        if width == 0 || height == 0 {
            return (pupil, pupil);
        }

        let row = f64_floor_to_u32_clamp(pupil.y, 0, height - 1);
        let radius = f64::from(self.config.corner_search_radius);
        let start = floor_to_i64(pupil.x);

        let left_bound = ceil_to_i64((pupil.x - radius).max(0.0));
        let right_bound = ceil_to_i64((pupil.x + radius).min(f64::from(width)));

        let left_x = strongest_edge(edges, row, (left_bound..=start).rev()).unwrap_or(pupil.x);
        let right_x = strongest_edge(edges, row, start..right_bound).unwrap_or(pupil.x);

        (Point2::new(left_x, pupil.y), Point2::new(right_x, pupil.y))
    }
}

/// First column (in scan order) holding the strictly largest positive edge
#[allow(clippy::cast_precision_loss)] // column indices are far below 2^52
fn strongest_edge<I: Iterator<Item = i64>>(edges: &GrayImage, row: u32, columns: I) -> Option<f64> {
    let mut best: Option<(i64, u8)> = None;
    for x in columns {
        let Ok(col) = u32::try_from(x) else {
            continue;
        };
        if col >= edges.width() {
            continue;
        }
        let magnitude = edges.get_pixel(col, row)[0];
        if magnitude > best.map_or(0, |(_, m)| m) {
            best = Some((x, magnitude));
        }
    }
    best.map(|(x, _)| x as f64)
}

#[allow(clippy::cast_possible_truncation)] // frame coordinates fit in i64
fn floor_to_i64(value: f64) -> i64 {
    if value.is_finite() {
        value.floor() as i64
    } else {
        0
    }
}

#[allow(clippy::cast_possible_truncation)] // frame coordinates fit in i64
fn ceil_to_i64(value: f64) -> i64 {
    if value.is_finite() {
        value.ceil() as i64
    } else {
        0
    }
}
