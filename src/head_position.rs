//! Head alignment check based on a skin-tone blob.
//!
//! The frame is converted to HSV and masked to the skin range. After an
//! erosion to drop speckle and a larger dilation to merge the face, the
//! centroid of the biggest blob is compared with the frame centre.

use crate::{
    constants::{DEFAULT_HEAD_TOLERANCE, HEAD_DILATE_KERNEL, HEAD_ERODE_KERNEL, SKIN_HSV_LOWER, SKIN_HSV_UPPER},
    image_processing::{dilate, erode, find_contours, largest_contour, mask_by_color_range, rgb_to_hsv, Frame},
};
use log::debug;

/// Outcome of one alignment check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadPositionResult {
    /// Head centre is within tolerance of the frame centre on both axes
    pub is_aligned: bool,
    /// Head centre x in frame pixels
    pub center_x: f64,
    /// Head centre y in frame pixels
    pub center_y: f64,
    /// Horizontal distance from the frame centre as a fraction of the width
    pub offset_x: f64,
    /// Vertical distance from the frame centre as a fraction of the height
    pub offset_y: f64,
}

impl HeadPositionResult {
    /// Result reported when no head blob is visible
    #[must_use]
    pub fn not_found(screen_width: f64, screen_height: f64) -> Self {
        Self {
            is_aligned: false,
            center_x: screen_width / 2.0,
            center_y: screen_height / 2.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Checks whether the user's head is centred in the camera view
#[derive(Debug, Clone)]
pub struct HeadPositionChecker {
    tolerance: f64,
}

impl Default for HeadPositionChecker {
    fn default() -> Self {
        Self::new(DEFAULT_HEAD_TOLERANCE)
    }
}

impl HeadPositionChecker {
    /// Create a checker accepting offsets up to `tolerance` of each frame dimension
    #[must_use]
    pub const fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Alignment tolerance in use
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Check the head position in `frame`.
    ///
    /// Alignment is judged against the frame centre. The screen dimensions
    /// are only used for the centre reported when no head is found.
    #[must_use]
    pub fn check(&self, frame: &Frame, screen_width: f64, screen_height: f64) -> HeadPositionResult {
        let hsv = rgb_to_hsv(frame);
        let skin = mask_by_color_range(&hsv, SKIN_HSV_LOWER, SKIN_HSV_UPPER);
        let merged = dilate(&erode(&skin, HEAD_ERODE_KERNEL), HEAD_DILATE_KERNEL);

        let contours = find_contours(&merged);
        let Some(center) = largest_contour(&contours).and_then(|c| c.centroid()) else {
            debug!("No skin region found");
            return HeadPositionResult::not_found(screen_width, screen_height);
        };

        let (width, height) = frame.dimensions();
        let (width, height) = (f64::from(width), f64::from(height));
        let delta_x = (center.x - width / 2.0).abs();
        let delta_y = (center.y - height / 2.0).abs();
        let is_aligned = delta_x <= self.tolerance * width && delta_y <= self.tolerance * height;

        debug!(
            "Head at ({:.1}, {:.1}), offset ({:.3}, {:.3}), aligned: {}",
            center.x,
            center.y,
            delta_x / width,
            delta_y / height,
            is_aligned
        );

        HeadPositionResult {
            is_aligned,
            center_x: center.x,
            center_y: center.y,
            offset_x: delta_x / width,
            offset_y: delta_y / height,
        }
    }
}
