//! Stateless pixel-array operations used by the detectors.
//!
//! Every function takes its input by reference and returns a freshly
//! allocated image; nothing here keeps state between calls. Grayscale
//! images and binary masks are both `image::GrayImage`; masks only ever
//! contain 0 (background) and 255 (foreground).

/// Colour space conversion and colour-range masking
pub mod color;

/// Histogram, Otsu, manual and adaptive thresholding
pub mod threshold;

/// Tile-based contrast-limited histogram equalisation
pub mod clahe;

/// Square-kernel erosion and dilation
pub mod morphology;

/// Sobel edge magnitude
pub mod edges;

/// Connected-component extraction and centroid estimation
pub mod contours;

/// Clamped rectangular crops
pub mod region;

pub use clahe::clahe;
pub use color::{mask_by_color_range, rgb_to_gray, rgb_to_hsv, Frame, HsvImage};
pub use contours::{find_contours, fit_centroid, largest_contour, Contour};
pub use edges::sobel_edges;
pub use morphology::{dilate, erode};
pub use region::crop_region;
pub use threshold::{adaptive_threshold, compute_histogram, manual_threshold, otsu_binarize, otsu_threshold};

/// Foreground value of a binary mask
pub const FOREGROUND: u8 = 255;

/// Background value of a binary mask
pub const BACKGROUND: u8 = 0;
