//! Constants used throughout the pipeline

/// Connected components with this many pixels or fewer are treated as noise
pub const MIN_CONTOUR_PIXELS: usize = 50;

/// Minimum number of points for a centroid estimate
pub const MIN_CENTROID_POINTS: usize = 5;

/// Neutral intensity used for degenerate crops
pub const PLACEHOLDER_INTENSITY: u8 = 128;

/// Number of intensity levels in an 8-bit histogram
pub const HISTOGRAM_BINS: usize = 256;

/// Red luma weight in per mille (0.299)
pub const LUMA_WEIGHT_R: u32 = 299;

/// Green luma weight in per mille (0.587)
pub const LUMA_WEIGHT_G: u32 = 587;

/// Blue luma weight in per mille (0.114)
pub const LUMA_WEIGHT_B: u32 = 114;

/// Sum of the luma weights; R=G=B=v maps back to v
pub const LUMA_WEIGHT_SUM: u32 = 1000;

/// Default CLAHE clip limit for the eye band
pub const DEFAULT_CLAHE_CLIP_LIMIT: f64 = 2.0;

/// Default CLAHE tile edge length in pixels
pub const DEFAULT_CLAHE_TILE_SIZE: u32 = 8;

/// Default adaptive threshold window size (odd)
pub const DEFAULT_ADAPTIVE_BLOCK_SIZE: u32 = 11;

/// Default offset below the local mean for a pixel to count as dark
pub const DEFAULT_ADAPTIVE_C: f64 = 5.0;

/// Morphology kernel used to clean the pupil mask
pub const DEFAULT_PUPIL_MORPH_KERNEL: u32 = 3;

/// Maximum horizontal distance scanned for eye corners
pub const DEFAULT_CORNER_SEARCH_RADIUS: u32 = 100;

/// Lower bound of the skin-tone HSV range (OpenCV scale: H in [0,180))
pub const SKIN_HSV_LOWER: [u8; 3] = [0, 20, 70];

/// Upper bound of the skin-tone HSV range, inclusive
pub const SKIN_HSV_UPPER: [u8; 3] = [20, 255, 255];

/// Erosion kernel that strips speckle from the skin mask
pub const HEAD_ERODE_KERNEL: u32 = 5;

/// Dilation kernel that merges the head blob
pub const HEAD_DILATE_KERNEL: u32 = 7;

/// Default alignment tolerance as a fraction of the frame dimensions
pub const DEFAULT_HEAD_TOLERANCE: f64 = 0.2;

/// Inset of calibration targets from the screen edges, in pixels
pub const CALIBRATION_MARGIN: f64 = 100.0;

/// Calibration grid is `CALIBRATION_GRID_SIZE` x `CALIBRATION_GRID_SIZE`
pub const CALIBRATION_GRID_SIZE: usize = 4;

/// Minimum raw samples and clean buckets required for a fit
pub const MIN_CALIBRATION_SAMPLES: usize = 10;

/// Samples further than this many standard deviations from their bucket mean are rejected
pub const OUTLIER_SIGMA: f64 = 2.0;

/// Number of terms in the polynomial gaze basis
pub const POLYNOMIAL_TERMS: usize = 6;

/// Pivots smaller than this are treated as structurally singular
pub const PIVOT_EPSILON: f64 = 1e-10;

/// Default time a calibration target is shown, in milliseconds
pub const DEFAULT_DWELL_MS: u64 = 1500;

/// Default pause between head checks, in milliseconds
pub const DEFAULT_HEAD_CHECK_INTERVAL_MS: u64 = 100;

/// Default pause between tracking ticks, in milliseconds (about 30 fps)
pub const DEFAULT_TRACKING_INTERVAL_MS: u64 = 33;

/// Consecutive aligned checks required before calibration starts (3 s at 100 ms)
pub const DEFAULT_REQUIRED_ALIGNED_CHECKS: u32 = 30;

/// Default display smoothing factor for the tracked gaze point
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.3;

/// Default distance kept between the displayed gaze point and the screen edge
pub const DEFAULT_EDGE_MARGIN: f64 = 10.0;

/// Synthetic camera frame width
pub const SYNTHETIC_FRAME_WIDTH: u32 = 640;

/// Synthetic camera frame height
pub const SYNTHETIC_FRAME_HEIGHT: u32 = 480;

/// Synthetic pupil radius in pixels
pub const SYNTHETIC_PUPIL_RADIUS: f64 = 15.0;

/// Synthetic pupil intensity at its centre, falling to 0 at the rim
pub const SYNTHETIC_PUPIL_DEPTH: f64 = 30.0;

/// Horizontal swing of the synthetic pupil around the frame centre, in pixels
pub const SYNTHETIC_SWING_X: f64 = 20.0;

/// Vertical swing of the synthetic pupil around the frame centre, in pixels
pub const SYNTHETIC_SWING_Y: f64 = 10.0;

/// Simulated seconds between synthetic frames
pub const SYNTHETIC_TIME_STEP: f64 = 0.033;

/// Skin tone filling the synthetic frame (RGB)
pub const SYNTHETIC_SKIN_RGB: [u8; 3] = [230, 180, 150];
