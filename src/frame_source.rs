//! Frame sources feeding the tracker.
//!
//! The tracker pulls one frame per tick. A source that has nothing to
//! offer returns `None` and the tick is skipped.

use crate::{
    constants::{
        SYNTHETIC_FRAME_HEIGHT, SYNTHETIC_FRAME_WIDTH, SYNTHETIC_PUPIL_DEPTH, SYNTHETIC_PUPIL_RADIUS,
        SYNTHETIC_SKIN_RGB, SYNTHETIC_SWING_X, SYNTHETIC_SWING_Y, SYNTHETIC_TIME_STEP,
    },
    image_processing::Frame,
    utils::image_conversion::load_frame,
    Error, Result,
};
use image::Rgba;
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
};

/// Anything that can hand out camera frames
pub trait FrameSource {
    /// Next frame, or `None` if no frame is ready
    fn next_frame(&mut self) -> Option<Frame>;
}

/// Generated eye images: a skin-toned frame with a dark pupil that drifts
/// around the centre.
///
/// Every frame advances a simulated clock by 33 ms. The pupil centre is
/// `(w/2 + trunc(20 sin 2t), h/2 + trunc(10 cos 3t))` and its intensity
/// falls off linearly from 30 at the centre to 0 at the rim.
pub struct SyntheticEyeCamera {
    width: u32,
    height: u32,
    frame_index: u64,
    noise_level: u8,
    rng: StdRng,
}

impl SyntheticEyeCamera {
    /// Create a 640x480 camera.
    ///
    /// `noise_level` adds uniform noise in `[-noise_level, noise_level]` to
    /// every colour channel; `seed` makes the noise reproducible.
    #[must_use]
    pub fn new(noise_level: u8, seed: u64) -> Self {
        Self::with_size(SYNTHETIC_FRAME_WIDTH, SYNTHETIC_FRAME_HEIGHT, noise_level, seed)
    }

    /// Create a camera with a custom frame size
    #[must_use]
    pub fn with_size(width: u32, height: u32, noise_level: u8, seed: u64) -> Self {
        Self {
            width,
            height,
            frame_index: 0,
            noise_level,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of frames produced so far
    #[must_use]
    pub const fn frames_produced(&self) -> u64 {
        self.frame_index
    }

    /// Pupil centre of the frame with the given index
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)] // small pixel offsets
    pub fn pupil_position(&self, frame_index: u64) -> (i64, i64) {
        let t = frame_index as f64 * SYNTHETIC_TIME_STEP;
        let x = i64::from(self.width / 2) + (SYNTHETIC_SWING_X * (2.0 * t).sin()).trunc() as i64;
        let y = i64::from(self.height / 2) + (SYNTHETIC_SWING_Y * (3.0 * t).cos()).trunc() as i64;
        (x, y)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // intensity is in [0, 30]
    fn render(&mut self, pupil: (i64, i64)) -> Frame {
        let [r, g, b] = SYNTHETIC_SKIN_RGB;
        let mut frame = Frame::from_pixel(self.width, self.height, Rgba([r, g, b, u8::MAX]));

        let radius = SYNTHETIC_PUPIL_RADIUS;
        let (px, py) = pupil;
        let reach = radius as i64;
        let rows = (py - reach).max(0)..(py + reach).min(i64::from(self.height));
        for y in rows {
            let cols = (px - reach).max(0)..(px + reach).min(i64::from(self.width));
            for x in cols {
                #[allow(clippy::cast_precision_loss)]
                let dist = (((y - py).pow(2) + (x - px).pow(2)) as f64).sqrt();
                if dist < radius {
                    let value = (SYNTHETIC_PUPIL_DEPTH * (1.0 - dist / radius)) as u8;
                    if let (Ok(col), Ok(row)) = (u32::try_from(x), u32::try_from(y)) {
                        frame.put_pixel(col, row, Rgba([value, value, value, u8::MAX]));
                    }
                }
            }
        }

        if self.noise_level > 0 {
            let level = i16::from(self.noise_level);
            for pixel in frame.pixels_mut() {
                for channel in pixel.0.iter_mut().take(3) {
                    let noisy = i16::from(*channel) + self.rng.gen_range(-level..=level);
                    *channel = noisy.clamp(0, 255) as u8;
                }
            }
        }

        frame
    }
}

impl FrameSource for SyntheticEyeCamera {
    fn next_frame(&mut self) -> Option<Frame> {
        let pupil = self.pupil_position(self.frame_index);
        let frame = self.render(pupil);
        self.frame_index += 1;
        Some(frame)
    }
}

/// Frames read from the PNG and JPEG files of a directory, in file name order
pub struct ImageSequenceSource {
    pending: VecDeque<PathBuf>,
    total: usize,
}

impl ImageSequenceSource {
    /// Collect the image files in `dir`.
    ///
    /// # Errors
    /// * Returns error if the directory cannot be read or holds no images
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_supported_image(&path) {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(Error::FrameSource(format!("No PNG or JPEG files in {}", dir.display())));
        }

        paths.sort();
        info!("Found {} frames in {}", paths.len(), dir.display());
        let total = paths.len();
        Ok(Self {
            pending: paths.into(),
            total,
        })
    }

    /// Number of images found
    #[must_use]
    pub const fn len(&self) -> usize {
        self.total
    }

    /// True if the directory held no images
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Images not yet returned
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Option<Frame> {
        let Some(path) = self.pending.pop_front() else {
            debug!("Image sequence exhausted");
            return None;
        };

        match load_frame(&path) {
            Ok(frame) => Some(frame),
            Err(e) => {
                warn!("Skipping unreadable frame {}: {e}", path.display());
                None
            }
        }
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
}
