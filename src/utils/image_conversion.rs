//! Conversions from decoded images and image files into frames.

use crate::{image_processing::Frame, Result};
use image::DynamicImage;
use std::path::Path;

/// Convert any decoded image into an RGBA frame
#[must_use]
pub fn frame_from_dynamic(image: DynamicImage) -> Frame {
    image.to_rgba8()
}

/// Decode an image file (PNG or JPEG) into a frame
///
/// # Errors
/// * Returns error if the file cannot be read or decoded
pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<Frame> {
    let image = image::open(path.as_ref())?;
    Ok(frame_from_dynamic(image))
}
