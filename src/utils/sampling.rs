//! Bitmap downsampling ratios

use std::path::Path;

/// Integer divisor that brings a `width` x `height` bitmap near a requested size
///
/// Starts from the smaller of the rounded height/width ratios when the source
/// is larger than requested, then grows until the decoded pixel count is at
/// most twice the requested area. Zero requested dimensions yield 1.
pub fn calculate_in_sample_size(width: u32, height: u32, req_width: u32, req_height: u32) -> u32 {
    if req_width == 0 || req_height == 0 {
        return 1;
    }

    let mut sample_size = 1;
    if height > req_height || width > req_width {
        let height_ratio = (height as f32 / req_height as f32).round() as u32;
        let width_ratio = (width as f32 / req_width as f32).round() as u32;
        sample_size = height_ratio.min(width_ratio).max(1);
    }

    let total_pixels = width as f64 * height as f64;
    let pixel_cap = req_width as f64 * req_height as f64 * 2.0;
    while total_pixels / (sample_size as f64 * sample_size as f64) > pixel_cap {
        sample_size += 1;
    }

    sample_size
}

/// Sample size for an image file, reading only its header
pub fn sample_size_for_image(path: &Path, req_width: u32, req_height: u32) -> Option<u32> {
    match image::image_dimensions(path) {
        Ok((width, height)) => Some(calculate_in_sample_size(width, height, req_width, req_height)),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Cannot read image dimensions");
            None
        }
    }
}
