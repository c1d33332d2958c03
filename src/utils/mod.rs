//! Shared utility functions
//!
//! Pure helpers used for displaying resolved files: size labels, icons,
//! bitmap sample sizes and file name splitting.

pub mod icons;
pub mod sampling;
pub mod size;

pub use icons::{file_icon, FileIcon};
pub use sampling::{calculate_in_sample_size, sample_size_for_image};
pub use size::{file_size_label, format_size_si, readable_file_size};

const MIME_IMAGE_PREFIX: &str = "image/";
const MIME_VIDEO_PREFIX: &str = "video/";

/// Split a file name (leading directories dropped) into base name and extension
///
/// The extension is whatever follows the last `.` of the final component, so
/// `archive.tar.gz` splits into `("archive.tar", "gz")` and `README` into
/// `("README", "")`.
pub fn split_file_name(path: &str) -> (&str, &str) {
    let cut = path.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
    let name = &path[cut..];
    match name.rfind('.') {
        Some(dot) => (&name[..dot], &name[dot + 1..]),
        None => (name, ""),
    }
}

/// Extension of the last path component, empty if it has none
pub fn file_extension(path: &str) -> &str {
    split_file_name(path).1
}

/// Whether a MIME type names an image or a video
pub fn is_image_or_video_mime(mime: Option<&str>) -> bool {
    mime.is_some_and(|m| m.starts_with(MIME_IMAGE_PREFIX) || m.starts_with(MIME_VIDEO_PREFIX))
}
