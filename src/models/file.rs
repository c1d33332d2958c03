use serde::{Deserialize, Serialize};

use crate::utils::{file_icon, file_size_label, is_image_or_video_mime};

/// A resolved handle together with what a file list needs to show it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFile {
    /// File name
    pub name: String,
    /// Absolute path the handle resolved to
    pub path: String,
    /// File size in bytes
    pub size: u64,
    /// Size formatted for display ("1.5 kB")
    pub size_label: String,
    /// Last modified timestamp (milliseconds since epoch)
    pub modified_at: Option<i64>,
    /// File extension (without dot)
    pub extension: Option<String>,
    /// MIME type guess based on extension
    pub mime_type: Option<String>,
    /// Icon resource for known document types
    pub icon: Option<String>,
    /// Whether previews can be generated (image or video)
    pub is_media: bool,
}

impl ResolvedFile {
    /// Describe the file at a resolved path
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let path_str = path.to_string_lossy().to_string();

        let extension = path.extension().map(|e| e.to_string_lossy().to_string());

        let mime_type = extension.as_ref().and_then(|ext| {
            mime_guess::from_ext(ext)
                .first()
                .map(|m| m.to_string())
        });

        let modified_at = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as i64);

        let icon = file_icon(&path_str).map(|icon| icon.resource_name().to_string());
        let is_media = is_image_or_video_mime(mime_type.as_deref());

        Ok(Self {
            name,
            size: metadata.len(),
            size_label: file_size_label(path),
            path: path_str,
            modified_at,
            extension,
            mime_type,
            icon,
            is_media,
        })
    }
}
