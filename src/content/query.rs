//! Content query capability
//!
//! The resolver never talks to a host content layer directly. It asks for a
//! single column of the first matching row, a byte stream, or a MIME type.
//! Adapters own their cursors and release them before returning.

use std::io::Read;

use thiserror::Error;

use super::handle::ResourceHandle;

/// Column holding the filesystem path of a row
pub const COLUMN_DATA: &str = "_data";
/// Column holding the display name of a row
pub const COLUMN_DISPLAY_NAME: &str = "_display_name";
/// Column holding the MIME type of a row
pub const COLUMN_MIME_TYPE: &str = "mime_type";

pub const PUBLIC_DOWNLOADS: &str = "content://downloads/public_downloads";
pub const IMAGES_COLLECTION: &str = "content://media/external/images/media";
pub const VIDEO_COLLECTION: &str = "content://media/external/video/media";
pub const AUDIO_COLLECTION: &str = "content://media/external/audio/media";

/// Errors reported by a [`ContentQuery`] adapter
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Unsupported column: {0}")]
    UnsupportedColumn(String),

    #[error("No content stream for {0}")]
    NoStream(String),

    #[error("Content backend failed: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for QueryError {
    fn from(err: rusqlite::Error) -> Self {
        QueryError::Backend(err.to_string())
    }
}

/// `_id = ?` restriction on a provider collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSelection {
    pub row_id: String,
}

impl RowSelection {
    pub fn by_id(row_id: impl Into<String>) -> Self {
        Self {
            row_id: row_id.into(),
        }
    }
}

/// Narrow view of the host content layer
pub trait ContentQuery {
    /// Value of `column` in the first row behind `handle`, optionally restricted by row id
    ///
    /// `Ok(None)` means no row or a null value.
    fn query_column(
        &self,
        handle: &ResourceHandle,
        column: &str,
        selection: Option<&RowSelection>,
    ) -> Result<Option<String>, QueryError>;

    /// Open the bytes behind a handle
    fn open_read(&self, handle: &ResourceHandle) -> Result<Box<dyn Read + '_>, QueryError>;

    /// MIME type the provider reports for a handle
    fn mime_type(&self, handle: &ResourceHandle) -> Option<String> {
        self.query_column(handle, COLUMN_MIME_TYPE, None)
            .ok()
            .flatten()
    }
}
