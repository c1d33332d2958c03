//! Known document provider authorities

use super::handle::ResourceHandle;

pub const EXTERNAL_STORAGE_AUTHORITY: &str = "com.android.externalstorage.documents";
pub const DOWNLOADS_AUTHORITY: &str = "com.android.providers.downloads.documents";
pub const MEDIA_DOCUMENTS_AUTHORITY: &str = "com.android.providers.media.documents";

/// Which documents provider issued a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    ExternalStorage,
    Downloads,
    Media,
    Other,
}

impl ProviderKind {
    pub fn classify(authority: Option<&str>) -> Self {
        match authority {
            Some(EXTERNAL_STORAGE_AUTHORITY) => Self::ExternalStorage,
            Some(DOWNLOADS_AUTHORITY) => Self::Downloads,
            Some(MEDIA_DOCUMENTS_AUTHORITY) => Self::Media,
            _ => Self::Other,
        }
    }

    pub fn of(handle: &ResourceHandle) -> Self {
        Self::classify(handle.authority())
    }
}

/// Whether the handle authority is the external storage provider
pub fn is_external_storage_document(handle: &ResourceHandle) -> bool {
    handle.authority() == Some(EXTERNAL_STORAGE_AUTHORITY)
}

/// Whether the handle authority is the downloads provider
pub fn is_downloads_document(handle: &ResourceHandle) -> bool {
    handle.authority() == Some(DOWNLOADS_AUTHORITY)
}

/// Whether the handle authority is the media documents provider
pub fn is_media_document(handle: &ResourceHandle) -> bool {
    handle.authority() == Some(MEDIA_DOCUMENTS_AUTHORITY)
}
