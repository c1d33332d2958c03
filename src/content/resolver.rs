//! Handle to path resolution
//!
//! Branches on the issuing provider and the handle scheme:
//!
//! | handle                               | strategy                                       |
//! |--------------------------------------|------------------------------------------------|
//! | external storage document            | `primary:<rel>` → `<external_root>/<rel>`      |
//! | downloads document                   | display name, then public downloads row, then raw path |
//! | media document                       | `_data` of the image/video/audio row           |
//! | other `content://`                   | own file provider or `_data`, must be readable |
//! | `file://`                            | the path, or a managed copy for GIF provider files |
//!
//! Every public entry point answers with `Option`/`bool`; query failures are
//! logged and turned into fallbacks.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use super::authority::ProviderKind;
use super::copy::ContentCopier;
use super::handle::{split_document_id, ResourceHandle};
use super::query::{
    ContentQuery, RowSelection, AUDIO_COLLECTION, COLUMN_DATA, COLUMN_DISPLAY_NAME,
    IMAGES_COLLECTION, PUBLIC_DOWNLOADS, VIDEO_COLLECTION,
};
use crate::config::ResolverConfig;
use crate::models::ResolvedFile;
use crate::platform::StorageEnvironment;
use crate::storage::io::{is_readable, join_under};

const PRIMARY_VOLUME: &str = "primary";
const DOWNLOAD_DIR: &str = "Download";
const EXTERNAL_SEGMENT: &str = "external";

// Newer downloads providers hand out `raw:<path>` ids instead of numeric ones.
static RAW_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:/document/raw:)?(?:raw:)?").expect("raw prefix pattern is valid")
});

/// Resolves resource handles to filesystem paths
pub struct PathResolver<'a, Q: ?Sized> {
    query: &'a Q,
    env: &'a dyn StorageEnvironment,
    file_provider_authority: String,
    gif_folder: String,
    gif_marker: String,
    copy_enabled: bool,
}

impl<'a, Q: ContentQuery + ?Sized> PathResolver<'a, Q> {
    pub fn new(query: &'a Q, env: &'a dyn StorageEnvironment, config: &ResolverConfig) -> Self {
        Self {
            query,
            env,
            file_provider_authority: config.file_provider_authority(),
            gif_folder: config.gif_folder.clone(),
            gif_marker: config.gif_marker.clone(),
            copy_enabled: config.copy_enabled,
        }
    }

    /// Resolve a handle string; malformed strings resolve to `None`
    pub fn resolve_str(&self, raw: &str) -> Option<PathBuf> {
        match ResourceHandle::parse(raw) {
            Ok(handle) => self.resolve(Some(&handle)),
            Err(e) => {
                tracing::debug!(error = %e, "Unresolvable handle");
                None
            }
        }
    }

    /// Map a handle to a filesystem path
    pub fn resolve(&self, handle: Option<&ResourceHandle>) -> Option<PathBuf> {
        let handle = handle?;

        if let Some(document_id) = handle.document_id() {
            return match ProviderKind::of(handle) {
                ProviderKind::ExternalStorage => self.resolve_external_storage(&document_id),
                ProviderKind::Downloads => self.resolve_download(handle, &document_id),
                ProviderKind::Media => self.resolve_media(&document_id),
                ProviderKind::Other => {
                    tracing::debug!(handle = %handle, "Document from unknown provider");
                    None
                }
            };
        }

        if handle.is_content() {
            return self.resolve_content(handle);
        }

        if handle.is_file() {
            return self.resolve_file(handle);
        }

        None
    }

    /// Whether a handle resolves to a path that exists
    pub fn file_exists(&self, handle: Option<&ResourceHandle>) -> bool {
        self.resolve(handle).is_some_and(|path| path.exists())
    }

    /// Resolve a handle and describe the file behind it
    pub fn describe(&self, handle: &ResourceHandle) -> Option<ResolvedFile> {
        let path = self.resolve(Some(handle))?;
        ResolvedFile::from_path(&path).ok()
    }

    fn resolve_external_storage(&self, document_id: &str) -> Option<PathBuf> {
        let (volume, relative) = split_document_id(document_id);

        if volume.eq_ignore_ascii_case(PRIMARY_VOLUME) {
            return Some(join_under(&self.env.external_root(), relative));
        }

        // Secondary volumes (SD cards, USB) have no known mount point mapping.
        tracing::debug!(volume, "Unsupported storage volume");
        None
    }

    fn resolve_download(&self, handle: &ResourceHandle, document_id: &str) -> Option<PathBuf> {
        match self.query.query_column(handle, COLUMN_DISPLAY_NAME, None) {
            Ok(Some(name)) if !name.is_empty() => {
                let downloads = self.env.external_root().join(DOWNLOAD_DIR);
                return Some(join_under(&downloads, &name));
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(handle = %handle, error = %e, "Display name query failed");
            }
        }

        match document_id.parse::<i64>() {
            Ok(id) => {
                let row = ResourceHandle::parse(PUBLIC_DOWNLOADS)
                    .and_then(|base| base.with_appended_id(id))
                    .ok()?;
                self.data_column(&row, None)
            }
            Err(_) => {
                let path = handle.path();
                Some(PathBuf::from(RAW_PREFIX.replace(&path, "").into_owned()))
            }
        }
    }

    fn resolve_media(&self, document_id: &str) -> Option<PathBuf> {
        let (media_type, row_id) = split_document_id(document_id);

        let collection = match media_type {
            "image" => IMAGES_COLLECTION,
            "video" => VIDEO_COLLECTION,
            "audio" => AUDIO_COLLECTION,
            other => {
                tracing::debug!(media_type = other, "Unknown media document type");
                return None;
            }
        };

        let collection = ResourceHandle::parse(collection).ok()?;
        self.data_column(&collection, Some(&RowSelection::by_id(row_id)))
    }

    fn resolve_content(&self, handle: &ResourceHandle) -> Option<PathBuf> {
        let segments = handle.path_segments();
        let own_external = handle.authority() == Some(self.file_provider_authority.as_str())
            && segments.len() > 1
            && segments[0] == EXTERNAL_SEGMENT;

        let path = if own_external {
            let path = handle.path();
            let rest = path
                .strip_prefix('/')
                .and_then(|p| p.strip_prefix(EXTERNAL_SEGMENT))
                .unwrap_or(path.as_str());
            Some(PathBuf::from(format!(
                "{}{}",
                self.env.external_root().display(),
                rest
            )))
        } else {
            self.data_column(handle, None)
        };

        let path = path?;
        if !is_readable(&path) {
            tracing::debug!(path = %path.display(), "Resolved path is not readable");
            return None;
        }
        Some(path)
    }

    fn resolve_file(&self, handle: &ResourceHandle) -> Option<PathBuf> {
        if !self.gif_marker.is_empty() && handle.as_str().contains(&self.gif_marker) {
            return self.copier().copy_to_folder(handle, &self.gif_folder);
        }
        Some(PathBuf::from(handle.path()))
    }

    /// `_data` column of a row; query failures relocate a copy instead
    fn data_column(
        &self,
        handle: &ResourceHandle,
        selection: Option<&RowSelection>,
    ) -> Option<PathBuf> {
        match self.query.query_column(handle, COLUMN_DATA, selection) {
            Ok(value) => value.filter(|v| !v.is_empty()).map(PathBuf::from),
            Err(e) => {
                tracing::warn!(handle = %handle, error = %e, "Data column query failed, copying instead");
                self.copier().copy_to_folder(handle, &self.gif_folder)
            }
        }
    }

    fn copier(&self) -> ContentCopier<'a, Q> {
        ContentCopier::new(self.query, self.env, self.copy_enabled)
    }
}
