//! Copy-and-relocate fallback
//!
//! When a handle cannot be mapped to a real path, its bytes are copied into a
//! managed folder under the external root and the copy's path is used instead.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use super::handle::ResourceHandle;
use super::query::{ContentQuery, QueryError};
use crate::platform::StorageEnvironment;
use crate::storage::io::{atomic_copy, ensure_dir};
use crate::utils::file_extension;

/// Preferred file extension for a MIME type
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    mime_guess::get_mime_extensions_str(mime).and_then(|exts| exts.first().copied())
}

/// Derive a file name from the last path segment of a handle
///
/// Names without an extension get one from the provider's MIME type, or from a
/// guess on the path. Returns `None` when the path ends without a name.
pub fn file_name_for_handle<Q: ContentQuery + ?Sized>(
    query: &Q,
    handle: &ResourceHandle,
) -> Option<String> {
    let path = handle.path();
    let cut = path.rfind('/')?;
    let name = &path[cut + 1..];
    if name.is_empty() {
        return None;
    }

    if !file_extension(name).is_empty() {
        return Some(name.to_string());
    }

    let mime = query
        .mime_type(handle)
        .or_else(|| mime_guess::from_path(&path).first().map(|m| m.to_string()));

    match mime.as_deref().and_then(extension_for_mime) {
        Some(ext) => Some(format!("{}.{}", name, ext)),
        None => Some(name.to_string()),
    }
}

/// Copies handle contents into folders under the external root
pub struct ContentCopier<'a, Q: ?Sized> {
    query: &'a Q,
    env: &'a dyn StorageEnvironment,
    copy_enabled: bool,
}

impl<'a, Q: ContentQuery + ?Sized> ContentCopier<'a, Q> {
    pub fn new(query: &'a Q, env: &'a dyn StorageEnvironment, copy_enabled: bool) -> Self {
        Self {
            query,
            env,
            copy_enabled,
        }
    }

    /// Copy `handle` into `<external_root><folder>/<name>` unless the file already exists
    ///
    /// `folder` is appended verbatim, so it normally starts with `/`. Copy
    /// failures are logged and the destination path is still returned.
    pub fn copy_to_folder(&self, handle: &ResourceHandle, folder: &str) -> Option<PathBuf> {
        let file_name = file_name_for_handle(self.query, handle)?;

        let root = self.env.external_root();
        let dir = PathBuf::from(format!("{}{}", root.display(), folder));
        ensure_dir(&dir);

        let dest = dir.join(&file_name);
        if dest.exists() {
            tracing::debug!(path = %dest.display(), "Copy target already present");
            return Some(dest);
        }

        if !self.copy_enabled {
            tracing::debug!(handle = %handle, "Byte copy disabled, returning target path only");
            return Some(dest);
        }

        let result = self
            .open_source(handle)
            .map_err(|e| e.to_string())
            .and_then(|mut reader| atomic_copy(&mut reader, &dest).map_err(|e| e.to_string()));

        match result {
            Ok(bytes) => {
                tracing::debug!(handle = %handle, path = %dest.display(), bytes, "Copied content");
            }
            Err(e) => {
                tracing::warn!(handle = %handle, path = %dest.display(), error = %e, "Failed to copy content");
            }
        }

        Some(dest)
    }

    fn open_source(&self, handle: &ResourceHandle) -> Result<Box<dyn Read + 'a>, QueryError> {
        if handle.is_file() {
            return Ok(Box::new(File::open(handle.path())?));
        }
        let query: &'a Q = self.query;
        query.open_read(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::content::sqlite::{ContentRow, SqliteContentStore};
    use crate::platform::HostEnvironment;
    use std::fs;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, SqliteContentStore, HostEnvironment) {
        let dir = tempdir().unwrap();
        let store = SqliteContentStore::open(&dir.path().join("db")).unwrap();
        let env = HostEnvironment::from_config(&ResolverConfig {
            external_root: Some(dir.path().join("sdcard")),
            ..Default::default()
        });
        (dir, store, env)
    }

    #[test]
    fn test_file_name_keeps_existing_extension() {
        let (_dir, store, _env) = setup();
        let handle = ResourceHandle::parse("content://com.example.provider/files/clip.mp4").unwrap();
        assert_eq!(file_name_for_handle(&store, &handle).as_deref(), Some("clip.mp4"));
    }

    #[test]
    fn test_file_name_takes_extension_from_provider_mime() {
        let (_dir, store, _env) = setup();
        store
            .insert(&ContentRow {
                handle: "content://com.example.provider/media/123".into(),
                mime_type: Some("image/png".into()),
                ..Default::default()
            })
            .unwrap();

        let handle = ResourceHandle::parse("content://com.example.provider/media/123").unwrap();
        assert_eq!(file_name_for_handle(&store, &handle).as_deref(), Some("123.png"));
    }

    #[test]
    fn test_file_name_without_mime_stays_bare() {
        let (_dir, store, _env) = setup();
        let handle = ResourceHandle::parse("content://com.example.provider/media/456").unwrap();
        assert_eq!(file_name_for_handle(&store, &handle).as_deref(), Some("456"));
    }

    #[test]
    fn test_file_name_missing_for_trailing_slash() {
        let (_dir, store, _env) = setup();
        let handle = ResourceHandle::parse("content://com.example.provider/media/").unwrap();
        assert_eq!(file_name_for_handle(&store, &handle), None);
    }

    #[test]
    fn test_copy_to_folder_copies_bytes() {
        let (dir, store, env) = setup();
        store
            .insert(&ContentRow {
                handle: "content://com.example.provider/gif/party.gif".into(),
                bytes: Some(b"GIF89a-party".to_vec()),
                ..Default::default()
            })
            .unwrap();

        let copier = ContentCopier::new(&store, &env, true);
        let handle = ResourceHandle::parse("content://com.example.provider/gif/party.gif").unwrap();
        let dest = copier.copy_to_folder(&handle, "/App/Gifs").unwrap();

        assert_eq!(dest, dir.path().join("sdcard/App/Gifs/party.gif"));
        assert_eq!(fs::read(&dest).unwrap(), b"GIF89a-party");
    }

    #[test]
    fn test_copy_never_overwrites() {
        let (dir, store, env) = setup();
        store
            .insert(&ContentRow {
                handle: "content://com.example.provider/gif/party.gif".into(),
                bytes: Some(b"new".to_vec()),
                ..Default::default()
            })
            .unwrap();
        let existing = dir.path().join("sdcard/App/Gifs/party.gif");
        fs::create_dir_all(existing.parent().unwrap()).unwrap();
        fs::write(&existing, "old").unwrap();

        let copier = ContentCopier::new(&store, &env, true);
        let handle = ResourceHandle::parse("content://com.example.provider/gif/party.gif").unwrap();
        let dest = copier.copy_to_folder(&handle, "/App/Gifs").unwrap();

        assert_eq!(dest, existing);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "old");
    }

    #[test]
    fn test_disabled_copy_returns_path_without_data() {
        let (dir, store, env) = setup();
        let copier = ContentCopier::new(&store, &env, false);
        let handle = ResourceHandle::parse("content://com.example.provider/gif/a.gif").unwrap();

        let dest = copier.copy_to_folder(&handle, "/App/Gifs").unwrap();

        assert_eq!(dest, dir.path().join("sdcard/App/Gifs/a.gif"));
        assert!(!dest.exists());
        assert!(dest.parent().unwrap().is_dir());
    }

    #[test]
    fn test_copy_from_file_handle() {
        let (dir, store, env) = setup();
        let source = dir.path().join("GIPHY-cat.gif");
        fs::write(&source, "meow").unwrap();

        let copier = ContentCopier::new(&store, &env, true);
        let handle = ResourceHandle::parse(&format!("file://{}", source.display())).unwrap();
        let dest = copier.copy_to_folder(&handle, "/gifs").unwrap();

        assert_eq!(fs::read_to_string(dest).unwrap(), "meow");
    }
}
