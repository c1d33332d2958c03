//! Safe I/O utilities for relocated content
//!
//! Copies go to a temporary sibling first and are renamed into place, so a
//! half-written file never shows up under its final name.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Error type for copy operations
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("Cannot determine parent directory for: {0}")]
    NoParent(PathBuf),

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to rename {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Create a directory tree, logging instead of failing
///
/// Returns whether the directory exists afterwards.
pub fn ensure_dir(path: &Path) -> bool {
    if path.is_dir() {
        return true;
    }

    match fs::create_dir_all(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to create directory");
            false
        }
    }
}

/// `<root>/<relative>` by string concatenation
///
/// Unlike [`Path::join`], an absolute `relative` stays under `root`.
pub fn join_under(root: &Path, relative: &str) -> PathBuf {
    PathBuf::from(format!("{}/{}", root.display(), relative))
}

/// Whether a path can be opened for reading
pub fn is_readable(path: &Path) -> bool {
    File::open(path).is_ok()
}

/// Stream `reader` into `dest` through a temp file and an atomic rename
///
/// Returns the number of bytes written.
pub fn atomic_copy(reader: &mut dyn Read, dest: &Path) -> Result<u64, CopyError> {
    let parent = dest
        .parent()
        .ok_or_else(|| CopyError::NoParent(dest.to_path_buf()))?;

    if !parent.exists() {
        fs::create_dir_all(parent).map_err(|source| CopyError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(parent, dest);

    let write_result = (|| -> Result<u64, io::Error> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        let written = io::copy(reader, &mut file)?;
        file.sync_all()?;
        Ok(written)
    })();

    let written = match write_result {
        Ok(written) => written,
        Err(source) => {
            let _ = fs::remove_file(&temp_path);
            return Err(CopyError::Write {
                path: dest.to_path_buf(),
                source,
            });
        }
    };

    if let Err(source) = fs::rename(&temp_path, dest) {
        let _ = fs::remove_file(&temp_path);
        return Err(CopyError::Rename {
            from: temp_path,
            to: dest.to_path_buf(),
            source,
        });
    }

    Ok(written)
}

/// Unique temp sibling for `dest`, distinct per process and per call
fn temp_path_for(parent: &Path, dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "file".to_string());
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    parent.join(format!(".{}.tmp.{}.{}", name, std::process::id(), seq))
}
