//! Tracing subscriber setup
//!
//! Filtering follows `RUST_LOG`, defaulting to `content_paths=info`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "content_paths=info";
const LOG_FILE_NAME: &str = "content-paths.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install a stderr subscriber. Returns false if one was already installed.
pub fn init_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Install a subscriber appending to `<dir>/content-paths.log`
///
/// Usually called with [`crate::storage::logs_path`]. Returns the log file path.
pub fn init_file_logging(dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();

    if !installed {
        tracing::debug!(path = %path.display(), "Subscriber already installed, file logging skipped");
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_logging_creates_log_file() {
        let dir = tempdir().unwrap();
        let logs = dir.path().join("Logs");

        let path = init_file_logging(&logs).unwrap();

        assert_eq!(path, logs.join(LOG_FILE_NAME));
        assert!(path.exists());
    }
}
