//! Resolver configuration
//!
//! Stored as JSON in the user config directory:
//! `<config_dir>/content-paths/config.json`. Missing or broken files fall back
//! to defaults so resolution keeps working with sensible assumptions.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "content-paths";
const CONFIG_FILE_NAME: &str = "config.json";

/// Folder (relative to the external root) that receives copied GIF resources
pub const DEFAULT_GIF_FOLDER: &str = "/App/Media/Animated Gifs/.Sent";

/// Errors raised while reading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings consumed by [`crate::platform::HostEnvironment`] and the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Application id; the app's own file provider authority is `<package_name>.files`
    pub package_name: String,

    /// Override for the shared external storage root
    pub external_root: Option<PathBuf>,

    /// Override for the app-private media directory
    pub app_private_dir: Option<PathBuf>,

    /// Whether output goes to the app-private directory (Android 10 and above)
    pub scoped_storage: bool,

    /// Folder under the external root used for output when scoped storage is off
    pub legacy_media_folder: String,

    /// Folder under the external root receiving copied GIF resources
    pub gif_folder: String,

    /// Substring marking `file://` handles that came from the GIF provider
    pub gif_marker: String,

    /// Copy bytes when relocating a resource (false keeps only the path)
    pub copy_enabled: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            package_name: "com.example.contentpaths".into(),
            external_root: None,
            app_private_dir: None,
            scoped_storage: true,
            legacy_media_folder: "App/Media".into(),
            gif_folder: DEFAULT_GIF_FOLDER.into(),
            gif_marker: "GIPHY".into(),
            copy_enabled: true,
        }
    }
}

impl ResolverConfig {
    /// Default location of the configuration file
    pub fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default location, or return defaults
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to default resolver config");
                Self::default()
            }
        }
    }

    /// Read configuration from a specific JSON file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Authority of the application's own file provider
    pub fn file_provider_authority(&self) -> String {
        format!("{}.files", self.package_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "package_name": "com.dopsi.webapp", "copy_enabled": false }"#)
            .unwrap();

        let config = ResolverConfig::from_path(&path).unwrap();
        assert_eq!(config.package_name, "com.dopsi.webapp");
        assert!(!config.copy_enabled);
        assert_eq!(config.gif_marker, "GIPHY");
        assert_eq!(config.gif_folder, DEFAULT_GIF_FOLDER);
        assert!(config.scoped_storage);
    }

    #[test]
    fn test_invalid_config_reports_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ResolverConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_config_reports_read_error() {
        let dir = tempdir().unwrap();
        let err = ResolverConfig::from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_file_provider_authority() {
        let config = ResolverConfig {
            package_name: "com.dopsi.webapp".into(),
            ..Default::default()
        };
        assert_eq!(config.file_provider_authority(), "com.dopsi.webapp.files");
    }
}
