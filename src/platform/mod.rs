//! Host storage environment
//!
//! Everything the helpers need to know about the host: where shared storage
//! lives, where app-private media goes, the package name and whether scoped
//! storage is in effect.

use std::path::PathBuf;

use crate::config::ResolverConfig;

/// Storage facts supplied by the host platform
pub trait StorageEnvironment {
    /// Shared external storage root
    fn external_root(&self) -> PathBuf;

    /// App-private media directory
    fn app_private_dir(&self) -> PathBuf;

    /// Application id
    fn package_name(&self) -> &str;

    /// Whether output must stay in the app-private directory
    fn scoped_storage(&self) -> bool;

    /// Folder under the external root used when scoped storage is off
    fn legacy_media_folder(&self) -> &str;
}

/// Concrete environment built from [`ResolverConfig`]
#[derive(Debug, Clone)]
pub struct HostEnvironment {
    package_name: String,
    external_root: PathBuf,
    app_private_dir: PathBuf,
    scoped_storage: bool,
    legacy_media_folder: String,
}

impl HostEnvironment {
    pub fn from_config(config: &ResolverConfig) -> Self {
        let external_root = config
            .external_root
            .clone()
            .unwrap_or_else(default_external_root);
        let app_private_dir = config
            .app_private_dir
            .clone()
            .unwrap_or_else(|| default_app_private_dir(&external_root, &config.package_name));

        Self {
            package_name: config.package_name.clone(),
            external_root,
            app_private_dir,
            scoped_storage: config.scoped_storage,
            legacy_media_folder: config.legacy_media_folder.clone(),
        }
    }
}

impl StorageEnvironment for HostEnvironment {
    fn external_root(&self) -> PathBuf {
        self.external_root.clone()
    }

    fn app_private_dir(&self) -> PathBuf {
        self.app_private_dir.clone()
    }

    fn package_name(&self) -> &str {
        &self.package_name
    }

    fn scoped_storage(&self) -> bool {
        self.scoped_storage
    }

    fn legacy_media_folder(&self) -> &str {
        &self.legacy_media_folder
    }
}

#[cfg(target_os = "android")]
fn default_external_root() -> PathBuf {
    PathBuf::from("/storage/emulated/0")
}

#[cfg(not(target_os = "android"))]
fn default_external_root() -> PathBuf {
    dirs::home_dir().unwrap_or_else(std::env::temp_dir)
}

#[cfg(target_os = "android")]
fn default_app_private_dir(external_root: &std::path::Path, package_name: &str) -> PathBuf {
    external_root.join("Android").join("media").join(package_name)
}

#[cfg(not(target_os = "android"))]
fn default_app_private_dir(external_root: &std::path::Path, package_name: &str) -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| external_root.to_path_buf())
        .join(package_name)
}
