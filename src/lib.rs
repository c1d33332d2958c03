//! Content handle resolution and file display helpers.
//!
//! Maps `content://` and `file://` handles issued by a mobile content-provider
//! framework to filesystem paths, and bundles the small helpers that usually
//! travel with it: size labels, file-type icons, bitmap sample sizes and
//! app-managed output paths.
//!
//! Host interaction goes through two capability traits,
//! [`content::ContentQuery`] and [`platform::StorageEnvironment`], so the
//! resolution rules run the same on a device adapter, the bundled SQLite store
//! or a test fake.

pub mod config;
pub mod content;
pub mod logging;
pub mod models;
pub mod platform;
pub mod storage;
pub mod utils;

pub use config::{ConfigError, ResolverConfig};
pub use content::{
    ContentQuery, HandleError, PathResolver, ProviderKind, QueryError, ResourceHandle,
    RowSelection, SqliteContentStore,
};
pub use models::ResolvedFile;
pub use platform::{HostEnvironment, StorageEnvironment};
pub use storage::{logs_path, output_file_path};
pub use utils::{
    calculate_in_sample_size, file_icon, format_size_si, readable_file_size, FileIcon,
};
