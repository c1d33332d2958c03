//! Filesystem side of the crate: safe copies and app-managed output paths

pub mod io;
pub mod output;

pub use io::{atomic_copy, ensure_dir, is_readable, join_under, CopyError};
pub use output::{logs_path, output_file_path};
