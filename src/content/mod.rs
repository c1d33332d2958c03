//! Content handle resolution
//!
//! ## Modules
//! - `handle` - parsed `content://` / `file://` handles and document ids
//! - `authority` - known documents provider authorities
//! - `query` - the content query capability and its error type
//! - `sqlite` - SQLite-backed query adapter for desktop hosts
//! - `copy` - copy-and-relocate fallback
//! - `resolver` - handle to path resolution

pub mod authority;
pub mod copy;
pub mod handle;
pub mod query;
pub mod resolver;
pub mod sqlite;

pub use authority::{
    is_downloads_document, is_external_storage_document, is_media_document, ProviderKind,
};
pub use copy::{extension_for_mime, file_name_for_handle, ContentCopier};
pub use handle::{split_document_id, HandleError, ResourceHandle};
pub use query::{ContentQuery, QueryError, RowSelection};
pub use resolver::PathResolver;
pub use sqlite::{ContentRow, SqliteContentStore};
