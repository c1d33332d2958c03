//! SQLite-backed content store
//!
//! Desktop stand-in for a host content provider. Rows are keyed by the
//! collection handle they live under plus a row id, so both direct handles
//! (`content://authority/path`) and collection lookups
//! (`content://media/external/images/media` + `_id = 42`) work.

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use super::handle::ResourceHandle;
use super::query::{
    ContentQuery, QueryError, RowSelection, COLUMN_DATA, COLUMN_DISPLAY_NAME, COLUMN_MIME_TYPE,
};

/// A row to register in the store
#[derive(Debug, Clone, Default)]
pub struct ContentRow {
    /// Handle the row is reachable under (a document handle or a collection)
    pub handle: String,
    /// Row id for collection lookups; empty for direct handles
    pub row_id: String,
    pub data: Option<String>,
    pub display_name: Option<String>,
    pub mime_type: Option<String>,
    pub bytes: Option<Vec<u8>>,
}

/// SQLite-backed [`ContentQuery`] adapter
pub struct SqliteContentStore {
    db_path: PathBuf,
}

impl SqliteContentStore {
    /// Open or create the store database in `dir`
    pub fn open(dir: &Path) -> Result<Self, QueryError> {
        std::fs::create_dir_all(dir)?;

        let db_path = dir.join("content_store.db");
        let conn = Self::connect(&db_path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS content_rows (
                handle TEXT NOT NULL,
                row_id TEXT NOT NULL DEFAULT '',
                _data TEXT,
                _display_name TEXT,
                mime_type TEXT,
                bytes BLOB,
                PRIMARY KEY (handle, row_id)
            );
            "#,
        )?;

        Ok(Self { db_path })
    }

    fn connect(path: &Path) -> Result<Connection, QueryError> {
        Ok(Connection::open(path)?)
    }

    fn conn(&self) -> Result<Connection, QueryError> {
        Self::connect(&self.db_path)
    }

    /// Insert or replace a row
    pub fn insert(&self, row: &ContentRow) -> Result<(), QueryError> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO content_rows
            (handle, row_id, _data, _display_name, mime_type, bytes)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                row.handle,
                row.row_id,
                row.data,
                row.display_name,
                row.mime_type,
                row.bytes,
            ],
        )?;
        Ok(())
    }

    /// Number of registered rows
    pub fn count(&self) -> Result<usize, QueryError> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM content_rows", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // Column names cannot be bound as parameters, so only known columns pass.
    fn checked_column(column: &str) -> Result<&'static str, QueryError> {
        match column {
            COLUMN_DATA => Ok(COLUMN_DATA),
            COLUMN_DISPLAY_NAME => Ok(COLUMN_DISPLAY_NAME),
            COLUMN_MIME_TYPE => Ok(COLUMN_MIME_TYPE),
            other => Err(QueryError::UnsupportedColumn(other.to_string())),
        }
    }
}

impl ContentQuery for SqliteContentStore {
    fn query_column(
        &self,
        handle: &ResourceHandle,
        column: &str,
        selection: Option<&RowSelection>,
    ) -> Result<Option<String>, QueryError> {
        let column = Self::checked_column(column)?;
        let row_id = selection.map(|s| s.row_id.as_str()).unwrap_or("");
        let conn = self.conn()?;

        let sql = format!(
            "SELECT {} FROM content_rows WHERE handle = ? AND row_id = ?",
            column
        );
        let value: Option<Option<String>> = conn
            .query_row(&sql, params![handle.as_str(), row_id], |row| row.get(0))
            .optional()?;

        Ok(value.flatten())
    }

    fn open_read(&self, handle: &ResourceHandle) -> Result<Box<dyn Read + '_>, QueryError> {
        let conn = self.conn()?;
        let bytes: Option<Option<Vec<u8>>> = conn
            .query_row(
                "SELECT bytes FROM content_rows WHERE handle = ? AND row_id = ''",
                [handle.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match bytes.flatten() {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes))),
            None => Err(QueryError::NoStream(handle.to_string())),
        }
    }
}
