//! SQLite-backed blob store
//!
//! Keeps every key in a single `blobs` table. Each `set` is one
//! `INSERT OR REPLACE`, so a value is never half-written.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::blob::BlobStore;
use super::error::{StorageError, StorageResult};

/// Current schema version for migrations
pub const SCHEMA_VERSION: i32 = 1;

/// Blob store kept in a SQLite database
pub struct SqliteBlobStore {
    conn: Connection,
}

impl std::fmt::Debug for SqliteBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBlobStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl SqliteBlobStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        if needs_init(&conn) {
            init_schema(&conn)?;
        }
        Ok(Self { conn })
    }

}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM blobs WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO blobs (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn stored_size(&self, key: &str) -> StorageResult<Option<u64>> {
        let size: Option<i64> = self
            .conn
            .query_row(
                "SELECT length(CAST(value AS BLOB)) FROM blobs WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(size.map(|n| n as u64))
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        -- Schema version tracking
        CREATE TABLE IF NOT EXISTS schema_info (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        -- One row per storage key
        CREATE TABLE IF NOT EXISTS blobs (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<Option<i32>> {
    let version: Option<String> = conn
        .query_row(
            "SELECT value FROM schema_info WHERE key = 'version'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(version.and_then(|v| v.parse().ok()))
}

/// Check if schema needs initialization or migration
pub fn needs_init(conn: &Connection) -> bool {
    let table_exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_info'")
        .and_then(|mut stmt| stmt.exists([]))
        .unwrap_or(false);

    if !table_exists {
        return true;
    }

    match get_schema_version(conn) {
        Ok(Some(v)) => v < SCHEMA_VERSION,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_schema_version() {
        let conn = Connection::open_in_memory().unwrap();

        assert!(needs_init(&conn));
        init_schema(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), Some(SCHEMA_VERSION));
        assert!(!needs_init(&conn));
    }

    #[test]
    fn test_get_set_size() {
        let mut store = SqliteBlobStore::open_in_memory().unwrap();

        assert!(store.get("booksapp.books.v1").unwrap().is_none());

        store.set("booksapp.books.v1", "[]").unwrap();
        assert_eq!(
            store.get("booksapp.books.v1").unwrap().as_deref(),
            Some("[]")
        );

        store.set("booksapp.books.v1", "[{}]").unwrap();
        assert_eq!(
            store.get("booksapp.books.v1").unwrap().as_deref(),
            Some("[{}]")
        );

        assert_eq!(store.stored_size("booksapp.books.v1").unwrap(), Some(4));
        assert_eq!(store.stored_size("missing").unwrap(), None);
    }

    #[test]
    fn test_any_key_is_accepted() {
        let mut store = SqliteBlobStore::open_in_memory().unwrap();
        store.set("with space/and slash", "v").unwrap();
        assert_eq!(
            store.get("with space/and slash").unwrap().as_deref(),
            Some("v")
        );
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("booklog.db");

        {
            let mut store = SqliteBlobStore::open(&path).unwrap();
            store.set("k", "persisted").unwrap();
        }

        let store = SqliteBlobStore::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("persisted"));
        assert_eq!(store.backend_name(), "sqlite");
    }
}
