//! Durable key-value blob boundary and its implementations.
//!
//! # Responsibility
//! - Read and overwrite whole string values addressed by a key.
//! - Keep SQLite details out of the task store.
//!
//! # Invariants
//! - `put` replaces the stored value in a single statement.
//! - A missing key is `Ok(None)`, never an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for blob and task store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Backend I/O failure.
    Backend(DbError),
    /// Stored value does not decode to a valid task collection.
    Corrupt(String),
    /// Collection could not be serialized.
    Encode(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(err) => write!(f, "{err}"),
            Self::Corrupt(details) => write!(f, "persisted task data is corrupt: {details}"),
            Self::Encode(details) => write!(f, "failed to encode tasks: {details}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err),
            Self::Corrupt(_) | Self::Encode(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Backend(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Backend(DbError::Sqlite(value))
    }
}

/// Whole-value key-value storage.
pub trait BlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<B: BlobStore + ?Sized> BlobStore for &B {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).put(key, value)
    }
}

/// SQLite-backed blob store over the `kv_blobs` table.
pub struct SqliteBlobStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlobStore<'conn> {
    /// Wraps a connection returned by `db::open_db*` (migrations applied).
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BlobStore for SqliteBlobStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_blobs WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_blobs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-process blob store for hosts without a database, and for tests.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{BlobStore, MemoryBlobStore, SqliteBlobStore};
    use crate::db::open_db_in_memory;

    fn assert_overwrite_semantics(store: &dyn BlobStore) {
        assert_eq!(store.get("k").unwrap(), None);
        store.put("k", "first").unwrap();
        store.put("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
        assert_eq!(store.get("other").unwrap(), None);
    }

    #[test]
    fn memory_store_overwrites_values() {
        assert_overwrite_semantics(&MemoryBlobStore::new());
    }

    #[test]
    fn sqlite_store_overwrites_values() {
        let conn = open_db_in_memory().unwrap();
        assert_overwrite_semantics(&SqliteBlobStore::new(&conn));

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_blobs WHERE key = 'k';", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(rows, 1);
    }
}
