//! Persistent key-value store for reader preferences and scroll records.
//!
//! Mirrors the browser's origin-scoped local storage: a flat string to string
//! map where every key is written independently and the last write wins.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};

use crate::database::connection::Database;
use crate::types::errors::StorageError;

/// Trait defining the key-value store interface.
pub trait StorageManagerTrait {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
    fn keys(&self) -> Result<Vec<String>, StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

fn check_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::EmptyKey);
    }
    Ok(())
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// SQLite-backed store. Rows are scoped by origin so several readers can
/// share one database file.
pub struct SqliteStorage {
    db: Arc<Database>,
    origin: String,
}

impl SqliteStorage {
    pub fn new(db: Arc<Database>, origin: &str) -> Self {
        Self {
            db,
            origin: origin.to_string(),
        }
    }

    /// Opens a store on a private in-memory database.
    pub fn in_memory(origin: &str) -> Result<Self, StorageError> {
        let db = Database::open_in_memory().map_err(|e| StorageError::OpenFailed(e.to_string()))?;
        Ok(Self::new(Arc::new(db), origin))
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl StorageManagerTrait for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM local_storage WHERE origin = ?1 AND key = ?2",
                params![self.origin, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        self.db.connection().execute(
            "INSERT INTO local_storage (origin, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(origin, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![self.origin, key, value, now_secs()],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.db.connection().execute(
            "DELETE FROM local_storage WHERE origin = ?1 AND key = ?2",
            params![self.origin, key],
        )?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let conn = self.db.connection();
        let mut stmt =
            conn.prepare("SELECT key FROM local_storage WHERE origin = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![self.origin], |row| row.get(0))?;
        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.db.connection().execute(
            "DELETE FROM local_storage WHERE origin = ?1",
            params![self.origin],
        )?;
        Ok(())
    }
}

/// In-process store, lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl StorageManagerTrait for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys: Vec<String> = self.items.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        Ok(())
    }
}

/// Reads a key, logging and discarding store failures.
pub(crate) fn read_or_log(store: &dyn StorageManagerTrait, key: &str) -> Option<String> {
    match store.get_item(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("failed to read '{}' from storage: {}", key, e);
            None
        }
    }
}

/// Writes a key, logging and discarding store failures.
pub(crate) fn write_or_log(store: &mut dyn StorageManagerTrait, key: &str, value: &str) {
    if let Err(e) = store.set_item(key, value) {
        log::warn!("failed to write '{}' to storage: {}", key, e);
    }
}
