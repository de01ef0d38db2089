//! Local key-value storage and the collection persistence adapter.
//!
//! The whole roster is stored as one JSON document under [`STORAGE_KEY`].
//! [`SqliteStore`] is the on-disk backend; [`MemoryStore`] backs tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;

use crate::models::EmployeeCollection;

/// Key the employee roster is stored under.
pub const STORAGE_KEY: &str = "micro_clinic_hr";

/// Storage backend errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization failed: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value store, the only thing persistence needs from a backend.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ============================================================
// SQLite backend
// ============================================================

#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        let parent = path.parent().ok_or_else(|| {
            StorageError::Unavailable("Database path has no parent directory".to_string())
        })?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        tracing::debug!("Opened database at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(default_path()?)
    }

    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Creates the `kv_store` table if it does not exist yet.
    pub fn migrate(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )?;
        Ok(())
    }
}

/// `clinic-hr.db` under the platform data directory.
pub fn default_path() -> Result<PathBuf, StorageError> {
    let dirs = directories::ProjectDirs::from("", "", "clinic-hr").ok_or_else(|| {
        StorageError::Unavailable("Could not determine data directory".to_string())
    })?;
    Ok(dirs.data_dir().join("clinic-hr.db"))
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        let value = conn
            .query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, value, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }
}

// ============================================================
// In-memory backend
// ============================================================

/// Volatile store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================
// Persistence adapter
// ============================================================

/// Reads and writes the employee roster through a [`KeyValueStore`].
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl Persistence {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self {
            store: Box::new(store),
            key: key.into(),
        }
    }

    /// Load the stored roster.
    /// Returns an empty collection if nothing is stored or the value can't be read.
    pub fn load(&self) -> EmployeeCollection {
        match self.try_load() {
            Ok(Some(collection)) => {
                tracing::info!("Loaded {} employees", collection.len());
                collection
            }
            Ok(None) => EmployeeCollection::new(),
            Err(e) => {
                tracing::warn!("Failed to load stored employees, starting empty: {}", e);
                EmployeeCollection::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<Option<EmployeeCollection>, StorageError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn save(&self, collection: &EmployeeCollection) -> Result<(), StorageError> {
        let raw = serde_json::to_string(collection)?;
        self.store.set(&self.key, &raw)
    }
}
