//! Cursor persistence.
//!
//! The cursor is stored as a decimal string under a fixed key in a small
//! key-value store. Two backends are provided:
//! - `InMemory`: a plain map, used by tests and when no store path is given.
//! - `Redb`: a `redb` database file that survives restarts.
//!
//! Reading is forgiving: a missing key, an unreadable database or a value
//! that is not a number all resolve to "no saved position".
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// Key the cursor is stored under unless configured otherwise.
pub const DEFAULT_CURSOR_KEY: &str = "currentWordIndex";

/// Errors from a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Redb(#[from] redb::Error),
}

/// Simple in-memory key-value store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    map: HashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.map.remove(key).is_some()
    }
}

/// Redb-backed key-value store.
pub struct RedbStore {
    db: redb::Database,
    path: PathBuf,
}

impl RedbStore {
    /// String keys to string values.
    const TABLE_DEF: redb::TableDefinition<'static, &'static str, &'static str> =
        redb::TableDefinition::new("browse_state");

    /// Create or open a database at `path`, creating parent directories.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, redb::Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let db = redb::Database::create(path)?;
        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(Self::TABLE_DEF) {
            Ok(table) => table,
            // nothing has been written yet
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(table.get(key)?.map(|v| v.value().to_string()))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), redb::Error> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(Self::TABLE_DEF)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<bool, redb::Error> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(Self::TABLE_DEF)?;
            let removed = table.remove(key)?.is_some();
            removed
        };
        write_txn.commit()?;
        Ok(removed)
    }
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").field("path", &self.path).finish()
    }
}

/// Backend switch for cursor persistence.
#[derive(Debug)]
pub enum CursorStore {
    InMemory(InMemoryStore),
    Redb(RedbStore),
}

impl CursorStore {
    pub fn new_in_memory() -> Self {
        CursorStore::InMemory(InMemoryStore::new())
    }

    /// Open a `Redb` store at `path`.
    pub fn new_redb<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(CursorStore::Redb(RedbStore::new(path)?))
    }

    /// Raw value stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            CursorStore::InMemory(m) => Ok(m.get(key)),
            CursorStore::Redb(r) => Ok(r.get(key)?),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            CursorStore::InMemory(m) => {
                m.set(key, value);
                Ok(())
            }
            CursorStore::Redb(r) => Ok(r.set(key, value)?),
        }
    }

    pub fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        match self {
            CursorStore::InMemory(m) => Ok(m.remove(key)),
            CursorStore::Redb(r) => Ok(r.remove(key)?),
        }
    }

    /// Saved cursor, or `None` when missing or unreadable.
    pub fn load_cursor(&self, key: &str) -> Option<usize> {
        let raw = match self.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "could not read saved cursor");
                return None;
            }
        };
        match raw.trim().parse::<usize>() {
            Ok(index) => Some(index),
            Err(_) => {
                warn!(value = %raw, "ignoring malformed saved cursor");
                None
            }
        }
    }

    /// Persist the cursor as a decimal string.
    pub fn save_cursor(&mut self, key: &str, index: usize) -> Result<(), StoreError> {
        self.set(key, &index.to_string())
    }
}

impl Default for CursorStore {
    fn default() -> Self {
        Self::new_in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_roundtrip() {
        let mut s = CursorStore::new_in_memory();
        assert_eq!(s.load_cursor(DEFAULT_CURSOR_KEY), None);
        s.save_cursor(DEFAULT_CURSOR_KEY, 42).unwrap();
        assert_eq!(s.get(DEFAULT_CURSOR_KEY).unwrap().as_deref(), Some("42"));
        assert_eq!(s.load_cursor(DEFAULT_CURSOR_KEY), Some(42));
    }

    #[test]
    fn malformed_value_reads_as_missing() {
        let mut s = CursorStore::new_in_memory();
        s.set(DEFAULT_CURSOR_KEY, "forty-two").unwrap();
        assert_eq!(s.load_cursor(DEFAULT_CURSOR_KEY), None);
        s.set(DEFAULT_CURSOR_KEY, "-3").unwrap();
        assert_eq!(s.load_cursor(DEFAULT_CURSOR_KEY), None);
    }

    #[test]
    fn redb_roundtrip_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.redb");
        {
            let mut s = CursorStore::new_redb(&path).unwrap();
            assert_eq!(s.load_cursor(DEFAULT_CURSOR_KEY), None);
            s.save_cursor(DEFAULT_CURSOR_KEY, 7).unwrap();
            s.save_cursor(DEFAULT_CURSOR_KEY, 8).unwrap();
        }
        let mut s = CursorStore::new_redb(&path).unwrap();
        assert_eq!(s.load_cursor(DEFAULT_CURSOR_KEY), Some(8));
        assert!(s.remove(DEFAULT_CURSOR_KEY).unwrap());
        assert!(!s.remove(DEFAULT_CURSOR_KEY).unwrap());
        assert_eq!(s.load_cursor(DEFAULT_CURSOR_KEY), None);
    }
}
