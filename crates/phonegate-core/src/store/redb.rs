//! Redb-backed durable store.
//!
//! Uses Redb's ACID transactions so a block survives restarts and crashes,
//! the way browser local storage survived page reloads.

use std::{path::Path, sync::Arc};

use redb::{Database, ReadableTable, TableDefinition};

use super::{BlockStore, StoreError};
use crate::tracker::STATE_KEY;

/// Table: local_storage
/// Key: storage key (the block record lives under [`STATE_KEY`])
/// Value: JSON-encoded BlockState
const LOCAL_STORAGE: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

/// Durable store backed by Redb.
///
/// Thread-safe through Redb's internal locking. Clone is cheap (Arc).
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a Redb database at the given path.
    ///
    /// Creates the `local_storage` table if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path.as_ref()).map_err(|e| StoreError::Io(e.to_string()))?;

        let txn = db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;
        {
            let _ = txn.open_table(LOCAL_STORAGE).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StoreError::Io(e.to_string()))?;

        tracing::debug!(path = %path.as_ref().display(), "opened block store");

        Ok(Self { db: Arc::new(db) })
    }
}

impl BlockStore for RedbStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let txn = self.db.begin_read().map_err(|e| StoreError::Io(e.to_string()))?;
        let table = txn.open_table(LOCAL_STORAGE).map_err(|e| StoreError::Io(e.to_string()))?;

        match table.get(STATE_KEY).map_err(|e| StoreError::Io(e.to_string()))? {
            Some(value) => Ok(Some(value.value().to_owned())),
            None => Ok(None),
        }
    }

    fn save(&self, json: &str) -> Result<(), StoreError> {
        let txn = self.db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;

        {
            let mut table =
                txn.open_table(LOCAL_STORAGE).map_err(|e| StoreError::Io(e.to_string()))?;
            table.insert(STATE_KEY, json).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        txn.commit().map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn fresh_database_loads_none() {
        let dir = tempdir().unwrap();
        let store = RedbStore::open(dir.path().join("state.redb")).unwrap();

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_overwrites_previous_record() {
        let dir = tempdir().unwrap();
        let store = RedbStore::open(dir.path().join("state.redb")).unwrap();

        store.save("first").unwrap();
        store.save("second").unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some("second"));
    }
}
