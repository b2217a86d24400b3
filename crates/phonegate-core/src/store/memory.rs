#![allow(clippy::disallowed_types, reason = "Synchronous in-memory operations only")]

use std::sync::{Arc, Mutex};

use super::{BlockStore, StoreError};

/// In-memory store for testing and ephemeral sessions
///
/// The record is wrapped in `Arc<Mutex<>>` so clones share it. Also counts
/// writes, which lets tests prove that reads never persist anything.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Raw JSON text, `None` until first save
    record: Option<String>,

    /// Number of successful `save` calls
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `json`, as if written by an earlier
    /// session. Does not count as a write.
    pub fn with_record(json: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryStoreInner {
                record: Some(json.into()),
                writes: 0,
            })),
        }
    }

    /// Number of writes performed through this store (and its clones).
    pub fn write_count(&self) -> usize {
        self.inner.lock().map_or(0, |inner| inner.writes)
    }
}

impl BlockStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;
        Ok(inner.record.clone())
    }

    fn save(&self, json: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;
        inner.record = Some(json.to_owned());
        inner.writes += 1;
        Ok(())
    }
}

fn poisoned() -> StoreError {
    StoreError::Io("memory store lock poisoned".to_string())
}
