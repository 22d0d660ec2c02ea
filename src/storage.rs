//! The environment-provided persistence primitive.
//!
//! The store only ever talks to a key-value surface of `get`/`set` by string
//! key, injected at construction. Both operations are fallible; the store
//! treats every failure as "storage unavailable" and degrades to safe
//! defaults rather than propagating.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};

/// A synchronous, fallible key-value primitive.
pub trait KeyValueStore {
    /// Read the blob stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous blob.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory [`KeyValueStore`], the default backing for tests and embedders
/// without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
