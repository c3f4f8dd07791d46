//! Persistent key-value state boundary.
//!
//! The host application owns the actual storage (its lifecycle, eviction,
//! durability); this crate only reads and writes string values under
//! well-known keys through the [`StateStore`] trait.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Key-value state storage, implemented by the host.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait StateStore: Send + Sync {
    fn get_state(&self, key: &str) -> Result<Option<String>>;
    fn set_state(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory state store for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStateStore {
    fn get_state(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn set_state(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
