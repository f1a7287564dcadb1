//! Keyed store abstraction and the in-memory implementation.
//!
//! Every repository in this crate is a thin mapping layer over a
//! [`KeyedStore`]: get/set/delete by string key plus listing by prefix.
//! Keys are namespaced as `<namespace>:<id>`; values are serialized JSON.
//! Each write is an independent atomic per-key operation; there is no
//! cross-key transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use parley_core::error::Result;
use tokio::sync::RwLock;

/// A keyed persistent store: string keys, string (JSON) values.
#[async_trait]
pub trait KeyedStore: Send + Sync {
    /// Reads the value for a key.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes the value for a key, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Writes the value only when the key is currently absent.
    ///
    /// Returns `true` when this call stored the value.
    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool>;

    /// Deletes a key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Lists the values of every key starting with `prefix`, unordered.
    async fn list_values(&self, prefix: &str) -> Result<Vec<String>>;

    /// Deletes every key starting with `prefix`.
    async fn delete_prefix(&self, prefix: &str) -> Result<()>;
}

/// In-memory keyed store.
///
/// Used by tests and embedded deployments; the same map-behind-a-lock
/// shape the repositories are mocked with.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyedStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn list_values(&self, prefix: &str) -> Result<Vec<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(_, value)| value.clone())
            .collect())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}
