//! In-memory key/value store.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::store::{KeyValueStore, StoreError, StoreResult};

/// One named partition of the store.
#[derive(Debug, Default)]
struct Collection {
    entries: HashMap<String, Value>,
    /// Keys in insertion order
    order: Vec<String>,
}

impl Collection {
    fn values(&self) -> Vec<Value> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).cloned())
            .collect()
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        let value = self.entries.remove(key)?;
        self.order.retain(|k| k != key);
        Some(value)
    }
}

/// Process-local store with a fixed set of collections.
///
/// Every collection has its own lock, held for exactly one call. Two
/// logically concurrent sequences against the same key interleave at call
/// granularity and the last write wins.
#[derive(Debug)]
pub struct MemoryStore {
    names: Vec<String>,
    collections: HashMap<String, RwLock<Collection>>,
}

impl MemoryStore {
    /// Create a store holding exactly the given collections.
    pub fn new<I, S>(collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = Vec::new();
        let mut map = HashMap::new();
        for name in collections {
            let name = name.into();
            if map.contains_key(&name) {
                continue;
            }
            map.insert(name.clone(), RwLock::new(Collection::default()));
            names.push(name);
        }

        tracing::debug!(collections = ?names, "Memory store initialized");
        Self {
            names,
            collections: map,
        }
    }

    fn collection(&self, name: &str) -> StoreResult<&RwLock<Collection>> {
        self.collections
            .get(name)
            .ok_or_else(|| StoreError::CollectionNotFound(name.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn create(&self, collection: &str, key: &str, data: Value) -> StoreResult<Value> {
        let mut guard = self.collection(collection)?.write().await;
        if guard.entries.contains_key(key) {
            return Err(StoreError::key_already_exists(collection, key));
        }

        guard.entries.insert(key.to_string(), data.clone());
        guard.order.push(key.to_string());
        tracing::debug!(collection, key, "Created");
        Ok(data)
    }

    async fn read(&self, collection: &str, key: &str) -> StoreResult<Value> {
        let guard = self.collection(collection)?.read().await;
        guard
            .entries
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::key_not_found(collection, key))
    }

    async fn read_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let guard = self.collection(collection)?.read().await;
        Ok(guard.values())
    }

    async fn update(&self, collection: &str, key: &str, data: Value) -> StoreResult<Value> {
        let mut guard = self.collection(collection)?.write().await;
        let slot = guard
            .entries
            .get_mut(key)
            .ok_or_else(|| StoreError::key_not_found(collection, key))?;

        *slot = data.clone();
        tracing::debug!(collection, key, "Updated");
        Ok(data)
    }

    async fn delete(&self, collection: &str, key: &str) -> StoreResult<Value> {
        let mut guard = self.collection(collection)?.write().await;
        let value = guard
            .remove(key)
            .ok_or_else(|| StoreError::key_not_found(collection, key))?;

        tracing::debug!(collection, key, "Deleted");
        Ok(value)
    }

    fn collections(&self) -> Vec<String> {
        self.names.clone()
    }

    async fn dump(&self) -> String {
        let mut lines = Vec::new();
        for name in &self.names {
            lines.push(format!("Collection: {}", name));
            if let Some(lock) = self.collections.get(name) {
                let guard = lock.read().await;
                for key in &guard.order {
                    if let Some(value) = guard.entries.get(key) {
                        lines.push(format!("{}[{}] = {}", name, key, value));
                    }
                }
            }
        }
        serde_json::to_string(&lines).unwrap_or_default()
    }
}
