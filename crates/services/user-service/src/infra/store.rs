//! Key/value store contract.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Store-level failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Key does not exist: {collection}[{key}]")]
    KeyNotFound { collection: String, key: String },

    #[error("Key already exists: {collection}[{key}]")]
    KeyAlreadyExists { collection: String, key: String },

    /// A stored value could not be converted to or from a record
    #[error("Malformed record in {collection}: {message}")]
    Serialization { collection: String, message: String },
}

impl StoreError {
    pub(crate) fn key_not_found(collection: &str, key: &str) -> Self {
        StoreError::KeyNotFound {
            collection: collection.to_string(),
            key: key.to_string(),
        }
    }

    pub(crate) fn key_already_exists(collection: &str, key: &str) -> Self {
        StoreError::KeyAlreadyExists {
            collection: collection.to_string(),
            key: key.to_string(),
        }
    }

    pub(crate) fn serialization(collection: &str, err: serde_json::Error) -> Self {
        StoreError::Serialization {
            collection: collection.to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Process-local store partitioned into named collections.
///
/// Each call is atomic on its own. A sequence of calls is not: there is no
/// transaction, version token or compare-and-swap.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Insert a new key; fails if the key is already present
    async fn create(&self, collection: &str, key: &str, data: Value) -> StoreResult<Value>;

    /// Snapshot of the value stored under `key`
    async fn read(&self, collection: &str, key: &str) -> StoreResult<Value>;

    /// Every value in the collection, in insertion order
    async fn read_all(&self, collection: &str) -> StoreResult<Vec<Value>>;

    /// Replace the value of an existing key
    async fn update(&self, collection: &str, key: &str, data: Value) -> StoreResult<Value>;

    /// Remove a key, returning its last value
    async fn delete(&self, collection: &str, key: &str) -> StoreResult<Value>;

    /// Names of the collections the store was initialized with
    fn collections(&self) -> Vec<String>;

    /// Diagnostic rendering of all collections (not a stable format)
    async fn dump(&self) -> String;
}
