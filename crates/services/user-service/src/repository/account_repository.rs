//! Account repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use common::AppResult;
use domain::{Account, Entity, EntityId};

use super::error_mapping::account_error;
use super::records::{decode, encode, AccountRecord};
use crate::infra::{KeyValueStore, StoreError};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Load an account, re-validating its balance
    async fn get_by_id(&self, id: &EntityId) -> AppResult<Account>;

    /// Store a new account owned by `user_id`
    async fn create(&self, account: &Account, user_id: &EntityId) -> AppResult<Account>;

    /// Replace an existing account
    async fn update(&self, account: &Account, user_id: &EntityId) -> AppResult<Account>;

    /// Create or update depending on whether the id is already stored
    async fn upsert(&self, account: &Account, user_id: &EntityId) -> AppResult<Account>;

    /// Remove an account, returning its last stored state
    async fn delete(&self, id: &EntityId) -> AppResult<Account>;
}

/// Concrete implementation of AccountRepository over a key/value store
pub struct AccountStore {
    store: Arc<dyn KeyValueStore>,
    collection: String,
}

impl AccountStore {
    /// Create new repository instance
    pub fn new(store: Arc<dyn KeyValueStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    fn encode(&self, account: &Account, user_id: &EntityId) -> AppResult<Value> {
        encode(&self.collection, &AccountRecord::from_domain(account, user_id))
            .map_err(account_error)
    }

    fn to_domain(&self, value: Value) -> AppResult<Account> {
        let record: AccountRecord = decode(&self.collection, value).map_err(account_error)?;
        Ok(record.into_domain()?)
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn get_by_id(&self, id: &EntityId) -> AppResult<Account> {
        let value = self
            .store
            .read(&self.collection, id.as_str())
            .await
            .map_err(account_error)?;

        self.to_domain(value)
    }

    async fn create(&self, account: &Account, user_id: &EntityId) -> AppResult<Account> {
        let data = self.encode(account, user_id)?;
        let stored = self
            .store
            .create(&self.collection, account.id().as_str(), data)
            .await
            .map_err(account_error)?;

        self.to_domain(stored)
    }

    async fn update(&self, account: &Account, user_id: &EntityId) -> AppResult<Account> {
        let data = self.encode(account, user_id)?;
        let stored = self
            .store
            .update(&self.collection, account.id().as_str(), data)
            .await
            .map_err(account_error)?;

        self.to_domain(stored)
    }

    async fn upsert(&self, account: &Account, user_id: &EntityId) -> AppResult<Account> {
        // read-then-write: another writer may slip in between the two calls
        match self.store.read(&self.collection, account.id().as_str()).await {
            Ok(_) => self.update(account, user_id).await,
            Err(StoreError::KeyNotFound { .. }) => self.create(account, user_id).await,
            Err(e) => Err(account_error(e)),
        }
    }

    async fn delete(&self, id: &EntityId) -> AppResult<Account> {
        let removed = self
            .store
            .delete(&self.collection, id.as_str())
            .await
            .map_err(account_error)?;

        tracing::debug!(account_id = %id, "Account deleted");
        self.to_domain(removed)
    }
}
