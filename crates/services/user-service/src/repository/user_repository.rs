//! User repository implementation.
//!
//! Composes the account repository: every write touches the user record
//! first, then fans out to the account collection.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;

use common::AppResult;
use domain::{CreateUser, Entity, EntityId, User};

use super::account_repository::AccountRepository;
use super::error_mapping::user_error;
use super::records::{decode, encode, UserRecord};
use crate::infra::KeyValueStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load every user with its accounts
    async fn get_all(&self) -> AppResult<Vec<User>>;

    /// Load one user with its accounts
    async fn get_by_id(&self, id: &EntityId) -> AppResult<User>;

    /// Store a new user, then upsert its accounts
    async fn create(&self, user: &User) -> AppResult<User>;

    /// Replace an existing user, then upsert its accounts
    async fn update(&self, user: &User) -> AppResult<User>;

    /// Remove a user, then remove its accounts
    async fn delete(&self, id: &EntityId) -> AppResult<User>;
}

/// Concrete implementation of UserRepository over a key/value store
pub struct UserStore {
    store: Arc<dyn KeyValueStore>,
    collection: String,
    accounts: Arc<dyn AccountRepository>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        collection: impl Into<String>,
        accounts: Arc<dyn AccountRepository>,
    ) -> Self {
        Self {
            store,
            collection: collection.into(),
            accounts,
        }
    }

    fn decode(&self, value: Value) -> AppResult<UserRecord> {
        decode(&self.collection, value).map_err(user_error)
    }

    /// Fetch every referenced account and rebuild the aggregate.
    ///
    /// A referenced account that is missing fails the whole read with
    /// `AccountNotFound`; it is never silently dropped.
    async fn rehydrate(&self, record: UserRecord) -> AppResult<User> {
        let accounts = join_all(
            record
                .account_ids
                .iter()
                .map(|account_id| self.accounts.get_by_id(account_id)),
        )
        .await
        .into_iter()
        .collect::<AppResult<Vec<_>>>()?;

        Ok(User::create(CreateUser {
            id: Some(record.id),
            username: record.username,
            accounts: Some(accounts),
        })?)
    }

    /// Upsert every held account concurrently.
    ///
    /// All siblings run to completion; the first failure in account order is
    /// returned. Completed upserts are not undone.
    async fn upsert_accounts(&self, user: &User) -> AppResult<()> {
        let results = join_all(
            user.accounts()
                .iter()
                .map(|account| self.accounts.upsert(account, user.id())),
        )
        .await;

        warn_on_partial_failure(user.id(), "upsert", &results);
        results.into_iter().collect::<AppResult<Vec<_>>>()?;
        Ok(())
    }
}

fn warn_on_partial_failure<T>(user_id: &EntityId, operation: &str, results: &[AppResult<T>]) {
    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        tracing::warn!(
            user_id = %user_id,
            operation,
            failed,
            total = results.len(),
            "Account fan-out failed; completed steps are kept"
        );
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn get_all(&self) -> AppResult<Vec<User>> {
        let values = self
            .store
            .read_all(&self.collection)
            .await
            .map_err(user_error)?;

        let records = values
            .into_iter()
            .map(|value| self.decode(value))
            .collect::<AppResult<Vec<_>>>()?;

        join_all(records.into_iter().map(|record| self.rehydrate(record)))
            .await
            .into_iter()
            .collect()
    }

    async fn get_by_id(&self, id: &EntityId) -> AppResult<User> {
        let value = self
            .store
            .read(&self.collection, id.as_str())
            .await
            .map_err(user_error)?;

        self.rehydrate(self.decode(value)?).await
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let data = encode(&self.collection, &UserRecord::from_domain(user)).map_err(user_error)?;
        let stored = self
            .store
            .create(&self.collection, user.id().as_str(), data)
            .await
            .map_err(user_error)?;
        tracing::debug!(user_id = %user.id(), accounts = user.accounts().len(), "User record created");

        self.upsert_accounts(user).await?;
        self.rehydrate(self.decode(stored)?).await
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let data = encode(&self.collection, &UserRecord::from_domain(user)).map_err(user_error)?;
        let stored = self
            .store
            .update(&self.collection, user.id().as_str(), data)
            .await
            .map_err(user_error)?;
        tracing::debug!(user_id = %user.id(), accounts = user.accounts().len(), "User record updated");

        self.upsert_accounts(user).await?;
        self.rehydrate(self.decode(stored)?).await
    }

    async fn delete(&self, id: &EntityId) -> AppResult<User> {
        let removed = self
            .store
            .delete(&self.collection, id.as_str())
            .await
            .map_err(user_error)?;
        tracing::debug!(user_id = %id, "User record deleted");

        let user = self.rehydrate(self.decode(removed)?).await?;

        let results = join_all(
            user.accounts()
                .iter()
                .map(|account| self.accounts.delete(account.id())),
        )
        .await;
        warn_on_partial_failure(user.id(), "delete", &results);
        results.into_iter().collect::<AppResult<Vec<_>>>()?;

        Ok(user)
    }
}
