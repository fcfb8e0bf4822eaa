//! User Service Library
//!
//! Persistence and use cases for users and their accounts: an in-memory
//! key/value store, the account and user repositories on top of it, and the
//! service used by the HTTP gateway.

pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::StoreConfig;

use crate::infra::{KeyValueStore, MemoryStore};
use crate::repository::{AccountRepository, AccountStore, UserRepository, UserStore};
use crate::service::{UserManager, UserService};

/// Fully wired persistence and service stack.
#[derive(Clone)]
pub struct UserServiceComponents {
    pub store: Arc<dyn KeyValueStore>,
    pub accounts: Arc<dyn AccountRepository>,
    pub users: Arc<dyn UserRepository>,
    pub service: Arc<dyn UserService>,
}

/// Wire a fresh in-memory store, both repositories and the service.
pub fn build_in_memory(config: &StoreConfig) -> UserServiceComponents {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new(config.collections()));
    let accounts: Arc<dyn AccountRepository> = Arc::new(AccountStore::new(
        store.clone(),
        config.account_collection.clone(),
    ));
    let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(
        store.clone(),
        config.user_collection.clone(),
        accounts.clone(),
    ));
    let service: Arc<dyn UserService> = Arc::new(UserManager::new(users.clone()));

    tracing::info!(
        user_collection = %config.user_collection,
        account_collection = %config.account_collection,
        "User service initialized"
    );

    UserServiceComponents {
        store,
        accounts,
        users,
        service,
    }
}
