//! Shared configuration structures.

use std::env;

use domain::{ACCOUNT_COLLECTION, USER_COLLECTION};
use serde::{Deserialize, Serialize};

/// Key/value store layout: which collections hold which records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Collection holding user records
    pub user_collection: String,
    /// Collection holding account records
    pub account_collection: String,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            user_collection: env::var("USER_COLLECTION")
                .unwrap_or_else(|_| USER_COLLECTION.to_string()),
            account_collection: env::var("ACCOUNT_COLLECTION")
                .unwrap_or_else(|_| ACCOUNT_COLLECTION.to_string()),
        }
    }

    /// Every collection the store must be initialized with
    pub fn collections(&self) -> Vec<String> {
        vec![self.user_collection.clone(), self.account_collection.clone()]
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            user_collection: USER_COLLECTION.to_string(),
            account_collection: ACCOUNT_COLLECTION.to_string(),
        }
    }
}
