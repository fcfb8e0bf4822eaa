//! User aggregate and related types.

use serde::{Deserialize, Serialize};

use crate::account::{Account, AccountProps};
use crate::constants::is_valid_username;
use crate::entity::{Entity, EntityId};
use crate::error::{DomainError, DomainResult};

/// User aggregate.
///
/// Exclusively owns its in-memory accounts. Persistence stores them in a
/// separate collection referenced by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: EntityId,
    username: String,
    accounts: Vec<Account>,
}

/// User creation parameters
#[derive(Debug, Clone, Default)]
pub struct CreateUser {
    /// Existing id (generated when absent)
    pub id: Option<EntityId>,
    /// Username (more than 6 characters)
    pub username: String,
    /// Accounts held from the start (empty when absent)
    pub accounts: Option<Vec<Account>>,
}

/// Plain projection of a user (safe to return to clients)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserProps {
    /// User identifier
    pub id: EntityId,
    /// Username
    pub username: String,
    /// Accounts held by the user, in order
    pub accounts: Vec<AccountProps>,
}

impl User {
    /// Validating factory
    pub fn create(params: CreateUser) -> DomainResult<Self> {
        if !is_valid_username(&params.username) {
            return Err(DomainError::invalid_username(params.username));
        }

        Ok(Self {
            id: EntityId::or_generate(params.id),
            username: params.username,
            accounts: params.accounts.unwrap_or_default(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Append an account (already valid by construction)
    pub fn add_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    /// Find a held account by id
    pub fn account(&self, id: &EntityId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id() == id)
    }

    /// Mutable access to a held account, for balance changes
    pub fn account_mut(&mut self, id: &EntityId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id() == id)
    }

    /// Ids of held accounts, in order
    pub fn account_ids(&self) -> Vec<EntityId> {
        self.accounts.iter().map(|a| a.id().clone()).collect()
    }

    /// Project into plain props
    pub fn marshal(&self) -> UserProps {
        UserProps {
            id: self.id.clone(),
            username: self.username.clone(),
            accounts: self.accounts.iter().map(Account::marshal).collect(),
        }
    }
}

impl Entity for User {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl From<&User> for UserProps {
    fn from(user: &User) -> Self {
        user.marshal()
    }
}

impl From<User> for UserProps {
    fn from(user: User) -> Self {
        user.marshal()
    }
}
