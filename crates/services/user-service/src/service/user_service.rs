//! User service - Handles user and account use cases.
//!
//! SOLID (SRP): Orchestrates use cases only; consistency across the two
//! collections is the repository's concern.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use common::{AppResult, OptionExt};
use domain::{Account, CreateAccount, CreateUser, Entity, EntityId, User};

use crate::repository::UserRepository;

/// Result of opening an account for a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredAccount {
    pub user_id: EntityId,
    pub account_id: EntityId,
}

/// A balance mutation applied to one held account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceChange {
    Deposit(Decimal),
    Withdraw(Decimal),
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user with no accounts
    async fn register_user(&self, username: String) -> AppResult<User>;

    /// Open an account for an existing user
    async fn register_account(
        &self,
        user_id: &EntityId,
        initial_balance: Option<Decimal>,
    ) -> AppResult<RegisteredAccount>;

    /// Deposit into or withdraw from a held account
    async fn change_balance(
        &self,
        user_id: &EntityId,
        account_id: &EntityId,
        change: BalanceChange,
    ) -> AppResult<Account>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: &EntityId) -> AppResult<User>;

    /// Delete user and its accounts
    async fn delete_user(&self, id: &EntityId) -> AppResult<User>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register_user(&self, username: String) -> AppResult<User> {
        let user = User::create(CreateUser {
            username,
            ..Default::default()
        })?;

        let created = self.repo.create(&user).await?;
        tracing::info!(user_id = %created.id(), "User registered");
        Ok(created)
    }

    async fn register_account(
        &self,
        user_id: &EntityId,
        initial_balance: Option<Decimal>,
    ) -> AppResult<RegisteredAccount> {
        let mut user = self.repo.get_by_id(user_id).await?;
        let account = Account::create(CreateAccount {
            id: None,
            balance: initial_balance.unwrap_or(Decimal::ZERO),
        })?;
        let account_id = account.id().clone();

        user.add_account(account);
        self.repo.update(&user).await?;
        tracing::info!(user_id = %user_id, account_id = %account_id, "Account registered");

        Ok(RegisteredAccount {
            user_id: user_id.clone(),
            account_id,
        })
    }

    async fn change_balance(
        &self,
        user_id: &EntityId,
        account_id: &EntityId,
        change: BalanceChange,
    ) -> AppResult<Account> {
        let mut user = self.repo.get_by_id(user_id).await?;
        let account = user
            .account_mut(account_id)
            .ok_or_account_not_found(account_id.as_str())?;

        match change {
            BalanceChange::Deposit(amount) => account.deposit(amount)?,
            BalanceChange::Withdraw(amount) => account.withdraw(amount)?,
        };

        let updated = self.repo.update(&user).await?;
        updated
            .account(account_id)
            .cloned()
            .ok_or_account_not_found(account_id.as_str())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.get_all().await
    }

    async fn get_user(&self, id: &EntityId) -> AppResult<User> {
        self.repo.get_by_id(id).await
    }

    async fn delete_user(&self, id: &EntityId) -> AppResult<User> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use common::AppError;
    use domain::DomainError;
    use mockall::predicate::always;
    use rust_decimal_macros::dec;

    fn stored_user(id: &EntityId, accounts: Vec<Account>) -> User {
        User::create(CreateUser {
            id: Some(id.clone()),
            username: "mockUser".to_string(),
            accounts: Some(accounts),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn register_user_rejects_short_username_without_touching_repo() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let service = UserManager::new(Arc::new(repo));
        let err = service.register_user("short".into()).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::InvalidUsername(_))));
    }

    #[tokio::test]
    async fn register_user_persists_empty_aggregate() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|u: &User| u.username() == "mockUser" && u.accounts().is_empty())
            .returning(|u| Ok(u.clone()));

        let service = UserManager::new(Arc::new(repo));
        let user = service.register_user("mockUser".into()).await.unwrap();
        assert_eq!(user.username(), "mockUser");
    }

    #[tokio::test]
    async fn register_account_appends_and_updates() {
        let user_id = EntityId::from("user-1");
        let mut repo = MockUserRepository::new();
        let uid = user_id.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(stored_user(&uid, vec![])));
        repo.expect_update()
            .withf(|u: &User| u.accounts().len() == 1 && u.accounts()[0].balance() == dec!(50))
            .returning(|u| Ok(u.clone()));

        let service = UserManager::new(Arc::new(repo));
        let registered = service
            .register_account(&user_id, Some(dec!(50)))
            .await
            .unwrap();
        assert_eq!(registered.user_id, user_id);
    }

    #[tokio::test]
    async fn register_account_for_missing_user_fails() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(always())
            .returning(|id| Err(AppError::UserNotFound(id.to_string())));
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let err = service
            .register_account(&"ghost".into(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn negative_opening_balance_is_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(stored_user(id, vec![])));
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let err = service
            .register_account(&"u".into(), Some(dec!(-1)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::InvalidBalance(_))));
    }

    #[tokio::test]
    async fn overdraw_is_rejected_before_update() {
        let account = Account::create(CreateAccount {
            id: Some("acc".into()),
            balance: dec!(10),
        })
        .unwrap();
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .returning(move |id| Ok(stored_user(id, vec![account.clone()])));
        repo.expect_update().never();

        let service = UserManager::new(Arc::new(repo));
        let err = service
            .change_balance(&"u".into(), &"acc".into(), BalanceChange::Withdraw(dec!(11)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::InvalidBalance(_))));
    }

    #[tokio::test]
    async fn change_balance_on_unknown_account_fails() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(stored_user(id, vec![])));

        let service = UserManager::new(Arc::new(repo));
        let err = service
            .change_balance(&"u".into(), &"nope".into(), BalanceChange::Deposit(dec!(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AccountNotFound(id) if id == "nope"));
    }
}
