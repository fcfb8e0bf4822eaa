//! User repository integration tests against the in-memory store.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::{AppError, StoreConfig};
use domain::{Account, CreateAccount, CreateUser, Entity, EntityId, User};
use user_service_lib::build_in_memory;
use user_service_lib::infra::KeyValueStore;
use user_service_lib::repository::{AccountRepository, UserRepository};

struct Fixture {
    store: Arc<dyn KeyValueStore>,
    accounts: Arc<dyn AccountRepository>,
    users: Arc<dyn UserRepository>,
}

fn fixture() -> Fixture {
    let components = build_in_memory(&StoreConfig::default());
    Fixture {
        store: components.store,
        accounts: components.accounts,
        users: components.users,
    }
}

fn account(balance: Decimal) -> Account {
    Account::create(CreateAccount { id: None, balance }).unwrap()
}

fn mock_user(accounts: Vec<Account>) -> User {
    User::create(CreateUser {
        username: "mockUser".to_string(),
        accounts: Some(accounts),
        ..Default::default()
    })
    .unwrap()
}

fn sorted_props(user: &User) -> Vec<(String, Decimal)> {
    let mut props: Vec<_> = user
        .accounts()
        .iter()
        .map(|a| (a.id().to_string(), a.balance()))
        .collect();
    props.sort();
    props
}

// =============================================================================
// Round trip
// =============================================================================

#[tokio::test]
async fn test_create_then_get_round_trips_for_any_account_count() {
    let f = fixture();

    for count in [0usize, 1, 5] {
        let accounts = (0..count)
            .map(|i| account(Decimal::from(i as u64 * 10)))
            .collect();
        let user = mock_user(accounts);

        f.users.create(&user).await.unwrap();
        let fetched = f.users.get_by_id(user.id()).await.unwrap();

        assert_eq!(fetched.id(), user.id());
        assert_eq!(fetched.username(), user.username());
        assert_eq!(sorted_props(&fetched), sorted_props(&user));
    }
}

#[tokio::test]
async fn test_create_returns_stored_aggregate() {
    let f = fixture();
    let user = mock_user(vec![account(dec!(420))]);

    let created = f.users.create(&user).await.unwrap();
    assert_eq!(created, user);

    let dump = f.store.dump().await;
    assert!(dump.contains("mockUser"));
    assert!(dump.contains("420"));
}

#[tokio::test]
async fn test_accounts_keep_user_back_reference() {
    let f = fixture();
    let user = mock_user(vec![account(dec!(1)), account(dec!(2))]);
    f.users.create(&user).await.unwrap();

    for a in user.accounts() {
        let stored = f.store.read("account", a.id().as_str()).await.unwrap();
        assert_eq!(stored["userId"], serde_json::json!(user.id().as_str()));
    }
}

// =============================================================================
// Scenario: mockUser 420 -> 840
// =============================================================================

#[tokio::test]
async fn test_balance_change_is_persisted_on_update() {
    let f = fixture();
    let mut user = mock_user(vec![account(dec!(420))]);
    f.users.create(&user).await.unwrap();

    let all = f.users.get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].username(), "mockUser");
    assert_eq!(all[0].accounts().len(), 1);
    assert_eq!(all[0].accounts()[0].balance(), dec!(420));

    let account_id = user.accounts()[0].id().clone();
    user.account_mut(&account_id)
        .unwrap()
        .deposit(dec!(420))
        .unwrap();
    f.users.update(&user).await.unwrap();

    let all = f.users.get_all().await.unwrap();
    assert_eq!(all[0].accounts()[0].balance(), dec!(840));

    let stored = f.store.read("account", account_id.as_str()).await.unwrap();
    let balance: Decimal = serde_json::from_value(stored["balance"].clone()).unwrap();
    assert_eq!(balance, dec!(840));
}

#[tokio::test]
async fn test_get_all_returns_every_user() {
    let f = fixture();
    let user1 = mock_user(vec![account(dec!(420))]);
    let user2 = mock_user(vec![account(dec!(420))]);
    f.users.create(&user1).await.unwrap();
    f.users.create(&user2).await.unwrap();

    let all = f.users.get_all().await.unwrap();
    assert_eq!(all, vec![user1, user2]);
}

#[tokio::test]
async fn test_update_adds_new_accounts() {
    let f = fixture();
    let mut user = mock_user(vec![account(dec!(1))]);
    f.users.create(&user).await.unwrap();

    user.add_account(account(dec!(2)));
    let updated = f.users.update(&user).await.unwrap();

    assert_eq!(updated.accounts().len(), 2);
    assert_eq!(f.store.read_all("account").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_repeated_update_is_idempotent() {
    let f = fixture();
    let user = mock_user(vec![account(dec!(7))]);
    f.users.create(&user).await.unwrap();

    f.users.update(&user).await.unwrap();
    let once = f.store.dump().await;
    f.users.update(&user).await.unwrap();
    let twice = f.store.dump().await;

    assert_eq!(once, twice);
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_removes_user_and_accounts() {
    let f = fixture();
    let user = mock_user(vec![account(dec!(420)), account(dec!(1))]);
    f.users.create(&user).await.unwrap();

    let deleted = f.users.delete(user.id()).await.unwrap();
    assert_eq!(deleted, user);

    assert!(!f.store.dump().await.contains("mockUser"));
    assert!(f.store.read_all("account").await.unwrap().is_empty());
    for a in user.accounts() {
        let err = f.accounts.get_by_id(a.id()).await.unwrap_err();
        assert!(matches!(err, AppError::AccountNotFound(_)));
    }
    assert!(matches!(
        f.users.get_by_id(user.id()).await,
        Err(AppError::UserNotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_missing_user_fails() {
    let f = fixture();
    let err = f.users.delete(&EntityId::from("ghost")).await.unwrap_err();
    assert!(matches!(err, AppError::UserNotFound(_)));
}

// =============================================================================
// Consistency gap
// =============================================================================

#[tokio::test]
async fn test_dangling_account_reference_surfaces_on_read() {
    let f = fixture();
    let user = mock_user(vec![account(dec!(420)), account(dec!(5))]);
    f.users.create(&user).await.unwrap();

    // simulate a lost account write
    let lost = user.accounts()[1].id().clone();
    f.store.delete("account", lost.as_str()).await.unwrap();

    let err = f.users.get_by_id(user.id()).await.unwrap_err();
    assert!(matches!(&err, AppError::AccountNotFound(msg) if msg.contains(lost.as_str())));

    let err = f.users.get_all().await.unwrap_err();
    assert!(matches!(err, AppError::AccountNotFound(_)));
}

#[tokio::test]
async fn test_concurrent_creates_of_distinct_users() {
    let f = fixture();
    let users: Vec<User> = (0..10)
        .map(|i| mock_user(vec![account(Decimal::from(i))]))
        .collect();

    let results = futures_join(&f, &users).await;
    assert!(results.iter().all(Result::is_ok));
    assert_eq!(f.users.get_all().await.unwrap().len(), 10);
    assert_eq!(f.store.read_all("account").await.unwrap().len(), 10);
}

async fn futures_join(f: &Fixture, users: &[User]) -> Vec<Result<User, AppError>> {
    let handles: Vec<_> = users
        .iter()
        .cloned()
        .map(|user| {
            let repo = f.users.clone();
            tokio::spawn(async move { repo.create(&user).await })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    results
}
