//! Storage-shaped projections of the domain entities.

use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use domain::{Account, CreateAccount, DomainResult, Entity, EntityId, User};

use crate::infra::{StoreError, StoreResult};

/// Stored shape of a user: accounts are referenced by id, never embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: EntityId,
    pub username: String,
    pub account_ids: Vec<EntityId>,
}

/// Stored shape of an account.
///
/// `user_id` is a back-reference for lookup only; nothing traverses from an
/// account to its user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: EntityId,
    pub balance: Decimal,
    pub user_id: EntityId,
}

impl UserRecord {
    pub fn from_domain(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            username: user.username().to_string(),
            account_ids: user.account_ids(),
        }
    }
}

impl AccountRecord {
    pub fn from_domain(account: &Account, user_id: &EntityId) -> Self {
        Self {
            id: account.id().clone(),
            balance: account.balance(),
            user_id: user_id.clone(),
        }
    }

    /// Rebuild the entity through its validating factory
    pub fn into_domain(self) -> DomainResult<Account> {
        Account::create(CreateAccount {
            id: Some(self.id),
            balance: self.balance,
        })
    }
}

/// Encode a record as an opaque store value
pub(crate) fn encode<T: Serialize>(collection: &str, record: &T) -> StoreResult<Value> {
    serde_json::to_value(record).map_err(|e| StoreError::serialization(collection, e))
}

/// Decode an opaque store value into a record
pub(crate) fn decode<T: DeserializeOwned>(collection: &str, value: Value) -> StoreResult<T> {
    serde_json::from_value(value).map_err(|e| StoreError::serialization(collection, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::CreateUser;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn user_record_references_account_ids() {
        let a = Account::create(CreateAccount {
            id: Some("acc-1".into()),
            balance: dec!(420),
        })
        .unwrap();
        let user = User::create(CreateUser {
            id: Some("user-1".into()),
            username: "mockUser".into(),
            accounts: Some(vec![a]),
        })
        .unwrap();

        let value = encode("user", &UserRecord::from_domain(&user)).unwrap();
        assert_eq!(
            value,
            json!({ "id": "user-1", "username": "mockUser", "accountIds": ["acc-1"] })
        );
    }

    #[test]
    fn account_record_carries_back_reference() {
        let a = Account::create(CreateAccount {
            id: Some("acc-1".into()),
            balance: dec!(420),
        })
        .unwrap();
        let record = AccountRecord::from_domain(&a, &"user-1".into());
        let value = encode("account", &record).unwrap();
        assert_eq!(value["userId"], json!("user-1"));
        assert_eq!(value["id"], json!("acc-1"));

        let back: AccountRecord = decode("account", value).unwrap();
        assert_eq!(back.into_domain().unwrap(), a);
    }

    #[test]
    fn decoding_a_malformed_value_is_a_store_error() {
        let err = decode::<UserRecord>("user", json!({ "id": 1 })).unwrap_err();
        assert!(matches!(err, StoreError::Serialization { collection, .. } if collection == "user"));
    }

    #[test]
    fn negative_stored_balance_fails_validation() {
        let record = AccountRecord {
            id: "a".into(),
            balance: dec!(-5),
            user_id: "u".into(),
        };
        assert!(record.into_domain().is_err());
    }
}
