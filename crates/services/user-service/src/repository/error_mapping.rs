//! Translation of store failures into repository errors.
//!
//! The store message is carried verbatim inside the repository error.

use common::AppError;

use crate::infra::StoreError;

/// Map a failure from the account collection
pub(super) fn account_error(err: StoreError) -> AppError {
    let message = err.to_string();
    match err {
        StoreError::KeyNotFound { .. } => AppError::AccountNotFound(message),
        StoreError::KeyAlreadyExists { .. } => AppError::DuplicateAccount(message),
        StoreError::CollectionNotFound(_) | StoreError::Serialization { .. } => {
            AppError::Storage(message)
        }
    }
}

/// Map a failure from the user collection
pub(super) fn user_error(err: StoreError) -> AppError {
    let message = err.to_string();
    match err {
        StoreError::KeyNotFound { .. } => AppError::UserNotFound(message),
        StoreError::KeyAlreadyExists { .. } => AppError::DuplicateUser(message),
        StoreError::CollectionNotFound(_) | StoreError::Serialization { .. } => {
            AppError::Storage(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_errors_keep_store_message() {
        let err = account_error(StoreError::key_not_found("account", "a-1"));
        assert!(
            matches!(&err, AppError::AccountNotFound(msg) if msg == "Key does not exist: account[a-1]")
        );
        assert!(matches!(
            account_error(StoreError::key_already_exists("account", "a-1")),
            AppError::DuplicateAccount(_)
        ));
    }

    #[test]
    fn user_errors_keep_store_message() {
        assert!(matches!(
            user_error(StoreError::key_not_found("user", "u")),
            AppError::UserNotFound(_)
        ));
        assert!(matches!(
            user_error(StoreError::CollectionNotFound("user".into())),
            AppError::Storage(msg) if msg == "Collection not found: user"
        ));
    }
}
