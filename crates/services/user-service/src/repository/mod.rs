//! Repository layer for data access.
//!
//! A `User` aggregate is persisted as one user record plus one account
//! record per held account, in two collections. Writes are not atomic
//! across the two: the user record is written first and the accounts fan
//! out afterwards, and a failure part-way leaves whatever the finished
//! steps produced.

mod account_repository;
mod error_mapping;
pub mod records;
mod user_repository;

pub use account_repository::{AccountRepository, AccountStore};
pub use records::{AccountRecord, UserRecord};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::MockAccountRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
