//! Service layer - use cases over the repositories.

mod user_service;

pub use user_service::{BalanceChange, RegisteredAccount, UserManager, UserService};
