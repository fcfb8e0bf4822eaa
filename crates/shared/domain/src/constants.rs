//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

use rust_decimal::Decimal;

// =============================================================================
// Validation
// =============================================================================

/// Usernames must be strictly longer than this many characters
pub const MIN_USERNAME_EXCLUSIVE: usize = 6;

/// Lowest balance an account may hold
pub const MIN_ACCOUNT_BALANCE: Decimal = Decimal::ZERO;

/// Check if a username satisfies the length rule
pub fn is_valid_username(username: &str) -> bool {
    username.chars().count() > MIN_USERNAME_EXCLUSIVE
}

/// Check if a balance satisfies the non-negative rule
pub fn is_valid_balance(balance: Decimal) -> bool {
    balance >= MIN_ACCOUNT_BALANCE
}

// =============================================================================
// Persistence
// =============================================================================

/// Default name of the user collection
pub const USER_COLLECTION: &str = "user";

/// Default name of the account collection
pub const ACCOUNT_COLLECTION: &str = "account";
