//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Entities can only be built through their validating factories, so every
//! `User` and `Account` that exists is in a valid state.

pub mod account;
pub mod constants;
pub mod entity;
pub mod error;
pub mod user;

pub use account::{Account, AccountProps, CreateAccount};
pub use constants::*;
pub use entity::{Entity, EntityId};
pub use error::{DomainError, DomainResult};
pub use user::{CreateUser, User, UserProps};
