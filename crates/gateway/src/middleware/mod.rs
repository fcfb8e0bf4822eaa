//! Middleware for request authorization.

mod auth;

pub use auth::auth_middleware;
