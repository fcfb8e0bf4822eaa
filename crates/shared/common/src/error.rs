//! Unified error handling for repositories and HTTP.
//!
//! Provides a single error type that repositories and services return and
//! that converts to Axum HTTP responses at the gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types.
///
/// Repository variants carry the message of the store failure they wrap.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    // Repository errors
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    #[error("Storage error: {0}")]
    Storage(String),

    // Domain rule violations
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Validation
    #[error("{0}")]
    Validation(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::UserNotFound(_) => "USER_NOT_FOUND",
            AppError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            AppError::DuplicateUser(_) => "DUPLICATE_USER",
            AppError::DuplicateAccount(_) => "DUPLICATE_ACCOUNT",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Domain(DomainError::InvalidBalance(_)) => "INVALID_BALANCE",
            AppError::Domain(DomainError::InvalidUsername(_)) => "INVALID_USERNAME",
            AppError::Domain(DomainError::InvalidAmount(_)) => "INVALID_AMOUNT",
            AppError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound(_) | AppError::AccountNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateUser(_) | AppError::DuplicateAccount(_) => StatusCode::CONFLICT,
            AppError::Domain(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                "A storage error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_account_not_found(self, id: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_account_not_found(self, id: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::AccountNotFound(id.into()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage(msg.into())
    }
}
