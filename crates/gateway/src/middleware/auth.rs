//! Bearer-token authorization stub.
//!
//! Compares the presented token with the configured `API_TOKEN`; there is no
//! per-user identity.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};

use common::{AppError, AppResult};

use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Reject requests whose bearer token does not match the configured one.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request)?;
    let authorized = matches!(state.config.api_token.as_deref(), Some(expected) if expected == token);

    if !authorized {
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_PREFIX))
        .ok_or(AppError::Unauthorized)
}
