//! Success response envelope.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Standard success body: `{"type": ..., "data": ...}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn user(data: T) -> Self {
        Self { kind: "User", data }
    }

    pub fn account(data: T) -> Self {
        Self {
            kind: "Account",
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

/// Created response helper for POST endpoints
pub struct Created<T: Serialize>(pub ApiResponse<T>);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
