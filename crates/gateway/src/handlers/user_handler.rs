//! User and account handlers.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{AccountProps, EntityId, UserProps};
use user_service_lib::service::BalanceChange;

use crate::extractors::{JsonBody, ValidatedJson};
use crate::response::{ApiResponse, Created};
use crate::state::AppState;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserRequest {
    /// Username (more than 6 characters)
    ///
    /// Empty is a malformed request (`VALIDATION_ERROR`); the length rule
    /// itself belongs to `User::create` (`INVALID_USERNAME`).
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "mockUser")]
    pub username: String,
}

/// Account registration request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountRequest {
    /// Opening balance (defaults to 0)
    pub initial_balance: Option<Decimal>,
}

/// Deposit / withdraw request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AmountRequest {
    /// Non-negative amount
    pub amount: Decimal,
}

/// Identifiers of a newly opened account
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredAccountResponse {
    pub user_id: EntityId,
    pub account_id: EntityId,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(register_user))
        .route("/:id", get(get_user).delete(delete_user))
        .route("/:id/accounts", post(register_account))
        .route("/:id/accounts/:account_id/deposit", post(deposit))
        .route("/:id/accounts/:account_id/withdraw", post(withdraw))
}

/// List all users with their accounts
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all users", body = Vec<UserProps>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "A user references a missing account")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<UserProps>>> {
    let users = state.user_service.list_users().await?;
    Ok(ApiResponse::user(users.iter().map(UserProps::from).collect()))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserProps),
        (status = 400, description = "Invalid username"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterUserRequest>,
) -> AppResult<Created<UserProps>> {
    let user = state.user_service.register_user(payload.username).await?;
    Ok(Created(ApiResponse::user(user.marshal())))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User with accounts", body = UserProps),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User or referenced account not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserProps>> {
    let user = state.user_service.get_user(&EntityId::from(id)).await?;
    Ok(ApiResponse::user(user.marshal()))
}

/// Delete user and its accounts
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Deleted user", body = UserProps),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User or referenced account not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserProps>> {
    let user = state.user_service.delete_user(&EntityId::from(id)).await?;
    Ok(ApiResponse::user(user.marshal()))
}

/// Open an account for a user
#[utoipa::path(
    post,
    path = "/users/{id}/accounts",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = RegisterAccountRequest,
    responses(
        (status = 201, description = "Account opened", body = RegisteredAccountResponse),
        (status = 400, description = "Invalid balance"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn register_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<RegisterAccountRequest>,
) -> AppResult<Created<RegisteredAccountResponse>> {
    let registered = state
        .user_service
        .register_account(&EntityId::from(id), payload.initial_balance)
        .await?;

    Ok(Created(ApiResponse::account(RegisteredAccountResponse {
        user_id: registered.user_id,
        account_id: registered.account_id,
    })))
}

/// Deposit into an account
#[utoipa::path(
    post,
    path = "/users/{id}/accounts/{account_id}/deposit",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID"),
        ("account_id" = String, Path, description = "Account ID")
    ),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Updated account", body = AccountProps),
        (status = 400, description = "Invalid amount"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User or account not found")
    )
)]
pub async fn deposit(
    State(state): State<AppState>,
    Path((id, account_id)): Path<(String, String)>,
    JsonBody(payload): JsonBody<AmountRequest>,
) -> AppResult<ApiResponse<AccountProps>> {
    change_balance(state, id, account_id, BalanceChange::Deposit(payload.amount)).await
}

/// Withdraw from an account
#[utoipa::path(
    post,
    path = "/users/{id}/accounts/{account_id}/withdraw",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID"),
        ("account_id" = String, Path, description = "Account ID")
    ),
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Updated account", body = AccountProps),
        (status = 400, description = "Invalid amount or insufficient balance"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User or account not found")
    )
)]
pub async fn withdraw(
    State(state): State<AppState>,
    Path((id, account_id)): Path<(String, String)>,
    JsonBody(payload): JsonBody<AmountRequest>,
) -> AppResult<ApiResponse<AccountProps>> {
    change_balance(state, id, account_id, BalanceChange::Withdraw(payload.amount)).await
}

async fn change_balance(
    state: AppState,
    user_id: String,
    account_id: String,
    change: BalanceChange,
) -> AppResult<ApiResponse<AccountProps>> {
    let account = state
        .user_service
        .change_balance(&EntityId::from(user_id), &EntityId::from(account_id), change)
        .await?;
    Ok(ApiResponse::account(account.marshal()))
}
