//! Account API handlers
//!
//! Handles endpoints related to account management:
//! - Create, update and delete accounts
//! - List accounts
//! - Look up accounts by ID or account number

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use common::model::account::{Account, AccountPatch, AccountRequest};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;
use crate::api::response::{ApiResponse, ApiListResponse};

/// List all accounts
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    responses(
        (status = 200, description = "Accounts retrieved successfully"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<ApiListResponse<Account>, ApiError> {
    let accounts = state.account_service.find_all().await?;
    Ok(ApiListResponse::new(accounts))
}

/// Open a new account
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = AccountRequest,
    responses(
        (status = 201, description = "Account successfully created", body = Account),
        (status = 400, description = "A field rule was violated"),
        (status = 404, description = "Customer not found"),
        (status = 422, description = "The customer may not open this account"),
        (status = 502, description = "Customer service unavailable")
    ),
    tag = "account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AccountRequest>,
) -> Result<(StatusCode, ApiResponse<Account>), ApiError> {
    let account = state.account_service.create(request).await?;
    Ok((StatusCode::CREATED, ApiResponse::new(account)))
}

/// Get an account by ID
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account details retrieved successfully", body = Account),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Account>, ApiError> {
    let account = state.account_service.find_by_id(id).await?
        .ok_or_else(|| ApiError::NotFound(format!("Account not found: {}", id)))?;

    Ok(ApiResponse::new(account))
}

/// Get an account by account number
#[utoipa::path(
    get,
    path = "/api/v1/account-numbers/{number}",
    params(
        ("number" = String, Path, description = "Account number")
    ),
    responses(
        (status = 200, description = "Account details retrieved successfully", body = Account),
        (status = 404, description = "Account not found")
    ),
    tag = "account"
)]
pub async fn get_account_by_number(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> Result<ApiResponse<Account>, ApiError> {
    let account = state.account_service.find_by_account_number(&number).await?
        .ok_or_else(|| ApiError::NotFound(format!("Account number not found: {}", number)))?;

    Ok(ApiResponse::new(account))
}

/// Partially update an account
///
/// `balance` in the body is added to the current balance.
#[utoipa::path(
    put,
    path = "/api/v1/accounts/{id}",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    request_body = AccountPatch,
    responses(
        (status = 200, description = "Account updated", body = Account),
        (status = 400, description = "The update breaks the account type's rules"),
        (status = 404, description = "Account not found")
    ),
    tag = "account"
)]
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<AccountPatch>,
) -> Result<ApiResponse<Account>, ApiError> {
    let account = state.account_service.update(id, patch).await?;
    Ok(ApiResponse::new(account))
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{id}",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 204, description = "Account deleted (or did not exist)")
    ),
    tag = "account"
)]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.account_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
