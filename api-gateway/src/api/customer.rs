//! Customer-scoped account handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use common::model::account::Account;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;
use crate::api::response::{ApiResponse, ApiListResponse};

/// List a customer's accounts
#[utoipa::path(
    get,
    path = "/api/v1/customers/{customer_id}/accounts",
    params(
        ("customer_id" = String, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer accounts retrieved successfully")
    ),
    tag = "customer"
)]
pub async fn list_customer_accounts(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
) -> Result<ApiListResponse<Account>, ApiError> {
    let accounts = state.account_service.find_by_customer_id(&customer_id).await?;
    Ok(ApiListResponse::new(accounts))
}

/// Get one of a customer's accounts
///
/// Answers 404 when the account exists but belongs to someone else.
#[utoipa::path(
    get,
    path = "/api/v1/customers/{customer_id}/accounts/{id}",
    params(
        ("customer_id" = String, Path, description = "Customer ID"),
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account retrieved successfully", body = Account),
        (status = 404, description = "No such account for this customer")
    ),
    tag = "customer"
)]
pub async fn get_customer_account(
    State(state): State<Arc<AppState>>,
    Path((customer_id, id)): Path<(String, Uuid)>,
) -> Result<ApiResponse<Account>, ApiError> {
    let account = state.account_service.find_by_id_and_customer_id(id, &customer_id).await?
        .ok_or_else(|| ApiError::NotFound(format!("Account {} not found for customer {}", id, customer_id)))?;

    Ok(ApiResponse::new(account))
}
