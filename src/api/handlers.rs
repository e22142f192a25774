use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::{ApiError, ApiJson, ApiPath};
use crate::models::Account;
use crate::service::{AccountRole, AccountService, ServiceError, TransferOutcome};
use crate::storage::TransactionManager;
use crate::types::{AccountId, Monetary};

pub const HEALTH_MESSAGE: &str = "Application running successfully!";

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub account_number: String,
    pub initial_balance: Monetary
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: Monetary
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub source_id: AccountId,
    pub destination_id: AccountId,
    pub amount: Monetary
}

/// `GET /test`: liveness check.
pub async fn health_check() -> &'static str {
    HEALTH_MESSAGE
}

pub async fn create_account<S: TransactionManager>(
    State(service): State<AccountService<S>>,
    ApiJson(request): ApiJson<CreateAccountRequest>
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let account = service.create_account(&request.account_number, request.initial_balance)?;

    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn list_accounts<S: TransactionManager>(
    State(service): State<AccountService<S>>
) -> Result<Json<Vec<Account>>, ApiError> {
    Ok(Json(service.list_all()?))
}

pub async fn get_account<S: TransactionManager>(
    State(service): State<AccountService<S>>,
    ApiPath(id): ApiPath<AccountId>
) -> Result<Json<Account>, ApiError> {
    let account = service.find_by_id(id)?
        .ok_or_else(|| ServiceError::account_not_found(id, AccountRole::Account))?;

    Ok(Json(account))
}

pub async fn get_account_by_number<S: TransactionManager>(
    State(service): State<AccountService<S>>,
    ApiPath(account_number): ApiPath<String>
) -> Result<Json<Account>, ApiError> {
    let account = service.find_by_number(&account_number)?
        .ok_or_else(|| ApiError::not_found(format!("Account number [{account_number}] was not found")))?;

    Ok(Json(account))
}

pub async fn delete_account<S: TransactionManager>(
    State(service): State<AccountService<S>>,
    ApiPath(id): ApiPath<AccountId>
) -> Result<StatusCode, ApiError> {
    service.delete(id)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn deposit<S: TransactionManager>(
    State(service): State<AccountService<S>>,
    ApiPath(id): ApiPath<AccountId>,
    ApiJson(request): ApiJson<AmountRequest>
) -> Result<Json<Account>, ApiError> {
    Ok(Json(service.deposit(id, request.amount)?))
}

pub async fn withdraw<S: TransactionManager>(
    State(service): State<AccountService<S>>,
    ApiPath(id): ApiPath<AccountId>,
    ApiJson(request): ApiJson<AmountRequest>
) -> Result<Json<Account>, ApiError> {
    Ok(Json(service.withdraw(id, request.amount)?))
}

pub async fn transfer<S: TransactionManager>(
    State(service): State<AccountService<S>>,
    ApiJson(request): ApiJson<TransferRequest>
) -> Result<Json<TransferOutcome>, ApiError> {
    let outcome = service.transfer(request.source_id, request.destination_id, request.amount)?;

    Ok(Json(outcome))
}
