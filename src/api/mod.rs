mod errors;
mod extractors;
mod handlers;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::service::AccountService;
use crate::storage::TransactionManager;

pub use errors::ApiError;
pub use extractors::{ApiJson, ApiPath};
pub use handlers::{
    create_account, delete_account, deposit, get_account, get_account_by_number, health_check,
    list_accounts, transfer, withdraw, AmountRequest, CreateAccountRequest, TransferRequest,
    HEALTH_MESSAGE,
};

/// Builds the HTTP routes over an account service.
pub fn router<S: TransactionManager>(service: AccountService<S>) -> Router {
    Router::new()
        .route("/test", get(health_check))
        .route("/accounts", get(list_accounts::<S>).post(create_account::<S>))
        .route("/accounts/{id}", get(get_account::<S>).delete(delete_account::<S>))
        .route("/accounts/by-number/{account_number}", get(get_account_by_number::<S>))
        .route("/accounts/{id}/deposit", post(deposit::<S>))
        .route("/accounts/{id}/withdraw", post(withdraw::<S>))
        .route("/transfers", post(transfer::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
