use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::models::AccountError;
use crate::service::ServiceError;
use crate::storage::StorageError;

/// A service failure translated into an HTTP status and message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into()
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        let status = match &error {
            ServiceError::AccountNotFound { .. }
            | ServiceError::Storage(StorageError::UnknownAccount { .. }) => StatusCode::NOT_FOUND,
            ServiceError::DuplicateAccount { .. }
            | ServiceError::Storage(StorageError::DuplicateAccountNumber { .. }) => StatusCode::CONFLICT,
            ServiceError::Account(AccountError::InsufficientFunds { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Account(AccountError::Overflow { .. }) => {
                // Not a client mistake; keep details out of the response.
                error!("{error}");
                return Self::new(StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred")
            }
            ServiceError::Account(_) => StatusCode::BAD_REQUEST
        };

        Self::new(status, error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => StatusCode::BAD_REQUEST,
            _ => rejection.status()
        };

        Self::new(status, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}
