mod account_service;
mod errors;

pub use account_service::{AccountService, TransferOutcome};
pub use errors::{AccountRole, ServiceError};
