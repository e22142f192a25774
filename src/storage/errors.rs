use crate::types::AccountId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StorageError {
    #[error("Account number [{account_number}] is already held by account [{existing_id}]")]
    DuplicateAccountNumber {
        account_number: String,
        existing_id: AccountId
    },
    #[error("Account [{id}] is not held by the store")]
    UnknownAccount {
        id: AccountId
    }
}
