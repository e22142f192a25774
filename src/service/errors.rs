use crate::models::AccountError;
use crate::storage::StorageError;
use crate::types::AccountId;
use std::fmt;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Which side of an operation an account id was given for.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AccountRole {
    Account,
    Source,
    Destination
}

impl Display for AccountRole {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountRole::Account => "Account",
            AccountRole::Source => "Source account",
            AccountRole::Destination => "Destination account"
        };

        formatter.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("An account with number [{account_number}] already exists")]
    DuplicateAccount {
        account_number: String
    },
    #[error("{role} [{id}] was not found")]
    AccountNotFound {
        id: AccountId,
        role: AccountRole
    },
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Storage(#[from] StorageError)
}

impl ServiceError {
    pub fn duplicate_account(account_number: &str) -> Self {
        Self::DuplicateAccount {
            account_number: account_number.to_string()
        }
    }

    pub fn account_not_found(id: AccountId, role: AccountRole) -> Self {
        Self::AccountNotFound { id, role }
    }
}
