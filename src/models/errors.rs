use crate::models::{Account, Operation};
use crate::types::Monetary;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AccountError {
    #[error("Invalid {operation} amount [{amount}]: must be positive")]
    InvalidAmount {
        operation: Operation,
        amount: Monetary
    },
    #[error("Insufficient funds in account [{account_number}]: balance [{balance}], requested [{amount}]")]
    InsufficientFunds {
        account_number: String,
        balance: Monetary,
        amount: Monetary
    },
    #[error("Transfer from account [{account_number}] has no destination account")]
    InvalidDestination {
        account_number: String
    },
    #[error("Account number [{account_number}] must be non-empty and at most 20 characters")]
    InvalidAccountNumber {
        account_number: String
    },
    #[error("Initial balance [{balance}] for account [{account_number}] cannot be negative")]
    NegativeInitialBalance {
        account_number: String,
        balance: Monetary
    },
    #[error("Numeric overflow applying {operation} of [{amount}] to account [{account_number}]")]
    Overflow {
        account_number: String,
        operation: Operation,
        amount: Monetary
    }
}

impl AccountError {
    pub fn invalid_amount(operation: Operation, amount: Monetary) -> Self {
        Self::InvalidAmount { operation, amount }
    }

    pub fn insufficient_funds(account: &Account, amount: Monetary) -> Self {
        Self::InsufficientFunds {
            account_number: account.account_number().to_string(),
            balance: account.balance(),
            amount
        }
    }

    pub fn invalid_destination(account: &Account) -> Self {
        Self::InvalidDestination {
            account_number: account.account_number().to_string()
        }
    }

    pub fn invalid_account_number(account_number: &str) -> Self {
        Self::InvalidAccountNumber {
            account_number: account_number.to_string()
        }
    }

    pub fn negative_initial_balance(account_number: &str, balance: Monetary) -> Self {
        Self::NegativeInitialBalance {
            account_number: account_number.to_string(),
            balance
        }
    }

    pub fn overflow(account: &Account, operation: Operation, amount: Monetary) -> Self {
        Self::Overflow {
            account_number: account.account_number().to_string(),
            operation,
            amount
        }
    }
}
