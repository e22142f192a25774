mod account;
mod errors;
#[cfg(test)]
mod tests;

use std::fmt;
use std::fmt::{Display, Formatter};

pub use account::Account;
pub use errors::AccountError;

/// Longest account number the store accepts.
pub const MAX_ACCOUNT_NUMBER_LENGTH: usize = 20;

/// Balance-changing operations an account can reject.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Operation {
    Deposit,
    Withdrawal,
    Transfer
}

impl Display for Operation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Deposit => "deposit",
            Operation::Withdrawal => "withdrawal",
            Operation::Transfer => "transfer"
        };

        formatter.write_str(name)
    }
}
