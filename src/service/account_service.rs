use crate::models::Account;
use crate::service::{AccountRole, ServiceError};
use crate::storage::{Storage, TransactionManager};
use crate::types::{AccountId, Monetary};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Both sides of a completed transfer, as persisted.
#[derive(Debug, Clone, Serialize)]
pub struct TransferOutcome {
    pub source: Account,
    pub destination: Account
}

/// Account operations, each mutating one running in a single store transaction.
///
/// A failed operation rolls its transaction back, so a rejected transfer never
/// persists one side without the other.
pub struct AccountService<S: TransactionManager> {
    storage: Arc<S>
}

impl<S: TransactionManager> Clone for AccountService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone()
        }
    }
}

impl<S: TransactionManager> AccountService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Opens and persists a new account.
    ///
    /// # Errors
    /// Returns `ServiceError` if:
    /// - Another account already holds `account_number`.
    /// - The number or initial balance fails account validation.
    pub fn create_account(&self, account_number: &str, initial_balance: Monetary) -> Result<Account, ServiceError> {
        self.storage.in_transaction(|transaction| -> Result<Account, ServiceError> {
            if transaction.find_by_number(account_number.trim())?.is_some() {
                return Err(ServiceError::duplicate_account(account_number.trim()))
            }

            let account = Account::new(account_number, initial_balance)?;

            Ok(transaction.save(account)?)
        })
        .inspect(|account| debug!(id = account.id(), account_number = account.account_number(), "Account created with balance [{}]", account.balance()))
        .inspect_err(|error| warn!("Account creation rejected: {error}"))
    }

    pub fn deposit(&self, id: AccountId, amount: Monetary) -> Result<Account, ServiceError> {
        self.storage.in_transaction(|transaction| -> Result<Account, ServiceError> {
            let mut account = load(transaction, id, AccountRole::Account)?;
            account.deposit(amount)?;

            Ok(transaction.save(account)?)
        })
        .inspect(|account| debug!(id, account_number = account.account_number(), "Deposited [{amount}], balance [{}]", account.balance()))
        .inspect_err(|error| warn!(id, "Deposit rejected: {error}"))
    }

    pub fn withdraw(&self, id: AccountId, amount: Monetary) -> Result<Account, ServiceError> {
        self.storage.in_transaction(|transaction| -> Result<Account, ServiceError> {
            let mut account = load(transaction, id, AccountRole::Account)?;
            account.withdraw(amount)?;

            Ok(transaction.save(account)?)
        })
        .inspect(|account| debug!(id, account_number = account.account_number(), "Withdrew [{amount}], balance [{}]", account.balance()))
        .inspect_err(|error| warn!(id, "Withdrawal rejected: {error}"))
    }

    /// Moves `amount` between two stored accounts and persists both in one transaction.
    ///
    /// Transferring to the same account validates the transfer and leaves the
    /// balance where it was.
    ///
    /// # Errors
    /// Returns `ServiceError` if:
    /// - Either id does not resolve (the error names which side).
    /// - The amount is not positive or exceeds the source balance.
    pub fn transfer(&self, source_id: AccountId, destination_id: AccountId, amount: Monetary) -> Result<TransferOutcome, ServiceError> {
        self.storage.in_transaction(|transaction| -> Result<TransferOutcome, ServiceError> {
            let mut source = load(transaction, source_id, AccountRole::Source)?;

            if source_id == destination_id {
                source.transfer_to_self(amount)?;
                let account = transaction.save(source)?;

                return Ok(TransferOutcome { source: account.clone(), destination: account })
            }

            let mut destination = load(transaction, destination_id, AccountRole::Destination)?;
            source.transfer(Some(&mut destination), amount)?;

            Ok(TransferOutcome {
                source: transaction.save(source)?,
                destination: transaction.save(destination)?
            })
        })
        .inspect(|_| debug!(source_id, destination_id, "Transferred [{amount}]"))
        .inspect_err(|error| warn!(source_id, destination_id, "Transfer rejected: {error}"))
    }

    pub fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, ServiceError> {
        Ok(self.storage.find_by_id(id)?)
    }

    pub fn find_by_number(&self, account_number: &str) -> Result<Option<Account>, ServiceError> {
        Ok(self.storage.find_by_number(account_number)?)
    }

    pub fn list_all(&self) -> Result<Vec<Account>, ServiceError> {
        Ok(self.storage.find_all()?)
    }

    /// Removes an account, returning it as it was last persisted.
    pub fn delete(&self, id: AccountId) -> Result<Account, ServiceError> {
        self.storage.in_transaction(|transaction| -> Result<Account, ServiceError> {
            transaction.delete_by_id(id)?
                .ok_or_else(|| ServiceError::account_not_found(id, AccountRole::Account))
        })
        .inspect(|account| debug!(id, account_number = account.account_number(), "Account deleted"))
        .inspect_err(|error| warn!(id, "Deletion rejected: {error}"))
    }
}

fn load(transaction: &dyn Storage, id: AccountId, role: AccountRole) -> Result<Account, ServiceError> {
    transaction.find_by_id(id)?
        .ok_or_else(|| ServiceError::account_not_found(id, role))
}
