use crate::models::errors::AccountError;
use crate::models::{Operation, MAX_ACCOUNT_NUMBER_LENGTH};
use crate::types::{AccountId, Monetary};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// A single bank account and its balance.
///
/// The balance can only change through [`Account::deposit`], [`Account::withdraw`]
/// and [`Account::transfer`], each of which validates before mutating so a
/// rejected operation never leaves a partial update behind.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Assigned by the store on first save.
    id: Option<AccountId>,
    /// User-facing number, unique across the store.
    account_number: String,
    /// Never negative.
    balance: Monetary,
    created_on: NaiveDate
}

impl Account {
    /// Creates an unsaved account dated today.
    ///
    /// # Errors
    /// Returns `AccountError` if:
    /// - The account number is blank or longer than 20 characters.
    /// - The initial balance is negative.
    pub fn new(account_number: &str, initial_balance: Monetary) -> Result<Self, AccountError> {
        let account_number = account_number.trim();

        if account_number.is_empty() || account_number.chars().count() > MAX_ACCOUNT_NUMBER_LENGTH {
            return Err(AccountError::invalid_account_number(account_number))
        }

        if initial_balance.is_negative() {
            return Err(AccountError::negative_initial_balance(account_number, initial_balance))
        }

        Ok(Self {
            id: None,
            account_number: account_number.to_string(),
            balance: initial_balance,
            created_on: Local::now().date_naive()
        })
    }

    pub fn id(&self) -> Option<AccountId> {
        self.id
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn balance(&self) -> Monetary {
        self.balance
    }

    pub fn created_on(&self) -> NaiveDate {
        self.created_on
    }

    /// Gives an unsaved account its persistent id. An id that is already set is kept.
    pub(crate) fn assign_id(&mut self, id: AccountId) {
        self.id.get_or_insert(id);
    }

    pub fn deposit(&mut self, amount: Monetary) -> Result<(), AccountError> {
        ensure_positive(Operation::Deposit, amount)?;
        self.credit(Operation::Deposit, amount)
    }

    pub fn withdraw(&mut self, amount: Monetary) -> Result<(), AccountError> {
        ensure_positive(Operation::Withdrawal, amount)?;
        self.debit(Operation::Withdrawal, amount)
    }

    /// Moves `amount` from this account into `destination`.
    ///
    /// The destination is only credited once the withdrawal succeeded. Should the
    /// credit fail anyway, the withdrawal is reverted before the error is returned,
    /// so both balances change together or not at all.
    ///
    /// # Errors
    /// Returns `AccountError` if:
    /// - There is no destination.
    /// - The amount is not positive.
    /// - This account holds less than `amount`.
    /// - The destination balance would overflow.
    pub fn transfer(&mut self, destination: Option<&mut Account>, amount: Monetary) -> Result<(), AccountError> {
        let Some(destination) = destination else {
            return Err(AccountError::invalid_destination(self))
        };

        ensure_positive(Operation::Transfer, amount)?;

        let previous_balance = self.balance;
        self.debit(Operation::Transfer, amount)?;

        if let Err(error) = destination.credit(Operation::Transfer, amount) {
            self.balance = previous_balance;
            return Err(error)
        }

        Ok(())
    }

    /// Validates a transfer whose source and destination are this same account.
    ///
    /// The checks are those of [`Account::transfer`]; the balance ends where it started.
    pub fn transfer_to_self(&mut self, amount: Monetary) -> Result<(), AccountError> {
        ensure_positive(Operation::Transfer, amount)?;

        if amount > self.balance {
            return Err(AccountError::insufficient_funds(self, amount))
        }

        Ok(())
    }

    fn credit(&mut self, operation: Operation, amount: Monetary) -> Result<(), AccountError> {
        let balance = self.balance.checked_add(amount)
            .ok_or_else(|| AccountError::overflow(self, operation, amount))?;

        self.balance = balance;

        Ok(())
    }

    fn debit(&mut self, operation: Operation, amount: Monetary) -> Result<(), AccountError> {
        if amount > self.balance {
            return Err(AccountError::insufficient_funds(self, amount))
        }

        let balance = self.balance.checked_sub(amount)
            .ok_or_else(|| AccountError::overflow(self, operation, amount))?;

        self.balance = balance;

        Ok(())
    }
}

fn ensure_positive(operation: Operation, amount: Monetary) -> Result<(), AccountError> {
    if !amount.is_positive() {
        return Err(AccountError::invalid_amount(operation, amount))
    }

    Ok(())
}

// Identity is the persistent id; unsaved accounts are equal to nothing.
impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(left), Some(right)) if left == right)
    }
}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
