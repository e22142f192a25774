mod account_storage;
mod errors;

use crate::models::Account;
use crate::types::AccountId;

pub use account_storage::AccountStorage;
pub use errors::StorageError;

/// Lookup-and-save access to persisted accounts.
pub trait Storage {
    fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError>;
    fn find_by_number(&self, account_number: &str) -> Result<Option<Account>, StorageError>;
    /// All accounts ordered by id.
    fn find_all(&self) -> Result<Vec<Account>, StorageError>;
    /// Inserts an unsaved account under a new id, or replaces the stored account with the same id.
    ///
    /// An account carrying an id the store does not hold (never issued or already deleted) is
    /// rejected with `UnknownAccount` rather than reinserted.
    fn save(&self, account: Account) -> Result<Account, StorageError>;
    /// Removes an account, returning it if it existed.
    fn delete_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError>;
}

/// Runs a unit of work atomically against a store.
///
/// Writes made through the `&dyn Storage` handed to `work` become visible to
/// other callers only if `work` returns `Ok`; an `Err` discards all of them.
pub trait TransactionManager: Storage + Send + Sync + 'static {
    fn in_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn Storage) -> Result<T, E>;
}
