use crate::models::Account;
use crate::storage::{Storage, StorageError, TransactionManager};
use crate::types::AccountId;
use dashmap::DashMap;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// In-memory account store with serializable transactions.
///
/// Transactions hold the write side of `gate` from start to commit, and plain
/// reads take the read side, so nobody observes a half-applied transfer.
pub struct AccountStorage {
    accounts: DashMap<AccountId, Account>,
    numbers: DashMap<String, AccountId>,
    sequence: AtomicU64,
    gate: RwLock<()>
}

impl AccountStorage {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            numbers: DashMap::new(),
            sequence: AtomicU64::new(1),
            gate: RwLock::new(())
        }
    }

    pub fn len(&self) -> usize {
        let _guard = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn committed_by_id(&self, id: AccountId) -> Option<Account> {
        self.accounts.get(&id).map(|entry| entry.value().clone())
    }

    fn committed_id_for(&self, account_number: &str) -> Option<AccountId> {
        self.numbers.get(account_number).map(|entry| *entry.value())
    }

    fn committed_all(&self) -> BTreeMap<AccountId, Account> {
        self.accounts.iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    fn next_id(&self) -> AccountId {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for AccountStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for AccountStorage {
    fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError> {
        let _guard = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        Ok(self.committed_by_id(id))
    }

    fn find_by_number(&self, account_number: &str) -> Result<Option<Account>, StorageError> {
        let _guard = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        Ok(self.committed_id_for(account_number).and_then(|id| self.committed_by_id(id)))
    }

    fn find_all(&self) -> Result<Vec<Account>, StorageError> {
        let _guard = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        Ok(self.committed_all().into_values().collect())
    }

    fn save(&self, account: Account) -> Result<Account, StorageError> {
        self.in_transaction(|transaction| transaction.save(account))
    }

    fn delete_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError> {
        self.in_transaction(|transaction| transaction.delete_by_id(id))
    }
}

impl TransactionManager for AccountStorage {
    fn in_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn Storage) -> Result<T, E>
    {
        let _guard = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        let transaction = StagedTransaction::new(self);

        match work(&transaction) {
            Ok(result) => {
                transaction.commit();
                Ok(result)
            }
            Err(error) => {
                debug!("Transaction rolled back, discarding {} staged writes", transaction.pending.borrow().len());
                Err(error)
            }
        }
    }
}

/// Writes staged by one transaction; `None` marks a deletion.
struct StagedTransaction<'a> {
    storage: &'a AccountStorage,
    pending: RefCell<BTreeMap<AccountId, Option<Account>>>
}

impl<'a> StagedTransaction<'a> {
    fn new(storage: &'a AccountStorage) -> Self {
        Self {
            storage,
            pending: RefCell::new(BTreeMap::new())
        }
    }

    fn commit(self) {
        let pending = self.pending.into_inner();
        let writes = pending.len();

        for (id, entry) in pending {
            match entry {
                Some(account) => {
                    self.storage.numbers.insert(account.account_number().to_string(), id);
                    self.storage.accounts.insert(id, account);
                }
                None => {
                    if let Some((_, account)) = self.storage.accounts.remove(&id) {
                        self.storage.numbers.remove(account.account_number());
                    }
                }
            }
        }

        debug!("Transaction committed {writes} writes");
    }

    fn id_for(&self, account_number: &str) -> Option<AccountId> {
        let pending = self.pending.borrow();

        let staged = pending.iter().find_map(|(id, entry)| {
            entry.as_ref()
                .filter(|account| account.account_number() == account_number)
                .map(|_| *id)
        });

        staged.or_else(|| {
            self.storage.committed_id_for(account_number)
                .filter(|id| !pending.contains_key(id))
        })
    }
}

impl Storage for StagedTransaction<'_> {
    fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError> {
        if let Some(entry) = self.pending.borrow().get(&id) {
            return Ok(entry.clone())
        }

        Ok(self.storage.committed_by_id(id))
    }

    fn find_by_number(&self, account_number: &str) -> Result<Option<Account>, StorageError> {
        match self.id_for(account_number) {
            Some(id) => self.find_by_id(id),
            None => Ok(None)
        }
    }

    fn find_all(&self) -> Result<Vec<Account>, StorageError> {
        let mut accounts = self.storage.committed_all();

        for (id, entry) in self.pending.borrow().iter() {
            match entry {
                Some(account) => accounts.insert(*id, account.clone()),
                None => accounts.remove(id)
            };
        }

        Ok(accounts.into_values().collect())
    }

    fn save(&self, mut account: Account) -> Result<Account, StorageError> {
        if let Some(existing_id) = self.id_for(account.account_number()) {
            if account.id() != Some(existing_id) {
                return Err(StorageError::DuplicateAccountNumber {
                    account_number: account.account_number().to_string(),
                    existing_id
                })
            }
        }

        let id = match account.id() {
            Some(id) if self.find_by_id(id)?.is_none() => return Err(StorageError::UnknownAccount { id }),
            Some(id) => id,
            None => {
                let id = self.storage.next_id();
                account.assign_id(id);
                id
            }
        };

        self.pending.borrow_mut().insert(id, Some(account.clone()));

        Ok(account)
    }

    fn delete_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError> {
        let existing = self.find_by_id(id)?;

        if existing.is_some() {
            self.pending.borrow_mut().insert(id, None);
        }

        Ok(existing)
    }
}
