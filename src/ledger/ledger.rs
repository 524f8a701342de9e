use std::collections::BTreeMap;

use super::{account::Account, transaction::LedgerEntry};
use crate::errors::{ProjectionError, Result};

/// Registry of every account taking part in a projection, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountRegistry {
    accounts: BTreeMap<String, Account>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, account: Account) -> Result<()> {
        if self.accounts.contains_key(&account.account_id) {
            return Err(ProjectionError::DuplicateAccount(account.account_id));
        }
        self.accounts.insert(account.account_id.clone(), account);
        Ok(())
    }

    pub fn get(&self, account_id: &str) -> Result<&Account> {
        self.accounts
            .get(account_id)
            .ok_or_else(|| ProjectionError::UnknownAccount(account_id.to_string()))
    }

    /// Accounts in id order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Appends every entry to its owning account.
    ///
    /// All account ids are resolved before anything is appended: a single
    /// unknown id fails the call and leaves the registry untouched.
    pub fn route(&mut self, entries: impl IntoIterator<Item = LedgerEntry>) -> Result<()> {
        let mut batches: BTreeMap<String, Vec<LedgerEntry>> = BTreeMap::new();
        for entry in entries {
            if !self.accounts.contains_key(&entry.account_id) {
                return Err(ProjectionError::UnknownAccount(entry.account_id));
            }
            batches.entry(entry.account_id.clone()).or_default().push(entry);
        }
        for (account_id, batch) in batches {
            let account = self
                .accounts
                .get_mut(&account_id)
                .ok_or_else(|| ProjectionError::UnknownAccount(account_id.clone()))?;
            account.add_entries(batch)?;
        }
        Ok(())
    }
}
