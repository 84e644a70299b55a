//! Thread-safe keyed account storage
//!
//! This module provides the [`AccountStore`], the single owner of mutable
//! ledger state. It maps account id to the current [`Account`] value and is
//! safe under true parallel access from multiple operating-system threads.
//!
//! # Design
//!
//! The store uses `DashMap` (a concurrent HashMap) for the account map, so
//! point reads and writes to different accounts never block each other. A
//! concurrent map alone cannot make a read-check-write sequence atomic,
//! though: two concurrent withdrawals could both pass a funds check against
//! the same stale balance and both commit. The store therefore keeps a
//! registry of per-account-id mutexes and runs every balance-changing
//! sequence inside [`AccountStore::update`] or [`AccountStore::update_pair`],
//! which hold the lock(s) across the full read-check-write span.
//!
//! Two-account updates acquire both locks in lexicographic id order, so two
//! transfers moving money in opposite directions between the same pair of
//! accounts cannot deadlock. Lock waits are bounded; a timed-out wait is
//! surfaced as `RepositoryError` instead of blocking indefinitely.
//!
//! # Identifier generation
//!
//! Generated ids are a fixed prefix plus a zero-padded sequential suffix
//! (`ACC001`, `ACC002`, ...). The suffix comes from a monotonic counter that
//! is independent of the current map size and is never reset, so an id can
//! never be reissued within the process lifetime even after deletions.

use crate::types::{Account, LedgerError};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Prefix for generated account identifiers
const ID_PREFIX: &str = "ACC";

/// Upper bound on the time spent waiting for a per-account lock
const LOCK_WAIT: Duration = Duration::from_secs(5);

/// Authoritative, concurrency-safe account storage
///
/// The store is the single writer of truth; callers only ever hold value
/// snapshots once read.
#[derive(Debug, Default)]
pub struct AccountStore {
    /// Current account value per id
    accounts: DashMap<String, Account>,

    /// Per-account-id critical-section locks
    ///
    /// Entries are never removed: a handle cloned out of the registry must
    /// stay the one lock for its id for the life of the process.
    locks: DashMap<String, Arc<Mutex<()>>>,

    /// Monotonic suffix source for generated ids, incremented once per
    /// issuance and independent of the current map size
    id_counter: AtomicU64,
}

impl AccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the account stored under `account_id`
    pub fn get(&self, account_id: &str) -> Option<Account> {
        self.accounts
            .get(account_id)
            .map(|entry| entry.value().clone())
    }

    /// Upsert `account` under its own id, returning the stored value
    pub fn put(&self, account: Account) -> Account {
        self.accounts
            .insert(account.id().to_string(), account.clone());
        account
    }

    /// Remove the account stored under `account_id`; no-op when absent
    pub fn remove(&self, account_id: &str) {
        self.accounts.remove(account_id);
    }

    /// Whether an account is stored under `account_id`
    pub fn exists(&self, account_id: &str) -> bool {
        self.accounts.contains_key(account_id)
    }

    /// Defensive snapshot of all accounts, keyed by id
    ///
    /// The returned map is decoupled from the store: mutating it never
    /// affects internal state, and later writes never appear in it.
    pub fn list(&self) -> HashMap<String, Account> {
        self.accounts
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Number of stored accounts
    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Issue the next generated account identifier
    ///
    /// Suffixes are 1-based and zero-padded to three digits; the padding
    /// widens past 999 without colliding.
    pub fn next_id(&self) -> String {
        // Only atomicity of the increment matters, not ordering with
        // surrounding memory operations.
        let suffix = self.id_counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}{:03}", ID_PREFIX, suffix)
    }

    /// Remove all accounts
    ///
    /// The id counter is deliberately left alone: ids issued before a clear
    /// stay unique for the life of the process.
    pub fn clear(&self) {
        self.accounts.clear();
    }

    /// Run a read-check-write sequence on one account as a critical section
    ///
    /// Holds the per-id lock across the lookup, the transform `f`, and the
    /// commit of the value `f` returns. Errors from `f` pass through
    /// unwrapped and leave the stored value untouched.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - no account is stored under `account_id`
    /// * `RepositoryError` - the lock wait timed out
    /// * Whatever typed failure `f` returns
    pub fn update<F>(&self, operation: &str, account_id: &str, f: F) -> Result<Account, LedgerError>
    where
        F: FnOnce(&Account) -> Result<Account, LedgerError>,
    {
        let lock = self.lock_handle(account_id);
        let _guard = lock.try_lock_for(LOCK_WAIT).ok_or_else(|| {
            LedgerError::repository_error(operation, "Account", account_id, "lock wait timed out")
        })?;

        let current = self
            .get(account_id)
            .ok_or_else(|| LedgerError::account_not_found(account_id))?;
        let updated = f(&current)?;

        Ok(self.put(updated))
    }

    /// Run a read-check-write sequence on two accounts as one critical section
    ///
    /// Both per-id locks are held simultaneously for the whole span, acquired
    /// in lexicographic id order so opposing transfers between the same pair
    /// cannot deadlock. Lookup order is source first, then destination, so a
    /// request where both are missing reports the source. `f` receives both
    /// snapshots and returns both updated values, which are committed
    /// together before the locks are released.
    ///
    /// # Errors
    ///
    /// * `InvalidTransaction` - the two ids are equal (the second lock
    ///   acquisition would self-deadlock)
    /// * `AccountNotFound` - either account is absent
    /// * `RepositoryError` - a lock wait timed out
    /// * Whatever typed failure `f` returns
    pub fn update_pair<F>(
        &self,
        operation: &str,
        source_id: &str,
        destination_id: &str,
        f: F,
    ) -> Result<(Account, Account), LedgerError>
    where
        F: FnOnce(&Account, &Account) -> Result<(Account, Account), LedgerError>,
    {
        if source_id == destination_id {
            return Err(LedgerError::invalid_transaction(
                operation,
                "source and destination accounts must differ",
            ));
        }

        let source_lock = self.lock_handle(source_id);
        let destination_lock = self.lock_handle(destination_id);
        let (first, second) = if source_id < destination_id {
            (&source_lock, &destination_lock)
        } else {
            (&destination_lock, &source_lock)
        };

        let pair_id = format!("{}->{}", source_id, destination_id);
        let _first_guard = first.try_lock_for(LOCK_WAIT).ok_or_else(|| {
            LedgerError::repository_error(operation, "Account", &pair_id, "lock wait timed out")
        })?;
        let _second_guard = second.try_lock_for(LOCK_WAIT).ok_or_else(|| {
            LedgerError::repository_error(operation, "Account", &pair_id, "lock wait timed out")
        })?;

        let source = self
            .get(source_id)
            .ok_or_else(|| LedgerError::account_not_found(source_id))?;
        let destination = self
            .get(destination_id)
            .ok_or_else(|| LedgerError::account_not_found(destination_id))?;

        let (updated_source, updated_destination) = f(&source, &destination)?;

        Ok((self.put(updated_source), self.put(updated_destination)))
    }

    /// The per-id lock for `account_id`, created on first use
    ///
    /// The registry entry's own shard lock is released as soon as the handle
    /// is cloned out; callers block on the handle, never on the registry.
    fn lock_handle(&self, account_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(account_id.to_string())
            .or_default()
            .clone()
    }
}
