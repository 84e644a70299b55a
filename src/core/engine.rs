//! Transfer resolution engine
//!
//! This module provides the [`TransferEngine`], the only component with
//! multi-step, multi-account invariants. It resolves a classified
//! [`TransferIntent`] against the [`AccountStore`]: existence checks, funds
//! checks, pure account transforms, and the commit, all inside the store's
//! per-account critical sections.
//!
//! The engine also exposes the operation surface an adapter layer consumes
//! (create, lookup, list, deposit, withdraw, transfer). Those wrappers build
//! the intent, so a request that fits no valid shape is rejected before any
//! store access happens.

use crate::core::account_store::AccountStore;
use crate::types::{Account, LedgerError, TransferIntent, TransferResult};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Resolves balance-changing operations against a shared store
///
/// The store is injected at construction; the engine holds no other state
/// and is safe to share across threads.
#[derive(Debug)]
pub struct TransferEngine {
    store: Arc<AccountStore>,
}

impl TransferEngine {
    /// Create an engine over an explicitly constructed store
    pub fn new(store: Arc<AccountStore>) -> Self {
        TransferEngine { store }
    }

    /// Resolve a classified intent
    ///
    /// Deposits credit the destination, withdrawals debit the source, and
    /// two-party transfers do both atomically. Domain failures come back as
    /// typed errors; the accounts involved are left untouched on any
    /// failure.
    pub fn execute(&self, intent: TransferIntent) -> Result<TransferResult, LedgerError> {
        let operation = intent.operation();

        let result = match intent {
            TransferIntent::Deposit {
                destination,
                amount,
            } => self
                .resolve_deposit(&destination, amount)
                .map(|account| TransferResult {
                    source: None,
                    destination: Some(account),
                }),
            TransferIntent::Withdrawal { source, amount } => self
                .resolve_withdrawal(&source, amount)
                .map(|account| TransferResult {
                    source: Some(account),
                    destination: None,
                }),
            TransferIntent::Transfer {
                source,
                destination,
                amount,
            } => self.resolve_transfer(&source, &destination, amount).map(
                |(source, destination)| TransferResult {
                    source: Some(source),
                    destination: Some(destination),
                },
            ),
        };

        match &result {
            Ok(_) => debug!(operation, "operation applied"),
            Err(error) => debug!(operation, %error, "operation rejected"),
        }

        result
    }

    /// Create an account with a freshly generated id
    ///
    /// # Errors
    ///
    /// Returns `InvalidAccount` for an empty holder or negative initial
    /// balance.
    pub fn create_account(
        &self,
        holder: &str,
        initial_balance: Decimal,
    ) -> Result<Account, LedgerError> {
        let account_id = self.store.next_id();
        let account = Account::new(account_id, holder, initial_balance)?;
        let stored = self.store.put(account);
        debug!(account_id = stored.id(), "account created");
        Ok(stored)
    }

    /// Snapshot of the account stored under `account_id`
    pub fn account(&self, account_id: &str) -> Option<Account> {
        self.store.get(account_id)
    }

    /// Current balance of `account_id`, if the account exists
    pub fn balance(&self, account_id: &str) -> Option<Decimal> {
        self.store.get(account_id).map(|account| account.balance())
    }

    /// Defensive snapshot of all accounts, keyed by id
    pub fn accounts(&self) -> HashMap<String, Account> {
        self.store.list()
    }

    /// Credit `amount` to `account_id`, returning the updated account
    pub fn deposit(&self, account_id: &str, amount: Decimal) -> Result<Account, LedgerError> {
        let intent = TransferIntent::new(None, Some(account_id), amount)?;
        let result = self.execute(intent)?;
        result.destination.ok_or_else(|| {
            LedgerError::repository_error(
                "deposit",
                "Account",
                account_id,
                "resolved deposit carried no destination account",
            )
        })
    }

    /// Debit `amount` from `account_id`, returning the updated account
    ///
    /// A blank account id is rejected with `InvalidTransaction` before the
    /// request reaches the engine proper.
    pub fn withdraw(&self, account_id: &str, amount: Decimal) -> Result<Account, LedgerError> {
        if account_id.trim().is_empty() {
            return Err(LedgerError::invalid_transaction(
                "withdrawal",
                "account ID cannot be blank",
            ));
        }

        let intent = TransferIntent::new(Some(account_id), None, amount)?;
        let result = self.execute(intent)?;
        result.source.ok_or_else(|| {
            LedgerError::repository_error(
                "withdrawal",
                "Account",
                account_id,
                "resolved withdrawal carried no source account",
            )
        })
    }

    /// Resolve a raw transfer-shaped request
    ///
    /// At least one endpoint must be present; if both are, they must differ.
    pub fn transfer(
        &self,
        source_id: Option<&str>,
        destination_id: Option<&str>,
        amount: Decimal,
    ) -> Result<TransferResult, LedgerError> {
        let intent = TransferIntent::new(source_id, destination_id, amount)?;
        self.execute(intent)
    }

    fn resolve_deposit(
        &self,
        destination_id: &str,
        amount: Decimal,
    ) -> Result<Account, LedgerError> {
        self.store
            .update("deposit", destination_id, |account| account.deposit(amount))
    }

    fn resolve_withdrawal(&self, source_id: &str, amount: Decimal) -> Result<Account, LedgerError> {
        self.store.update("withdrawal", source_id, |account| {
            if !account.has_sufficient_funds(amount) {
                return Err(LedgerError::insufficient_funds(
                    account.id(),
                    amount,
                    account.balance(),
                ));
            }
            account.withdraw(amount)
        })
    }

    fn resolve_transfer(
        &self,
        source_id: &str,
        destination_id: &str,
        amount: Decimal,
    ) -> Result<(Account, Account), LedgerError> {
        self.store
            .update_pair("transfer", source_id, destination_id, |source, destination| {
                if !source.has_sufficient_funds(amount) {
                    return Err(LedgerError::insufficient_funds(
                        source.id(),
                        amount,
                        source.balance(),
                    ));
                }

                let updated_source = source.withdraw(amount)?;
                let updated_destination = destination.deposit(amount)?;

                // Money moved between the pair, never created or destroyed
                debug_assert_eq!(
                    updated_source.balance() + updated_destination.balance(),
                    source.balance() + destination.balance()
                );

                Ok((updated_source, updated_destination))
            })
    }
}
