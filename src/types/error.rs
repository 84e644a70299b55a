//! Error types for the bank ledger
//!
//! This module defines all failures that can occur while constructing ledger
//! values or resolving balance-changing operations.
//!
//! # Error Categories
//!
//! - **Construction errors**: empty ids/holders, negative balances,
//!   non-positive amounts
//! - **Transaction errors**: malformed transfer intents, missing accounts,
//!   insufficient funds
//! - **Store errors**: unexpected failures while reading or writing the
//!   account store, including bounded lock waits that time out

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bank ledger
///
/// Domain failures are surfaced directly to the caller as typed variants;
/// only genuinely unexpected store failures are wrapped in `RepositoryError`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Account construction violated an invariant
    ///
    /// Raised by the `Account` constructors for empty ids, empty holders,
    /// or negative balances. Never stored.
    #[error("Invalid account: {reason}")]
    InvalidAccount {
        /// Which invariant was violated
        reason: String,
    },

    /// A balance-changing amount was zero or negative
    ///
    /// Raised at request construction and again by the account transforms.
    #[error("{operation} amount must be positive, got {amount}")]
    InvalidAmount {
        /// The operation that rejected the amount
        operation: String,
        /// The offending amount
        amount: Decimal,
    },

    /// A transfer intent was malformed
    ///
    /// Both endpoints empty, source equal to destination, or a blank
    /// account id where one is required.
    #[error("Invalid {operation} transaction: {details}")]
    InvalidTransaction {
        /// The operation being attempted
        operation: String,
        /// What was wrong with the request
        details: String,
    },

    /// A referenced account was absent from the store at lookup time
    #[error("Account not found with ID: {account_id}")]
    AccountNotFound {
        /// The id that was looked up
        account_id: String,
    },

    /// A funds check failed
    ///
    /// Carries the requested amount and the available balance so the caller
    /// can compute the shortfall.
    #[error(
        "Insufficient funds for account {account_id}: available {available}, requested {requested}"
    )]
    InsufficientFunds {
        /// The debited account
        account_id: String,
        /// Requested debit amount
        requested: Decimal,
        /// Balance available at check time
        available: Decimal,
    },

    /// Checked decimal arithmetic overflowed
    ///
    /// The operation is rejected and the account state left unchanged.
    #[error("Arithmetic overflow in {operation} for account {account_id}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// The account involved
        account_id: String,
    },

    /// Unexpected failure during a store interaction
    ///
    /// Preserves the logical operation, the entity, and the id(s) involved
    /// (joined with `->` for two-account operations) without leaking internal
    /// failure detail to the boundary.
    #[error("Repository error during {operation} operation for {entity_type} with ID {entity_id}: {cause}")]
    RepositoryError {
        /// Logical operation: "deposit", "withdrawal", or "transfer"
        operation: String,
        /// Entity kind involved, e.g. "Account"
        entity_type: String,
        /// Entity id(s) involved
        entity_id: String,
        /// Description of the underlying failure
        cause: String,
    },
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidAccount error
    pub fn invalid_account(reason: &str) -> Self {
        LedgerError::InvalidAccount {
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(operation: &str, amount: Decimal) -> Self {
        LedgerError::InvalidAmount {
            operation: operation.to_string(),
            amount,
        }
    }

    /// Create an InvalidTransaction error
    pub fn invalid_transaction(operation: &str, details: &str) -> Self {
        LedgerError::InvalidTransaction {
            operation: operation.to_string(),
            details: details.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account_id: &str) -> Self {
        LedgerError::AccountNotFound {
            account_id: account_id.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account_id: &str, requested: Decimal, available: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account_id: account_id.to_string(),
            requested,
            available,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account_id: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account_id: account_id.to_string(),
        }
    }

    /// Create a RepositoryError
    pub fn repository_error(
        operation: &str,
        entity_type: &str,
        entity_id: &str,
        cause: &str,
    ) -> Self {
        LedgerError::RepositoryError {
            operation: operation.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            cause: cause.to_string(),
        }
    }

    /// Shortfall for an InsufficientFunds failure, `None` for other variants
    pub fn shortfall(&self) -> Option<Decimal> {
        match self {
            LedgerError::InsufficientFunds {
                requested,
                available,
                ..
            } => Some(requested - available),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::invalid_account(
        LedgerError::invalid_account("account ID cannot be empty"),
        "Invalid account: account ID cannot be empty"
    )]
    #[case::invalid_amount(
        LedgerError::invalid_amount("deposit", Decimal::new(-500, 2)),
        "deposit amount must be positive, got -5.00"
    )]
    #[case::invalid_transaction(
        LedgerError::invalid_transaction("transfer", "at least one account ID must be specified"),
        "Invalid transfer transaction: at least one account ID must be specified"
    )]
    #[case::account_not_found(
        LedgerError::account_not_found("ACC042"),
        "Account not found with ID: ACC042"
    )]
    #[case::insufficient_funds(
        LedgerError::insufficient_funds("ACC001", Decimal::new(80000, 2), Decimal::new(65000, 2)),
        "Insufficient funds for account ACC001: available 650.00, requested 800.00"
    )]
    #[case::arithmetic_overflow(
        LedgerError::arithmetic_overflow("deposit", "ACC001"),
        "Arithmetic overflow in deposit for account ACC001"
    )]
    #[case::repository_error(
        LedgerError::repository_error("transfer", "Account", "ACC001->ACC002", "lock wait timed out"),
        "Repository error during transfer operation for Account with ID ACC001->ACC002: lock wait timed out"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::account_not_found(
        LedgerError::account_not_found("ACC042"),
        LedgerError::AccountNotFound { account_id: "ACC042".to_string() }
    )]
    #[case::insufficient_funds(
        LedgerError::insufficient_funds("ACC001", Decimal::ONE, Decimal::ZERO),
        LedgerError::InsufficientFunds {
            account_id: "ACC001".to_string(),
            requested: Decimal::ONE,
            available: Decimal::ZERO,
        }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_shortfall_for_insufficient_funds() {
        let error = LedgerError::insufficient_funds(
            "ACC001",
            Decimal::new(80000, 2),
            Decimal::new(65000, 2),
        );
        assert_eq!(error.shortfall(), Some(Decimal::new(15000, 2)));
    }

    #[test]
    fn test_shortfall_absent_for_other_variants() {
        assert_eq!(LedgerError::account_not_found("ACC001").shortfall(), None);
    }
}
