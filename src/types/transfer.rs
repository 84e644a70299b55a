//! Transfer intent and result types
//!
//! A transfer-shaped request (optional source, optional destination, positive
//! amount) is classified exactly once, at construction, into a
//! [`TransferIntent`]: a deposit, a withdrawal, or a two-party transfer. The
//! engine then resolves a closed enum instead of re-deriving the shape from
//! optional strings. Requests that fit no shape (both endpoints empty,
//! self-transfer, non-positive amount) never produce an intent at all.

use crate::types::{Account, LedgerError};
use rust_decimal::Decimal;
use serde::Serialize;

/// A classified balance-changing request
///
/// Ephemeral: built at the boundary, consumed by the engine, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferIntent {
    /// Credit the destination account
    Deposit {
        /// Account to credit
        destination: String,
        /// Amount, always > 0
        amount: Decimal,
    },

    /// Debit the source account
    Withdrawal {
        /// Account to debit
        source: String,
        /// Amount, always > 0
        amount: Decimal,
    },

    /// Debit the source and credit the destination
    Transfer {
        /// Account to debit
        source: String,
        /// Account to credit, always distinct from `source`
        destination: String,
        /// Amount, always > 0
        amount: Decimal,
    },
}

impl TransferIntent {
    /// Classify a raw request into an intent
    ///
    /// Blank and whitespace-only ids are treated as absent, matching the
    /// wire format where an omitted endpoint arrives as an empty string.
    ///
    /// # Errors
    ///
    /// * `InvalidTransaction` - both endpoints absent, or source equals
    ///   destination
    /// * `InvalidAmount` - amount is zero or negative
    pub fn new(
        source: Option<&str>,
        destination: Option<&str>,
        amount: Decimal,
    ) -> Result<Self, LedgerError> {
        let source = source.map(str::trim).filter(|id| !id.is_empty());
        let destination = destination.map(str::trim).filter(|id| !id.is_empty());

        let positive = |operation: &str| {
            if amount <= Decimal::ZERO {
                Err(LedgerError::invalid_amount(operation, amount))
            } else {
                Ok(amount)
            }
        };

        match (source, destination) {
            (None, None) => Err(LedgerError::invalid_transaction(
                "transfer",
                "at least one account ID must be specified",
            )),
            (None, Some(destination)) => Ok(TransferIntent::Deposit {
                destination: destination.to_string(),
                amount: positive("deposit")?,
            }),
            (Some(source), None) => Ok(TransferIntent::Withdrawal {
                source: source.to_string(),
                amount: positive("withdrawal")?,
            }),
            (Some(source), Some(destination)) => {
                if source == destination {
                    return Err(LedgerError::invalid_transaction(
                        "transfer",
                        "cannot transfer to the same account",
                    ));
                }
                Ok(TransferIntent::Transfer {
                    source: source.to_string(),
                    destination: destination.to_string(),
                    amount: positive("transfer")?,
                })
            }
        }
    }

    /// The logical operation name: "deposit", "withdrawal", or "transfer"
    pub fn operation(&self) -> &'static str {
        match self {
            TransferIntent::Deposit { .. } => "deposit",
            TransferIntent::Withdrawal { .. } => "withdrawal",
            TransferIntent::Transfer { .. } => "transfer",
        }
    }

    /// The requested amount
    pub fn amount(&self) -> Decimal {
        match self {
            TransferIntent::Deposit { amount, .. }
            | TransferIntent::Withdrawal { amount, .. }
            | TransferIntent::Transfer { amount, .. } => *amount,
        }
    }
}

/// Outcome of a resolved intent
///
/// A deposit fills only `destination`, a withdrawal only `source`, a
/// two-party transfer both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferResult {
    /// Updated source account, if the operation debited one
    pub source: Option<Account>,

    /// Updated destination account, if the operation credited one
    pub destination: Option<Account>,
}
