//! Account value type
//!
//! An [`Account`] is one ledger entry: a unique id, the holder's name, and a
//! non-negative balance. Values are immutable; the balance-changing methods
//! are pure transforms that validate their input and return a new value,
//! leaving the original untouched. The non-negative-balance invariant is
//! enforced at construction and by every transform, so any `Account` that
//! escapes this module satisfies it.

use crate::types::LedgerError;
use rust_decimal::Decimal;
use serde::Serialize;

/// One ledger entry
///
/// Fields are private so the invariants cannot be bypassed; only
/// `Serialize` is derived for the same reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Unique, non-empty account identifier
    id: String,

    /// Non-empty holder name
    holder: String,

    /// Current balance, always >= 0
    balance: Decimal,
}

impl Account {
    /// Create an account with an explicit initial balance
    ///
    /// # Errors
    ///
    /// Returns `InvalidAccount` if the id or holder is empty (after
    /// trimming) or the balance is negative.
    pub fn new(
        id: impl Into<String>,
        holder: impl Into<String>,
        balance: Decimal,
    ) -> Result<Self, LedgerError> {
        let id = id.into();
        let holder = holder.into();

        if id.trim().is_empty() {
            return Err(LedgerError::invalid_account("account ID cannot be empty"));
        }
        if holder.trim().is_empty() {
            return Err(LedgerError::invalid_account(
                "account holder cannot be empty",
            ));
        }
        if balance < Decimal::ZERO {
            return Err(LedgerError::invalid_account("balance cannot be negative"));
        }

        Ok(Account {
            id,
            holder,
            balance,
        })
    }

    /// Create an account with a zero balance
    pub fn zero(id: impl Into<String>, holder: impl Into<String>) -> Result<Self, LedgerError> {
        Account::new(id, holder, Decimal::ZERO)
    }

    /// The account identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The holder's name
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// The current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Credit `amount`, returning the updated account
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `amount` is zero or negative, and
    /// `ArithmeticOverflow` if the new balance is not representable.
    pub fn deposit(&self, amount: Decimal) -> Result<Account, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount("deposit", amount));
        }

        let balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", &self.id))?;

        Ok(Account {
            id: self.id.clone(),
            holder: self.holder.clone(),
            balance,
        })
    }

    /// Debit `amount`, returning the updated account
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `amount` is zero or negative, and
    /// `InsufficientFunds` if the balance does not cover it.
    pub fn withdraw(&self, amount: Decimal) -> Result<Account, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount("withdrawal", amount));
        }
        if self.balance < amount {
            return Err(LedgerError::insufficient_funds(
                &self.id,
                amount,
                self.balance,
            ));
        }

        Ok(Account {
            id: self.id.clone(),
            holder: self.holder.clone(),
            balance: self.balance - amount,
        })
    }

    /// Whether the balance covers `amount`
    pub fn has_sufficient_funds(&self, amount: Decimal) -> bool {
        amount <= self.balance
    }

    /// Whether the account holds a strictly positive balance
    pub fn is_active(&self) -> bool {
        self.balance > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn account(balance: Decimal) -> Account {
        Account::new("ACC001", "John Doe", balance).unwrap()
    }

    #[test]
    fn test_new_with_valid_fields() {
        let account = Account::new("ACC001", "John Doe", Decimal::new(50000, 2)).unwrap();

        assert_eq!(account.id(), "ACC001");
        assert_eq!(account.holder(), "John Doe");
        assert_eq!(account.balance(), Decimal::new(50000, 2));
    }

    #[rstest]
    #[case::empty_id("", "John Doe", Decimal::ZERO)]
    #[case::blank_id("   ", "John Doe", Decimal::ZERO)]
    #[case::empty_holder("ACC001", "", Decimal::ZERO)]
    #[case::blank_holder("ACC001", "  ", Decimal::ZERO)]
    #[case::negative_balance("ACC001", "John Doe", Decimal::new(-1, 2))]
    fn test_new_rejects_invalid_fields(
        #[case] id: &str,
        #[case] holder: &str,
        #[case] balance: Decimal,
    ) {
        let result = Account::new(id, holder, balance);
        assert!(matches!(
            result.unwrap_err(),
            LedgerError::InvalidAccount { .. }
        ));
    }

    #[test]
    fn test_zero_factory_starts_at_zero() {
        let account = Account::zero("ACC001", "John Doe").unwrap();
        assert_eq!(account.balance(), Decimal::ZERO);
        assert!(!account.is_active());
    }

    #[test]
    fn test_deposit_adds_to_balance() {
        let account = account(Decimal::new(50000, 2));

        let updated = account.deposit(Decimal::new(15000, 2)).unwrap();

        assert_eq!(updated.balance(), Decimal::new(65000, 2));
        assert_eq!(updated.id(), account.id());
        assert_eq!(updated.holder(), account.holder());
    }

    #[test]
    fn test_deposit_leaves_original_unchanged() {
        let original = account(Decimal::new(50000, 2));
        let snapshot = original.clone();

        original.deposit(Decimal::new(15000, 2)).unwrap();

        assert_eq!(original, snapshot);
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::negative(Decimal::new(-100, 2))]
    fn test_deposit_rejects_non_positive_amounts(#[case] amount: Decimal) {
        let result = account(Decimal::new(50000, 2)).deposit(amount);
        assert!(matches!(
            result.unwrap_err(),
            LedgerError::InvalidAmount { .. }
        ));
    }

    #[test]
    fn test_withdraw_subtracts_from_balance() {
        let account = account(Decimal::new(65000, 2));

        let updated = account.withdraw(Decimal::new(25000, 2)).unwrap();

        assert_eq!(updated.balance(), Decimal::new(40000, 2));
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let account = account(Decimal::new(65000, 2));

        let updated = account.withdraw(Decimal::new(65000, 2)).unwrap();

        assert_eq!(updated.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_with_insufficient_funds() {
        let account = account(Decimal::new(65000, 2));
        let snapshot = account.clone();

        let result = account.withdraw(Decimal::new(80000, 2));

        assert_eq!(
            result.unwrap_err(),
            LedgerError::InsufficientFunds {
                account_id: "ACC001".to_string(),
                requested: Decimal::new(80000, 2),
                available: Decimal::new(65000, 2),
            }
        );
        // Value semantics: the failed transform did not touch the original
        assert_eq!(account, snapshot);
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::negative(Decimal::new(-100, 2))]
    fn test_withdraw_rejects_non_positive_amounts(#[case] amount: Decimal) {
        let result = account(Decimal::new(50000, 2)).withdraw(amount);
        assert!(matches!(
            result.unwrap_err(),
            LedgerError::InvalidAmount { .. }
        ));
    }

    #[rstest]
    #[case::below_balance(Decimal::new(40000, 2), true)]
    #[case::exact_balance(Decimal::new(50000, 2), true)]
    #[case::above_balance(Decimal::new(50001, 2), false)]
    fn test_has_sufficient_funds(#[case] amount: Decimal, #[case] expected: bool) {
        assert_eq!(
            account(Decimal::new(50000, 2)).has_sufficient_funds(amount),
            expected
        );
    }

    #[test]
    fn test_is_active() {
        assert!(account(Decimal::ONE).is_active());
        assert!(!account(Decimal::ZERO).is_active());
    }

    #[test]
    fn test_equality_is_full_value_equality() {
        let a = Account::new("ACC001", "John Doe", Decimal::new(100, 2)).unwrap();
        let same = Account::new("ACC001", "John Doe", Decimal::new(100, 2)).unwrap();
        let different_balance = Account::new("ACC001", "John Doe", Decimal::new(200, 2)).unwrap();
        let different_holder = Account::new("ACC001", "Jane Doe", Decimal::new(100, 2)).unwrap();

        assert_eq!(a, same);
        assert_ne!(a, different_balance);
        assert_ne!(a, different_holder);
    }
}
