//! CSV format handling for operation records and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - OperationRow structure for deserialization
//! - Conversion from CSV rows to the closed Operation enum
//! - Final account table serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::Account;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Write;
use std::str::FromStr;

/// Raw CSV row as deserialized from the input file
///
/// Matches the input format with columns: type, holder, source,
/// destination, amount. Which fields are required depends on the operation
/// type; validation happens during conversion.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OperationRow {
    #[serde(rename = "type")]
    pub op_type: String,
    pub holder: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub amount: Option<String>,
}

/// A validated operation ready to apply through the engine
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Open an account for `holder` with an initial balance
    Create {
        holder: String,
        initial_balance: Decimal,
    },
    /// Credit the destination account
    Deposit {
        destination: String,
        amount: Decimal,
    },
    /// Debit the source account
    Withdraw { source: String, amount: Decimal },
    /// Move funds from source to destination
    Transfer {
        source: String,
        destination: String,
        amount: Decimal,
    },
}

/// Convert an OperationRow to an Operation
///
/// Validates that the fields the operation type needs are present and that
/// the amount parses as a decimal. Returns a message describing the first
/// problem found; the row is then skipped by the caller.
pub fn convert_operation_row(row: OperationRow) -> Result<Operation, String> {
    let amount = parse_amount(row.amount.as_deref(), &row.op_type)?;

    match row.op_type.to_lowercase().as_str() {
        "create" => {
            let holder = required_field(row.holder.as_deref(), "create", "holder")?;
            Ok(Operation::Create {
                holder,
                initial_balance: amount,
            })
        }
        "deposit" => {
            let destination = required_field(row.destination.as_deref(), "deposit", "destination")?;
            Ok(Operation::Deposit {
                destination,
                amount,
            })
        }
        "withdraw" => {
            let source = required_field(row.source.as_deref(), "withdraw", "source")?;
            Ok(Operation::Withdraw { source, amount })
        }
        "transfer" => {
            let source = required_field(row.source.as_deref(), "transfer", "source")?;
            let destination =
                required_field(row.destination.as_deref(), "transfer", "destination")?;
            Ok(Operation::Transfer {
                source,
                destination,
                amount,
            })
        }
        other => Err(format!("Invalid operation type: '{}'", other)),
    }
}

fn required_field(value: Option<&str>, op_type: &str, field: &str) -> Result<String, String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(format!("{} operation requires a {}", op_type, field)),
    }
}

fn parse_amount(value: Option<&str>, op_type: &str) -> Result<Decimal, String> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Decimal::from_str(raw.trim())
            .map_err(|_| format!("Invalid amount '{}' for {} operation", raw, op_type)),
        _ => Err(format!("{} operation requires an amount", op_type)),
    }
}

/// Write the final account table to CSV
///
/// Columns: id, holder, balance. Accounts are sorted by id for
/// deterministic output; balances are rendered with two decimal places.
pub fn write_accounts_csv(
    accounts: &HashMap<String, Account>,
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "holder", "balance"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts: Vec<&Account> = accounts.values().collect();
    sorted_accounts.sort_by(|a, b| a.id().cmp(b.id()));

    for account in sorted_accounts {
        writer
            .write_record(&[
                account.id().to_string(),
                account.holder().to_string(),
                format!("{:.2}", account.balance()),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
