//! Batch pipeline
//!
//! Wires one explicitly constructed [`AccountStore`] and [`TransferEngine`]
//! together, streams operations from a CSV file, applies them in order, and
//! writes the final account table. Malformed rows and rejected operations
//! are logged and skipped; only I/O failures abort the run.

use crate::core::{AccountStore, TransferEngine};
use crate::io::csv_format::{write_accounts_csv, Operation};
use crate::io::sync_reader::OperationReader;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Apply all operations from `input_path` and write the account table
///
/// # Errors
///
/// Returns an error only for fatal conditions: the input file cannot be
/// opened or the output cannot be written.
pub fn process(input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
    let reader = OperationReader::new(input_path)?;
    let store = Arc::new(AccountStore::new());
    let engine = TransferEngine::new(Arc::clone(&store));

    for result in reader {
        match result {
            Ok(operation) => apply(&engine, operation),
            Err(message) => warn!(%message, "skipping malformed operation record"),
        }
    }

    write_accounts_csv(&store.list(), output)
}

fn apply(engine: &TransferEngine, operation: Operation) {
    let outcome = match operation {
        Operation::Create {
            holder,
            initial_balance,
        } => engine.create_account(&holder, initial_balance).map(|_| ()),
        Operation::Deposit {
            destination,
            amount,
        } => engine.deposit(&destination, amount).map(|_| ()),
        Operation::Withdraw { source, amount } => engine.withdraw(&source, amount).map(|_| ()),
        Operation::Transfer {
            source,
            destination,
            amount,
        } => engine
            .transfer(Some(source.as_str()), Some(destination.as_str()), amount)
            .map(|_| ()),
    };

    if let Err(error) = outcome {
        warn!(%error, "operation rejected");
    }
}
