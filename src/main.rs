//! Bank Ledger CLI
//!
//! Command-line driver for the in-memory bank ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > accounts.csv
//! ```
//!
//! The program reads operation records (create, deposit, withdraw,
//! transfer) from the input CSV file, applies them through the transfer
//! engine against a fresh in-memory store, and writes the final account
//! table to stdout. Malformed rows and rejected operations are logged to
//! stderr and skipped.
//!
//! Log verbosity is controlled with `RUST_LOG` (default: `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (missing arguments, file not found, write failure)

use bank_ledger::cli;
use bank_ledger::runner;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so stdout stays clean for the account table
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = runner::process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
