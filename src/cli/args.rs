use clap::Parser;
use std::path::PathBuf;

/// Apply bank account operations from a CSV file
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Apply bank account operations from a CSV file", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing operation records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,
}
