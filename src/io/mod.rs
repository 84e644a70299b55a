//! I/O module
//!
//! CSV format handling and streaming input for the batch driver:
//! - `csv_format` - pure parsing/serialization of operation rows and the
//!   final account table
//! - `sync_reader` - streaming iterator over an operations file

pub mod csv_format;
pub mod sync_reader;

pub use csv_format::{convert_operation_row, write_accounts_csv, Operation, OperationRow};
pub use sync_reader::OperationReader;
