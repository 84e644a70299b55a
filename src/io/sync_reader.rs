//! Streaming CSV reader with an iterator interface
//!
//! Provides a streaming iterator over operation records from a CSV file,
//! delegating format concerns to the csv_format module. Records are read
//! one at a time, so memory usage stays constant regardless of file size.
//!
//! Fatal errors (file not found) are returned from `new()`; individual
//! malformed rows are yielded as `Err` items with their line number so the
//! caller can skip them and keep going.

use crate::io::csv_format::{convert_operation_row, Operation, OperationRow};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming reader over operation records
#[derive(Debug)]
pub struct OperationReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl OperationReader {
    /// Open a CSV file of operations for streaming iteration
    ///
    /// The reader trims whitespace from all fields and tolerates rows with
    /// trailing fields omitted.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        // Line 1 is the header row
        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for OperationReader {
    type Item = Result<Operation, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let row: Option<Result<OperationRow, csv::Error>> = self.reader.deserialize().next();

        row.map(|result| {
            self.line_num += 1;
            match result {
                Ok(row) => convert_operation_row(row)
                    .map_err(|message| format!("line {}: {}", self.line_num, message)),
                Err(e) => Err(format!("line {}: {}", self.line_num, e)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn reader_for(contents: &str) -> (NamedTempFile, OperationReader) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        let reader = OperationReader::new(file.path()).unwrap();
        (file, reader)
    }

    #[test]
    fn test_reads_operations_in_order() {
        let (_file, reader) = reader_for(
            "type,holder,source,destination,amount\n\
             create,John Doe,,,500.00\n\
             deposit,,,ACC001,150.00\n",
        );

        let operations: Vec<_> = reader.collect::<Result<_, _>>().unwrap();

        assert_eq!(
            operations,
            vec![
                Operation::Create {
                    holder: "John Doe".to_string(),
                    initial_balance: Decimal::new(50000, 2),
                },
                Operation::Deposit {
                    destination: "ACC001".to_string(),
                    amount: Decimal::new(15000, 2),
                },
            ]
        );
    }

    #[test]
    fn test_malformed_row_yields_error_with_line_number() {
        let (_file, reader) = reader_for(
            "type,holder,source,destination,amount\n\
             deposit,,,ACC001,not-a-number\n\
             deposit,,,ACC001,1.00\n",
        );

        let items: Vec<_> = reader.collect();

        assert_eq!(items.len(), 2);
        let message = items[0].as_ref().unwrap_err();
        assert!(message.starts_with("line 2:"), "got: {}", message);
        assert!(items[1].is_ok());
    }

    #[test]
    fn test_missing_file_is_a_fatal_error() {
        let result = OperationReader::new(Path::new("does/not/exist.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let (_file, reader) = reader_for(
            "type,holder,source,destination,amount\n\
             transfer,, ACC001 , ACC002 , 100.00 \n",
        );

        let operations: Vec<_> = reader.collect::<Result<_, _>>().unwrap();

        assert_eq!(
            operations,
            vec![Operation::Transfer {
                source: "ACC001".to_string(),
                destination: "ACC002".to_string(),
                amount: Decimal::new(10000, 2),
            }]
        );
    }
}
