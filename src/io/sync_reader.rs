//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over operations from a script file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding `Result<Operation, AccountError>`
//! for each CSV row:
//!
//! ```no_run
//! use atomic_account::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("operations.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(operation) => println!("Applying: {:?}", operation),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the iterator
//! - Record errors carry the line number they were read from

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{AccountError, Operation};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads records one at a time; memory use does not grow with the script.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Open a script file for streaming iteration
    ///
    /// The CSV reader trims whitespace from all fields and tolerates rows
    /// with a missing amount column.
    ///
    /// # Errors
    ///
    /// * `AccountError::FileNotFound` if the path does not exist
    /// * `AccountError::IoError` for any other open failure
    pub fn new(path: &Path) -> Result<Self, AccountError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AccountError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => AccountError::from(e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<Operation, AccountError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let next = deserializer.next()?;

        // header occupies line 1
        self.line_num += 1;
        let line = self.line_num + 1;

        Some(match next {
            Ok(csv_record) => convert_csv_record(csv_record, Some(line)),
            Err(e) => Err(AccountError::from(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));

        assert_eq!(
            result.unwrap_err(),
            AccountError::FileNotFound {
                path: "nonexistent.csv".to_string()
            }
        );
    }

    #[test]
    fn test_sync_reader_iterates_records_in_order() {
        let file = create_temp_csv("op,amount\ncredit,100\ndebit,50\ndebit,60\n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(
            records,
            vec![
                Ok(Operation::credit(100)),
                Ok(Operation::debit(50)),
                Ok(Operation::debit(60)),
            ]
        );
    }

    #[test]
    fn test_sync_reader_includes_line_numbers_in_errors() {
        let file = create_temp_csv("op,amount\ncredit,1\ncredit,oops\ncredit,2\n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[2].is_ok());

        let error = records[1].as_ref().unwrap_err();
        assert!(matches!(error, AccountError::ParseError { line: Some(3), .. }));
        assert!(error.to_string().contains("Invalid amount"));
    }

    #[test]
    fn test_sync_reader_reports_unknown_operation_with_line() {
        let file = create_temp_csv("op,amount
credit,1
credit,2
transfer,3
");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(
            records[2],
            Err(AccountError::InvalidOperation {
                op: "transfer".to_string(),
                line: Some(4)
            })
        );
    }

    #[test]
    fn test_sync_reader_handles_missing_amount_column() {
        let file = create_temp_csv("op,amount\ncredit\ndebit,4\n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 2);
        assert!(records[0]
            .as_ref()
            .unwrap_err()
            .to_string()
            .contains("requires an amount"));
        assert_eq!(records[1], Ok(Operation::debit(4)));
    }

    #[test]
    fn test_sync_reader_handles_whitespace_and_case() {
        let file = create_temp_csv("op,amount\n  DEPOSIT  ,  10  \n Withdrawal , 3 \n");

        let records: Vec<_> = SyncReader::new(file.path())
            .unwrap()
            .filter_map(Result::ok)
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, OperationKind::Credit);
        assert_eq!(records[1].kind, OperationKind::Debit);
    }

    #[test]
    fn test_sync_reader_handles_empty_file_after_header() {
        let file = create_temp_csv("op,amount\n");

        assert_eq!(SyncReader::new(file.path()).unwrap().count(), 0);
    }
}
