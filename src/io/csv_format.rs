//! CSV format handling for operation scripts and replay output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain operations
//! - Replay summary serialization
//!
//! All functions are pure (no I/O beyond the writer they are handed).

use crate::types::{AccountError, Operation, OperationKind, ReplaySummary};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the script format with columns: op, amount
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    #[serde(default)]
    pub amount: Option<String>,
}

/// Convert a CsvRecord to an Operation
///
/// The amount is parsed as a signed integer so that negative amounts reach
/// the account and are rejected there as invalid arguments, instead of being
/// dropped here as malformed input.
///
/// `line` is the record's line in the script, when the caller knows it.
///
/// # Errors
///
/// * `AccountError::InvalidOperation` - unknown operation name
/// * `AccountError::ParseError` - missing or non-integer amount
pub fn convert_csv_record(
    csv_record: CsvRecord,
    line: Option<u64>,
) -> Result<Operation, AccountError> {
    let kind = OperationKind::parse(&csv_record.op)
        .ok_or_else(|| AccountError::invalid_operation(&csv_record.op, line))?;

    let amount = match csv_record.amount {
        Some(amount_str) if !amount_str.trim().is_empty() => {
            amount_str
                .trim()
                .parse::<i64>()
                .map_err(|_| AccountError::ParseError {
                    line,
                    message: format!("Invalid amount '{}' for {:?}", amount_str, kind),
                })?
        }
        _ => {
            return Err(AccountError::ParseError {
                line,
                message: format!("{:?} operation requires an amount", kind),
            })
        }
    };

    Ok(Operation { kind, amount })
}

/// Write a replay summary in CSV format
///
/// Columns: account, balance, applied, rejected
pub fn write_summary_csv(
    summary: &ReplaySummary,
    output: &mut dyn Write,
) -> Result<(), AccountError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["account", "balance", "applied", "rejected"])?;
    writer.write_record(&[
        summary.account.to_string(),
        summary.balance.to_string(),
        summary.applied.to_string(),
        summary.rejected.to_string(),
    ])?;
    writer.flush()?;

    Ok(())
}
