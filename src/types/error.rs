//! Error types for the atomic account
//!
//! This module defines all error types that can occur while operating on an
//! account or while driving one from an operation script.
//!
//! # Error Categories
//!
//! - **Balance Errors**: Overflow on credit, insufficient funds on debit
//! - **Argument Errors**: Negative amounts supplied through a signed boundary
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, unknown operations, etc.
//!
//! Balance and argument errors are expected, recoverable outcomes: the
//! operation is rejected and the balance is left untouched.

use super::account::{AccountId, Amount};
use thiserror::Error;

/// Main error type for the atomic account
///
/// Each variant carries enough context to explain the rejection without
/// consulting the account again (the balance may already have moved on).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Crediting the requested amount would exceed the representable maximum
    ///
    /// The credit is rejected and the balance remains unchanged.
    #[error("Balance overflow on account {account}: balance {balance}, requested {requested}")]
    Overflow {
        /// Account identifier
        account: AccountId,
        /// Balance observed when the credit was rejected
        balance: Amount,
        /// Requested credit amount
        requested: Amount,
    },

    /// Debit exceeds the current balance
    ///
    /// The debit is rejected and the balance remains unchanged.
    #[error(
        "Insufficient funds on account {account}: available {available}, requested {requested}"
    )]
    InsufficientFunds {
        /// Account identifier
        account: AccountId,
        /// Balance observed when the debit was rejected
        available: Amount,
        /// Requested debit amount
        requested: Amount,
    },

    /// Negative amount supplied
    ///
    /// Rejected before any attempt to touch the balance.
    #[error("Invalid amount {amount} for account {account}: amounts must be non-negative")]
    InvalidArgument {
        /// Account identifier
        account: AccountId,
        /// The rejected amount
        amount: i64,
    },

    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents a replay from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable during replay - the malformed record is skipped.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown operation name in a script
    #[error("Invalid operation '{op}'{}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    InvalidOperation {
        /// The operation string as read
        op: String,
        /// Line number (if available)
        line: Option<u64>,
    },

    /// The async runtime could not be built or a worker task failed
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the failure
        message: String,
    },
}

impl From<std::io::Error> for AccountError {
    fn from(error: std::io::Error) -> Self {
        AccountError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for AccountError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        AccountError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for AccountError {
    fn from(error: csv_async::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        AccountError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl AccountError {
    /// Create an Overflow error
    pub fn overflow(account: AccountId, balance: Amount, requested: Amount) -> Self {
        AccountError::Overflow {
            account,
            balance,
            requested,
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountId, available: Amount, requested: Amount) -> Self {
        AccountError::InsufficientFunds {
            account,
            available,
            requested,
        }
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(account: AccountId, amount: i64) -> Self {
        AccountError::InvalidArgument { account, amount }
    }

    /// Create an InvalidOperation error
    pub fn invalid_operation(op: &str, line: Option<u64>) -> Self {
        AccountError::InvalidOperation {
            op: op.to_string(),
            line,
        }
    }

    /// Create a Runtime error
    pub fn runtime(message: impl Into<String>) -> Self {
        AccountError::Runtime {
            message: message.into(),
        }
    }
}
