//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account identifiers, amounts and the balance ceiling
//! - `operation`: Credit/debit requests read from operation scripts
//! - `error`: Error types for the account and its drivers
//! - `summary`: Outcome of replaying an operation script

pub mod account;
pub mod error;
pub mod operation;
pub mod summary;

pub use account::{AccountId, Amount, MAX_BALANCE};
pub use error::AccountError;
pub use operation::{Operation, OperationKind};
pub use summary::ReplaySummary;
