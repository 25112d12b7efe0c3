//! Atomic Account Library
//! # Overview
//!
//! A thread-safe monetary account whose balance can be queried, credited and
//! debited from any number of threads without locks. The balance never goes
//! below zero and never wraps past its maximum.
//!
//! # Architecture
//!
//! - [`types`] - Identifiers, operations, errors and replay summaries
//! - [`core`] - The account itself:
//!   - [`core::account`] - Compare-and-swap retry loops for credit and debit
//!   - [`core::sink`] - Pluggable destinations for rejection diagnostics
//!   - [`core::stress`] - Multi-threaded workloads with independent tallies
//! - [`io`] - Operation script parsing and summary output
//! - [`strategy`] - Sequential and concurrent script replay
//! - [`cli`] - CLI arguments parsing
//!
//! # Operations
//!
//! - **Query**: a single atomic load, wait-free
//! - **Credit**: rejected if the balance would exceed `u64::MAX`
//! - **Debit**: rejected if the amount exceeds the balance
//!
//! Each rejection leaves the balance untouched and emits exactly one
//! diagnostic through the account's [`core::MessageSink`].

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{Account, MessageSink, NoopSink, RecordingSink, StdoutSink, TracingSink};
pub use crate::io::write_summary_csv;
pub use crate::types::{
    AccountError, AccountId, Amount, Operation, OperationKind, ReplaySummary, MAX_BALANCE,
};
