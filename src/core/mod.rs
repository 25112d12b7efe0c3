//! Core account logic
//!
//! This module contains the account and the components it is built from:
//! - `account` - The lock-free account and its compare-and-swap retry loops
//! - `sink` - Pluggable destinations for rejection diagnostics
//! - `stress` - Concurrent workloads that exercise an account from many threads

pub mod account;
pub mod sink;
pub mod stress;

pub use account::Account;
pub use sink::{
    MessageSink, NoopSink, RecordingSink, StdoutSink, TracingSink, BALANCE_OVERFLOW,
    NOT_ENOUGH_FUNDS,
};
pub use stress::{credit_storm, mixed_storm, StressReport};
