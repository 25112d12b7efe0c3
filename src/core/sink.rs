//! Diagnostic message sinks
//!
//! A rejected credit or debit emits one human-readable message. Where that
//! message goes is decided by the caller through the [`MessageSink`] trait,
//! so the account itself never writes to the console directly.

use crate::types::AccountId;
use std::io::Write;
use std::sync::Mutex;

/// Message emitted when a credit would exceed the balance ceiling
pub const BALANCE_OVERFLOW: &str = "balance overflow";

/// Message emitted when a debit exceeds the current balance
pub const NOT_ENOUGH_FUNDS: &str = "not enough funds on the account";

/// Destination for rejection diagnostics
///
/// Implementations are shared between every thread operating on an account,
/// hence the `Send + Sync` bound. Emission must not fail or panic; a sink
/// that cannot deliver a message drops it.
pub trait MessageSink: Send + Sync {
    /// Deliver a diagnostic raised by the account `account`
    fn emit(&self, account: AccountId, message: &str);
}

impl<F> MessageSink for F
where
    F: Fn(AccountId, &str) + Send + Sync,
{
    fn emit(&self, account: AccountId, message: &str) {
        self(account, message)
    }
}

/// Writes each message on its own line to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl MessageSink for StdoutSink {
    fn emit(&self, _account: AccountId, message: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", message);
    }
}

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl MessageSink for NoopSink {
    fn emit(&self, _account: AccountId, _message: &str) {}
}

/// Forwards messages as `tracing` warnings tagged with the account id
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn emit(&self, account: AccountId, message: &str) {
        tracing::warn!(account, "{}", message);
    }
}

/// Keeps every message in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages recorded so far
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MessageSink for RecordingSink {
    fn emit(&self, _account: AccountId, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}
