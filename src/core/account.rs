//! Lock-free account
//!
//! This module provides the `Account` struct: a single unsigned balance that
//! any number of threads may query, credit and debit without external locking.
//!
//! # Algorithm
//!
//! Both mutations are optimistic retry loops around `compare_exchange_weak`:
//!
//! ```text
//! c = load()
//! loop {
//!     guard(c) fails  -> emit diagnostic, reject
//!     n = c ± amount
//!     cas(c, n) ok    -> committed (linearization point)
//!     cas failed      -> c = observed value, retry
//! }
//! ```
//!
//! The guard is evaluated against the value observed on each attempt, never a
//! value captured before the loop. A debit that was fundable against a stale
//! snapshot must be re-validated against the balance it is about to replace.
//!
//! # Memory Ordering
//!
//! Successful exchanges use `AcqRel`, loads and failed exchanges use
//! `Acquire`. Reads never observe a torn value.

use crate::core::sink::{MessageSink, StdoutSink, BALANCE_OVERFLOW, NOT_ENOUGH_FUNDS};
use crate::types::{AccountError, AccountId, Amount, Operation, OperationKind, MAX_BALANCE};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Thread-safe monetary account
///
/// The balance is always within `[0, MAX_BALANCE]`. Share it across threads
/// with `Arc<Account>`; every method takes `&self`.
///
/// # Examples
///
/// ```
/// use atomic_account::core::{Account, NoopSink};
/// use std::sync::Arc;
///
/// let account = Account::with_sink(223, Arc::new(NoopSink));
/// assert!(account.add_money(100));
/// assert!(account.get_money(50));
/// assert!(!account.get_money(60));
/// assert_eq!(account.current_amount(), 50);
/// ```
pub struct Account {
    id: AccountId,
    balance: AtomicU64,
    sink: Arc<dyn MessageSink>,
}

impl Account {
    /// Create an account with a zero balance that reports rejections on stdout
    pub fn new(id: AccountId) -> Self {
        Self::with_sink(id, Arc::new(StdoutSink))
    }

    /// Create an account with a zero balance and a custom diagnostic sink
    ///
    /// Pass [`NoopSink`](crate::core::NoopSink) for silent operation.
    pub fn with_sink(id: AccountId, sink: Arc<dyn MessageSink>) -> Self {
        Account {
            id,
            balance: AtomicU64::new(0),
            sink,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Point-in-time balance
    ///
    /// Wait-free. Concurrent mutators may have moved the balance by the time
    /// the caller looks at the value.
    pub fn current_amount(&self) -> Amount {
        self.balance.load(Ordering::Acquire)
    }

    /// Credit `amount`, returning whether it was applied
    ///
    /// On overflow the balance is unchanged and `"balance overflow"` is sent
    /// to the sink.
    pub fn add_money(&self, amount: Amount) -> bool {
        self.try_add_money(amount).is_ok()
    }

    /// Debit `amount`, returning whether it was applied
    ///
    /// If the balance is insufficient it is left unchanged and
    /// `"not enough funds on the account"` is sent to the sink.
    pub fn get_money(&self, amount: Amount) -> bool {
        self.try_get_money(amount).is_ok()
    }

    /// Credit `amount`, returning the balance this credit committed
    ///
    /// # Errors
    ///
    /// [`AccountError::Overflow`] if `balance + amount` exceeds `MAX_BALANCE`
    /// at the moment of the attempt. Nothing is written in that case.
    pub fn try_add_money(&self, amount: Amount) -> Result<Amount, AccountError> {
        let mut current = self.balance.load(Ordering::Acquire);

        loop {
            if MAX_BALANCE - current < amount {
                self.sink.emit(self.id, BALANCE_OVERFLOW);
                return Err(AccountError::overflow(self.id, current, amount));
            }

            let new_balance = current + amount;
            match self.balance.compare_exchange_weak(
                current,
                new_balance,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(new_balance),
                Err(observed) => current = observed,
            }
        }
    }

    /// Debit `amount`, returning the balance this debit committed
    ///
    /// # Errors
    ///
    /// [`AccountError::InsufficientFunds`] if `amount` exceeds the balance at
    /// the moment of the attempt. Nothing is written in that case.
    pub fn try_get_money(&self, amount: Amount) -> Result<Amount, AccountError> {
        let mut current = self.balance.load(Ordering::Acquire);

        loop {
            if current < amount {
                self.sink.emit(self.id, NOT_ENOUGH_FUNDS);
                return Err(AccountError::insufficient_funds(self.id, current, amount));
            }

            let new_balance = current - amount;
            match self.balance.compare_exchange_weak(
                current,
                new_balance,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(new_balance),
                Err(observed) => current = observed,
            }
        }
    }

    /// Apply a signed operation
    ///
    /// Negative amounts are rejected with [`AccountError::InvalidArgument`]
    /// before the balance is read. No diagnostic is emitted for them.
    pub fn apply(&self, operation: &Operation) -> Result<Amount, AccountError> {
        let amount = Amount::try_from(operation.amount)
            .map_err(|_| AccountError::invalid_argument(self.id, operation.amount))?;

        match operation.kind {
            OperationKind::Credit => self.try_add_money(amount),
            OperationKind::Debit => self.try_get_money(amount),
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("balance", &self.current_amount())
            .finish_non_exhaustive()
    }
}
