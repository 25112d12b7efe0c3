//! Operation types read from operation scripts
//!
//! An operation script is a sequence of credits and debits applied to a
//! single account. Amounts are signed at this boundary so that negative
//! input can be rejected explicitly rather than wrapping into a huge credit.

/// Kind of balance transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Add funds to the account
    ///
    /// Rejected if the new balance would exceed the representable maximum.
    Credit,

    /// Take funds from the account
    ///
    /// Rejected if the amount exceeds the current balance.
    Debit,
}

impl OperationKind {
    /// Parse an operation name (case-insensitive, surrounding whitespace ignored)
    ///
    /// Accepts `credit`, `deposit` or `add` for credits and `debit`,
    /// `withdrawal` or `get` for debits.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "credit" | "deposit" | "add" => Some(OperationKind::Credit),
            "debit" | "withdrawal" | "get" => Some(OperationKind::Debit),
            _ => None,
        }
    }
}

/// A single credit or debit request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Credit or debit
    pub kind: OperationKind,

    /// Requested amount, validated as non-negative when applied
    pub amount: i64,
}

impl Operation {
    /// Create a credit operation
    pub fn credit(amount: i64) -> Self {
        Operation {
            kind: OperationKind::Credit,
            amount,
        }
    }

    /// Create a debit operation
    pub fn debit(amount: i64) -> Self {
        Operation {
            kind: OperationKind::Debit,
            amount,
        }
    }
}
