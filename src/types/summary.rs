//! Replay summary produced after running an operation script

use super::account::{AccountId, Amount};

/// Final state of an account after a replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    /// The account the script was replayed against
    pub account: AccountId,

    /// Balance after the last operation committed
    pub balance: Amount,

    /// Operations that changed (or, for zero amounts, confirmed) the balance
    pub applied: u64,

    /// Operations rejected for overflow, insufficient funds or a negative amount
    pub rejected: u64,
}
