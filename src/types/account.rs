//! Account-related identifiers and amounts
//!
//! The balance is an unsigned 64-bit integer of currency units. Its maximum
//! representable value is the ceiling of every account.

/// Account identifier
///
/// Opaque; no behavior depends on its value.
pub type AccountId = u64;

/// Amount of currency units
pub type Amount = u64;

/// Largest balance an account can hold
pub const MAX_BALANCE: Amount = Amount::MAX;
