//! Replay strategy module
//!
//! A replay reads an operation script and applies every operation to one
//! account. Strategies differ in how many threads apply operations at once:
//! the synchronous strategy preserves script order, the asynchronous strategy
//! lets operations within a batch race each other on the account.

use crate::cli::StrategyType;
use crate::core::Account;
use crate::types::{AccountError, ReplaySummary};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncReplayStrategy, ReplayConfig};
pub use sync::SyncReplayStrategy;

/// Replay strategy trait
///
/// Implementations apply the script at `input_path` to `account`, write the
/// resulting summary as CSV to `output` and return it.
///
/// Rejected operations and malformed records are not errors: they are
/// counted or logged and the replay continues. Only failures that stop the
/// replay as a whole (missing file, I/O errors, runtime failures) are
/// returned as `Err`.
pub trait ReplayStrategy: Send + Sync {
    fn process(
        &self,
        account: &Arc<Account>,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ReplaySummary, AccountError>;
}

/// Create a replay strategy of the requested type
///
/// `config` is only consulted by the asynchronous strategy; `None` selects
/// the default configuration.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<ReplayConfig>,
) -> Box<dyn ReplayStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncReplayStrategy),
        StrategyType::Async => Box::new(AsyncReplayStrategy::new(config.unwrap_or_default())),
    }
}
