//! Synchronous replay strategy
//!
//! Applies operations one at a time, in script order, on the calling thread.
//! The result is fully deterministic for a given script and starting balance.

use crate::core::Account;
use crate::io::csv_format::write_summary_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ReplayStrategy;
use crate::types::{AccountError, ReplaySummary};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Synchronous replay strategy
///
/// # Examples
///
/// ```no_run
/// use atomic_account::core::Account;
/// use atomic_account::strategy::{ReplayStrategy, SyncReplayStrategy};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let account = Arc::new(Account::new(223));
/// let mut output = std::io::stdout();
///
/// SyncReplayStrategy
///     .process(&account, Path::new("operations.csv"), &mut output)
///     .expect("Replay failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncReplayStrategy;

impl ReplayStrategy for SyncReplayStrategy {
    fn process(
        &self,
        account: &Arc<Account>,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ReplaySummary, AccountError> {
        let reader = SyncReader::new(input_path)?;
        let mut summary = ReplaySummary {
            account: account.id(),
            ..ReplaySummary::default()
        };

        for result in reader {
            match result {
                Ok(operation) => match account.apply(&operation) {
                    Ok(_) => summary.applied += 1,
                    Err(e) => {
                        summary.rejected += 1;
                        tracing::debug!("Operation rejected: {}", e);
                    }
                },
                Err(e) => tracing::warn!("Skipping record: {}", e),
            }
        }

        summary.balance = account.current_amount();
        write_summary_csv(&summary, output)?;

        Ok(summary)
    }
}
