//! Asynchronous replay strategy
//!
//! Reads the script in batches and applies each batch from several tokio
//! worker tasks at once, all targeting the same shared account.
//!
//! # Architecture
//!
//! ```text
//! AsyncReplayStrategy
//!     ├── ReplayConfig (batch_size, workers)
//!     ├── AsyncReader (batch CSV reading)
//!     └── worker tasks (one chunk of the batch each)
//!         └── Arc<Account> (lock-free balance)
//! ```
//!
//! # Ordering
//!
//! Batches are processed one after another; the next batch is read only once
//! every worker of the current batch has finished. Within a batch, commit
//! order is decided by whichever compare-and-swap lands first. A script whose
//! debits are never rejected ends on the same balance as the synchronous
//! strategy. When debits are rejected, which ones are rejected depends on the
//! interleaving.

use crate::core::Account;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_summary_csv;
use crate::strategy::ReplayStrategy;
use crate::types::{AccountError, Operation, ReplaySummary};
use futures::future::join_all;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;

/// Configuration for concurrent replay
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Number of operations read per batch
    pub batch_size: usize,
    /// Number of worker tasks applying a batch concurrently
    pub workers: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            workers: num_cpus::get(),
        }
    }
}

impl ReplayConfig {
    /// Create a ReplayConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, workers: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let workers = if workers == 0 {
            tracing::warn!(
                "Invalid workers ({}), using default ({})",
                workers,
                default.workers
            );
            default.workers
        } else {
            workers
        };

        Self {
            batch_size,
            workers,
        }
    }
}

/// Asynchronous replay strategy
#[derive(Debug, Clone)]
pub struct AsyncReplayStrategy {
    config: ReplayConfig,
}

impl AsyncReplayStrategy {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    /// Apply one batch from up to `workers` tasks
    ///
    /// Returns `(applied, rejected)` for the batch.
    async fn apply_batch(
        &self,
        account: &Arc<Account>,
        batch: Vec<Operation>,
    ) -> Result<(u64, u64), AccountError> {
        let chunk_size = batch.len().div_ceil(self.config.workers.max(1)).max(1);

        let handles = batch
            .chunks(chunk_size)
            .map(|chunk| {
                let account = Arc::clone(account);
                let chunk = chunk.to_vec();
                tokio::spawn(async move { apply_chunk(&account, &chunk) })
            })
            .collect::<Vec<_>>();

        let mut totals = (0, 0);
        for joined in join_all(handles).await {
            let (applied, rejected) =
                joined.map_err(|e| AccountError::runtime(format!("Worker task failed: {}", e)))?;
            totals.0 += applied;
            totals.1 += rejected;
        }

        Ok(totals)
    }
}

fn apply_chunk(account: &Account, chunk: &[Operation]) -> (u64, u64) {
    let mut applied = 0;
    let mut rejected = 0;

    for operation in chunk {
        match account.apply(operation) {
            Ok(_) => applied += 1,
            Err(e) => {
                rejected += 1;
                tracing::debug!("Operation rejected: {}", e);
            }
        }
    }

    (applied, rejected)
}

impl ReplayStrategy for AsyncReplayStrategy {
    fn process(
        &self,
        account: &Arc<Account>,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ReplaySummary, AccountError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.workers.max(1))
            .build()
            .map_err(|e| AccountError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

        let summary = runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| match e.kind() {
                    ErrorKind::NotFound => AccountError::FileNotFound {
                        path: input_path.display().to_string(),
                    },
                    _ => AccountError::from(e),
                })?;

            // csv-async reads through the futures-io traits
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut summary = ReplaySummary {
                account: account.id(),
                ..ReplaySummary::default()
            };

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                let (applied, rejected) = self.apply_batch(account, batch).await?;
                summary.applied += applied;
                summary.rejected += rejected;
            }

            tracing::info!(
                account = summary.account,
                applied = summary.applied,
                rejected = summary.rejected,
                skipped = reader.skipped(),
                "replay finished"
            );

            Ok::<_, AccountError>(summary)
        })?;

        let summary = ReplaySummary {
            balance: account.current_amount(),
            ..summary
        };
        write_summary_csv(&summary, output)?;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NoopSink;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn silent_account() -> Arc<Account> {
        Arc::new(Account::with_sink(1, Arc::new(NoopSink)))
    }

    #[rstest]
    #[case::defaults(ReplayConfig::new(0, 0), ReplayConfig::default())]
    #[case::custom(ReplayConfig::new(10, 3), ReplayConfig { batch_size: 10, workers: 3 })]
    #[case::zero_workers(ReplayConfig::new(7, 0), ReplayConfig { batch_size: 7, workers: num_cpus::get() })]
    fn test_replay_config_new(#[case] config: ReplayConfig, #[case] expected: ReplayConfig) {
        assert_eq!(config, expected);
    }

    #[test]
    fn test_async_strategy_credits_lose_no_updates() {
        let mut script = String::from("op,amount\n");
        for _ in 0..500 {
            script.push_str("credit,3\n");
        }
        let file = create_temp_csv(&script);
        let account = silent_account();
        let mut output = Vec::new();

        let strategy = AsyncReplayStrategy::new(ReplayConfig::new(64, 4));
        let summary = strategy.process(&account, file.path(), &mut output).unwrap();

        assert_eq!(summary.balance, 1500);
        assert_eq!(summary.applied, 500);
        assert_eq!(summary.rejected, 0);
    }

    #[test]
    fn test_async_strategy_orders_batches() {
        // Batch size 1 forces every operation into its own batch
        let file = create_temp_csv("op,amount\ncredit,100\ndebit,50\ndebit,60\n");
        let account = silent_account();
        let mut output = Vec::new();

        let strategy = AsyncReplayStrategy::new(ReplayConfig::new(1, 4));
        let summary = strategy.process(&account, file.path(), &mut output).unwrap();

        assert_eq!(summary.balance, 50);
        assert_eq!(summary.applied, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "account,balance,applied,rejected\n1,50,2,1\n"
        );
    }

    #[test]
    fn test_async_strategy_never_goes_negative() {
        let mut script = String::from("op,amount\ncredit,10\n");
        for _ in 0..200 {
            script.push_str("debit,1\ncredit,1\n");
        }
        let file = create_temp_csv(&script);
        let account = silent_account();
        let mut output = Vec::new();

        let strategy = AsyncReplayStrategy::new(ReplayConfig::new(50, 8));
        let summary = strategy.process(&account, file.path(), &mut output).unwrap();

        // every rejection is a debit that found the balance at zero, which
        // leaves its unit on the account
        assert_eq!(summary.applied + summary.rejected, 401);
        assert_eq!(summary.balance, 10 + summary.rejected);
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let account = silent_account();
        let mut output = Vec::new();

        let strategy = AsyncReplayStrategy::new(ReplayConfig::default());
        let result = strategy.process(&account, Path::new("nonexistent.csv"), &mut output);

        assert!(matches!(result, Err(AccountError::FileNotFound { .. })));
    }
}
