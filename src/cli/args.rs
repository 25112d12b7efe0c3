use crate::strategy::ReplayConfig;
use crate::types::{AccountId, Amount};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Drive a lock-free account from the command line
#[derive(Parser, Debug)]
#[command(name = "atomic-account")]
#[command(about = "Drive a lock-free monetary account", long_about = None)]
pub struct CliArgs {
    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        default_value = "warn",
        global = true,
        help = "Log filter (e.g. 'info', 'atomic_account=debug'); RUST_LOG takes precedence"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the reference credit/debit walk-through
    Walkthrough {
        /// Identifier of the demo account
        #[arg(long = "id", value_name = "ID", default_value_t = 223)]
        id: AccountId,
    },

    /// Hammer one account from many threads and verify the result
    Stress {
        /// Number of worker threads
        #[arg(long = "threads", value_name = "COUNT", help = "Worker threads (default: CPU cores)")]
        threads: Option<usize>,

        /// Operations per thread
        #[arg(long = "iterations", value_name = "COUNT", default_value_t = 100_000)]
        iterations: usize,

        /// Workload shape
        #[arg(long = "mode", value_name = "MODE", default_value = "credit")]
        mode: StressMode,

        /// Units moved per operation
        #[arg(long = "amount", value_name = "UNITS", default_value_t = 1)]
        amount: Amount,
    },

    /// Replay an operation script against a fresh account
    Replay {
        /// Operation script path (CSV with columns op,amount)
        #[arg(value_name = "INPUT", help = "Path to the operation script")]
        input_file: PathBuf,

        /// Replay strategy
        #[arg(
            long = "strategy",
            value_name = "STRATEGY",
            default_value = "sync",
            help = "Replay strategy: 'sync' for script order or 'async' for concurrent workers"
        )]
        strategy: StrategyType,

        /// Identifier of the replay account
        #[arg(long = "id", value_name = "ID", default_value_t = 1)]
        id: AccountId,

        /// Number of operations per batch (async mode only)
        #[arg(
            long = "batch-size",
            value_name = "SIZE",
            help = "Number of operations per batch (default: 1000)"
        )]
        batch_size: Option<usize>,

        /// Number of concurrent workers (async mode only)
        #[arg(
            long = "workers",
            value_name = "COUNT",
            help = "Worker tasks applying a batch concurrently (default: CPU cores)"
        )]
        workers: Option<usize>,

        /// Discard rejection diagnostics instead of logging them
        #[arg(long = "quiet")]
        quiet: bool,
    },
}

/// Available replay strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available stress workloads
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StressMode {
    /// Every thread credits
    Credit,
    /// Half the threads credit, half debit
    Mixed,
}

/// Build a ReplayConfig from optional CLI values
///
/// Missing values fall back to the defaults; zero values are replaced with
/// defaults by `ReplayConfig::new`.
pub fn to_replay_config(batch_size: Option<usize>, workers: Option<usize>) -> ReplayConfig {
    let default = ReplayConfig::default();
    ReplayConfig::new(
        batch_size.unwrap_or(default.batch_size),
        workers.unwrap_or(default.workers),
    )
}
