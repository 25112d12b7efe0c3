//! Atomic Account CLI
//!
//! Command-line driver for the lock-free account.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- walkthrough
//! cargo run -- stress --threads 8 --iterations 100000
//! cargo run -- stress --mode mixed --amount 3
//! cargo run -- replay operations.csv > summary.csv
//! cargo run -- replay --strategy async --batch-size 500 --workers 4 operations.csv
//! ```
//!
//! Program output goes to stdout; logs go to stderr. The log filter comes from
//! `RUST_LOG` when set, otherwise from `--log-level`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, I/O failure, inconsistent stress result, etc.)

use atomic_account::cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut output = std::io::stdout();
    if let Err(e) = cli::commands::run(args.command, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
