//! Subcommand execution
//!
//! Each subcommand writes its human-facing output to the writer it is given,
//! so the binary can pass stdout and tests can pass a buffer.

use super::args::{to_replay_config, Command, StressMode};
use crate::core::{credit_storm, mixed_storm, Account, MessageSink, NoopSink, TracingSink};
use crate::strategy::create_strategy;
use crate::types::{AccountError, Amount};
use std::io::Write;
use std::sync::Arc;

/// Execute a parsed subcommand
pub fn run(command: Command, output: &mut dyn Write) -> Result<(), AccountError> {
    match command {
        Command::Walkthrough { id } => walkthrough(&Account::new(id), output),
        Command::Stress {
            threads,
            iterations,
            mode,
            amount,
        } => {
            let account = Account::with_sink(1, Arc::new(NoopSink));
            stress(
                &account,
                threads.unwrap_or_else(num_cpus::get),
                iterations,
                mode,
                amount,
                output,
            )
        }
        Command::Replay {
            input_file,
            strategy,
            id,
            batch_size,
            workers,
            quiet,
        } => {
            let sink: Arc<dyn MessageSink> = if quiet {
                Arc::new(NoopSink)
            } else {
                Arc::new(TracingSink)
            };
            let account = Arc::new(Account::with_sink(id, sink));
            let strategy = create_strategy(strategy, Some(to_replay_config(batch_size, workers)));

            strategy.process(&account, &input_file, output).map(|_| ())
        }
    }
}

/// Credit 100, debit 50, then attempt to debit 60
///
/// Prints the balance after each step. The failed debit's diagnostic goes to
/// the account's own sink.
pub fn walkthrough(account: &Account, output: &mut dyn Write) -> Result<(), AccountError> {
    account.add_money(100);
    writeln!(output, "Current balance: {}", account.current_amount())?;

    for amount in [50, 60] {
        if account.get_money(amount) {
            writeln!(output, "Withdraw successful")?;
        } else {
            writeln!(output, "Withdraw failed")?;
        }
        writeln!(output, "Current balance: {}", account.current_amount())?;
    }

    Ok(())
}

/// Run a stress workload and print its report
///
/// # Errors
///
/// `AccountError::Runtime` if the final balance disagrees with the tally of
/// committed operations.
pub fn stress(
    account: &Account,
    threads: usize,
    iterations: usize,
    mode: StressMode,
    amount: Amount,
    output: &mut dyn Write,
) -> Result<(), AccountError> {
    let report = match mode {
        StressMode::Credit => credit_storm(account, threads, iterations, amount),
        StressMode::Mixed => mixed_storm(account, threads, iterations, amount),
    };

    writeln!(output, "threads: {}", report.threads)?;
    writeln!(output, "iterations per thread: {}", report.iterations)?;
    writeln!(output, "credited: {}", report.credited)?;
    writeln!(output, "debited: {}", report.debited)?;
    writeln!(output, "rejected: {}", report.rejected)?;
    writeln!(output, "final balance: {}", report.final_balance)?;

    if !report.consistent() {
        return Err(AccountError::runtime(format!(
            "final balance {} does not match committed operations (expected {:?})",
            report.final_balance,
            report.expected_balance()
        )));
    }

    writeln!(output, "consistent: true")?;
    Ok(())
}
