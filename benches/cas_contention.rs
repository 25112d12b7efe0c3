//! Benchmark suite for account contention
//!
//! Measures credit/debit throughput with one thread and with many threads
//! competing for the same balance, using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use atomic_account::core::{credit_storm, mixed_storm, Account, NoopSink};
use std::sync::Arc;

fn main() {
    divan::main();
}

fn silent_account() -> Account {
    Account::with_sink(1, Arc::new(NoopSink))
}

/// Uncontended credit followed by debit on a single thread
#[divan::bench]
fn single_thread_credit_debit(bencher: divan::Bencher) {
    let account = silent_account();

    bencher.bench_local(|| {
        account.add_money(divan::black_box(7));
        account.get_money(divan::black_box(7));
    });
}

/// Rejected debit on an empty account (guard path, no exchange)
#[divan::bench]
fn rejected_debit(bencher: divan::Bencher) {
    let account = silent_account();

    bencher.bench_local(|| account.get_money(divan::black_box(1)));
}

/// Credits from a growing number of threads against one account
#[divan::bench(args = [1, 2, 4, 8])]
fn credit_storm_threads(threads: usize) {
    let account = silent_account();
    credit_storm(&account, threads, 10_000, 1);
}

/// Alternating credit and debit threads against one account
#[divan::bench(args = [2, 4, 8])]
fn mixed_storm_threads(threads: usize) {
    let account = silent_account();
    account.add_money(1_000);
    mixed_storm(&account, threads, 10_000, 3);
}
