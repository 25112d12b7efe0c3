//! Concurrent workloads against a single account
//!
//! These drivers hammer one shared account from many OS threads and keep an
//! independent tally of what was committed, so the final balance can be
//! cross-checked against the operations that actually succeeded.
//!
//! # Workloads
//!
//! - `credit_storm`: every thread credits `amount` units `iterations` times.
//!   Credits never fail below the ceiling, so with unit credits the balance
//!   must grow by exactly `threads * iterations`.
//! - `mixed_storm`: even-indexed threads credit, odd-indexed threads debit.
//!   Debits may be rejected; the balance must equal the starting balance
//!   plus successful credits minus successful debits.
//!
//! Each worker tallies its own commits in `u128` and the tallies are summed
//! once the worker joins. A legal history can commit far more than
//! `Amount::MAX` in total, so the tallies must not share the balance's width.

use crate::core::Account;
use crate::types::Amount;
use std::thread;

/// Outcome of a stress run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressReport {
    /// Number of worker threads
    pub threads: usize,
    /// Operations attempted per thread
    pub iterations: usize,
    /// Balance observed before the workers started
    pub starting_balance: Amount,
    /// Balance observed after every worker joined
    pub final_balance: Amount,
    /// Units added by successful credits
    pub credited: u128,
    /// Units removed by successful debits
    pub debited: u128,
    /// Operations rejected (overflow or insufficient funds)
    pub rejected: u64,
}

impl StressReport {
    /// Balance implied by the committed operations
    ///
    /// `None` if the net tally leaves `[0, Amount::MAX]`, which can only
    /// happen if updates were lost or invented.
    pub fn expected_balance(&self) -> Option<Amount> {
        let net = u128::from(self.starting_balance)
            .checked_add(self.credited)?
            .checked_sub(self.debited)?;
        Amount::try_from(net).ok()
    }

    /// Whether the final balance matches the committed operations
    pub fn consistent(&self) -> bool {
        self.expected_balance() == Some(self.final_balance)
    }
}

/// Run `threads` workers each crediting `amount` units `iterations` times
pub fn credit_storm(
    account: &Account,
    threads: usize,
    iterations: usize,
    amount: Amount,
) -> StressReport {
    run(account, threads, iterations, |_| (true, amount))
}

/// Run `threads` workers, alternating crediting and debiting threads
///
/// Each operation moves `amount` units.
pub fn mixed_storm(
    account: &Account,
    threads: usize,
    iterations: usize,
    amount: Amount,
) -> StressReport {
    run(account, threads, iterations, |worker| (worker % 2 == 0, amount))
}

fn run<F>(account: &Account, threads: usize, iterations: usize, plan: F) -> StressReport
where
    F: Fn(usize) -> (bool, Amount) + Sync,
{
    let starting_balance = account.current_amount();

    tracing::debug!(
        account = account.id(),
        threads,
        iterations,
        "starting stress run"
    );

    let tallies = thread::scope(|scope| {
        let handles = (0..threads)
            .map(|worker| {
                let (is_credit, amount) = plan(worker);
                scope.spawn(move || worker_loop(account, iterations, is_credit, amount))
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .fold(Tally::default(), Tally::merge)
    });

    let report = StressReport {
        threads,
        iterations,
        starting_balance,
        final_balance: account.current_amount(),
        credited: tallies.credited,
        debited: tallies.debited,
        rejected: tallies.rejected,
    };

    tracing::debug!(
        account = account.id(),
        final_balance = report.final_balance,
        rejected = report.rejected,
        "stress run finished"
    );

    report
}

/// Commits seen by one worker
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    credited: u128,
    debited: u128,
    rejected: u64,
}

impl Tally {
    fn merge(self, other: Tally) -> Tally {
        Tally {
            credited: self.credited + other.credited,
            debited: self.debited + other.debited,
            rejected: self.rejected + other.rejected,
        }
    }
}

fn worker_loop(account: &Account, iterations: usize, is_credit: bool, amount: Amount) -> Tally {
    let mut tally = Tally::default();

    for _ in 0..iterations {
        let applied = if is_credit {
            account.add_money(amount)
        } else {
            account.get_money(amount)
        };

        match (applied, is_credit) {
            (true, true) => tally.credited += u128::from(amount),
            (true, false) => tally.debited += u128::from(amount),
            (false, _) => tally.rejected += 1,
        }
    }

    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NoopSink;
    use rstest::rstest;
    use std::sync::Arc;

    fn silent_account() -> Account {
        Account::with_sink(1, Arc::new(NoopSink))
    }

    #[test]
    fn test_credit_storm_loses_no_updates() {
        let account = silent_account();

        let report = credit_storm(&account, 8, 2_000, 1);

        assert_eq!(report.final_balance, 16_000);
        assert_eq!(report.credited, 16_000);
        assert_eq!(report.rejected, 0);
        assert!(report.consistent());
    }

    #[test]
    fn test_mixed_storm_is_consistent() {
        let account = silent_account();
        account.add_money(500);

        let report = mixed_storm(&account, 6, 1_000, 3);

        assert_eq!(report.starting_balance, 500);
        assert!(report.consistent(), "inconsistent report: {:?}", report);
    }

    #[test]
    fn test_debit_only_workers_on_empty_account_reject_everything() {
        let account = silent_account();

        let report = run(&account, 2, 10, |_| (false, 1));

        assert_eq!(report.final_balance, 0);
        assert_eq!(report.debited, 0);
        assert_eq!(report.rejected, 20);
    }

    #[test]
    fn test_expected_balance_detects_impossible_tally() {
        let report = StressReport {
            threads: 1,
            iterations: 1,
            starting_balance: 0,
            final_balance: 0,
            credited: 0,
            debited: 1,
            rejected: 0,
        };

        assert_eq!(report.expected_balance(), None);
        assert!(!report.consistent());
    }

    #[rstest]
    // credit 2^63, debit 2^63, credit 2^63
    #[case::tally_past_amount_max(0, 1u128 << 64, 1 << 63, 1 << 63)]
    // start + credited exceeds Amount::MAX before the debits come off
    #[case::intermediate_sum_past_max(
        10,
        u128::from(Amount::MAX - 5),
        20,
        Amount::MAX - 15
    )]
    #[case::net_tally_ends_at_max(0, u128::from(Amount::MAX) * 3, u128::from(Amount::MAX) * 2, Amount::MAX)]
    fn test_expected_balance_survives_large_tallies(
        #[case] starting_balance: Amount,
        #[case] credited: u128,
        #[case] debited: u128,
        #[case] final_balance: Amount,
    ) {
        let report = StressReport {
            threads: 2,
            iterations: 3,
            starting_balance,
            final_balance,
            credited,
            debited,
            rejected: 0,
        };

        assert_eq!(report.expected_balance(), Some(final_balance));
        assert!(report.consistent());
    }

    #[test]
    fn test_expected_balance_rejects_net_above_max() {
        let report = StressReport {
            threads: 1,
            iterations: 1,
            starting_balance: Amount::MAX,
            final_balance: Amount::MAX,
            credited: 1,
            debited: 0,
            rejected: 0,
        };

        assert_eq!(report.expected_balance(), None);
    }

    #[test]
    fn test_mixed_storm_with_half_range_amounts_is_consistent() {
        // every worker moves 2^63, so the credit tally passes Amount::MAX
        // whenever more than one credit commits
        for _ in 0..20 {
            let account = silent_account();

            let report = mixed_storm(&account, 2, 2_000, 1 << 63);

            assert!(report.consistent(), "inconsistent report: {:?}", report);
            assert!(report.final_balance == 0 || report.final_balance == 1 << 63);
        }
    }

    #[test]
    fn test_credit_storm_uses_amount() {
        let account = silent_account();

        let report = credit_storm(&account, 4, 250, 3);

        assert_eq!(report.final_balance, 3_000);
        assert_eq!(report.credited, 3_000);
        assert!(report.consistent());
    }

    #[test]
    fn test_credit_storm_rejects_at_ceiling() {
        let account = silent_account();

        let report = credit_storm(&account, 4, 10, Amount::MAX / 2);

        // only two credits fit below the ceiling
        assert_eq!(report.final_balance, Amount::MAX - 1);
        assert_eq!(report.rejected, 38);
        assert!(report.consistent());
    }

    #[test]
    fn test_zero_threads() {
        let account = silent_account();

        let report = credit_storm(&account, 0, 100, 1);

        assert_eq!(report.final_balance, 0);
        assert!(report.consistent());
    }
}
