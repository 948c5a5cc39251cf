//! # Concurrency Scenarios
//!
//! Many callers race on the same keys from a multi-threaded runtime. Ledger
//! calls are synchronous, so each caller runs on the blocking pool.
//!
//! ## Properties Checked
//!
//! - Exactly one of N identical votes wins; the rest see `AlreadyVoted`
//! - Distinct voters never lose an increment
//! - Duplicate creations yield one record and `AlreadyInitialized` elsewhere

#[cfg(test)]
mod tests {
    use crate::{identity, init_test_logging, new_ledger, random_identity, seed_poll, TestLedger};
    use pl_01_voting::{Identity, PollLedgerApi, VotingError};
    use std::sync::Arc;
    use tokio::task::JoinSet;

    const CALLERS: usize = 32;

    async fn race<F, R>(ledger: &Arc<TestLedger>, callers: usize, call: F) -> Vec<R>
    where
        F: Fn(&TestLedger, usize) -> R + Send + Sync + 'static,
        R: Send + 'static,
    {
        let call = Arc::new(call);
        let mut set = JoinSet::new();
        for i in 0..callers {
            let ledger = ledger.clone();
            let call = call.clone();
            set.spawn_blocking(move || (*call)(ledger.as_ref(), i));
        }

        let mut results = Vec::with_capacity(callers);
        while let Some(joined) = set.join_next().await {
            results.push(joined.unwrap());
        }
        results
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_identical_votes_have_one_winner() {
        let _guard = init_test_logging();
        let ledger = new_ledger(150);
        seed_poll(&ledger, 1, 100, 200, identity(0), &["A"]);
        let voter = random_identity();

        let results = race(&ledger, CALLERS, move |l, _| l.vote(1, "A", voter, 150)).await;

        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == VotingError::AlreadyVoted));
        assert_eq!(ledger.get_candidate(1, "A").unwrap().vote_count, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_same_voter_across_candidates_has_one_winner() {
        let ledger = new_ledger(150);
        seed_poll(&ledger, 1, 100, 200, identity(0), &["A", "B", "C"]);
        let voter = random_identity();

        let results = race(&ledger, CALLERS, move |l, i| {
            let name = ["A", "B", "C"][i % 3];
            l.vote(1, name, voter, 150)
        })
        .await;

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(ledger.tally(1).unwrap().total_votes, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_many_voters_are_all_counted() {
        let ledger = new_ledger(150);
        seed_poll(&ledger, 1, 100, 200, identity(0), &["A", "B"]);
        let voters: Arc<Vec<Identity>> = Arc::new((0..200).map(|_| random_identity()).collect());

        let shared = voters.clone();
        let results = race(&ledger, voters.len(), move |l, i| {
            let name = if i % 4 == 0 { "B" } else { "A" };
            l.vote(1, name, shared[i], 150)
        })
        .await;

        assert!(results.iter().all(|r| r.is_ok()));
        let tally = ledger.tally(1).unwrap();
        assert_eq!(tally.total_votes, 200);
        assert_eq!(ledger.get_candidate(1, "A").unwrap().vote_count, 150);
        assert_eq!(ledger.get_candidate(1, "B").unwrap().vote_count, 50);
        for voter in voters.iter() {
            assert!(ledger.has_voted(1, voter).unwrap());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_duplicate_initialize_has_one_winner() {
        let ledger = new_ledger(0);

        let results = race(&ledger, CALLERS, |l, i| {
            l.initialize(1, "Test Poll", 100, 200, identity(i as u64))
        })
        .await;

        let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, VotingError::AlreadyInitialized { .. })));
        assert_eq!(ledger.get_poll(1).unwrap().admin, winners[0].admin);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_duplicate_candidates_keep_count_consistent() {
        let ledger = new_ledger(0);
        let admin = identity(0);
        seed_poll(&ledger, 1, 100, 200, admin, &[]);

        // Four distinct names, each requested eight times
        let results = race(&ledger, CALLERS, move |l, i| {
            let name = format!("candidate-{}", i % 4);
            l.initialize_candidate(1, &name, admin)
        })
        .await;

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 4);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| e.code() == 6007));

        assert_eq!(ledger.get_poll(1).unwrap().candidate_count, 4);
        let mut names: Vec<String> = ledger
            .tally(1)
            .unwrap()
            .candidates
            .into_iter()
            .map(|c| c.name)
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["candidate-0", "candidate-1", "candidate-2", "candidate-3"]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_votes_race_candidate_creation() {
        let ledger = new_ledger(150);
        let admin = identity(0);
        seed_poll(&ledger, 1, 100, 200, admin, &["A"]);

        let results = race(&ledger, CALLERS, move |l, i| {
            if i == 0 {
                l.initialize_candidate(1, "B", admin).map(|_| ())
            } else {
                let name = if i % 2 == 0 { "A" } else { "B" };
                l.vote(1, name, identity(i as u64), 150).map(|_| ())
            }
        })
        .await;

        let accepted = results.iter().filter(|r| r.is_ok()).count() as u64;
        assert!(results.iter().filter_map(|r| r.as_ref().err()).all(|e| {
            matches!(e, VotingError::CandidateNotFound { .. })
        }));
        // One of the successes is the candidate creation
        assert_eq!(ledger.tally(1).unwrap().total_votes, accepted - 1);
    }
}
