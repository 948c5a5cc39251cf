//! # Integration Test Flows
//!
//! Full poll lifecycles through `PollLedgerApi`:
//!
//! 1. **Create**: poll, then candidates by the admin
//! 2. **Vote**: one receipt per voter, counted on exactly one candidate
//! 3. **Close**: the window ends and the tally is frozen

#[cfg(test)]
mod tests {
    use crate::{identity, init_test_logging, new_ledger, seed_poll};
    use pl_01_voting::{PollLedgerApi, PollPhase, TimeSource, VotingError, ALREADY_VOTED_CODE};

    const ADMIN: u64 = 0;

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    #[test]
    fn test_poll_lifecycle() {
        let _guard = init_test_logging();
        let ledger = new_ledger(50);
        let admin = identity(ADMIN);

        seed_poll(&ledger, 1, 100, 200, admin, &["Alice", "Bob"]);
        assert_eq!(ledger.poll_phase(1, ledger.clock().now()).unwrap(), PollPhase::Pending);
        assert_eq!(
            ledger.vote_now(1, "Alice", identity(1)),
            Err(VotingError::PollNotStarted)
        );

        ledger.clock().set_time(100);
        for n in 1..=3 {
            ledger.vote_now(1, "Alice", identity(n)).unwrap();
        }
        ledger.vote_now(1, "Bob", identity(4)).unwrap();

        ledger.clock().set_time(200);
        assert_eq!(
            ledger.vote_now(1, "Bob", identity(5)),
            Err(VotingError::PollEnded)
        );

        let tally = ledger.tally(1).unwrap();
        assert_eq!(tally.total_votes, 4);
        assert_eq!(tally.leaders()[0].name, "Alice");
        assert_eq!(tally.candidates[1].votes, 1);
    }

    #[test]
    fn test_repeat_vote_reports_code_6003() {
        let ledger = new_ledger(150);
        let voter = identity(7);
        seed_poll(&ledger, 1, 100, 200, identity(ADMIN), &["A"]);

        ledger.vote(1, "A", voter, 150).unwrap();
        let before = ledger.store().snapshot();

        let err = ledger.vote(1, "A", voter, 160).unwrap_err();
        assert_eq!(err.code(), ALREADY_VOTED_CODE);
        assert_eq!(err.to_string(), "You have already voted in this poll.");
        assert_eq!(ledger.store().snapshot(), before);
        assert_eq!(ledger.get_receipt(1, &voter).unwrap().unwrap().timestamp, 150);
    }

    #[test]
    fn test_polls_are_independent() {
        let ledger = new_ledger(150);
        let voter = identity(9);
        seed_poll(&ledger, 1, 100, 200, identity(ADMIN), &["A"]);
        seed_poll(&ledger, 2, 100, 200, identity(1), &["A"]);

        ledger.vote(1, "A", voter, 150).unwrap();
        ledger.vote(2, "A", voter, 150).unwrap();

        assert_eq!(ledger.get_candidate(1, "A").unwrap().vote_count, 1);
        assert_eq!(ledger.get_candidate(2, "A").unwrap().vote_count, 1);
        assert_eq!(
            ledger.initialize_candidate(2, "B", identity(ADMIN)),
            Err(VotingError::Unauthorized)
        );
    }

    #[test]
    fn test_rejections_leave_no_trace() {
        let ledger = new_ledger(150);
        seed_poll(&ledger, 1, 100, 200, identity(ADMIN), &["A"]);
        let before = ledger.store().snapshot();

        let rejected = [
            ledger.initialize(1, "again", 0, 10, identity(ADMIN)),
            ledger.initialize(2, "bad range", 10, 10, identity(ADMIN)),
            ledger.initialize(3, &"x".repeat(51), 0, 10, identity(ADMIN)),
        ];
        assert!(rejected.iter().all(|r| r.is_err()));
        assert!(ledger.initialize_candidate(1, "A", identity(ADMIN)).is_err());
        assert!(ledger
            .initialize_candidate(1, &"n".repeat(51), identity(ADMIN))
            .is_err());
        assert!(ledger.vote(1, "missing", identity(1), 150).is_err());
        assert!(ledger.vote(9, "A", identity(1), 150).is_err());

        assert_eq!(ledger.store().snapshot(), before);
    }

    #[test]
    fn test_tally_breaks_ties_by_name() {
        let ledger = new_ledger(150);
        seed_poll(&ledger, 1, 100, 200, identity(ADMIN), &["Zed", "Amy", "Max"]);

        let names: Vec<String> = ledger
            .tally(1)
            .unwrap()
            .candidates
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Amy", "Max", "Zed"]);
        assert!(ledger.tally(1).unwrap().leaders().is_empty());
    }
}
