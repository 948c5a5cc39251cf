//! Voting Service - the ledger's state machine.
//!
//! Every command opens one [`LedgerTransaction`] over the addresses it
//! decides on, validates, stages, and commits. A failed validation drops the
//! transaction, so callers observe either the whole effect or none of it.

use crate::adapters::SystemTimeSource;
use crate::algorithms::{AddressDeriver, KeyLocks, LedgerTransaction};
use crate::domain::{
    invariant_poll_active, Candidate, CandidateTally, ConfigError, Identity, LedgerConfig, Poll,
    PollId, PollPhase, PollTally, UnixTimestamp, VoterReceipt, VotingError,
};
use crate::ports::{AccountStore, PollLedgerApi, TimeSource};
use crate::stores::{CandidateAccount, CandidateStore, PollStore, VoterReceiptStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Poll ledger over an [`AccountStore`].
pub struct VotingStateMachine<S, T = SystemTimeSource>
where
    S: AccountStore,
    T: TimeSource,
{
    store: Arc<S>,
    locks: KeyLocks,
    polls: PollStore,
    candidates: CandidateStore,
    receipts: VoterReceiptStore,
    clock: T,
    config: LedgerConfig,
}

impl<S: AccountStore> VotingStateMachine<S, SystemTimeSource> {
    /// Create a ledger reading time from the system clock.
    pub fn new(store: Arc<S>, config: LedgerConfig) -> Result<Self, ConfigError> {
        Self::with_clock(store, config, SystemTimeSource)
    }
}

impl<S, T> VotingStateMachine<S, T>
where
    S: AccountStore,
    T: TimeSource,
{
    /// Create a ledger with an explicit time source.
    pub fn with_clock(store: Arc<S>, config: LedgerConfig, clock: T) -> Result<Self, ConfigError> {
        config.validate()?;

        let deriver = AddressDeriver::new(config.program_id);
        Ok(Self {
            store,
            locks: KeyLocks::new(config.lock_stripes),
            polls: PollStore::new(deriver.clone(), config.max_description_len),
            candidates: CandidateStore::new(deriver.clone(), config.max_candidate_name_len),
            receipts: VoterReceiptStore::new(deriver),
            clock,
            config,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Backing store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Time source used by [`vote_now`](Self::vote_now).
    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Vote at the time source's current time.
    pub fn vote_now(
        &self,
        poll_id: PollId,
        candidate_name: &str,
        voter: Identity,
    ) -> Result<VoterReceipt, VotingError> {
        self.vote(poll_id, candidate_name, voter, self.clock.now())
    }

    fn create_poll(
        &self,
        poll_id: PollId,
        description: &str,
        start_time: UnixTimestamp,
        end_time: UnixTimestamp,
        admin: Identity,
    ) -> Result<Poll, VotingError> {
        let mut tx = LedgerTransaction::begin(
            self.store.as_ref(),
            &self.locks,
            &[self.polls.address(poll_id)],
        );
        let account = self
            .polls
            .create(&mut tx, poll_id, description, start_time, end_time, admin)?;
        tx.commit()?;
        Ok(account.poll)
    }

    fn create_candidate(
        &self,
        poll_id: PollId,
        candidate_name: &str,
        requester: &Identity,
    ) -> Result<(CandidateAccount, u64), VotingError> {
        let keys = [
            self.polls.address(poll_id),
            self.candidates.address(poll_id, candidate_name),
        ];
        let mut tx = LedgerTransaction::begin(self.store.as_ref(), &self.locks, &keys);

        let mut poll = self.polls.get(&tx, poll_id)?;
        let account =
            self.candidates
                .create(&mut tx, &self.polls, &mut poll, candidate_name, requester)?;
        tx.commit()?;
        Ok((account, poll.poll.candidate_count))
    }

    fn register_vote(
        &self,
        poll_id: PollId,
        candidate_name: &str,
        voter: Identity,
        now: UnixTimestamp,
    ) -> Result<(VoterReceipt, u64), VotingError> {
        // The window never changes after creation, so the poll is read
        // without holding its lock.
        let poll = self.polls.get(self.store.as_ref(), poll_id)?;
        invariant_poll_active(&poll.poll, now)?;

        let keys = [
            self.receipts.address(poll_id, &voter),
            self.candidates.address(poll_id, candidate_name),
        ];
        let mut tx = LedgerTransaction::begin(self.store.as_ref(), &self.locks, &keys);

        let mut candidate = self.candidates.get(&tx, poll_id, candidate_name)?;
        let receipt = self.receipts.create_if_absent(
            &mut tx,
            poll_id,
            voter,
            &candidate.candidate.name,
            now,
        )?;
        let total = self.candidates.increment_vote(&mut tx, &mut candidate)?;
        tx.commit()?;
        Ok((receipt, total))
    }
}

fn log_failure(operation: &'static str, poll_id: PollId, err: &VotingError) {
    if err.is_rejection() {
        debug!(
            "[pl-01] {} rejected for poll {}: {} (code {})",
            operation,
            poll_id,
            err,
            err.code()
        );
    } else {
        warn!("[pl-01] {} failed for poll {}: {}", operation, poll_id, err);
    }
}

impl<S, T> PollLedgerApi for VotingStateMachine<S, T>
where
    S: AccountStore,
    T: TimeSource,
{
    fn initialize(
        &self,
        poll_id: PollId,
        description: &str,
        start_time: UnixTimestamp,
        end_time: UnixTimestamp,
        admin: Identity,
    ) -> Result<Poll, VotingError> {
        let poll = self
            .create_poll(poll_id, description, start_time, end_time, admin)
            .inspect_err(|e| log_failure("initialize", poll_id, e))?;

        info!(
            "[pl-01] Poll {} initialized: '{}' [{}, {}) by {}",
            poll.id, poll.description, poll.start_time, poll.end_time, poll.admin
        );
        Ok(poll)
    }

    fn initialize_candidate(
        &self,
        poll_id: PollId,
        candidate_name: &str,
        requester: Identity,
    ) -> Result<Candidate, VotingError> {
        let (account, candidate_count) = self
            .create_candidate(poll_id, candidate_name, &requester)
            .inspect_err(|e| log_failure("initialize_candidate", poll_id, e))?;

        info!(
            "[pl-01] Candidate '{}' added to poll {} ({} candidates)",
            account.candidate.name, poll_id, candidate_count
        );
        Ok(account.candidate)
    }

    fn vote(
        &self,
        poll_id: PollId,
        candidate_name: &str,
        voter: Identity,
        now: UnixTimestamp,
    ) -> Result<VoterReceipt, VotingError> {
        let (receipt, total) = self
            .register_vote(poll_id, candidate_name, voter, now)
            .inspect_err(|e| log_failure("vote", poll_id, e))?;

        info!(
            "[pl-01] Vote registered for '{}' in poll {} by {} (total: {})",
            receipt.candidate_name, poll_id, receipt.voter, total
        );
        Ok(receipt)
    }

    fn get_poll(&self, poll_id: PollId) -> Result<Poll, VotingError> {
        self.polls
            .get(self.store.as_ref(), poll_id)
            .map(|account| account.poll)
    }

    fn get_candidate(
        &self,
        poll_id: PollId,
        candidate_name: &str,
    ) -> Result<Candidate, VotingError> {
        self.candidates
            .get(self.store.as_ref(), poll_id, candidate_name)
            .map(|account| account.candidate)
    }

    fn get_receipt(
        &self,
        poll_id: PollId,
        voter: &Identity,
    ) -> Result<Option<VoterReceipt>, VotingError> {
        self.receipts.find(self.store.as_ref(), poll_id, voter)
    }

    fn has_voted(&self, poll_id: PollId, voter: &Identity) -> Result<bool, VotingError> {
        self.receipts.has_voted(self.store.as_ref(), poll_id, voter)
    }

    fn poll_phase(&self, poll_id: PollId, now: UnixTimestamp) -> Result<PollPhase, VotingError> {
        Ok(self.get_poll(poll_id)?.phase_at(now))
    }

    /// Records are read without locks, so a tally taken during voting may
    /// miss votes committed while it runs.
    fn tally(&self, poll_id: PollId) -> Result<PollTally, VotingError> {
        let poll = self.get_poll(poll_id)?;
        let candidates = self
            .candidates
            .list(self.store.as_ref(), &poll)?
            .into_iter()
            .map(|c| CandidateTally {
                name: c.name,
                votes: c.vote_count,
            })
            .collect();
        Ok(PollTally::new(poll_id, candidates))
    }
}
