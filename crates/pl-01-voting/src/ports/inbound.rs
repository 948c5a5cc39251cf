//! # Inbound Ports
//!
//! API trait defining what the voting ledger can do.

use crate::domain::{
    Candidate, Identity, Poll, PollId, PollPhase, PollTally, UnixTimestamp, VoterReceipt,
    VotingError,
};

/// Poll ledger API - inbound port.
///
/// Identities passed in are already authenticated.
pub trait PollLedgerApi: Send + Sync {
    // === Commands ===

    /// Create poll `poll_id` administered by `admin`.
    fn initialize(
        &self,
        poll_id: PollId,
        description: &str,
        start_time: UnixTimestamp,
        end_time: UnixTimestamp,
        admin: Identity,
    ) -> Result<Poll, VotingError>;

    /// Add candidate `candidate_name` to poll `poll_id`. Admin only.
    fn initialize_candidate(
        &self,
        poll_id: PollId,
        candidate_name: &str,
        requester: Identity,
    ) -> Result<Candidate, VotingError>;

    /// Record `voter`'s single vote in `poll_id` for `candidate_name`.
    fn vote(
        &self,
        poll_id: PollId,
        candidate_name: &str,
        voter: Identity,
        now: UnixTimestamp,
    ) -> Result<VoterReceipt, VotingError>;

    // === Queries ===

    /// Poll record.
    fn get_poll(&self, poll_id: PollId) -> Result<Poll, VotingError>;

    /// Candidate record.
    fn get_candidate(&self, poll_id: PollId, candidate_name: &str)
        -> Result<Candidate, VotingError>;

    /// Receipt of `voter` in `poll_id`, if one exists.
    fn get_receipt(
        &self,
        poll_id: PollId,
        voter: &Identity,
    ) -> Result<Option<VoterReceipt>, VotingError>;

    /// Whether `voter` has voted in `poll_id`.
    fn has_voted(&self, poll_id: PollId, voter: &Identity) -> Result<bool, VotingError>;

    /// Phase of `poll_id` at `now`.
    fn poll_phase(&self, poll_id: PollId, now: UnixTimestamp) -> Result<PollPhase, VotingError>;

    /// Current results of `poll_id`.
    fn tally(&self, poll_id: PollId) -> Result<PollTally, VotingError>;
}
