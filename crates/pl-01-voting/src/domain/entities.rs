//! # Domain Entities
//!
//! Records held by the ledger. Records never point at each other; a
//! candidate names its poll by id and a receipt names its candidate by name.

use super::errors::{PollId, UnixTimestamp};
use super::value_objects::{Identity, PollPhase};
use serde::{Deserialize, Serialize};

/// A votable topic with a bounded active window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    /// Globally unique poll id.
    pub id: PollId,
    /// Bounded free-text description.
    pub description: String,
    /// First second at which votes are accepted.
    pub start_time: UnixTimestamp,
    /// First second at which votes are rejected.
    pub end_time: UnixTimestamp,
    /// Number of candidates created under this poll.
    pub candidate_count: u64,
    /// Identity allowed to add candidates.
    pub admin: Identity,
}

impl Poll {
    /// Phase at `now`.
    pub fn phase_at(&self, now: UnixTimestamp) -> PollPhase {
        PollPhase::at(self.start_time, self.end_time, now)
    }

    /// Whether `identity` administers this poll.
    pub fn is_admin(&self, identity: &Identity) -> bool {
        self.admin == *identity
    }
}

/// A named option under a poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Owning poll.
    pub poll_id: PollId,
    /// Unique within the poll.
    pub name: String,
    /// Number of receipts naming this candidate.
    pub vote_count: u64,
}

/// Proof that `voter` voted once in `poll_id`. Immutable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterReceipt {
    /// Poll voted in.
    pub poll_id: PollId,
    /// Voter identity.
    pub voter: Identity,
    /// Candidate the vote went to.
    pub candidate_name: String,
    /// `now` as supplied to the vote.
    pub timestamp: UnixTimestamp,
}

/// Enumeration index entry: the `ordinal`-th candidate of a poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    /// Owning poll.
    pub poll_id: PollId,
    /// Position in creation order, starting at 0.
    pub ordinal: u64,
    /// Candidate name stored at that position.
    pub name: String,
}

/// Vote total of one candidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTally {
    /// Candidate name.
    pub name: String,
    /// Votes received.
    pub votes: u64,
}

/// Snapshot of a poll's results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollTally {
    /// Poll id.
    pub poll_id: PollId,
    /// Candidates ordered by votes descending, then name ascending.
    pub candidates: Vec<CandidateTally>,
    /// Sum of all candidate votes.
    pub total_votes: u64,
}

impl PollTally {
    /// Build a tally, ordering candidates for display.
    pub fn new(poll_id: PollId, mut candidates: Vec<CandidateTally>) -> Self {
        candidates.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.name.cmp(&b.name)));
        let total_votes = candidates.iter().map(|c| c.votes).sum();
        Self {
            poll_id,
            candidates,
            total_votes,
        }
    }

    /// Candidates sharing the highest vote count. Empty when no votes were cast.
    pub fn leaders(&self) -> Vec<&CandidateTally> {
        let top = match self.candidates.first() {
            Some(first) if first.votes > 0 => first.votes,
            _ => return Vec::new(),
        };
        self.candidates.iter().take_while(|c| c.votes == top).collect()
    }
}
