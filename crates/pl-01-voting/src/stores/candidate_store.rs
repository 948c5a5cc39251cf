//! Candidate Store
//!
//! Candidate records keyed by `candidate(poll_id, name)`, plus the
//! `candidate_slot(poll_id, ordinal)` index used to enumerate them.

use super::poll_store::{PollAccount, PollStore};
use super::load;
use crate::algorithms::{encode_record, AddressDeriver, LedgerTransaction};
use crate::domain::{
    invariant_candidate_name_len, invariant_poll_admin, Address, Candidate, CandidateSlot,
    Identity, Poll, PollId, RecordKind, VotingError,
};
use crate::ports::{AccountStore, RecordSource};

/// A candidate together with the address it was loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateAccount {
    /// Derived address of the candidate.
    pub address: Address,
    /// Decoded record.
    pub candidate: Candidate,
}

/// Keyed store of candidates.
#[derive(Clone, Debug)]
pub struct CandidateStore {
    deriver: AddressDeriver,
    max_name_len: usize,
}

impl CandidateStore {
    /// Create a store over `deriver`'s address space.
    pub fn new(deriver: AddressDeriver, max_name_len: usize) -> Self {
        Self {
            deriver,
            max_name_len,
        }
    }

    /// Address of `(poll_id, name)`.
    pub fn address(&self, poll_id: PollId, name: &str) -> Address {
        self.deriver.candidate(poll_id, name)
    }

    /// Address of the `ordinal`-th slot of `poll_id`.
    pub fn slot_address(&self, poll_id: PollId, ordinal: u64) -> Address {
        self.deriver.candidate_slot(poll_id, ordinal)
    }

    /// Load a candidate, if it exists.
    pub fn find<S>(
        &self,
        source: &S,
        poll_id: PollId,
        name: &str,
    ) -> Result<Option<CandidateAccount>, VotingError>
    where
        S: RecordSource + ?Sized,
    {
        let address = self.address(poll_id, name);
        let candidate: Option<Candidate> = load(source, &address)?;
        Ok(candidate.map(|candidate| CandidateAccount { address, candidate }))
    }

    /// Load a candidate or fail `CandidateNotFound`.
    pub fn get<S>(
        &self,
        source: &S,
        poll_id: PollId,
        name: &str,
    ) -> Result<CandidateAccount, VotingError>
    where
        S: RecordSource + ?Sized,
    {
        self.find(source, poll_id, name)?
            .ok_or_else(|| VotingError::CandidateNotFound {
                name: name.to_string(),
            })
    }

    /// Stage a new candidate under an already resolved poll.
    ///
    /// Checks, in order: admin, name bound, existence. On success stages the
    /// candidate, its slot, and the poll's candidate count increment in the
    /// same transaction. The transaction must hold the poll and candidate
    /// locks.
    pub fn create<S>(
        &self,
        tx: &mut LedgerTransaction<'_, S>,
        polls: &PollStore,
        poll: &mut PollAccount,
        name: &str,
        requester: &Identity,
    ) -> Result<CandidateAccount, VotingError>
    where
        S: AccountStore + ?Sized,
    {
        invariant_poll_admin(&poll.poll, requester)?;
        invariant_candidate_name_len(name, self.max_name_len)?;

        let poll_id = poll.poll.id;
        let address = self.address(poll_id, name);
        if tx.contains(&address)? {
            return Err(VotingError::AlreadyInitialized {
                kind: RecordKind::Candidate,
                address,
            });
        }

        let candidate = Candidate {
            poll_id,
            name: name.to_string(),
            vote_count: 0,
        };
        tx.create(address, encode_record(&candidate)?)?;

        let ordinal = polls.increment_candidate_count(tx, poll)?;
        let slot = CandidateSlot {
            poll_id,
            ordinal,
            name: name.to_string(),
        };
        tx.create(self.slot_address(poll_id, ordinal), encode_record(&slot)?)?;

        Ok(CandidateAccount { address, candidate })
    }

    /// Stage `vote_count += 1`. Only called from inside a vote transaction
    /// that holds the candidate's lock.
    pub fn increment_vote<S>(
        &self,
        tx: &mut LedgerTransaction<'_, S>,
        account: &mut CandidateAccount,
    ) -> Result<u64, VotingError>
    where
        S: AccountStore + ?Sized,
    {
        account.candidate.vote_count = account
            .candidate
            .vote_count
            .checked_add(1)
            .ok_or_else(|| VotingError::Storage("vote count overflow".to_string()))?;
        tx.update(account.address, encode_record(&account.candidate)?);
        Ok(account.candidate.vote_count)
    }

    /// All candidates of `poll` in creation order.
    pub fn list<S>(&self, source: &S, poll: &Poll) -> Result<Vec<Candidate>, VotingError>
    where
        S: RecordSource + ?Sized,
    {
        let mut candidates = Vec::with_capacity(poll.candidate_count as usize);
        for ordinal in 0..poll.candidate_count {
            let slot_address = self.slot_address(poll.id, ordinal);
            let slot: CandidateSlot =
                load(source, &slot_address)?.ok_or_else(|| VotingError::CorruptRecord {
                    address: slot_address,
                    reason: format!("missing candidate slot {} of poll {}", ordinal, poll.id),
                })?;
            let account = self.get(source, poll.id, &slot.name)?;
            candidates.push(account.candidate);
        }
        Ok(candidates)
    }
}
