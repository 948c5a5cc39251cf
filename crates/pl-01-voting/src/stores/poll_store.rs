//! Poll Store
//!
//! Poll records keyed by `poll(poll_id)`.

use super::load;
use crate::algorithms::{encode_record, AddressDeriver, LedgerTransaction};
use crate::domain::{
    invariant_description_len, invariant_time_range, Address, Identity, Poll, PollId,
    RecordKind, UnixTimestamp, VotingError,
};
use crate::ports::{AccountStore, RecordSource};

/// A poll together with the address it was loaded from.
///
/// Handing this to dependent operations means they reuse the resolved
/// address instead of deriving it a second time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollAccount {
    /// Derived address of the poll.
    pub address: Address,
    /// Decoded record.
    pub poll: Poll,
}

/// Keyed store of polls.
#[derive(Clone, Debug)]
pub struct PollStore {
    deriver: AddressDeriver,
    max_description_len: usize,
}

impl PollStore {
    /// Create a store over `deriver`'s address space.
    pub fn new(deriver: AddressDeriver, max_description_len: usize) -> Self {
        Self {
            deriver,
            max_description_len,
        }
    }

    /// Address of `poll_id`.
    pub fn address(&self, poll_id: PollId) -> Address {
        self.deriver.poll(poll_id)
    }

    /// Load a poll, if it exists.
    pub fn find<S>(&self, source: &S, poll_id: PollId) -> Result<Option<PollAccount>, VotingError>
    where
        S: RecordSource + ?Sized,
    {
        let address = self.address(poll_id);
        let poll: Option<Poll> = load(source, &address)?;

        match poll {
            Some(poll) if poll.id != poll_id => Err(VotingError::PollMismatch {
                expected: poll_id,
                found: poll.id,
            }),
            Some(poll) => Ok(Some(PollAccount { address, poll })),
            None => Ok(None),
        }
    }

    /// Load a poll or fail `NotFound`.
    pub fn get<S>(&self, source: &S, poll_id: PollId) -> Result<PollAccount, VotingError>
    where
        S: RecordSource + ?Sized,
    {
        self.find(source, poll_id)?
            .ok_or(VotingError::NotFound { poll_id })
    }

    /// Stage a new poll with zero candidates.
    ///
    /// Checks, in order: existence, time range, description bound.
    pub fn create<S>(
        &self,
        tx: &mut LedgerTransaction<'_, S>,
        poll_id: PollId,
        description: &str,
        start_time: UnixTimestamp,
        end_time: UnixTimestamp,
        admin: Identity,
    ) -> Result<PollAccount, VotingError>
    where
        S: AccountStore + ?Sized,
    {
        let address = self.address(poll_id);
        if tx.contains(&address)? {
            return Err(VotingError::AlreadyInitialized {
                kind: RecordKind::Poll,
                address,
            });
        }
        invariant_time_range(start_time, end_time)?;
        invariant_description_len(description, self.max_description_len)?;

        let poll = Poll {
            id: poll_id,
            description: description.to_string(),
            start_time,
            end_time,
            candidate_count: 0,
            admin,
        };
        tx.create(address, encode_record(&poll)?)?;
        Ok(PollAccount { address, poll })
    }

    /// Stage `candidate_count += 1` on an already resolved poll.
    ///
    /// Returns the count before the increment, which is the new candidate's
    /// ordinal. The caller's transaction must hold the poll's lock.
    pub fn increment_candidate_count<S>(
        &self,
        tx: &mut LedgerTransaction<'_, S>,
        account: &mut PollAccount,
    ) -> Result<u64, VotingError>
    where
        S: AccountStore + ?Sized,
    {
        let ordinal = account.poll.candidate_count;
        account.poll.candidate_count = ordinal
            .checked_add(1)
            .ok_or_else(|| VotingError::Storage("candidate count overflow".to_string()))?;
        tx.update(account.address, encode_record(&account.poll)?);
        Ok(ordinal)
    }
}
