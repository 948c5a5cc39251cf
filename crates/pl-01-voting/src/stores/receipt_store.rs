//! Voter Receipt Store
//!
//! Receipts keyed by `voter_receipt(poll_id, voter)`. A receipt's existence
//! is what stops a second vote, so creation is a check-and-create under the
//! receipt key's lock.

use super::load;
use crate::algorithms::{encode_record, AddressDeriver, LedgerTransaction};
use crate::domain::{Address, Identity, PollId, UnixTimestamp, VoterReceipt, VotingError};
use crate::ports::{AccountStore, RecordSource};

/// Keyed store of voter receipts.
#[derive(Clone, Debug)]
pub struct VoterReceiptStore {
    deriver: AddressDeriver,
}

impl VoterReceiptStore {
    /// Create a store over `deriver`'s address space.
    pub fn new(deriver: AddressDeriver) -> Self {
        Self { deriver }
    }

    /// Address of `(poll_id, voter)`.
    pub fn address(&self, poll_id: PollId, voter: &Identity) -> Address {
        self.deriver.voter_receipt(poll_id, voter)
    }

    /// Load a receipt, if it exists.
    pub fn find<S>(
        &self,
        source: &S,
        poll_id: PollId,
        voter: &Identity,
    ) -> Result<Option<VoterReceipt>, VotingError>
    where
        S: RecordSource + ?Sized,
    {
        load(source, &self.address(poll_id, voter))
    }

    /// Whether `voter` holds a receipt for `poll_id`.
    pub fn has_voted<S>(
        &self,
        source: &S,
        poll_id: PollId,
        voter: &Identity,
    ) -> Result<bool, VotingError>
    where
        S: RecordSource + ?Sized,
    {
        source.contains(&self.address(poll_id, voter))
    }

    /// Stage a receipt unless one already exists.
    ///
    /// Fails `AlreadyVoted` and stages nothing if the voter has a receipt.
    /// The transaction must hold the receipt's lock.
    pub fn create_if_absent<S>(
        &self,
        tx: &mut LedgerTransaction<'_, S>,
        poll_id: PollId,
        voter: Identity,
        candidate_name: &str,
        timestamp: UnixTimestamp,
    ) -> Result<VoterReceipt, VotingError>
    where
        S: AccountStore + ?Sized,
    {
        let address = self.address(poll_id, &voter);
        if tx.contains(&address)? {
            return Err(VotingError::AlreadyVoted);
        }

        let receipt = VoterReceipt {
            poll_id,
            voter,
            candidate_name: candidate_name.to_string(),
            timestamp,
        };
        tx.create(address, encode_record(&receipt)?)?;
        Ok(receipt)
    }
}
