//! # Typed Stores
//!
//! Views over the shared address space. Each store derives the addresses of
//! its own record kind and encodes/decodes through the record codec; the
//! bytes all live in one [`AccountStore`](crate::ports::AccountStore).
//!
//! Mutating operations take an open [`LedgerTransaction`](crate::LedgerTransaction)
//! and only stage writes. Nothing is visible until the caller commits.

pub mod candidate_store;
pub mod poll_store;
pub mod receipt_store;

pub use candidate_store::{CandidateAccount, CandidateStore};
pub use poll_store::{PollAccount, PollStore};
pub use receipt_store::VoterReceiptStore;

use crate::algorithms::{decode_record, Record};
use crate::domain::{Address, VotingError};
use crate::ports::RecordSource;

/// Read and decode the record at `address`.
pub(crate) fn load<R, S>(source: &S, address: &Address) -> Result<Option<R>, VotingError>
where
    R: Record,
    S: RecordSource + ?Sized,
{
    match source.read(address)? {
        Some(bytes) => decode_record(address, &bytes).map(Some),
        None => Ok(None),
    }
}
