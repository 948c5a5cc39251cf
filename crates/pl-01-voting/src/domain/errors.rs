//! # Domain Errors
//!
//! Error types for the Poll Voting Ledger.
//!
//! Every variant carries a stable numeric code. Codes start at 6000 and are
//! part of the external contract: callers match on `code()`, not on the
//! message text.

use super::value_objects::RecordKind;
use thiserror::Error;

/// Storage address (32-byte SHA-256 output).
pub type Address = [u8; 32];

/// Poll identifier.
pub type PollId = u64;

/// Unix timestamp in seconds.
pub type UnixTimestamp = i64;

/// Stable code of [`VotingError::AlreadyVoted`].
pub const ALREADY_VOTED_CODE: u32 = 6003;

/// Voting ledger error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VotingError {
    /// Poll window is empty or inverted.
    #[error("Invalid time range: start {start_time} must be before end {end_time}")]
    InvalidTimeRange {
        /// Requested start time
        start_time: UnixTimestamp,
        /// Requested end time
        end_time: UnixTimestamp,
    },

    /// Vote submitted before the poll opened.
    #[error("Poll has not started")]
    PollNotStarted,

    /// Requester is not the poll admin.
    #[error("Only owner can perform this action")]
    Unauthorized,

    /// Voter already holds a receipt for this poll.
    #[error("You have already voted in this poll.")]
    AlreadyVoted,

    /// Vote submitted at or after the poll's end time.
    #[error("Poll has ended")]
    PollEnded,

    /// No candidate with that name under the poll.
    #[error("Candidate not found: {name}")]
    CandidateNotFound {
        /// Requested candidate name
        name: String,
    },

    /// No poll with that id.
    #[error("Poll not found: {poll_id}")]
    NotFound {
        /// Requested poll id
        poll_id: PollId,
    },

    /// A record already exists at the derived address.
    #[error("{kind} already initialized at {}", hex::encode(.address))]
    AlreadyInitialized {
        /// Kind of record that exists
        kind: RecordKind,
        /// Derived address
        address: Address,
    },

    /// Poll description exceeds the configured bound.
    #[error("Description too long: {len} bytes, max {max}")]
    DescriptionTooLong {
        /// Actual length in bytes
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Candidate name exceeds the configured bound.
    #[error("Candidate name too long: {len} bytes, max {max}")]
    CandidateNameTooLong {
        /// Actual length in bytes
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Stored poll does not carry the id it was addressed by.
    #[error("Poll account mismatch: expected {expected}, found {found}")]
    PollMismatch {
        /// Requested poll id
        expected: PollId,
        /// Id found in the stored record
        found: PollId,
    },

    /// Stored bytes could not be decoded as the expected record.
    #[error("Corrupt record at {}: {reason}", hex::encode(.address))]
    CorruptRecord {
        /// Address of the record
        address: Address,
        /// Decoder message
        reason: String,
    },

    /// A commit precondition did not hold; nothing was written.
    #[error("Write conflict at {}", hex::encode(.address))]
    WriteConflict {
        /// Address whose precondition failed
        address: Address,
    },

    /// Backing store failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl VotingError {
    /// Stable numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidTimeRange { .. } => 6000,
            Self::PollNotStarted => 6001,
            Self::Unauthorized => 6002,
            Self::AlreadyVoted => ALREADY_VOTED_CODE,
            Self::PollEnded => 6004,
            Self::CandidateNotFound { .. } => 6005,
            Self::NotFound { .. } => 6006,
            Self::AlreadyInitialized { .. } => 6007,
            Self::DescriptionTooLong { .. } => 6008,
            Self::CandidateNameTooLong { .. } => 6009,
            Self::PollMismatch { .. } => 6010,
            Self::CorruptRecord { .. } => 6011,
            Self::WriteConflict { .. } => 6012,
            Self::Storage(_) => 6013,
        }
    }

    /// True for rejections caused by the request itself rather than by
    /// storage. A retry of the same request yields the same error.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            Self::CorruptRecord { .. } | Self::WriteConflict { .. } | Self::Storage(_)
        )
    }
}
