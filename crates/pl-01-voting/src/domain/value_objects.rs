//! # Domain Value Objects
//!
//! Immutable value types for the Poll Voting Ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque 32-byte identity of an admin or voter.
///
/// The ledger never verifies signatures; an `Identity` reaching the core has
/// already been authenticated by the caller.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity([u8; 32]);

impl Identity {
    /// Wrap raw public key bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Identity {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({}..)", &hex::encode(&self.0[..4]))
    }
}

/// Phase of a poll at a given instant.
///
/// Not stored; always derived from the poll window and the caller's clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollPhase {
    /// `now < start_time`.
    Pending,
    /// `start_time <= now < end_time`.
    Active,
    /// `now >= end_time`.
    Closed,
}

impl PollPhase {
    /// Phase of the half-open window `[start_time, end_time)` at `now`.
    pub fn at(start_time: i64, end_time: i64, now: i64) -> Self {
        if now < start_time {
            Self::Pending
        } else if now < end_time {
            Self::Active
        } else {
            Self::Closed
        }
    }

    /// Whether votes are accepted.
    pub fn accepts_votes(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Discriminator written in front of every stored record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RecordKind {
    /// [`crate::Poll`]
    Poll = 1,
    /// [`crate::Candidate`]
    Candidate = 2,
    /// [`crate::VoterReceipt`]
    VoterReceipt = 3,
    /// [`crate::CandidateSlot`]
    CandidateSlot = 4,
}

impl RecordKind {
    /// Decode a discriminator byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::Poll),
            2 => Some(Self::Candidate),
            3 => Some(Self::VoterReceipt),
            4 => Some(Self::CandidateSlot),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Poll => "Poll",
            Self::Candidate => "Candidate",
            Self::VoterReceipt => "VoterReceipt",
            Self::CandidateSlot => "CandidateSlot",
        };
        f.write_str(name)
    }
}
