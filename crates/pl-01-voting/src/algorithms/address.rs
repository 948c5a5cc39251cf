//! # Address Derivation
//!
//! Maps logical keys to 32-byte storage addresses.
//!
//! ## Canonical encoding
//!
//! ```text
//! address = SHA-256(
//!     "pl-ledger/address/v1"
//!     || program_id                          (32 bytes)
//!     || len(namespace) as u32 LE || namespace
//!     || for each part: len(part) as u32 LE || part
//! )
//! ```
//!
//! Integers inside parts are always 8-byte little-endian. Every call site
//! goes through [`LedgerKey`], so a poll id is encoded the same way whether
//! it addresses the poll itself, one of its candidates, or a receipt.

use crate::domain::{Address, Identity, PollId};
use sha2::{Digest, Sha256};

/// Domain tag prefixed to every derivation.
pub const ADDRESS_DOMAIN_TAG: &[u8] = b"pl-ledger/address/v1";

/// Namespace of poll records.
pub const POLL_NAMESPACE: &str = "poll";
/// Namespace of candidate records.
pub const CANDIDATE_NAMESPACE: &str = "candidate";
/// Namespace of voter receipts.
pub const VOTER_RECEIPT_NAMESPACE: &str = "voter_receipt";
/// Namespace of candidate enumeration slots.
pub const CANDIDATE_SLOT_NAMESPACE: &str = "candidate_slot";

/// Canonical byte encoding of an integer key part.
pub fn encode_u64(value: u64) -> [u8; 8] {
    value.to_le_bytes()
}

/// A logical record key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerKey<'a> {
    /// `poll(poll_id)`
    Poll {
        /// Poll id
        poll_id: PollId,
    },
    /// `candidate(poll_id, name)`
    Candidate {
        /// Poll id
        poll_id: PollId,
        /// Candidate name
        name: &'a str,
    },
    /// `voter_receipt(poll_id, voter)`
    VoterReceipt {
        /// Poll id
        poll_id: PollId,
        /// Voter identity
        voter: &'a Identity,
    },
    /// `candidate_slot(poll_id, ordinal)`
    CandidateSlot {
        /// Poll id
        poll_id: PollId,
        /// Creation ordinal
        ordinal: u64,
    },
}

impl LedgerKey<'_> {
    /// Namespace string of this key.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::Poll { .. } => POLL_NAMESPACE,
            Self::Candidate { .. } => CANDIDATE_NAMESPACE,
            Self::VoterReceipt { .. } => VOTER_RECEIPT_NAMESPACE,
            Self::CandidateSlot { .. } => CANDIDATE_SLOT_NAMESPACE,
        }
    }
}

/// Pure, deterministic address derivation bound to one program id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressDeriver {
    program_id: [u8; 32],
}

impl AddressDeriver {
    /// Create a deriver for `program_id`.
    pub fn new(program_id: [u8; 32]) -> Self {
        Self { program_id }
    }

    /// Program id mixed into every address.
    pub fn program_id(&self) -> &[u8; 32] {
        &self.program_id
    }

    /// Derive the address of `(namespace, parts)`.
    pub fn derive(&self, namespace: &str, parts: &[&[u8]]) -> Address {
        let mut hasher = Sha256::new();
        hasher.update(ADDRESS_DOMAIN_TAG);
        hasher.update(self.program_id);
        hasher.update((namespace.len() as u32).to_le_bytes());
        hasher.update(namespace.as_bytes());
        for part in parts {
            hasher.update((part.len() as u32).to_le_bytes());
            hasher.update(part);
        }
        hasher.finalize().into()
    }

    /// Derive the address of a logical key.
    pub fn derive_key(&self, key: &LedgerKey<'_>) -> Address {
        let namespace = key.namespace();
        match *key {
            LedgerKey::Poll { poll_id } => self.derive(namespace, &[&encode_u64(poll_id)]),
            LedgerKey::Candidate { poll_id, name } => {
                self.derive(namespace, &[&encode_u64(poll_id), name.as_bytes()])
            }
            LedgerKey::VoterReceipt { poll_id, voter } => {
                self.derive(namespace, &[&encode_u64(poll_id), voter.as_bytes()])
            }
            LedgerKey::CandidateSlot { poll_id, ordinal } => {
                self.derive(namespace, &[&encode_u64(poll_id), &encode_u64(ordinal)])
            }
        }
    }

    /// Address of a poll.
    pub fn poll(&self, poll_id: PollId) -> Address {
        self.derive_key(&LedgerKey::Poll { poll_id })
    }

    /// Address of a candidate.
    pub fn candidate(&self, poll_id: PollId, name: &str) -> Address {
        self.derive_key(&LedgerKey::Candidate { poll_id, name })
    }

    /// Address of a voter receipt.
    pub fn voter_receipt(&self, poll_id: PollId, voter: &Identity) -> Address {
        self.derive_key(&LedgerKey::VoterReceipt { poll_id, voter })
    }

    /// Address of a candidate slot.
    pub fn candidate_slot(&self, poll_id: PollId, ordinal: u64) -> Address {
        self.derive_key(&LedgerKey::CandidateSlot { poll_id, ordinal })
    }
}

impl Default for AddressDeriver {
    fn default() -> Self {
        Self::new([0u8; 32])
    }
}
