//! # Record Codec
//!
//! Stored layout of every record:
//!
//! ```text
//! [kind: u8][version: u8][bincode payload]
//! ```
//!
//! The discriminator lets readers tell record kinds apart inside the single
//! shared address space.

use crate::domain::{
    Address, Candidate, CandidateSlot, Poll, RecordKind, VoterReceipt, VotingError,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Current payload version for all record kinds.
pub const RECORD_VERSION: u8 = 1;

/// Length of the envelope header.
pub const HEADER_LEN: usize = 2;

/// A type stored in the ledger.
pub trait Record: Serialize + DeserializeOwned {
    /// Discriminator written in the envelope.
    const KIND: RecordKind;
}

impl Record for Poll {
    const KIND: RecordKind = RecordKind::Poll;
}

impl Record for Candidate {
    const KIND: RecordKind = RecordKind::Candidate;
}

impl Record for VoterReceipt {
    const KIND: RecordKind = RecordKind::VoterReceipt;
}

impl Record for CandidateSlot {
    const KIND: RecordKind = RecordKind::CandidateSlot;
}

/// Encode a record with its envelope.
pub fn encode_record<R: Record>(record: &R) -> Result<Vec<u8>, VotingError> {
    let payload = bincode::serialize(record)
        .map_err(|e| VotingError::Storage(format!("encode {}: {}", R::KIND, e)))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.push(R::KIND as u8);
    bytes.push(RECORD_VERSION);
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode a record stored at `address`, checking kind and version.
pub fn decode_record<R: Record>(address: &Address, bytes: &[u8]) -> Result<R, VotingError> {
    let corrupt = |reason: String| VotingError::CorruptRecord {
        address: *address,
        reason,
    };

    let (kind, version, payload) = match bytes {
        [kind, version, payload @ ..] => (*kind, *version, payload),
        _ => return Err(corrupt(format!("truncated envelope ({} bytes)", bytes.len()))),
    };

    match RecordKind::from_byte(kind) {
        Some(found) if found == R::KIND => {}
        Some(found) => return Err(corrupt(format!("expected {}, found {}", R::KIND, found))),
        None => return Err(corrupt(format!("unknown record kind {}", kind))),
    }

    if version != RECORD_VERSION {
        return Err(corrupt(format!("unsupported {} version {}", R::KIND, version)));
    }

    bincode::deserialize(payload).map_err(|e| corrupt(e.to_string()))
}

/// Kind of an encoded record, if the header is readable.
pub fn peek_kind(bytes: &[u8]) -> Option<RecordKind> {
    bytes.first().copied().and_then(RecordKind::from_byte)
}
