//! # PL-01 Poll Ledger
//!
//! Time-bounded polls with one vote per voter, stored as records in a single
//! address-keyed account store.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Validate and atomically apply poll creation, candidate registration and
//! vote casting:
//! - Deterministic SHA-256 record addresses per logical key
//! - Striped per-key locks, no global lock
//! - All-or-nothing commits through a staged write batch
//!
//! ## Guarantees
//!
//! | Guarantee | Mechanism |
//! |-----------|-----------|
//! | One vote per voter per poll | Receipt check-and-create under the receipt's lock |
//! | Vote counted iff receipt exists | Receipt and increment commit in one batch |
//! | No silent overwrites | Store re-checks create/update preconditions |
//! | Votes only in `[start, end)` | `invariant_poll_active` before locking |
//!
//! ## Module Structure
//!
//! ```text
//! pl-01-voting/
//! ├── domain/          # Poll, Candidate, VoterReceipt, errors, config
//! ├── algorithms/      # Address derivation, codec, key locks, transactions
//! ├── ports/           # PollLedgerApi, AccountStore, TimeSource
//! ├── adapters/        # In-memory store, clocks
//! ├── stores/          # Typed views over the account store
//! └── service.rs       # VotingStateMachine
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;
pub mod stores;

// Re-exports
pub use adapters::{FixedTimeSource, InMemoryAccountStore, SystemTimeSource};
pub use algorithms::{
    decode_record, encode_record, AddressDeriver, KeyLocks, LedgerKey, LedgerTransaction,
    ADDRESS_DOMAIN_TAG, RECORD_VERSION,
};
pub use domain::{
    Address, Candidate, CandidateSlot, CandidateTally, ConfigError, Identity, LedgerConfig, Poll,
    PollId, PollPhase, PollTally, RecordKind, UnixTimestamp, VoterReceipt, VotingError,
    ALREADY_VOTED_CODE,
};
pub use ports::{AccountStore, PollLedgerApi, RecordSource, TimeSource, WriteBatch, WriteOp};
pub use service::VotingStateMachine;
pub use stores::{CandidateStore, PollStore, VoterReceiptStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
