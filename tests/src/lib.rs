//! # Poll Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmark bodies
//! │   └── pl_01_voting.rs
//! │
//! └── integration/      # End-to-end flows through the public API
//!     ├── flows.rs      # Single-threaded poll lifecycles
//!     └── concurrency.rs# Racing callers on shared keys
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p pl-tests
//!
//! # By category
//! cargo test -p pl-tests integration::flows
//! cargo test -p pl-tests integration::concurrency
//!
//! # Benchmarks
//! cargo bench -p pl-tests
//! ```

pub mod integration;

use ledger_telemetry::{init_telemetry, TelemetryConfig, TelemetryGuard};
use pl_01_voting::{
    FixedTimeSource, Identity, InMemoryAccountStore, LedgerConfig, PollLedgerApi,
    VotingStateMachine,
};
use std::sync::Arc;

/// Ledger type every scenario runs against.
pub type TestLedger = VotingStateMachine<InMemoryAccountStore, FixedTimeSource>;

/// Install test logging once. Later calls are no-ops.
pub fn init_test_logging() -> Option<TelemetryGuard> {
    init_telemetry(TelemetryConfig::for_tests("warn")).ok()
}

/// Fresh in-memory ledger with its clock at `now`.
pub fn new_ledger(now: i64) -> Arc<TestLedger> {
    let ledger = VotingStateMachine::with_clock(
        Arc::new(InMemoryAccountStore::new()),
        LedgerConfig::default(),
        FixedTimeSource::new(now),
    );
    match ledger {
        Ok(ledger) => Arc::new(ledger),
        Err(e) => panic!("default config rejected: {}", e),
    }
}

/// Deterministic identity for index `n`.
pub fn identity(n: u64) -> Identity {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&n.to_le_bytes());
    bytes[31] = 0xEE;
    Identity::new(bytes)
}

/// Random identity.
pub fn random_identity() -> Identity {
    Identity::new(rand::random())
}

/// Create poll `poll_id` open over `[start, end)` with `candidates`, all
/// administered by `admin`.
pub fn seed_poll(
    ledger: &TestLedger,
    poll_id: u64,
    start: i64,
    end: i64,
    admin: Identity,
    candidates: &[&str],
) {
    if let Err(e) = ledger.initialize(poll_id, "Test Poll", start, end, admin) {
        panic!("seed poll {}: {}", poll_id, e);
    }
    for name in candidates {
        if let Err(e) = ledger.initialize_candidate(poll_id, name, admin) {
            panic!("seed candidate {}: {}", name, e);
        }
    }
}
