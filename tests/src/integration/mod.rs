//! # Integration Tests
//!
//! Scenarios that drive the ledger through `PollLedgerApi` only.

pub mod concurrency;
pub mod flows;
