//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for storage and time.

mod clock;
mod memory_store;

pub use clock::{FixedTimeSource, SystemTimeSource};
pub use memory_store::InMemoryAccountStore;
