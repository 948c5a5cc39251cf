//! In-memory Account Store Adapter
//!
//! Implements `AccountStore` with a single map behind a reader-writer lock.
//! The write lock is held only while a batch is checked and applied;
//! serialization of business decisions happens earlier, in the stripe locks.

use crate::domain::{Address, VotingError};
use crate::ports::{AccountStore, RecordSource, WriteBatch, WriteOp};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// In-memory address-keyed record store.
#[derive(Default)]
pub struct InMemoryAccountStore {
    records: RwLock<HashMap<Address, Vec<u8>>>,
}

impl InMemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Copy of every record, for comparing states in tests and audits.
    pub fn snapshot(&self) -> HashMap<Address, Vec<u8>> {
        self.records.read().clone()
    }

    /// Write bytes directly, bypassing batch preconditions.
    ///
    /// For seeding fixtures and simulating corrupted storage.
    pub fn insert_raw(&self, address: Address, bytes: Vec<u8>) {
        self.records.write().insert(address, bytes);
    }
}

impl RecordSource for InMemoryAccountStore {
    fn read(&self, address: &Address) -> Result<Option<Vec<u8>>, VotingError> {
        Ok(self.records.read().get(address).cloned())
    }

    fn contains(&self, address: &Address) -> Result<bool, VotingError> {
        Ok(self.records.read().contains_key(address))
    }
}

impl AccountStore for InMemoryAccountStore {
    fn commit(&self, batch: WriteBatch) -> Result<(), VotingError> {
        let mut records = self.records.write();

        for op in batch.ops() {
            let exists = records.contains_key(op.address());
            let holds = match op {
                WriteOp::Create { .. } => !exists,
                WriteOp::Update { .. } => exists,
            };
            if !holds {
                debug!(
                    "[pl-01] Rejecting batch: precondition failed at {}",
                    hex::encode(op.address())
                );
                return Err(VotingError::WriteConflict {
                    address: *op.address(),
                });
            }
        }

        for op in batch.into_ops() {
            match op {
                WriteOp::Create { address, bytes } | WriteOp::Update { address, bytes } => {
                    records.insert(address, bytes);
                }
            }
        }

        Ok(())
    }
}
