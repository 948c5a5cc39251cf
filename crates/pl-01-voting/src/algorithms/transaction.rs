//! # Ledger Transactions
//!
//! A transaction locks the stripes of its declared key set, reads through
//! its own staged writes, and commits everything with one
//! [`AccountStore::commit`]. Dropping it without committing discards the
//! staged writes, so a failed validation never leaves a partial write.

use super::key_locks::{KeyGuard, KeyLocks};
use crate::domain::{Address, VotingError};
use crate::ports::{AccountStore, RecordSource, WriteBatch};

/// Open unit of work over a locked key set.
pub struct LedgerTransaction<'a, S: AccountStore + ?Sized> {
    store: &'a S,
    batch: WriteBatch,
    _guard: KeyGuard<'a>,
}

impl<'a, S: AccountStore + ?Sized> LedgerTransaction<'a, S> {
    /// Lock `keys` and open a transaction against `store`.
    ///
    /// Writes are only serialized against other transactions that declare
    /// an address on the same stripe, so `keys` must name every address
    /// whose existence or contents the caller's decision depends on.
    pub fn begin(store: &'a S, locks: &'a KeyLocks, keys: &[Address]) -> Self {
        Self {
            store,
            batch: WriteBatch::new(),
            _guard: locks.lock(keys),
        }
    }

    /// Stage a new record.
    pub fn create(&mut self, address: Address, bytes: Vec<u8>) -> Result<(), VotingError> {
        self.batch.create(address, bytes)
    }

    /// Stage a replacement of an existing record.
    pub fn update(&mut self, address: Address, bytes: Vec<u8>) {
        self.batch.update(address, bytes);
    }

    /// Number of staged writes.
    pub fn pending_writes(&self) -> usize {
        self.batch.len()
    }

    /// Apply all staged writes atomically and release the locks.
    ///
    /// Returns the number of writes applied.
    pub fn commit(self) -> Result<usize, VotingError> {
        let Self {
            store,
            batch,
            _guard,
        } = self;
        let applied = batch.len();
        if applied > 0 {
            store.commit(batch)?;
        }
        Ok(applied)
    }
}

impl<S: AccountStore + ?Sized> RecordSource for LedgerTransaction<'_, S> {
    fn read(&self, address: &Address) -> Result<Option<Vec<u8>>, VotingError> {
        if let Some(staged) = self.batch.staged(address) {
            return Ok(Some(staged.to_vec()));
        }
        self.store.read(address)
    }
}
