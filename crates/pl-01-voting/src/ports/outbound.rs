//! # Outbound Ports
//!
//! Traits for what the ledger needs from its host: a keyed byte store and a
//! clock.

use crate::domain::{Address, UnixTimestamp, VotingError};

/// Read access to raw record bytes by address.
pub trait RecordSource {
    /// Bytes stored at `address`, if any.
    fn read(&self, address: &Address) -> Result<Option<Vec<u8>>, VotingError>;

    /// Whether a record exists at `address`.
    fn contains(&self, address: &Address) -> Result<bool, VotingError> {
        Ok(self.read(address)?.is_some())
    }
}

/// Address-keyed record store - outbound port.
///
/// Implementations must apply a [`WriteBatch`] atomically: either every
/// operation becomes visible or none does.
pub trait AccountStore: RecordSource + Send + Sync {
    /// Apply `batch`. Each op's precondition is re-checked; if any fails the
    /// store returns `WriteConflict` and writes nothing.
    fn commit(&self, batch: WriteBatch) -> Result<(), VotingError>;
}

/// A single staged write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOp {
    /// Write a new record. Requires the address to be empty.
    Create {
        /// Target address
        address: Address,
        /// Encoded record
        bytes: Vec<u8>,
    },
    /// Replace an existing record. Requires the address to be occupied.
    Update {
        /// Target address
        address: Address,
        /// Encoded record
        bytes: Vec<u8>,
    },
}

impl WriteOp {
    /// Target address.
    pub fn address(&self) -> &Address {
        match self {
            Self::Create { address, .. } | Self::Update { address, .. } => address,
        }
    }

    /// Encoded record.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Create { bytes, .. } | Self::Update { bytes, .. } => bytes,
        }
    }
}

/// Ordered set of writes committed as one unit. At most one op per address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a create. Staging a second create for the same address is a
    /// conflict.
    pub fn create(&mut self, address: Address, bytes: Vec<u8>) -> Result<(), VotingError> {
        if self.position(&address).is_some() {
            return Err(VotingError::WriteConflict { address });
        }
        self.ops.push(WriteOp::Create { address, bytes });
        Ok(())
    }

    /// Stage an update. Updating an address already staged in this batch
    /// replaces the staged bytes and keeps the staged op kind.
    pub fn update(&mut self, address: Address, bytes: Vec<u8>) {
        match self.position(&address) {
            Some(i) => match &mut self.ops[i] {
                WriteOp::Create { bytes: staged, .. } | WriteOp::Update { bytes: staged, .. } => {
                    *staged = bytes
                }
            },
            None => self.ops.push(WriteOp::Update { address, bytes }),
        }
    }

    /// Staged bytes for `address`.
    pub fn staged(&self, address: &Address) -> Option<&[u8]> {
        self.position(address).map(|i| self.ops[i].bytes())
    }

    /// Staged operations in order.
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Consume into operations.
    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }

    /// Number of staged operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn position(&self, address: &Address) -> Option<usize> {
        self.ops.iter().position(|op| op.address() == address)
    }
}

/// Clock - outbound port.
pub trait TimeSource: Send + Sync {
    /// Current Unix time in seconds.
    fn now(&self) -> UnixTimestamp;
}
