//! # Algorithms Module
//!
//! Address derivation, record encoding, key locking and transactions.

pub mod address;
pub mod codec;
pub mod key_locks;
pub mod transaction;

pub use address::{encode_u64, AddressDeriver, LedgerKey, ADDRESS_DOMAIN_TAG};
pub use codec::{decode_record, encode_record, peek_kind, Record, RECORD_VERSION};
pub use key_locks::{KeyGuard, KeyLocks};
pub use transaction::LedgerTransaction;
