//! # Striped Key Locks
//!
//! Mutual exclusion per address without a lock per address.
//!
//! Each address maps to one of a fixed number of stripes. A caller locking
//! several addresses takes the distinct stripes in ascending order, so two
//! callers can never wait on each other in a cycle. Unrelated keys only
//! contend when they happen to share a stripe.

use crate::domain::Address;
use parking_lot::{Mutex, MutexGuard};

/// Fixed table of stripe locks.
pub struct KeyLocks {
    stripes: Box<[Mutex<()>]>,
}

impl KeyLocks {
    /// Create `stripes` locks (at least one).
    pub fn new(stripes: usize) -> Self {
        let count = stripes.max(1);
        Self {
            stripes: (0..count).map(|_| Mutex::new(())).collect(),
        }
    }

    /// Number of stripes.
    pub fn stripe_count(&self) -> usize {
        self.stripes.len()
    }

    /// Stripe index guarding `address`.
    pub fn stripe_of(&self, address: &Address) -> usize {
        let [a, b, c, d, e, f, g, h, ..] = *address;
        let prefix = u64::from_le_bytes([a, b, c, d, e, f, g, h]);
        (prefix % self.stripes.len() as u64) as usize
    }

    /// Lock every stripe covering `addresses`. Blocks until all are held.
    pub fn lock(&self, addresses: &[Address]) -> KeyGuard<'_> {
        let mut indices: Vec<usize> = addresses.iter().map(|a| self.stripe_of(a)).collect();
        indices.sort_unstable();
        indices.dedup();

        let guards = indices.iter().map(|&i| self.stripes[i].lock()).collect();
        KeyGuard {
            stripes: indices,
            _guards: guards,
        }
    }
}

impl Default for KeyLocks {
    fn default() -> Self {
        Self::new(crate::domain::DEFAULT_LOCK_STRIPES)
    }
}

/// Held stripes. Released on drop.
pub struct KeyGuard<'a> {
    stripes: Vec<usize>,
    _guards: Vec<MutexGuard<'a, ()>>,
}

impl KeyGuard<'_> {
    /// Held stripe indices in acquisition order.
    pub fn stripes(&self) -> &[usize] {
        &self.stripes
    }
}
