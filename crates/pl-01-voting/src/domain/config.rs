//! Ledger configuration.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Default bound for poll descriptions, in bytes.
pub const DEFAULT_MAX_DESCRIPTION_LEN: usize = 50;

/// Default bound for candidate names, in bytes.
pub const DEFAULT_MAX_CANDIDATE_NAME_LEN: usize = 50;

/// Default number of lock stripes.
pub const DEFAULT_LOCK_STRIPES: usize = 256;

/// Invalid configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A bound or count that must be positive is zero.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Configuration for a ledger instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Deployment salt mixed into every derived address.
    pub program_id: [u8; 32],
    /// Maximum poll description length in bytes.
    pub max_description_len: usize,
    /// Maximum candidate name length in bytes.
    pub max_candidate_name_len: usize,
    /// Number of striped key locks.
    pub lock_stripes: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            program_id: [0u8; 32],
            max_description_len: DEFAULT_MAX_DESCRIPTION_LEN,
            max_candidate_name_len: DEFAULT_MAX_CANDIDATE_NAME_LEN,
            lock_stripes: DEFAULT_LOCK_STRIPES,
        }
    }
}

impl LedgerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PL_PROGRAM_ID`: 64 hex characters (default: all zeroes)
    /// - `PL_MAX_DESCRIPTION_LEN`: description bound (default: 50)
    /// - `PL_MAX_CANDIDATE_NAME_LEN`: candidate name bound (default: 50)
    /// - `PL_LOCK_STRIPES`: lock stripe count (default: 256)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            program_id: env::var("PL_PROGRAM_ID")
                .ok()
                .and_then(|v| parse_program_id(&v))
                .unwrap_or(defaults.program_id),

            max_description_len: env::var("PL_MAX_DESCRIPTION_LEN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_description_len),

            max_candidate_name_len: env::var("PL_MAX_CANDIDATE_NAME_LEN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_candidate_name_len),

            lock_stripes: env::var("PL_LOCK_STRIPES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.lock_stripes),
        }
    }

    /// Builder-style program id override.
    pub fn with_program_id(mut self, program_id: [u8; 32]) -> Self {
        self.program_id = program_id;
        self
    }

    /// Check that all bounds are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_description_len == 0 {
            return Err(ConfigError::Zero("max_description_len"));
        }
        if self.max_candidate_name_len == 0 {
            return Err(ConfigError::Zero("max_candidate_name_len"));
        }
        if self.lock_stripes == 0 {
            return Err(ConfigError::Zero("lock_stripes"));
        }
        Ok(())
    }
}

fn parse_program_id(value: &str) -> Option<[u8; 32]> {
    let bytes = hex::decode(value.trim()).ok()?;
    bytes.try_into().ok()
}
