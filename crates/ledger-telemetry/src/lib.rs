//! # Ledger Telemetry
//!
//! Structured logging bootstrap for the Poll Ledger.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledger_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!
//!     // Ledger operations now emit `[pl-01]` events
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PL_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `PL_JSON_LOGS` | `false` | JSON formatted output |
//! | `PL_SERVICE_NAME` | `poll-ledger` | Service name in events |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The configuration could not be turned into a subscriber.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize structured logging.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let installed = logging::init_logging(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
        installed,
    })
}

/// Guard returned by [`init_telemetry`]. Logs shutdown when dropped.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
    installed: bool,
}

impl TelemetryGuard {
    /// Whether this call installed the global subscriber.
    pub fn installed(&self) -> bool {
        self.installed
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if self.installed {
            tracing::info!(service = %self.service_name, "Shutting down telemetry...");
        }
    }
}
