// ── Core error types ──
//
// Failures the cycle engine can surface. Per-state poll failures and
// per-serial command failures never appear here as cycle errors -- the
// poller degrades a failed state to an empty set and the dispatcher
// records the failure and moves on. What remains is fatal to the
// current cycle only; the scheduler always proceeds to the next tick.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The per-cycle login failed. Aborts the cycle before any polling.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// Network-level failure (connection refused, DNS, timeout).
    #[error("Cannot reach service: {reason}")]
    ConnectionFailed { reason: String },

    /// The inventory file could not be read.
    #[error("Inventory file {path} unreadable: {source}")]
    Inventory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The service produced an error response.
    #[error("API error: {message}")]
    Api { message: String },

    /// Invalid engine configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<essmaint_api::Error> for CoreError {
    fn from(err: essmaint_api::Error) -> Self {
        match err {
            essmaint_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            essmaint_api::Error::Transport(e) => CoreError::ConnectionFailed {
                reason: e.to_string(),
            },
            essmaint_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            other => CoreError::Api {
                message: other.to_string(),
            },
        }
    }
}
