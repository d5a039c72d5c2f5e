//! Binary error types with miette diagnostics.
//!
//! Maps `ConfigError` and `CoreError` into user-facing errors with
//! actionable help text and per-variant exit codes.

use miette::Diagnostic;
use thiserror::Error;

use essmaint_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const CONFIG: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const INVENTORY: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(essmaint::config),
        help(
            "Create a config file at {path} or set ESSMAINT_* environment \
             variables (ESSMAINT_BASE_URL, ESSMAINT_USERNAME, ESSMAINT_PASSWORD)."
        )
    )]
    Config { message: String, path: String },

    #[error("Authentication failed")]
    #[diagnostic(
        code(essmaint::auth_failed),
        help("Verify the configured username and password: {message}")
    )]
    AuthFailed { message: String },

    #[error("Could not reach the management service")]
    #[diagnostic(
        code(essmaint::connection_failed),
        help("Check base_url and network connectivity: {reason}")
    )]
    Connection { reason: String },

    #[error("Inventory file unreadable: {path}")]
    #[diagnostic(
        code(essmaint::inventory),
        help("The inventory is a plain text file, one serial per line.")
    )]
    Inventory { path: String },

    #[error("Service error: {message}")]
    #[diagnostic(code(essmaint::api_error))]
    Api { message: String },
}

impl AppError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => exit_code::CONFIG,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::Inventory { .. } => exit_code::INVENTORY,
            Self::Api { .. } => exit_code::GENERAL,
        }
    }
}

impl From<essmaint_config::ConfigError> for AppError {
    fn from(err: essmaint_config::ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
            path: essmaint_config::config_path().display().to_string(),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::ConnectionFailed { reason } => Self::Connection { reason },
            CoreError::Inventory { path, source } => Self::Inventory {
                path: format!("{} ({source})", path.display()),
            },
            CoreError::Api { message } => Self::Api { message },
            CoreError::Config { message } => Self::Config {
                message,
                path: essmaint_config::config_path().display().to_string(),
            },
        }
    }
}
