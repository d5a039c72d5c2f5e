use thiserror::Error;

/// Top-level error type for the `essmaint-api` crate.
///
/// The management API has two distinct failure layers: HTTP-level errors
/// (any status >= 400) and application-level errors (a JSON body whose
/// `code` field is not 200). They are kept as separate variants because
/// callers treat them differently -- `essmaint-core` maps both into its
/// own error taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    /// Login failed (wrong credentials, rejected session, unparsable reply).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The service answered with an HTTP error status (>= 400).
    #[error("Service error (HTTP {status}): {body}")]
    Http { status: u16, body: String },

    /// The service answered 200 OK but the envelope `code` was not 200.
    #[error("Service rejected request (code {code}): {body}")]
    Api { code: i64, body: String },

    /// The payload was present but matched neither accepted shape.
    #[error("Unexpected payload shape: {context}")]
    Schema { context: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a network-level failure (including
    /// timeouts) as opposed to a response the service actually produced.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
