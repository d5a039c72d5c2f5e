// Shared transport configuration for building reqwest::Client instances.
//
// The management service expects `application/json; charset=UTF-8` on
// every request, so the charset-qualified content type is installed as a
// default header rather than repeated per call site.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout. Must be finite -- a hung call would otherwise
    /// stall the cycle scheduler indefinitely.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=UTF-8"),
        );

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("essmaint/0.1.0")
            .default_headers(headers)
            .build()?;

        Ok(client)
    }
}
