// Management API HTTP client
//
// Wraps `reqwest::Client` with endpoint URL construction and envelope
// unwrapping. The endpoint methods (login, systems, command) live in
// separate files as inherent impls to keep this module focused on
// transport mechanics.

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::auth::AccessToken;
use crate::error::Error;
use crate::models::Envelope;
use crate::transport::TransportConfig;

/// Raw HTTP client for the ESS management service.
///
/// Handles the `{ code, data }` envelope: HTTP statuses >= 400 surface as
/// [`Error::Http`], an envelope `code` other than 200 as [`Error::Api`].
/// All methods return unwrapped `data` payloads -- the envelope is
/// stripped before the caller sees it.
#[derive(Clone)]
pub struct MaintClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MaintClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the service API root (e.g. `http://host:8000/api`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL for an endpoint path.
    pub(crate) fn endpoint_url(&self, path: &str) -> Url {
        let full = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&full).expect("invalid endpoint URL")
    }

    /// Send a POST request and unwrap the `{ code, data }` envelope.
    ///
    /// Returns the raw `data` value (absent or null becomes `None`);
    /// endpoint methods decode it into their own payload shape.
    pub(crate) async fn post_envelope(
        &self,
        path: &str,
        body: &impl Serialize,
        token: Option<&AccessToken>,
    ) -> Result<Option<serde_json::Value>, Error> {
        let url = self.endpoint_url(path);
        debug!("POST {}", url);

        let mut request = self.http.post(url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }

        let resp = request.send().await.map_err(Error::Transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;

        if status.as_u16() >= 400 {
            return Err(Error::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: Envelope =
            serde_json::from_str(&text).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: text.clone(),
            })?;

        if envelope.code != 200 {
            return Err(Error::Api {
                code: envelope.code,
                body: text,
            });
        }

        Ok(envelope.data.filter(|v| !v.is_null()))
    }
}
