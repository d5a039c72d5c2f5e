// Session authentication
//
// Every reconciliation cycle logs in once and threads the resulting
// bearer token through its poll and dispatch calls. Tokens are never
// cached or reused across cycles.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::MaintClient;
use crate::error::Error;
use crate::models::LoginData;

/// A short-lived bearer token issued by `/Account/Login`.
///
/// Owned by exactly one reconciliation cycle and discarded at cycle end.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub(crate) fn new(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Redacted -- the token is a credential and must not leak into logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

impl MaintClient {
    /// Authenticate with the service using username/password.
    ///
    /// `POST /Account/Login` with `{username, password}`. Any non-success
    /// reply -- HTTP error, envelope `code` other than 200, or an
    /// unparsable body -- fails with [`Error::Authentication`]; only pure
    /// network failures keep their transport error. No internal retry.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<AccessToken, Error> {
        debug!(username, "logging in");

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let data = self
            .post_envelope("Account/Login", &body, None)
            .await
            .map_err(auth_error)?;

        let data = data.ok_or_else(|| Error::Authentication {
            message: "login response carried no data".into(),
        })?;

        let login: LoginData =
            serde_json::from_value(data).map_err(|e| Error::Authentication {
                message: format!("login response unparsable: {e}"),
            })?;

        debug!("login successful");
        Ok(AccessToken::new(login.access_token))
    }
}

/// Fold service-produced login failures into `Authentication`; transport
/// failures pass through unchanged.
fn auth_error(err: Error) -> Error {
    match err {
        Error::Http { status, body } => Error::Authentication {
            message: format!("login failed (HTTP {status}): {body}"),
        },
        Error::Api { code, body } => Error::Authentication {
            message: format!("login rejected (code {code}): {body}"),
        },
        Error::Deserialization { message, .. } => Error::Authentication {
            message: format!("login response unparsable: {message}"),
        },
        other => other,
    }
}
