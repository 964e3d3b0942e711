//! Client-credentials token module.
//!
//! Provides the types and client for one OAuth2 client-credentials exchange
//! against an identity provider's token endpoint (Keycloak-shaped URLs, but
//! any endpoint speaking the standard form-encoded grant works).
//!
//! Design:
//! - `Credentials` carries the client id/secret pair; the secret never
//!   appears in `Debug` output or logs.
//! - `TokenClient` handles HTTP and basic error mapping; persistence is
//!   implemented by the `store` layer.
//! - Errors are unified via `Error`. The two conditions callers recover
//!   from locally (non-200 status, missing/empty `access_token` on a 200)
//!   are their own variants so they can be matched without string parsing.
//!
//! Wire shape:
//! - POST {token_url} with `Content-Type: application/x-www-form-urlencoded`
//!   and body fields `client_id`, `client_secret`, `grant_type=client_credentials`.
//! - Success: HTTP 200 with a JSON object carrying `access_token`.
//!
//! Example (pseudo usage):
//! ```ignore
//! use kcauth_rs::{Credentials, TokenClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TokenClient::default();
//!     let token = client
//!         .fetch_access_token(
//!             "https://sso.example.com/realms/main/protocol/openid-connect/token",
//!             &Credentials::new("service-account", "s3cr3t"),
//!         )
//!         .await?;
//!     println!("token: {}", token.access_token);
//!     Ok(())
//! }
//! ```

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

/// OAuth2 client-credentials identity (client id + secret).
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Access the secret for request building. Do not log the result.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

// Manual Debug so the secret cannot leak through `{:?}` formatting.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

/// Successful token endpoint response.
///
/// Only `access_token` is consumed downstream; Keycloak also returns
/// `expires_in` and `token_type`, kept here as passthrough fields.
#[derive(Clone, Debug, Deserialize)]
pub struct AccessToken {
    /// Access token string
    pub access_token: String,
    /// Expiration in seconds, when the provider reports one
    #[serde(default)]
    pub expires_in: Option<u32>,
    /// Usually "Bearer"
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Raw 200-response body: `access_token` may be absent or empty, which is a
/// recoverable condition rather than a decode failure.
#[derive(Clone, Debug, Deserialize)]
struct TokenRawResp {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u32>,
    #[serde(default)]
    token_type: Option<String>,
}

/// Unified error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("token request failed with status code {status}")]
    Status { status: u16, body: String },

    #[error("access token not found in the response")]
    MissingToken,

    #[error("unexpected token response (status {status}): {error}; body: {body}")]
    UnexpectedTokenResponse {
        status: u16,
        error: String,
        body: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Token endpoint client.
///
/// - Wraps `reqwest::Client`
/// - Performs the client-credentials exchange (no caching/auto-refresh)
#[derive(Clone, Debug)]
pub struct TokenClient {
    http: reqwest::Client,
}

impl Default for TokenClient {
    fn default() -> Self {
        let http = reqwest::Client::builder()
            .gzip(true)
            .build()
            .expect("reqwest::Client build must succeed");
        Self { http }
    }
}

impl TokenClient {
    /// Use a custom `reqwest::Client`
    pub fn with_http(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Exchange client credentials for an access token.
    ///
    /// POST {token_url}, form-encoded body:
    /// `client_id`, `client_secret`, `grant_type=client_credentials`
    /// (do not log secrets).
    #[instrument(level = "debug", skip(self, creds))]
    pub async fn fetch_access_token(
        &self,
        token_url: &str,
        creds: &Credentials,
    ) -> Result<AccessToken> {
        let url = Url::parse(token_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        debug!(
            "Requesting client-credentials access_token (no secrets), client_id hint: {}",
            redact_id(&creds.client_id)
        );

        let form = [
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret()),
            ("grant_type", "client_credentials"),
        ];

        let resp = self.http.post(url).form(&form).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if status.as_u16() != 200 {
            return Err(Error::Status {
                status: status.as_u16(),
                body: redacted_body(&bytes),
            });
        }

        match serde_json::from_slice::<TokenRawResp>(&bytes) {
            Ok(raw) => match raw.access_token {
                Some(token) if !token.is_empty() => Ok(AccessToken {
                    access_token: token,
                    expires_in: raw.expires_in,
                    token_type: raw.token_type,
                }),
                _ => Err(Error::MissingToken),
            },
            Err(de_err) => Err(Error::UnexpectedTokenResponse {
                status: status.as_u16(),
                error: de_err.to_string(),
                body: redacted_body(&bytes),
            }),
        }
    }
}

/// Redact and truncate a response body before it is stored in an error, so
/// diagnostics never carry a full token.
fn redacted_body(bytes: &[u8]) -> String {
    let mut body = String::from_utf8_lossy(bytes).to_string();
    if let Ok(mut v) = serde_json::from_str::<serde_json::Value>(&body) {
        if let Some(obj) = v.as_object_mut() {
            if obj.get("access_token").is_some() {
                obj.insert(
                    "access_token".to_string(),
                    serde_json::Value::String("[redacted]".into()),
                );
            }
        }
        if let Ok(s) = serde_json::to_string(&v) {
            body = s;
        }
    }
    if body.len() > 2048 {
        // back off to a char boundary; truncate panics mid-codepoint
        let mut cut = 2048;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}

/// Shorten an identifier for safe logging.
pub(crate) fn redact_id(id: &str) -> String {
    let n = id.chars().count();
    if n <= 4 {
        format!("{}***", id)
    } else {
        let head: String = id.chars().take(2).collect();
        let tail: String = id.chars().skip(n - 2).collect();
        format!("{}***{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_secret() {
        let creds = Credentials::new("svc", "topsecret");
        let dbg = format!("{:?}", creds);
        assert!(dbg.contains("svc"));
        assert!(!dbg.contains("topsecret"));
        assert!(dbg.contains("[redacted]"));
    }

    #[test]
    fn redact_id_keeps_edges_only() {
        assert_eq!(redact_id("abc"), "abc***");
        assert_eq!(redact_id("service-account"), "se***nt");
    }

    #[test]
    fn redact_id_handles_multibyte_ids() {
        assert_eq!(redact_id("überclient"), "üb***nt");
        assert_eq!(redact_id("日本語クライアント"), "日本***ント");
        assert_eq!(redact_id("日本"), "日本***");
    }

    #[test]
    fn redacted_body_hides_token_and_truncates() {
        let body = redacted_body(br#"{"access_token":"abc123","expires_in":300}"#);
        assert!(!body.contains("abc123"));
        assert!(body.contains("[redacted]"));

        let long = format!("x{}", "y".repeat(4096));
        let out = redacted_body(long.as_bytes());
        assert!(out.len() <= 2048 + 3);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn redacted_body_truncates_on_char_boundary() {
        // multibyte char straddling the 2048-byte cut, as in a localized
        // HTML error page
        let mut page = "a".repeat(2047);
        page.push('é');
        page.push_str(&"b".repeat(512));
        let out = redacted_body(page.as_bytes());
        assert!(out.ends_with("..."));
        assert!(out.len() <= 2048 + 3);
        assert!(!out.contains('é'));
    }

    #[test]
    fn raw_resp_tolerates_missing_fields() {
        let raw: TokenRawResp = serde_json::from_str("{}").unwrap();
        assert!(raw.access_token.is_none());
        let raw: TokenRawResp =
            serde_json::from_str(r#"{"access_token":"t","expires_in":60}"#).unwrap();
        assert_eq!(raw.access_token.as_deref(), Some("t"));
        assert_eq!(raw.expires_in, Some(60));
    }
}
