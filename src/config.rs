//! Environment-based configuration.
//!
//! All runtime parameters come from environment variables (a `.env` file is
//! honored by the binary via dotenvy). Nothing is compiled in, so the same
//! build can point at production Keycloak or at a mock endpoint in tests.
//!
//! Variables:
//! - `KC_TOKEN_URL`: full token endpoint URL. Takes precedence when set.
//! - `KC_BASE_URL` + `KC_REALM`: alternative to `KC_TOKEN_URL`; joined as
//!   `{base}/realms/{realm}/protocol/openid-connect/token`.
//! - `KC_CLIENT_ID`, `KC_CLIENT_SECRET`: client-credentials identity.
//! - `KC_BEARER_FILE`: destination file for the token (default: `access_token.txt`).

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::token::Credentials;

const DEFAULT_BEARER_FILE: &str = "access_token.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("set either KC_TOKEN_URL or both KC_BASE_URL and KC_REALM")]
    MissingEndpoint,
}

/// Everything one token fetch needs.
#[derive(Clone, Debug)]
pub struct TokenConfig {
    pub token_url: String,
    pub credentials: Credentials,
    pub bearer_path: PathBuf,
}

impl TokenConfig {
    pub fn new(
        token_url: impl Into<String>,
        credentials: Credentials,
        bearer_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            token_url: token_url.into(),
            credentials,
            bearer_path: bearer_path.into(),
        }
    }

    /// Build the config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token_url = match env::var("KC_TOKEN_URL") {
            Ok(url) => url,
            Err(_) => {
                let base = env::var("KC_BASE_URL").map_err(|_| ConfigError::MissingEndpoint)?;
                let realm = env::var("KC_REALM").map_err(|_| ConfigError::MissingEndpoint)?;
                realm_token_url(&base, &realm)
            }
        };
        let client_id =
            env::var("KC_CLIENT_ID").map_err(|_| ConfigError::MissingVar("KC_CLIENT_ID"))?;
        let client_secret =
            env::var("KC_CLIENT_SECRET").map_err(|_| ConfigError::MissingVar("KC_CLIENT_SECRET"))?;
        let bearer_path =
            env::var("KC_BEARER_FILE").unwrap_or_else(|_| DEFAULT_BEARER_FILE.to_string());

        Ok(Self::new(
            token_url,
            Credentials::new(client_id, client_secret),
            bearer_path,
        ))
    }
}

/// Keycloak token endpoint for a realm:
/// `{base}/realms/{realm}/protocol/openid-connect/token`
pub fn realm_token_url(base: &str, realm: &str) -> String {
    format!(
        "{}/realms/{}/protocol/openid-connect/token",
        base.trim_end_matches('/'),
        realm
    )
}
