//! One-call utility: fetch an access token and persist it to the bearer file.
//!
//! Behavior
//! - POST the client-credentials grant to the configured token endpoint.
//! - On HTTP 200 with a non-empty `access_token`: truncate-write the token
//!   to the bearer file and report `Stored`.
//! - On HTTP 200 without a usable `access_token`: report `TokenMissing`,
//!   write nothing.
//! - On any other status: report `Rejected` with the literal status code,
//!   write nothing.
//! - Transport failures, undecodable 200 bodies and file-write failures are
//!   not recovered here; they propagate to the caller.
//!
//! Notes
//! - One fetch per call; no caching, refresh or retry.
//! - The two recovered branches come back as values, not errors, so the
//!   binary can print its one-line report and still exit 0.

use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

use crate::config::TokenConfig;
use crate::store::BearerFile;
use crate::token::{Error as TokenError, TokenClient};

/// What a single fetch-and-store run did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Token fetched and written to the bearer file.
    Stored { path: PathBuf },
    /// 200 response without a usable `access_token`; nothing written.
    TokenMissing,
    /// Non-200 response; nothing written.
    Rejected { status: u16 },
}

impl FetchOutcome {
    /// One-line console report for this outcome.
    pub fn report(&self) -> String {
        match self {
            FetchOutcome::Stored { path } => {
                format!("Access token written to {}", path.display())
            }
            FetchOutcome::TokenMissing => "Access token not found in the response.".to_string(),
            FetchOutcome::Rejected { status } => {
                format!("Token request failed with status code {status}")
            }
        }
    }
}

/// Run one token exchange and persist the result.
#[instrument(level = "debug", skip(client, config))]
pub async fn fetch_and_store_token(
    client: &TokenClient,
    config: &TokenConfig,
) -> Result<FetchOutcome> {
    match client
        .fetch_access_token(&config.token_url, &config.credentials)
        .await
    {
        Ok(token) => {
            let file = BearerFile::new(&config.bearer_path);
            file.write(&token.access_token)?;
            debug!("access token stored: {}", file.path().display());
            Ok(FetchOutcome::Stored {
                path: config.bearer_path.clone(),
            })
        }
        Err(TokenError::MissingToken) => {
            warn!("token endpoint returned 200 without an access_token");
            Ok(FetchOutcome::TokenMissing)
        }
        Err(TokenError::Status { status, body }) => {
            warn!("token endpoint rejected the request: status={status}, body={body}");
            Ok(FetchOutcome::Rejected { status })
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lines_match_fixed_wording() {
        let stored = FetchOutcome::Stored {
            path: PathBuf::from("access_token.txt"),
        };
        assert_eq!(stored.report(), "Access token written to access_token.txt");
        assert_eq!(
            FetchOutcome::TokenMissing.report(),
            "Access token not found in the response."
        );
        assert_eq!(
            FetchOutcome::Rejected { status: 401 }.report(),
            "Token request failed with status code 401"
        );
    }
}
