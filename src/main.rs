//! `kcauth` binary: one client-credentials token fetch, persisted to disk.
//!
//! Run with: cargo run
//! Run with debug logs: RUST_LOG=kcauth_rs=debug cargo run
//!
//! Environment (a `.env` file is honored):
//! - KC_TOKEN_URL (or KC_BASE_URL + KC_REALM)
//! - KC_CLIENT_ID, KC_CLIENT_SECRET
//! - KC_BEARER_FILE (default: access_token.txt)

use anyhow::Result;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use kcauth_rs::{fetch_and_store_token, TokenClient, TokenConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = TokenConfig::from_env()?;
    let client = TokenClient::default();

    let outcome = fetch_and_store_token(&client, &config).await?;
    println!("{}", outcome.report());

    Ok(())
}
