#![doc = r#"
kcauth-rs

Keycloak client-credentials token fetcher with bearer-file persistence.

One OAuth2 client-credentials exchange against a token endpoint; the
resulting access token is written verbatim to a local plain-text file for
other tooling to pick up.

Included:
- token: token endpoint client, credentials and error types.
- config: environment-based configuration (endpoint, credentials, file path).
- store: bearer-file write.
- fetcher: one-call fetch-and-store orchestration.

Quick usage:

```ignore
use kcauth_rs::{fetch_and_store_token, TokenClient, TokenConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TokenConfig::from_env()?;
    let client = TokenClient::default();

    let outcome = fetch_and_store_token(&client, &config).await?;
    println!("{}", outcome.report());

    Ok(())
}
```
"#]

pub mod config;
pub mod fetcher;
pub mod store;
pub mod token;

pub use config::{realm_token_url, ConfigError, TokenConfig};
pub use fetcher::{fetch_and_store_token, FetchOutcome};
pub use store::{BearerFile, StoreError};
pub use token::{AccessToken, Credentials, Error, TokenClient};
