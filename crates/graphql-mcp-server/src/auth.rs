//! OAuth client-credentials tokens for the GraphQL endpoint.

use crate::errors::AuthError;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

/// Lifetime assumed when the token endpoint does not report one
const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Tokens are treated as expired this long before the endpoint says they are
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Where and how to exchange client credentials for a token
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub token_url: Url,
    pub client_id: String,
    pub client_secret: SecretString,
}

struct AccessToken {
    value: SecretString,
    expires_at: Instant,
}

impl AccessToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,

    #[serde(default)]
    expires_in: Option<u64>,

    #[serde(default)]
    token_type: Option<String>,
}

/// Hands out access tokens, exchanging credentials only when the cached token has expired.
///
/// The cache lock is held for the duration of an exchange, so concurrent callers wait for a
/// single request rather than each starting their own. A failed exchange leaves the cache as it
/// was and is retried on the next call.
pub struct TokenProvider {
    client: reqwest::Client,
    credentials: ClientCredentials,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    pub fn new(client: reqwest::Client, credentials: ClientCredentials) -> Self {
        Self {
            client,
            credentials,
            cached: Mutex::new(None),
        }
    }

    /// A valid access token, fetching a new one if needed
    pub async fn access_token(&self) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|token| token.is_valid()) {
            return Ok(token.value.expose_secret().to_string());
        }

        let token = self.exchange().await?;
        let value = token.value.expose_secret().to_string();
        *cached = Some(token);
        Ok(value)
    }

    async fn exchange(&self) -> Result<AccessToken, AuthError> {
        let ClientCredentials {
            token_url,
            client_id,
            client_secret,
        } = &self.credentials;
        if client_id.is_empty() {
            return Err(AuthError::MissingCredentials("CLIENT_ID"));
        }
        if client_secret.expose_secret().is_empty() {
            return Err(AuthError::MissingCredentials("CLIENT_SECRET"));
        }

        debug!(%token_url, "Requesting access token");
        let response = self
            .client
            .post(token_url.clone())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.expose_secret()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AuthError::Status { status, body });
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        let value = token
            .access_token
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingAccessToken)?;
        let expires_in = token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN);

        info!(
            expires_in,
            token_type = token.token_type.as_deref().unwrap_or("unknown"),
            "Obtained access token"
        );

        Ok(AccessToken {
            value: SecretString::from(value),
            expires_at: expiry_from(Instant::now(), expires_in),
        })
    }
}

/// When a token issued at `issued` stops being used. Lifetimes too large to represent fall back
/// to the default lifetime.
fn expiry_from(issued: Instant, expires_in: u64) -> Instant {
    let lifetime = |seconds| Duration::from_secs(seconds).saturating_sub(EXPIRY_MARGIN);
    issued
        .checked_add(lifetime(expires_in))
        .unwrap_or_else(|| issued + lifetime(DEFAULT_EXPIRES_IN))
}
