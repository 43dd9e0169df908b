//! OAuth client-credentials exchange and bearer-token caching.
//!
//! [`TokenCache`] hands out a cached token until shortly before the
//! provider-reported expiry, then performs one exchange to refresh it. The
//! slot is held across the refresh, so concurrent callers that find the token
//! expired wait for a single in-flight exchange instead of each issuing one.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Tokens are treated as expired this long before the provider says so.
pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Path of the token endpoint relative to the API base URL.
pub const TOKEN_PATH: &str = "/v1/security/oauth2/token";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Client id and secret for the client-credentials grant.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// A token as returned by the token endpoint.
#[derive(Clone, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// A cached bearer token and the instant after which it must not be used.
struct Credential {
    token: String,
    expires_at: Instant,
}

impl Credential {
    fn issue(issued: IssuedToken, margin: Duration, now: Instant) -> Self {
        let lifetime = Duration::from_secs(issued.expires_in).saturating_sub(margin);
        Self {
            token: issued.access_token,
            expires_at: now + lifetime,
        }
    }

    fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Credential exchange failure.
///
/// Messages never contain the client secret.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token request failed: {0}")]
    Request(String),

    #[error("Token endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed token response: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// Exchange
// ---------------------------------------------------------------------------

/// Something that can mint a fresh bearer token.
#[async_trait]
pub trait CredentialExchange: Send + Sync {
    async fn exchange(&self) -> Result<IssuedToken, AuthError>;
}

/// Form-encoded `grant_type=client_credentials` exchange over HTTP.
pub struct OAuthExchange {
    http: reqwest::Client,
    token_url: String,
    credentials: ClientCredentials,
}

impl OAuthExchange {
    pub fn new(http: reqwest::Client, base_url: &str, credentials: ClientCredentials) -> Self {
        Self {
            http,
            token_url: format!("{}{TOKEN_PATH}", base_url.trim_end_matches('/')),
            credentials,
        }
    }
}

#[async_trait]
impl CredentialExchange for OAuthExchange {
    async fn exchange(&self) -> Result<IssuedToken, AuthError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        response
            .json::<IssuedToken>()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Lazily fetched, expiry-aware bearer token.
pub struct TokenCache<E> {
    exchange: E,
    margin: Duration,
    slot: Mutex<Option<Credential>>,
}

impl<E: CredentialExchange> TokenCache<E> {
    pub fn new(exchange: E) -> Self {
        Self::with_margin(exchange, DEFAULT_REFRESH_MARGIN)
    }

    pub fn with_margin(exchange: E, margin: Duration) -> Self {
        Self {
            exchange,
            margin,
            slot: Mutex::new(None),
        }
    }

    /// Return a valid bearer token, refreshing it if needed.
    ///
    /// A failed refresh leaves the cached state untouched.
    pub async fn get_token(&self) -> Result<String, AuthError> {
        let mut slot = self.slot.lock().await;

        if let Some(credential) = slot.as_ref() {
            if credential.is_valid_at(Instant::now()) {
                return Ok(credential.token.clone());
            }
        }

        let issued = match self.exchange.exchange().await {
            Ok(issued) => issued,
            Err(err) => {
                tracing::error!(error = %err, "Failed to fetch Amadeus access token");
                return Err(err);
            }
        };

        let expires_in = issued.expires_in;
        let credential = Credential::issue(issued, self.margin, Instant::now());
        let token = credential.token.clone();
        *slot = Some(credential);

        tracing::info!(expires_in, "Amadeus access token fetched");
        Ok(token)
    }

    /// Drop the cached token if it is still `rejected`, so the next call
    /// performs a fresh exchange. A token refreshed by another caller in the
    /// meantime is kept. Returns whether anything was dropped.
    pub async fn invalidate_if(&self, rejected: &str) -> bool {
        let mut slot = self.slot.lock().await;
        if slot.as_ref().is_some_and(|c| c.token == rejected) {
            *slot = None;
            true
        } else {
            false
        }
    }
}
