//! REST client for the Amadeus self-service APIs.
//!
//! Wraps the three read endpoints the backend proxies (flight destinations,
//! hotels by city, check-in links) behind [`LiveProvider`], authenticating
//! each call with a bearer token from [`TokenCache`].

use std::time::Duration;

use async_trait::async_trait;
use wander_core::provider::{LiveEndpoint, LiveProvider, ProviderError};

use crate::auth::{AuthError, ClientCredentials, OAuthExchange, TokenCache};

/// Amadeus test environment.
pub const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";

/// Per-request timeout applied to token and data calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for [`AmadeusClient`].
#[derive(Debug, Clone)]
pub struct AmadeusConfig {
    pub base_url: String,
    pub credentials: ClientCredentials,
    pub timeout: Duration,
}

/// Path and code query parameter for each live endpoint.
fn route(endpoint: LiveEndpoint) -> (&'static str, &'static str) {
    match endpoint {
        LiveEndpoint::FlightDestinations => ("/v1/shopping/flight-destinations", "origin"),
        LiveEndpoint::HotelsByCity => ("/v1/reference-data/locations/hotels/by-city", "cityCode"),
        LiveEndpoint::CheckinLinks => ("/v2/reference-data/urls/checkin-links", "airlineCode"),
    }
}

/// HTTP client for the Amadeus APIs, owning the token cache.
pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenCache<OAuthExchange>,
}

impl AmadeusClient {
    pub fn new(config: AmadeusConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let exchange = OAuthExchange::new(http.clone(), &base_url, config.credentials);

        Ok(Self {
            http,
            base_url,
            tokens: TokenCache::new(exchange),
        })
    }

    /// Current bearer token, fetched or refreshed as needed.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        self.tokens.get_token().await
    }
}

#[async_trait]
impl LiveProvider for AmadeusClient {
    async fn fetch(
        &self,
        endpoint: LiveEndpoint,
        code: &str,
    ) -> Result<serde_json::Value, ProviderError> {
        let token = self
            .access_token()
            .await
            .map_err(|e| ProviderError::Auth(e.to_string()))?;

        let (path, param) = route(endpoint);
        let response = self
            .http
            .get(format!("{}{path}", self.base_url))
            .query(&[(param, code)])
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED {
                // Revoked or rotated upstream; the next request re-authenticates.
                let dropped = self.tokens.invalidate_if(&token).await;
                tracing::warn!(path, dropped, "Amadeus rejected bearer token");
            }
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

/// Stand-in used when Amadeus credentials are absent: every live call fails
/// with [`ProviderError::Unconfigured`], while static data keeps working.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredAmadeus;

#[async_trait]
impl LiveProvider for UnconfiguredAmadeus {
    async fn fetch(
        &self,
        _endpoint: LiveEndpoint,
        _code: &str,
    ) -> Result<serde_json::Value, ProviderError> {
        Err(ProviderError::Unconfigured)
    }
}
