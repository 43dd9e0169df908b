//! Seams between the domain logic and the third-party HTTP providers.
//!
//! The concrete clients live in `wander-amadeus` and `wander-openweather`;
//! tests substitute stubs.

use async_trait::async_trait;

/// Live endpoints of the flight-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiveEndpoint {
    /// Cheapest destinations from an origin city code.
    FlightDestinations,
    /// Hotel listings for a city code.
    HotelsByCity,
    /// Online check-in links for an airline code.
    CheckinLinks,
}

/// Failure of a single provider call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider's credentials are absent from configuration.
    #[error("Provider credentials are not configured")]
    Unconfigured,

    /// Obtaining a bearer credential failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network-level failure (DNS, TLS, connect, timeout).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-2xx status.
    #[error("Provider returned {status}: {body}")]
    Status {
        status: u16,
        /// Human-readable error text extracted from the provider's body.
        message: Option<String>,
        /// Raw body, truncated, for logs.
        body: String,
    },

    /// The response body was not the JSON we expected.
    #[error("Malformed provider response: {0}")]
    Decode(String),
}

/// Longest slice of an error body kept for logs.
const MAX_LOGGED_BODY_CHARS: usize = 500;

impl ProviderError {
    /// Build a [`ProviderError::Status`] from a non-2xx response body.
    ///
    /// Recognizes the error shapes used by the providers we talk to:
    /// `{ "errors": [{ "detail" | "title" }] }`, OAuth's
    /// `{ "error_description" }`, and `{ "message" }`.
    pub fn from_status(status: u16, body: String) -> Self {
        let message = extract_error_message(&body);
        let body = if body.chars().count() > MAX_LOGGED_BODY_CHARS {
            body.chars().take(MAX_LOGGED_BODY_CHARS).collect()
        } else {
            body
        };
        ProviderError::Status {
            status,
            message,
            body,
        }
    }

    /// Provider-authored message that is safe to show to the caller.
    pub fn public_message(&self) -> Option<&str> {
        match self {
            ProviderError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;

    let first_error = json
        .get("errors")
        .and_then(|errors| errors.get(0))
        .and_then(|e| e.get("detail").or_else(|| e.get("title")));

    first_error
        .or_else(|| json.get("error_description"))
        .or_else(|| json.get("message"))
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Flight-data provider (travel destinations, hotels, check-in links).
#[async_trait]
pub trait LiveProvider: Send + Sync {
    /// Call `endpoint` with a provider-specific `code` and return the
    /// provider's JSON payload unmodified.
    async fn fetch(
        &self,
        endpoint: LiveEndpoint,
        code: &str,
    ) -> Result<serde_json::Value, ProviderError>;
}

/// Current-weather provider.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for a free-text city name, in metric units.
    async fn current_weather(&self, city: &str) -> Result<serde_json::Value, ProviderError>;
}
