//! OpenWeather current-conditions client.
//!
//! Proxies `GET /data/2.5/weather?q={city}&appid={key}&units=metric` and
//! returns the provider payload unchanged.

use std::time::Duration;

use async_trait::async_trait;
use wander_core::provider::{ProviderError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// HTTP client for the OpenWeather API.
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<serde_json::Value, ProviderError> {
        tracing::debug!(city, "Fetching current weather");

        // The API key rides in the query string, so reqwest errors must be
        // stripped of their URL before they reach logs or callers.
        let response = self
            .http
            .get(format!("{}{CURRENT_WEATHER_PATH}", self.base_url))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::Decode(e.without_url().to_string()))
    }
}
