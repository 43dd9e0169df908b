use std::path::PathBuf;
use std::time::Duration;

use wander_amadeus::{AmadeusConfig, ClientCredentials};

/// Prefix accepted as an alias for every variable, so `.env` files written
/// for the web front end keep working.
const PUBLIC_PREFIX: &str = "NEXT_PUBLIC_";

/// Errors raised while reading configuration. All of them are fatal at
/// startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// OpenWeather settings.
#[derive(Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the weather API key have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Inbound request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Timeout for each outbound provider call in seconds (default: `5`).
    pub upstream_timeout_secs: u64,
    /// Directory holding the static JSON tables (default: `data`).
    pub data_dir: PathBuf,
    pub weather: WeatherConfig,
    /// `None` when `AMADEUS_CLIENT_ID` or `AMADEUS_CLIENT_SECRET` is unset;
    /// live travel, hotel and check-in calls then always fail.
    pub amadeus: Option<AmadeusConfig>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                 | Default                          |
    /// |-------------------------|----------------------------------|
    /// | `HOST`                  | `0.0.0.0`                        |
    /// | `PORT`                  | `5000`                           |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`          |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                             |
    /// | `UPSTREAM_TIMEOUT_SECS` | `5`                              |
    /// | `DATA_DIR`              | `data`                           |
    /// | `WEATHER_API_KEY`       | **required**                     |
    /// | `WEATHER_BASE_URL`      | `https://api.openweathermap.org` |
    /// | `AMADEUS_CLIENT_ID`     | unset                            |
    /// | `AMADEUS_CLIENT_SECRET` | unset                            |
    /// | `AMADEUS_BASE_URL`      | `https://test.api.amadeus.com`   |
    /// | `LOG_FORMAT`            | `pretty` (or `json`)             |
    ///
    /// Each variable may also be given with a `NEXT_PUBLIC_` prefix.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// A blank or missing variable falls back to its `NEXT_PUBLIC_` twin.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let var = |name: &str| set(name).or_else(|| set(&format!("{PUBLIC_PREFIX}{name}")));

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", var("PORT"), 5000u16)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), 30u64)?;
        let upstream_timeout_secs =
            parse_or("UPSTREAM_TIMEOUT_SECS", var("UPSTREAM_TIMEOUT_SECS"), 5u64)?;

        let data_dir = PathBuf::from(var("DATA_DIR").unwrap_or_else(|| "data".into()));

        let weather = WeatherConfig {
            api_key: var("WEATHER_API_KEY").ok_or(ConfigError::Missing("WEATHER_API_KEY"))?,
            base_url: var("WEATHER_BASE_URL")
                .unwrap_or_else(|| wander_openweather::DEFAULT_BASE_URL.into()),
        };

        let amadeus = match (var("AMADEUS_CLIENT_ID"), var("AMADEUS_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(AmadeusConfig {
                base_url: var("AMADEUS_BASE_URL")
                    .unwrap_or_else(|| wander_amadeus::client::DEFAULT_BASE_URL.into()),
                credentials: ClientCredentials {
                    client_id,
                    client_secret,
                },
                timeout: Duration::from_secs(upstream_timeout_secs),
            }),
            _ => None,
        };

        let log_format = match var("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected 'pretty' or 'json'".into(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upstream_timeout_secs,
            data_dir,
            weather,
            amadeus,
            log_format,
        })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
