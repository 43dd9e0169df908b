#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use wander_api::config::{LogFormat, ServerConfig, WeatherConfig};
use wander_api::router::build_app_router;
use wander_api::state::AppState;
use wander_core::catalog::{Catalog, Hotel, RentalCar, Restaurant};
use wander_core::provider::{LiveEndpoint, LiveProvider, ProviderError, WeatherProvider};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        upstream_timeout_secs: 5,
        data_dir: "data".into(),
        weather: WeatherConfig {
            api_key: "test-weather-key".to_string(),
            base_url: "http://weather.invalid".to_string(),
        },
        amadeus: None,
        log_format: LogFormat::Pretty,
    }
}

/// Small catalog covering every table.
///
/// `madrid` has a city code but no static rows, so travel and hotel lookups
/// for it go to the live provider.
pub fn test_catalog() -> Catalog {
    Catalog::builder()
        .city_code("london", "LON")
        .city_code("paris", "PAR")
        .city_code("madrid", "MAD")
        .capital("france", "Paris")
        .airline("ba", "BA")
        .airline("british airways", "BA")
        .travel("london", ["Paris", "Rome"])
        .travel("paris", ["London", "Lisbon"])
        .hotels(
            "london",
            vec![Hotel {
                name: "The Savoy".into(),
                rating: 4.7,
                price: "£££".into(),
                url: "https://www.thesavoylondon.com/".into(),
                address: "Strand, London WC2R 0EZ".into(),
                image: None,
            }],
        )
        .restaurants(
            "london",
            vec![Restaurant {
                name: "Dishoom".into(),
                rating: 4.6,
                price: "££".into(),
                url: "https://www.dishoom.com/".into(),
                cuisine: "Indian".into(),
                image: "https://images.unsplash.com/photo-1544148103-0773bf10d330?w=800".into(),
                review_count: 12450,
            }],
        )
        .cars(
            "london",
            vec![RentalCar {
                company: "Enterprise".into(),
                price_per_day: "£45".into(),
                url: "https://www.enterprise.co.uk/".into(),
                car_type: Some("Compact".into()),
            }],
        )
        .build()
}

// ---------------------------------------------------------------------------
// Stub providers
// ---------------------------------------------------------------------------

/// Live provider that records every call and either echoes the request
/// back as a provider-shaped payload or fails.
#[derive(Default)]
pub struct StubLive {
    pub calls: Mutex<Vec<(LiveEndpoint, String)>>,
    failure: Option<fn() -> ProviderError>,
}

impl StubLive {
    pub fn echo() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(failure: fn() -> ProviderError) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(failure),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> Vec<(LiveEndpoint, String)> {
        self.calls.lock().unwrap().clone()
    }
}

/// Payload the echoing stub returns for `code`.
pub fn echo_payload(code: &str) -> Value {
    json!({
        "data": [{ "type": "flight-destination", "origin": code, "destination": "LIS" }],
        "meta": { "count": 1, "links": { "self": format!("live/{code}") } },
    })
}

#[async_trait]
impl LiveProvider for StubLive {
    async fn fetch(&self, endpoint: LiveEndpoint, code: &str) -> Result<Value, ProviderError> {
        self.calls.lock().unwrap().push((endpoint, code.to_string()));
        match self.failure {
            Some(failure) => Err(failure()),
            None => Ok(echo_payload(code)),
        }
    }
}

/// Weather provider that knows a single city, `paris`.
#[derive(Default)]
pub struct StubWeather {
    pub calls: Mutex<Vec<String>>,
}

impl StubWeather {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn paris_weather() -> Value {
    json!({
        "name": "Paris",
        "main": { "temp": 18.5, "humidity": 72 },
        "weather": [{ "main": "Rain", "description": "light rain" }],
    })
}

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn current_weather(&self, city: &str) -> Result<Value, ProviderError> {
        self.calls.lock().unwrap().push(city.to_string());
        match city {
            "paris" => Ok(paris_weather()),
            _ => Err(ProviderError::from_status(
                404,
                r#"{"cod":"404","message":"city not found"}"#.to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers, using the
/// given providers and the [`test_catalog`].
pub fn build_test_app(
    live: Arc<dyn LiveProvider>,
    weather: Arc<dyn WeatherProvider>,
) -> Router {
    let config = test_config();
    let state = AppState::new(test_catalog(), live, weather);
    build_app_router(state, &config)
}

/// App with an echoing live provider and the stub weather provider.
pub fn default_app() -> Router {
    build_test_app(StubLive::echo(), StubWeather::new())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
