use std::sync::Arc;

use wander_core::catalog::Catalog;
use wander_core::provider::{LiveProvider, WeatherProvider};
use wander_core::resolution::ResolutionPolicy;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Static-first resolver for travel, hotels, restaurants, cars and check-in.
    pub resolver: ResolutionPolicy,
    /// Current-weather provider.
    pub weather: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        live: Arc<dyn LiveProvider>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            resolver: ResolutionPolicy::new(Arc::new(catalog), live),
            weather,
        }
    }
}
