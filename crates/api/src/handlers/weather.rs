use axum::extract::{Path, State};
use axum::Json;
use wander_core::error::CoreError;
use wander_core::location::LocationKey;
use wander_core::provider::ProviderError;

use crate::error::AppResult;
use crate::state::AppState;

pub const WEATHER_FAILED: &str = "Failed to fetch weather data";

/// GET /api/weather/{city}
///
/// Proxies the provider's current-conditions payload unchanged.
pub async fn current_weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let city = LocationKey::parse(&city, "City is required")?;

    let payload = state
        .weather
        .current_weather(city.as_str())
        .await
        .map_err(weather_failure)?;

    Ok(Json(payload))
}

pub(crate) fn weather_failure(err: ProviderError) -> CoreError {
    CoreError::Upstream {
        context: WEATHER_FAILED.to_string(),
        message: err.public_message().map(str::to_string),
        detail: err.to_string(),
    }
}
