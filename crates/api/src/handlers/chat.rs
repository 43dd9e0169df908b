//! Handler for the rule-based chat assistant.
//!
//! Intent matching lives in [`wander_core::chat`]; this module dispatches
//! each intent to the weather provider or the travel resolver and turns the
//! outcome into a one-line reply.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use wander_core::chat::{self, CityMention, Intent};
use wander_core::error::CoreError;
use wander_core::resolution::DataKind;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(input): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    if input.message.trim().is_empty() {
        return Err(AppError::BadRequest("Message is required".into()));
    }

    let intent = Intent::parse(&input.message);
    tracing::debug!(?intent, "Parsed chat intent");

    let reply = match intent {
        Intent::Weather(Some(city)) => weather_reply(&state, &city).await,
        Intent::Weather(None) => chat::REPLY_WEATHER_NEEDS_CITY.to_string(),
        Intent::Travel(Some(city)) => travel_reply(&state, &city).await,
        Intent::Travel(None) => chat::REPLY_TRAVEL_NEEDS_CITY.to_string(),
        Intent::Unknown => chat::REPLY_NOT_UNDERSTOOD.to_string(),
    };

    Ok(Json(ChatResponse { reply }))
}

async fn weather_reply(state: &AppState, city: &CityMention) -> String {
    match state.weather.current_weather(city.key.as_str()).await {
        Ok(payload) => chat::weather_reply(&payload)
            .unwrap_or_else(|| chat::REPLY_WEATHER_FAILED.to_string()),
        Err(e) => {
            tracing::warn!(city = %city.key, error = %e, "Chat weather lookup failed");
            chat::REPLY_WEATHER_FAILED.to_string()
        }
    }
}

async fn travel_reply(state: &AppState, city: &CityMention) -> String {
    let resolution = match state.resolver.resolve(DataKind::Travel, city.key.as_str()).await {
        Ok(resolution) => resolution,
        Err(CoreError::NotFound(_)) => return chat::travel_not_found_reply(&city.raw),
        Err(e) => {
            tracing::warn!(city = %city.key, error = %e, "Chat travel lookup failed");
            return chat::REPLY_TRAVEL_FAILED.to_string();
        }
    };

    match serde_json::to_value(resolution.into_envelope()) {
        Ok(payload) => chat::travel_reply(&city.raw, &payload),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize travel envelope");
            chat::REPLY_TRAVEL_FAILED.to_string()
        }
    }
}
