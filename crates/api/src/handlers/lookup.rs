//! Handlers for the resolver-backed lookups: travel destinations, hotels,
//! restaurants, rental cars and airline check-in links.

use axum::extract::{Path, State};
use axum::Json;
use wander_core::resolution::{DataKind, Envelope};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/travel/{city}
pub async fn travel(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> AppResult<Json<Envelope>> {
    resolve(&state, DataKind::Travel, &city).await
}

/// GET /api/hotels/{city}
pub async fn hotels(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> AppResult<Json<Envelope>> {
    resolve(&state, DataKind::Hotels, &city).await
}

/// GET /api/restaurants/{city}
///
/// Static data only; an unknown city is a 404.
pub async fn restaurants(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> AppResult<Json<Envelope>> {
    resolve(&state, DataKind::Restaurants, &city).await
}

/// GET /api/cars/{city}
///
/// Static data only; an unknown city is a 404.
pub async fn cars(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> AppResult<Json<Envelope>> {
    resolve(&state, DataKind::Cars, &city).await
}

/// GET /api/checkin/{airline}
///
/// Accepts an airline name or alias (`ba`, `british airways`); unknown
/// names are upper-cased and sent as an IATA code.
pub async fn checkin(
    State(state): State<AppState>,
    Path(airline): Path<String>,
) -> AppResult<Json<Envelope>> {
    resolve(&state, DataKind::Checkin, &airline).await
}

async fn resolve(state: &AppState, kind: DataKind, raw: &str) -> AppResult<Json<Envelope>> {
    let resolution = state.resolver.resolve(kind, raw).await?;

    tracing::info!(
        kind = kind.label(),
        source = ?resolution.source(),
        "Lookup resolved",
    );

    Ok(Json(resolution.into_envelope()))
}
