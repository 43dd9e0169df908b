pub mod chat;
pub mod health;
pub mod lookup;
pub mod weather;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /weather/{city}        current conditions (provider passthrough)
///
/// /travel/{city}         flight destinations (static first, then live)
/// /hotels/{city}         hotels (static first, then live)
/// /restaurants/{city}    restaurants (static only)
/// /cars/{city}           rental cars (static only)
/// /checkin/{airline}     check-in links (live)
///
/// /chat                  chat assistant (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(weather::router())
        .merge(lookup::router())
        .merge(chat::router())
}
