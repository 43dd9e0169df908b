use axum::routing::get;
use axum::Router;

use crate::handlers::weather;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/weather/{city}", get(weather::current_weather))
}
