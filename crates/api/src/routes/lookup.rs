//! Route definitions for resolver-backed lookups.

use axum::routing::get;
use axum::Router;

use crate::handlers::lookup;
use crate::state::AppState;

/// ```text
/// GET /travel/{city}       -> travel
/// GET /hotels/{city}       -> hotels
/// GET /restaurants/{city}  -> restaurants
/// GET /cars/{city}         -> cars
/// GET /checkin/{airline}   -> checkin
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/travel/{city}", get(lookup::travel))
        .route("/hotels/{city}", get(lookup::hotels))
        .route("/restaurants/{city}", get(lookup::restaurants))
        .route("/cars/{city}", get(lookup::cars))
        .route("/checkin/{airline}", get(lookup::checkin))
}
