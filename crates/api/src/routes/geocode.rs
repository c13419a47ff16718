//! Routes for the geocoding proxy.

use axum::routing::get;
use axum::Router;

use crate::handlers::geocode;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET /geocode?q=  lookup
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/geocode", get(geocode::lookup))
}
