//! Routes for price statistics.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Routes mounted at `/stats`.
///
/// ```text
/// GET /prices  catalog aggregates
/// GET /market  market series (season|region)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prices", get(stats::prices))
        .route("/market", get(stats::market))
}
