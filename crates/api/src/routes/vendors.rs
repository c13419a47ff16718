//! Routes for the vendor catalog.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::vendors;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET  /vendors             list
/// GET  /vendors/{id}        get_by_id
/// POST /vendors/{id}/quote  quote
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vendors", get(vendors::list))
        .route("/vendors/{id}", get(vendors::get_by_id))
        .route("/vendors/{id}/quote", post(vendors::quote))
}
