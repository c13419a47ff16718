//! Routes for the comparison list.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::compare;
use crate::state::AppState;

/// Routes mounted at `/compare`.
///
/// ```text
/// GET    /              list (expanded with quotes)
/// PUT    /              save
/// DELETE /              clear
/// DELETE /{vendor_id}   remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(compare::list).put(compare::save).delete(compare::clear),
        )
        .route("/{vendor_id}", delete(compare::remove))
}
