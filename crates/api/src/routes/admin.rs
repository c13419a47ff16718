//! Routes for the admin surface.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /vendors  create_vendor
/// POST /import   import
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vendors", post(admin::create_vendor))
        .route("/import", post(admin::import))
}
