pub mod admin;
pub mod compare;
pub mod geocode;
pub mod health;
pub mod stats;
pub mod vendors;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /vendors                      list (filterable)
/// /vendors/{id}                 detail with initial selection
/// /vendors/{id}/quote           price a saved selection (POST)
///
/// /admin/vendors                create (POST)
/// /admin/import                 run spreadsheet import (POST)
///
/// /compare                      list (GET), save entry (PUT), clear (DELETE)
/// /compare/{vendor_id}          remove entry (DELETE)
///
/// /geocode                      cached Kakao proxy (GET)
///
/// /stats/prices                 catalog price aggregates (GET)
/// /stats/market                 scraped/fallback market series (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(vendors::router())
        .nest("/admin", admin::router())
        .nest("/compare", compare::router())
        .merge(geocode::router())
        .nest("/stats", stats::router())
}
