use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: weddit_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Shared HTTP client for Kakao and scraping upstreams.
    pub http: reqwest::Client,
}
