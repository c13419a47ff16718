//! Geocode cache row type.

use sqlx::FromRow;
use weddit_core::types::Timestamp;

/// A cached geocoding result, keyed by the raw query text.
#[derive(Debug, Clone, FromRow)]
pub struct GeocodeCacheRow {
    pub query: String,
    pub lat: f64,
    pub lng: f64,
    /// Which Kakao search produced the hit: `address` or `keyword`.
    pub source: String,
    pub fetched_at: Timestamp,
}
