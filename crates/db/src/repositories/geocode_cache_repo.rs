//! Repository for the `geocode_cache` table.

use sqlx::PgPool;

use crate::models::geocode::GeocodeCacheRow;

const COLUMNS: &str = "query, lat, lng, source, fetched_at";

/// Cache of upstream geocoding results, keyed by the raw query string.
pub struct GeocodeCacheRepo;

impl GeocodeCacheRepo {
    /// Return the cached coordinates for a query if fetched within the
    /// given number of seconds. Stale rows are treated as misses.
    pub async fn get_fresh(
        pool: &PgPool,
        query_text: &str,
        max_age_secs: i64,
    ) -> Result<Option<GeocodeCacheRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM geocode_cache
             WHERE query = $1 AND fetched_at > NOW() - $2 * INTERVAL '1 second'"
        );
        sqlx::query_as::<_, GeocodeCacheRow>(&query)
            .bind(query_text)
            .bind(max_age_secs)
            .fetch_optional(pool)
            .await
    }

    /// Insert or refresh a cache row for a query.
    pub async fn upsert(
        pool: &PgPool,
        query_text: &str,
        lat: f64,
        lng: f64,
        source: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO geocode_cache (query, lat, lng, source, fetched_at)
             VALUES ($1, $2, $3, $4, NOW())
             ON CONFLICT (query) DO UPDATE
                SET lat = EXCLUDED.lat,
                    lng = EXCLUDED.lng,
                    source = EXCLUDED.source,
                    fetched_at = NOW()",
        )
        .bind(query_text)
        .bind(lat)
        .bind(lng)
        .bind(source)
        .execute(pool)
        .await?;
        Ok(())
    }
}
