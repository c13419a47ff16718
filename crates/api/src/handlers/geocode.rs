//! Kakao geocoding proxy with a database-backed cache.
//!
//! Lookup order: fresh cache row, Kakao address search, Kakao keyword
//! search. A miss everywhere answers `{ "data": null }` with 200 so map
//! clients degrade quietly instead of erroring per pin.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use weddit_db::repositories::GeocodeCacheRepo;

/// Cache rows older than this are refetched from Kakao.
const CACHE_TTL_SECS: i64 = 60 * 60 * 24;

const ADDRESS_URL: &str = "https://dapi.kakao.com/v2/local/search/address.json";
const KEYWORD_URL: &str = "https://dapi.kakao.com/v2/local/search/keyword.json";

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub q: Option<String>,
}

/// Resolved coordinates plus which Kakao search produced them.
#[derive(Debug, Clone, Serialize)]
pub struct GeocodePoint {
    pub lat: f64,
    pub lng: f64,
    pub source: String,
}

#[derive(Debug, Deserialize)]
struct KakaoResponse {
    documents: Vec<KakaoDocument>,
}

/// Kakao returns coordinates as decimal strings: `x` is longitude, `y`
/// is latitude.
#[derive(Debug, Deserialize)]
struct KakaoDocument {
    x: String,
    y: String,
}

/// GET /api/v1/geocode?q=
pub async fn lookup(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> AppResult<Json<DataResponse<Option<GeocodePoint>>>> {
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("q is required".into()))?;

    if let Some(row) = GeocodeCacheRepo::get_fresh(&state.pool, q, CACHE_TTL_SECS).await? {
        return Ok(Json(DataResponse {
            data: Some(GeocodePoint {
                lat: row.lat,
                lng: row.lng,
                source: row.source,
            }),
        }));
    }

    let Some(key) = state.config.kakao_rest_key.as_deref() else {
        return Err(AppError::ServiceUnavailable(
            "KAKAO_REST_API_KEY is not configured".into(),
        ));
    };

    // Address search first, keyword search as fallback for queries that
    // are business names rather than addresses.
    for (url, source) in [(ADDRESS_URL, "address"), (KEYWORD_URL, "keyword")] {
        match kakao_search(&state, url, key, q).await {
            Ok(Some((lat, lng))) => {
                if let Err(err) = GeocodeCacheRepo::upsert(&state.pool, q, lat, lng, source).await {
                    tracing::warn!(query = %q, error = %err, "Geocode cache write failed");
                }
                return Ok(Json(DataResponse {
                    data: Some(GeocodePoint {
                        lat,
                        lng,
                        source: source.to_string(),
                    }),
                }));
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(query = %q, error = %err, "Kakao request failed");
                return Ok(Json(DataResponse::new(None)));
            }
        }
    }

    Ok(Json(DataResponse::new(None)))
}

/// Run one Kakao local search, returning the first document's coordinates.
async fn kakao_search(
    state: &AppState,
    url: &str,
    key: &str,
    q: &str,
) -> Result<Option<(f64, f64)>, reqwest::Error> {
    let response: KakaoResponse = state
        .http
        .get(url)
        .query(&[("query", q)])
        .header("Authorization", format!("KakaoAK {key}"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let point = response.documents.first().and_then(|doc| {
        let lat = doc.y.parse().ok()?;
        let lng = doc.x.parse().ok()?;
        Some((lat, lng))
    });
    Ok(point)
}
