//! Handlers for the cookie-backed comparison list.
//!
//! The list itself lives in the client's cookie; these endpoints decode,
//! mutate, re-encode, and echo the canonical list back. Unknown or
//! malformed cookie content is dropped during decode, so a corrupt cookie
//! heals itself on the next write.

use axum::extract::{Path, State};
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use uuid::Uuid;
use weddit_core::compare::{self, CompareEntry, Quote};
use weddit_db::repositories::VendorRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// One comparison list entry expanded with live catalog data. `quote` is
/// absent when the saved vendor no longer exists.
#[derive(Debug, Serialize)]
pub struct CompareItemView {
    pub id: Uuid,
    #[serde(rename = "savedAt", skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
}

fn read_entries(jar: &CookieJar) -> Vec<CompareEntry> {
    jar.get(compare::COOKIE_KEY)
        .map(|c| compare::decode_cookie(c.value()))
        .unwrap_or_default()
}

fn write_entries(jar: CookieJar, entries: &[CompareEntry]) -> CookieJar {
    let mut cookie = Cookie::new(compare::COOKIE_KEY, compare::encode_cookie(entries));
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::seconds(compare::COOKIE_MAX_AGE_SECS));
    jar.add(cookie)
}

/// GET /api/v1/compare
pub async fn list(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Json<DataResponse<Vec<CompareItemView>>>> {
    let entries = read_entries(&jar);

    let mut views = Vec::with_capacity(entries.len());
    for entry in entries {
        let vendor = VendorRepo::get_by_id(&state.pool, entry.id).await?;
        let (vendor_name, quote) = match vendor {
            Some(vendor) => {
                let selection = entry.selection.clone().unwrap_or_default();
                let quote = compare::quote(&vendor, &selection);
                (Some(vendor.name), Some(quote))
            }
            None => (None, None),
        };
        views.push(CompareItemView {
            id: entry.id,
            saved_at: entry.saved_at,
            vendor_name,
            quote,
        });
    }

    Ok(Json(DataResponse::new(views)))
}

/// PUT /api/v1/compare
///
/// Adds or updates one entry; a re-save moves the vendor to the end of
/// the list and refreshes its timestamp.
pub async fn save(
    jar: CookieJar,
    Json(mut entry): Json<CompareEntry>,
) -> AppResult<(CookieJar, Json<DataResponse<Vec<CompareEntry>>>)> {
    entry.saved_at = Some(chrono::Utc::now().timestamp_millis());

    let mut entries = read_entries(&jar);
    entries.push(entry);
    let entries = compare::normalize(entries);

    let jar = write_entries(jar, &entries);
    Ok((jar, Json(DataResponse::new(entries))))
}

/// DELETE /api/v1/compare/{vendor_id}
pub async fn remove(
    jar: CookieJar,
    Path(vendor_id): Path<Uuid>,
) -> AppResult<(CookieJar, Json<DataResponse<Vec<CompareEntry>>>)> {
    let mut entries = read_entries(&jar);
    entries.retain(|e| e.id != vendor_id);

    let jar = write_entries(jar, &entries);
    Ok((jar, Json(DataResponse::new(entries))))
}

/// DELETE /api/v1/compare
pub async fn clear(jar: CookieJar) -> AppResult<(CookieJar, Json<DataResponse<Vec<CompareEntry>>>)> {
    let mut removal = Cookie::new(compare::COOKIE_KEY, "");
    removal.set_path("/");
    let jar = jar.remove(removal);
    Ok((jar, Json(DataResponse::new(Vec::new()))))
}
