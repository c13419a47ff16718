//! Handlers for the `/vendors` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use weddit_core::filter::filter_vendors;
use weddit_core::selection::{PriceRange, SelectionState};
use weddit_core::{compare, Category, CoreError, Region, Vendor, VendorFilter};
use weddit_db::repositories::VendorRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /vendors`.
#[derive(Debug, Default, Deserialize)]
pub struct VendorListQuery {
    pub category: Option<String>,
    pub region: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<i64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<i64>,
}

/// A vendor annotated with its derived base~max price range.
#[derive(Debug, Serialize)]
pub struct VendorView {
    #[serde(flatten)]
    pub vendor: Vendor,
    pub price_range: Option<PriceRange>,
}

impl VendorView {
    fn new(vendor: Vendor) -> Self {
        let price_range = PriceRange::of(&vendor);
        VendorView {
            vendor,
            price_range,
        }
    }
}

/// Vendor detail payload: the tree, its range, and the selection state a
/// client should start from.
#[derive(Debug, Serialize)]
pub struct VendorDetail {
    #[serde(flatten)]
    pub vendor: Vendor,
    pub price_range: Option<PriceRange>,
    pub initial_selection: SelectionState,
}

/// GET /api/v1/vendors
///
/// Category and region narrow the SQL query; the price envelope and name
/// ordering are applied in core on the loaded trees.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<VendorListQuery>,
) -> AppResult<Json<DataResponse<Vec<VendorView>>>> {
    let category: Option<Category> = query
        .category
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(AppError::Core)?;
    let region: Option<Region> = query
        .region
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(AppError::Core)?;

    let vendors = VendorRepo::list(&state.pool, category, region).await?;

    let price_filter = VendorFilter {
        category: None,
        region: None,
        min_price: query.min_price,
        max_price: query.max_price,
    };
    let vendors = filter_vendors(vendors, &price_filter);

    let views = vendors.into_iter().map(VendorView::new).collect();
    Ok(Json(DataResponse::new(views)))
}

/// GET /api/v1/vendors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<VendorDetail>>> {
    let vendor = VendorRepo::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Vendor", id)))?;

    let price_range = PriceRange::of(&vendor);
    let initial_selection = SelectionState::init(&vendor);
    Ok(Json(DataResponse {
        data: VendorDetail {
            vendor,
            price_range,
            initial_selection,
        },
    }))
}

/// POST /api/v1/vendors/{id}/quote
///
/// Prices a saved selection against the current vendor tree. Stale or
/// illegal choices in the payload are dropped during replay rather than
/// rejected, so an outdated client still gets a coherent quote.
pub async fn quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(selection): Json<compare::CompareSelection>,
) -> AppResult<Json<DataResponse<compare::Quote>>> {
    let vendor = VendorRepo::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Vendor", id)))?;

    Ok(Json(DataResponse {
        data: compare::quote(&vendor, &selection),
    }))
}
