//! Handlers for the `/admin` surface: vendor creation and the spreadsheet
//! importer.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;
use weddit_core::catalog::validate_price;
use weddit_core::import::{extract_table_rows, map_row, ImportReport, MappedRow};
use weddit_core::{Category, Region};
use weddit_db::models::CreateVendorInput;
use weddit_db::repositories::VendorRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for vendor creation.
#[derive(Debug, Serialize)]
pub struct CreatedVendor {
    pub id: Uuid,
}

/// POST /api/v1/admin/vendors
///
/// Validates everything up front so a rejected request never writes a
/// partial vendor.
pub async fn create_vendor(
    State(state): State<AppState>,
    Json(input): Json<CreateVendorInput>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedVendor>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    let _: Category = input.category.parse().map_err(AppError::Core)?;
    let _: Region = input.region.parse().map_err(AppError::Core)?;
    if let Some(price) = input.price {
        validate_price(price).map_err(AppError::Core)?;
    }

    let id = VendorRepo::create(&state.pool, &input).await?;
    tracing::info!(vendor_id = %id, name = %input.name, "Vendor created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedVendor { id },
        }),
    ))
}

/// POST /api/v1/admin/import
///
/// Fetches the published spreadsheet HTML, maps its table rows, and upserts
/// the results. A row that fails to map or write is counted as skipped and
/// the run continues.
pub async fn import(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ImportReport>>> {
    let Some(url) = state.config.import_sheet_url.as_deref() else {
        return Err(AppError::ServiceUnavailable(
            "IMPORT_SHEET_URL is not configured".into(),
        ));
    };

    let html = state.http.get(url).send().await?.text().await?;
    let report = run_import(&state, &html).await;

    tracing::info!(
        imported = report.imported,
        skipped = report.skipped,
        total = report.total,
        "Import run finished"
    );
    Ok(Json(DataResponse::new(report)))
}

/// Map and upsert every data row of the fetched sheet HTML.
///
/// Every data row lands in exactly one bucket: `imported` for rows written
/// successfully (whether they created or enriched a vendor), `skipped` for
/// rows that fail to map or write, so `imported + skipped == total` holds
/// for every run.
pub async fn run_import(state: &AppState, html: &str) -> ImportReport {
    let rows = extract_table_rows(html);

    let Some((headers, data_rows)) = rows.split_first() else {
        return ImportReport::default();
    };

    let mut report = ImportReport {
        total: data_rows.len(),
        ..ImportReport::default()
    };

    for row in data_rows {
        let Some(mapped) = map_row(headers, row) else {
            report.skipped += 1;
            continue;
        };
        match upsert_row(state, &mapped).await {
            Ok(()) => report.imported += 1,
            Err(err) => {
                tracing::warn!(vendor = %mapped.vendor_name, error = %err, "Import row failed");
                report.skipped += 1;
            }
        }
    }

    report
}

/// Write one mapped row, creating the vendor when its (name, category,
/// region) identity is new and enriching it otherwise.
async fn upsert_row(state: &AppState, mapped: &MappedRow) -> Result<(), sqlx::Error> {
    let existing = VendorRepo::find_id_by_identity(
        &state.pool,
        &mapped.vendor_name,
        mapped.category,
        mapped.region,
    )
    .await?;

    let vendor_id = match existing {
        Some(id) => id,
        None => {
            let input = CreateVendorInput {
                name: mapped.vendor_name.clone(),
                category: mapped.category.as_str().to_string(),
                region: mapped.region.as_str().to_string(),
                address: mapped.address.clone(),
                phone: mapped.phone.clone(),
                website: mapped.website.clone(),
                description: None,
                item_name: None,
                price: None,
            };
            VendorRepo::create(&state.pool, &input).await?
        }
    };

    if let Some(item_name) = mapped.item_name.as_deref() {
        let item_id = VendorRepo::ensure_item(&state.pool, vendor_id, item_name).await?;
        if let Some(price) = mapped.price {
            VendorRepo::ensure_price(&state.pool, item_id, price).await?;
        }
    }

    Ok(())
}
