//! Repository for the `vendors` / `items` / `prices` tables.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;
use weddit_core::{Category, Region, Vendor};

use crate::models::vendor::{CreateVendorInput, ItemRow, PriceRow, VendorRow};

/// Column list shared across vendor queries to avoid repetition.
const VENDOR_COLUMNS: &str =
    "id, name, category, region, address, phone, website, description, created_at";

const ITEM_COLUMNS: &str = "id, vendor_id, name, description, selection_mode, required, position";

const PRICE_COLUMNS: &str = "id, item_id, name, price, description, is_default, position";

/// Catalog access: vendors with their nested item/price trees.
pub struct VendorRepo;

impl VendorRepo {
    /// List vendors ordered by name ascending, optionally restricted to a
    /// category and/or region. Each vendor carries its full item tree with
    /// items in stored position order and prices cheapest-first.
    pub async fn list(
        pool: &PgPool,
        category: Option<Category>,
        region: Option<Region>,
    ) -> Result<Vec<Vendor>, sqlx::Error> {
        let query = format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors
             WHERE ($1::TEXT IS NULL OR category = $1)
               AND ($2::TEXT IS NULL OR region = $2)
             ORDER BY name ASC"
        );
        let rows = sqlx::query_as::<_, VendorRow>(&query)
            .bind(category.map(|c| c.as_str()))
            .bind(region.map(|r| r.as_str()))
            .fetch_all(pool)
            .await?;
        Self::assemble(pool, rows).await
    }

    /// Fetch a single vendor with its full item tree. Returns `None` when
    /// no row exists.
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!("SELECT {VENDOR_COLUMNS} FROM vendors WHERE id = $1");
        let row = sqlx::query_as::<_, VendorRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::assemble(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Insert a vendor and, when provided, a first item with one price.
    /// The item and price take the schema defaults (single mode, not
    /// required, nameless price), leaving refinement to later edits or
    /// re-imports. Runs in one transaction so a failed price insert never
    /// leaves a half-created vendor behind. Returns the new vendor id.
    pub async fn create(pool: &PgPool, input: &CreateVendorInput) -> Result<Uuid, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let vendor_id: Uuid = sqlx::query_scalar(
            "INSERT INTO vendors (name, category, region, address, phone, website, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.region)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(&input.website)
        .bind(&input.description)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(item_name) = input.item_name.as_deref().filter(|n| !n.is_empty()) {
            let item_id: Uuid = sqlx::query_scalar(
                "INSERT INTO items (vendor_id, name, position)
                 VALUES ($1, $2, 0)
                 RETURNING id",
            )
            .bind(vendor_id)
            .bind(item_name)
            .fetch_one(&mut *tx)
            .await?;

            if let Some(price) = input.price {
                sqlx::query("INSERT INTO prices (item_id, price, position) VALUES ($1, $2, 0)")
                    .bind(item_id)
                    .bind(price)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(vendor_id)
    }

    /// Look up a vendor id by its (name, category, region) identity.
    /// The importer uses this to decide between insert and enrich.
    pub async fn find_id_by_identity(
        pool: &PgPool,
        name: &str,
        category: Category,
        region: Region,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM vendors WHERE name = $1 AND category = $2 AND region = $3",
        )
        .bind(name)
        .bind(category.as_str())
        .bind(region.as_str())
        .fetch_optional(pool)
        .await
    }

    /// Find or create an item under a vendor by name. A new item takes the
    /// schema defaults and is appended after the vendor's existing items.
    pub async fn ensure_item(pool: &PgPool, vendor_id: Uuid, name: &str) -> Result<Uuid, sqlx::Error> {
        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM items WHERE vendor_id = $1 AND name = $2")
                .bind(vendor_id)
                .bind(name)
                .fetch_optional(pool)
                .await?;
        if let Some(id) = existing {
            return Ok(id);
        }
        sqlx::query_scalar(
            "INSERT INTO items (vendor_id, name, position)
             VALUES ($1, $2,
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM items WHERE vendor_id = $1))
             RETURNING id",
        )
        .bind(vendor_id)
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Find or create a price row under an item by amount. Two rows carrying
    /// different amounts for the same item stay distinct options, while
    /// re-importing the same amount is a no-op.
    pub async fn ensure_price(pool: &PgPool, item_id: Uuid, price: i64) -> Result<Uuid, sqlx::Error> {
        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM prices WHERE item_id = $1 AND price = $2")
                .bind(item_id)
                .bind(price)
                .fetch_optional(pool)
                .await?;
        if let Some(id) = existing {
            return Ok(id);
        }
        sqlx::query_scalar(
            "INSERT INTO prices (item_id, price, position)
             VALUES ($1, $2,
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM prices WHERE item_id = $1))
             RETURNING id",
        )
        .bind(item_id)
        .bind(price)
        .fetch_one(pool)
        .await
    }

    /// Load items and prices for the given vendor rows and build domain
    /// trees, preserving the vendor row order.
    async fn assemble(pool: &PgPool, rows: Vec<VendorRow>) -> Result<Vec<Vendor>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let vendor_ids: Vec<Uuid> = rows.iter().map(|v| v.id).collect();

        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM items
             WHERE vendor_id = ANY($1)
             ORDER BY position ASC, id ASC"
        );
        let item_rows = sqlx::query_as::<_, ItemRow>(&query)
            .bind(&vendor_ids)
            .fetch_all(pool)
            .await?;

        let item_ids: Vec<Uuid> = item_rows.iter().map(|i| i.id).collect();
        let query = format!(
            "SELECT {PRICE_COLUMNS} FROM prices
             WHERE item_id = ANY($1)
             ORDER BY price ASC, position ASC"
        );
        let price_rows = sqlx::query_as::<_, PriceRow>(&query)
            .bind(&item_ids)
            .fetch_all(pool)
            .await?;

        let mut prices_by_item: HashMap<Uuid, Vec<PriceRow>> = HashMap::new();
        for price in price_rows {
            prices_by_item.entry(price.item_id).or_default().push(price);
        }

        let mut items_by_vendor: HashMap<Uuid, Vec<ItemRow>> = HashMap::new();
        for item in item_rows {
            items_by_vendor.entry(item.vendor_id).or_default().push(item);
        }

        let mut vendors = Vec::with_capacity(rows.len());
        for row in rows {
            let items = items_by_vendor
                .remove(&row.id)
                .unwrap_or_default()
                .into_iter()
                .map(|item| {
                    let prices = prices_by_item
                        .remove(&item.id)
                        .unwrap_or_default()
                        .into_iter()
                        .map(PriceRow::into_domain)
                        .collect();
                    item.into_domain(prices).map_err(decode_error)
                })
                .collect::<Result<Vec<_>, sqlx::Error>>()?;
            vendors.push(row.into_domain(items).map_err(decode_error)?);
        }
        Ok(vendors)
    }
}

/// Enum text in rows is guarded by CHECK constraints, so a parse failure
/// here means the database and code disagree on the closed value sets.
fn decode_error(err: weddit_core::CoreError) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}
