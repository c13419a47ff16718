//! Vendor/item/price row types and the admin creation DTO.

use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;
use weddit_core::types::Timestamp;
use weddit_core::{CoreError, Item, Price, Vendor};

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A `vendors` table row. Category/region are stored as their wire strings
/// (constrained by CHECKs) and parsed into the closed enums on assembly.
#[derive(Debug, Clone, FromRow)]
pub struct VendorRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub region: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// An `items` table row.
#[derive(Debug, Clone, FromRow)]
pub struct ItemRow {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub selection_mode: String,
    pub required: bool,
    pub position: i32,
}

/// A `prices` table row.
#[derive(Debug, Clone, FromRow)]
pub struct PriceRow {
    pub id: Uuid,
    pub item_id: Uuid,
    pub name: Option<String>,
    pub price: i64,
    pub description: Option<String>,
    pub is_default: bool,
    pub position: i32,
}

// ---------------------------------------------------------------------------
// Assembly into the domain tree
// ---------------------------------------------------------------------------

impl PriceRow {
    pub fn into_domain(self) -> Price {
        Price {
            id: self.id,
            name: self.name,
            price: self.price,
            description: self.description,
            is_default: self.is_default,
        }
    }
}

impl ItemRow {
    pub fn into_domain(self, prices: Vec<Price>) -> Result<Item, CoreError> {
        Ok(Item {
            id: self.id,
            name: self.name,
            description: self.description,
            selection_mode: self.selection_mode.parse()?,
            required: self.required,
            prices,
        })
    }
}

impl VendorRow {
    pub fn into_domain(self, items: Vec<Item>) -> Result<Vendor, CoreError> {
        Ok(Vendor {
            id: self.id,
            name: self.name,
            category: self.category.parse()?,
            region: self.region.parse()?,
            address: self.address,
            phone: self.phone,
            website: self.website,
            description: self.description,
            items,
        })
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Admin vendor creation input: one vendor with at most one item/price pair.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVendorInput {
    pub name: String,
    pub category: String,
    pub region: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "itemName")]
    pub item_name: Option<String>,
    pub price: Option<i64>,
}
