//! Database row types and DTOs.

pub mod geocode;
pub mod vendor;

pub use geocode::GeocodeCacheRow;
pub use vendor::{CreateVendorInput, ItemRow, PriceRow, VendorRow};
