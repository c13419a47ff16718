//! Weddit domain core.
//!
//! Pure, synchronous domain logic for the wedding-vendor price comparison
//! service: the vendor/item/price model, the option selection engine, catalog
//! filtering and price aggregation, the comparison list, and the spreadsheet
//! row mapper. Nothing in this crate performs I/O; the `weddit-db` and
//! `weddit-api` crates own persistence and HTTP respectively.

pub mod catalog;
pub mod compare;
pub mod error;
pub mod filter;
pub mod import;
pub mod selection;
pub mod stats;
pub mod types;

pub use catalog::{Category, Item, Price, Region, SelectionMode, Vendor};
pub use compare::{CompareEntry, CompareSelection, CompareStore, MemoryStore};
pub use error::{CoreError, CoreResult};
pub use filter::VendorFilter;
pub use selection::{PriceRange, SelectionState};
