//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod geocode_cache_repo;
pub mod vendor_repo;

pub use geocode_cache_repo::GeocodeCacheRepo;
pub use vendor_repo::VendorRepo;
