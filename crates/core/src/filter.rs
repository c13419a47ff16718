//! Catalog filtering.
//!
//! Category and region are exact enum matches; the price filter matches on
//! envelope overlap: a vendor passes when its cheapest price is at or below
//! the requested maximum and its priciest is at or above the requested
//! minimum. A vendor with no prices never matches a price-bounded filter.

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Region, Vendor};
use crate::types::Won;

/// Filter criteria for the vendor listing. Absent fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorFilter {
    pub category: Option<Category>,
    pub region: Option<Region>,
    pub min_price: Option<Won>,
    pub max_price: Option<Won>,
}

impl VendorFilter {
    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == VendorFilter::default()
    }

    /// Whether a price bound is present.
    pub fn has_price_bound(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }

    /// Does this vendor satisfy every set criterion?
    pub fn matches(&self, vendor: &Vendor) -> bool {
        if let Some(category) = self.category {
            if vendor.category != category {
                return false;
            }
        }
        if let Some(region) = self.region {
            if vendor.region != region {
                return false;
            }
        }
        if self.has_price_bound() {
            let prices = vendor.all_prices();
            let (Some(&vendor_min), Some(&vendor_max)) =
                (prices.iter().min(), prices.iter().max())
            else {
                // No prices at all: price-bounded filters exclude the vendor.
                return false;
            };
            if let Some(max) = self.max_price {
                if vendor_min > max {
                    return false;
                }
            }
            if let Some(min) = self.min_price {
                if vendor_max < min {
                    return false;
                }
            }
        }
        true
    }
}

/// Apply a filter and return the matches sorted ascending by vendor name
/// (locale-naive ordinal comparison).
pub fn filter_vendors(vendors: Vec<Vendor>, filter: &VendorFilter) -> Vec<Vendor> {
    let mut matched: Vec<Vendor> = vendors
        .into_iter()
        .filter(|v| filter.matches(v))
        .collect();
    matched.sort_by(|a, b| a.name.cmp(&b.name));
    matched
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
