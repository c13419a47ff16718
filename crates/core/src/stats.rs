//! Aggregate price statistics over a vendor collection.

use serde::Serialize;

use crate::catalog::{Category, Vendor};
use crate::types::Won;

/// Median of a price sample.
///
/// Empty input has no median. Even-length input takes the average of the
/// two middle values, rounded to the nearest won (half rounds up).
pub fn median(values: &[Won]) -> Option<Won> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        let sum = sorted[mid - 1] + sorted[mid];
        // Round-to-nearest for the .5 case instead of truncating.
        Some((sum + 1) / 2)
    }
}

/// Per-category median and sample size.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    pub label: &'static str,
    pub median: Option<Won>,
    pub count: usize,
}

/// Overall and per-category statistics across every price row.
#[derive(Debug, Clone, Serialize)]
pub struct PriceStats {
    pub min: Option<Won>,
    pub median: Option<Won>,
    pub max: Option<Won>,
    pub count: usize,
    pub categories: Vec<CategoryStats>,
}

impl PriceStats {
    /// Collect statistics for a vendor set. Categories appear in enum
    /// order even when empty, so displays stay stable.
    pub fn collect(vendors: &[Vendor]) -> Self {
        let all: Vec<Won> = vendors.iter().flat_map(|v| v.all_prices()).collect();

        let categories = Category::ALL
            .iter()
            .map(|&category| {
                let prices: Vec<Won> = vendors
                    .iter()
                    .filter(|v| v.category == category)
                    .flat_map(|v| v.all_prices())
                    .collect();
                CategoryStats {
                    category,
                    label: category.label(),
                    median: median(&prices),
                    count: prices.len(),
                }
            })
            .collect();

        PriceStats {
            min: all.iter().min().copied(),
            median: median(&all),
            max: all.iter().max().copied(),
            count: all.len(),
            categories,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
