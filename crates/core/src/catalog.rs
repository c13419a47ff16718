//! Vendor catalog entities: vendors, priceable items, and price options.
//!
//! The model is a strict tree: a `Price` belongs to exactly one `Item`, an
//! `Item` to exactly one `Vendor`. Default/base price resolution lives here
//! so the selection engine, list displays, and saved comparisons all agree
//! on which option is "the starting one".

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{EntityId, Won};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Wedding service category. Closed set; adding one is a compile-time
/// checked change everywhere it is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Studio,
    Dress,
    Makeup,
    WeddingHall,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::Studio,
        Category::Dress,
        Category::Makeup,
        Category::WeddingHall,
    ];

    /// Korean display label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Studio => "스튜디오",
            Category::Dress => "드레스",
            Category::Makeup => "메이크업",
            Category::WeddingHall => "웨딩홀",
        }
    }

    /// Wire/storage value (`STUDIO`, `DRESS`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Studio => "STUDIO",
            Category::Dress => "DRESS",
            Category::Makeup => "MAKEUP",
            Category::WeddingHall => "WEDDING_HALL",
        }
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "STUDIO" => Ok(Category::Studio),
            "DRESS" => Ok(Category::Dress),
            "MAKEUP" => Ok(Category::Makeup),
            "WEDDING_HALL" => Ok(Category::WeddingHall),
            other => Err(CoreError::validation(format!("invalid category: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// One of the 16 fixed administrative regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Region {
    Seoul,
    Gyeonggi,
    Busan,
    Daegu,
    Incheon,
    Gwangju,
    Daejeon,
    Ulsan,
    Gangwon,
    Chungbuk,
    Chungnam,
    Jeonbuk,
    Jeonnam,
    Gyeongbuk,
    Gyeongnam,
    Jeju,
}

impl Region {
    /// All regions, in display order.
    pub const ALL: [Region; 16] = [
        Region::Seoul,
        Region::Gyeonggi,
        Region::Busan,
        Region::Daegu,
        Region::Incheon,
        Region::Gwangju,
        Region::Daejeon,
        Region::Ulsan,
        Region::Gangwon,
        Region::Chungbuk,
        Region::Chungnam,
        Region::Jeonbuk,
        Region::Jeonnam,
        Region::Gyeongbuk,
        Region::Gyeongnam,
        Region::Jeju,
    ];

    /// Korean display label (short form, e.g. "서울").
    pub fn label(self) -> &'static str {
        match self {
            Region::Seoul => "서울",
            Region::Gyeonggi => "경기",
            Region::Busan => "부산",
            Region::Daegu => "대구",
            Region::Incheon => "인천",
            Region::Gwangju => "광주",
            Region::Daejeon => "대전",
            Region::Ulsan => "울산",
            Region::Gangwon => "강원",
            Region::Chungbuk => "충북",
            Region::Chungnam => "충남",
            Region::Jeonbuk => "전북",
            Region::Jeonnam => "전남",
            Region::Gyeongbuk => "경북",
            Region::Gyeongnam => "경남",
            Region::Jeju => "제주",
        }
    }

    /// Wire/storage value (`SEOUL`, `GYEONGGI`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Seoul => "SEOUL",
            Region::Gyeonggi => "GYEONGGI",
            Region::Busan => "BUSAN",
            Region::Daegu => "DAEGU",
            Region::Incheon => "INCHEON",
            Region::Gwangju => "GWANGJU",
            Region::Daejeon => "DAEJEON",
            Region::Ulsan => "ULSAN",
            Region::Gangwon => "GANGWON",
            Region::Chungbuk => "CHUNGBUK",
            Region::Chungnam => "CHUNGNAM",
            Region::Jeonbuk => "JEONBUK",
            Region::Jeonnam => "JEONNAM",
            Region::Gyeongbuk => "GYEONGBUK",
            Region::Gyeongnam => "GYEONGNAM",
            Region::Jeju => "JEJU",
        }
    }
}

impl FromStr for Region {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| CoreError::validation(format!("invalid region: {s}")))
    }
}

// ---------------------------------------------------------------------------
// Selection mode
// ---------------------------------------------------------------------------

/// How an item's price options are chosen: one of them (radio) or any
/// subset of them (checkboxes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Single,
    Multi,
}

impl SelectionMode {
    /// Storage value (`single` / `multi`).
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionMode::Single => "single",
            SelectionMode::Multi => "multi",
        }
    }
}

impl FromStr for SelectionMode {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "single" => Ok(SelectionMode::Single),
            "multi" => Ok(SelectionMode::Multi),
            other => Err(CoreError::validation(format!(
                "invalid selection mode: {other}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// One selectable priced option under an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub id: EntityId,
    pub name: Option<String>,
    /// Whole won, never negative.
    pub price: Won,
    pub description: Option<String>,
    /// Marks the designated base option for single mode, or a member of the
    /// initial set for required multi items.
    #[serde(default)]
    pub is_default: bool,
}

/// A priceable menu line belonging to a vendor (e.g. "기본 패키지").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub selection_mode: SelectionMode,
    #[serde(default)]
    pub required: bool,
    /// Ordered; ties in price resolution break on first-encountered.
    pub prices: Vec<Price>,
}

/// A wedding-service business with its itemized price sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: EntityId,
    pub name: String,
    pub category: Category,
    pub region: Region,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub items: Vec<Item>,
}

// ---------------------------------------------------------------------------
// Default price resolution
// ---------------------------------------------------------------------------

impl Item {
    /// Resolve the base ("starting") option for this item.
    ///
    /// Resolution order:
    /// 1. the first price flagged `is_default`;
    /// 2. the first price whose trimmed name is empty or contains "기본";
    /// 3. the minimum-priced option, first-encountered winning ties.
    ///
    /// Returns `None` only when the item has no prices at all.
    pub fn base_price_id(&self) -> Option<EntityId> {
        if let Some(p) = self.prices.iter().find(|p| p.is_default) {
            return Some(p.id);
        }
        if let Some(p) = self.prices.iter().find(|p| {
            let name = p.name.as_deref().unwrap_or("").trim();
            name.is_empty() || name.contains("기본")
        }) {
            return Some(p.id);
        }
        self.min_price_id()
    }

    /// The strictly-lowest-priced option, first-encountered winning ties.
    /// Used as the required-multi fallback when nothing is flagged default.
    pub fn min_price_id(&self) -> Option<EntityId> {
        self.prices
            .iter()
            .reduce(|a, b| if a.price <= b.price { a } else { b })
            .map(|p| p.id)
    }

    /// The highest-priced option, first-encountered winning ties.
    pub fn max_price(&self) -> Option<Won> {
        self.prices.iter().map(|p| p.price).max()
    }

    /// Look up a price option by id.
    pub fn price(&self, id: EntityId) -> Option<&Price> {
        self.prices.iter().find(|p| p.id == id)
    }

    /// Sum of all price options under this item.
    pub fn price_sum(&self) -> Won {
        self.prices.iter().map(|p| p.price).sum()
    }
}

impl Vendor {
    /// Items that carry at least one price option. Zero-price items are
    /// inert in every total and carry no selection state.
    pub fn priced_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|it| !it.prices.is_empty())
    }

    /// Every price amount across all items, in document order.
    pub fn all_prices(&self) -> Vec<Won> {
        self.items
            .iter()
            .flat_map(|it| it.prices.iter().map(|p| p.price))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject negative price amounts.
pub fn validate_price(price: Won) -> CoreResult<()> {
    if price < 0 {
        return Err(CoreError::validation(format!(
            "price must be non-negative, got {price}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    fn price(name: Option<&str>, amount: Won) -> Price {
        Price {
            id: Uuid::new_v4(),
            name: name.map(String::from),
            price: amount,
            description: None,
            is_default: false,
        }
    }

    fn item(prices: Vec<Price>) -> Item {
        Item {
            id: Uuid::new_v4(),
            name: "패키지".into(),
            description: None,
            selection_mode: SelectionMode::Single,
            required: false,
            prices,
        }
    }

    // -- enum round-trips --

    #[test]
    fn category_from_str_round_trips() {
        for cat in Category::ALL {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), cat);
        }
    }

    #[test]
    fn category_rejects_unknown_value() {
        assert_matches!("HANBOK".parse::<Category>(), Err(CoreError::Validation(_)));
        assert_matches!("studio".parse::<Category>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn region_from_str_round_trips() {
        for region in Region::ALL {
            assert_eq!(region.as_str().parse::<Region>().unwrap(), region);
        }
    }

    #[test]
    fn region_rejects_unknown_value() {
        assert_matches!("TOKYO".parse::<Region>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn region_covers_sixteen_values() {
        assert_eq!(Region::ALL.len(), 16);
    }

    #[test]
    fn labels_are_exhaustive_and_nonempty() {
        for cat in Category::ALL {
            assert!(!cat.label().is_empty());
        }
        for region in Region::ALL {
            assert!(!region.label().is_empty());
        }
    }

    // -- base price resolution --

    #[test]
    fn base_price_prefers_default_flag() {
        let mut it = item(vec![price(Some("평일"), 1_500_000), price(Some("주말"), 2_000_000)]);
        it.prices[1].is_default = true;
        assert_eq!(it.base_price_id(), Some(it.prices[1].id));
    }

    #[test]
    fn base_price_falls_back_to_basic_name() {
        let it = item(vec![
            price(Some("프리미엄"), 2_000_000),
            price(Some("기본 구성"), 1_800_000),
        ]);
        assert_eq!(it.base_price_id(), Some(it.prices[1].id));
    }

    #[test]
    fn base_price_empty_name_counts_as_basic() {
        let it = item(vec![price(Some("프리미엄"), 2_000_000), price(None, 1_800_000)]);
        assert_eq!(it.base_price_id(), Some(it.prices[1].id));
    }

    #[test]
    fn base_price_falls_back_to_minimum() {
        // No flag, no "기본" name: the 평일 option wins on price.
        let it = item(vec![price(Some("평일"), 1_500_000), price(Some("주말"), 2_000_000)]);
        assert_eq!(it.base_price_id(), Some(it.prices[0].id));
    }

    #[test]
    fn base_price_min_tie_breaks_on_first_encountered() {
        let it = item(vec![price(Some("A안"), 500_000), price(Some("B안"), 500_000)]);
        assert_eq!(it.base_price_id(), Some(it.prices[0].id));
        assert_eq!(it.min_price_id(), Some(it.prices[0].id));
    }

    #[test]
    fn base_price_none_for_empty_item() {
        let it = item(vec![]);
        assert_eq!(it.base_price_id(), None);
        assert_eq!(it.min_price_id(), None);
        assert_eq!(it.max_price(), None);
    }

    // -- validation --

    #[test]
    fn negative_price_rejected() {
        assert_matches!(validate_price(-1), Err(CoreError::Validation(_)));
        assert!(validate_price(0).is_ok());
        assert!(validate_price(1_500_000).is_ok());
    }
}
