//! Option selection engine.
//!
//! Given a vendor's items/prices and a per-item selection state, this module
//! computes the three displayed totals (base, selected, max) and enforces
//! selection legality. All functions are pure and synchronous; illegal
//! mutations are no-ops rather than errors, so a UI can feed user input
//! straight through without special-casing.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Item, SelectionMode, Vendor};
use crate::types::{EntityId, Won};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Per-item selection state for one vendor.
///
/// `single` maps an item to its chosen option, `None` meaning "no option
/// chosen, contributes 0". `multi` maps an item to the set of toggled
/// options. Items with zero prices never appear in either map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub single: BTreeMap<EntityId, Option<EntityId>>,
    pub multi: BTreeMap<EntityId, BTreeSet<EntityId>>,
}

impl SelectionState {
    /// Build the initial selection state for a vendor.
    ///
    /// - multi + required: the `is_default` set, or `{min price}` when
    ///   nothing is flagged;
    /// - multi + optional: the empty set;
    /// - single + required: the resolved base option;
    /// - single + optional: no selection.
    ///
    /// Running this twice over the same vendor yields identical state.
    pub fn init(vendor: &Vendor) -> Self {
        let mut state = SelectionState::default();

        for item in vendor.priced_items() {
            match item.selection_mode {
                SelectionMode::Multi => {
                    let set: BTreeSet<EntityId> = if item.required {
                        let defaults: BTreeSet<EntityId> = item
                            .prices
                            .iter()
                            .filter(|p| p.is_default)
                            .map(|p| p.id)
                            .collect();
                        if defaults.is_empty() {
                            item.min_price_id().into_iter().collect()
                        } else {
                            defaults
                        }
                    } else {
                        // Optional multi starts with nothing pre-checked even
                        // when default flags exist; changing that is a product
                        // decision, not a bug fix.
                        BTreeSet::new()
                    };
                    state.multi.insert(item.id, set);
                }
                SelectionMode::Single => {
                    let choice = if item.required {
                        item.base_price_id()
                    } else {
                        None
                    };
                    state.single.insert(item.id, choice);
                }
            }
        }

        state
    }

    /// Replace the choice for a single-mode item (radio semantics).
    ///
    /// Returns `true` when the state changed. Rejected without change when:
    /// - the item is unknown to this state (zero prices or wrong mode);
    /// - `choice` names a price the item does not own;
    /// - `choice` is `None` but the item is required.
    pub fn select_single(&mut self, item: &Item, choice: Option<EntityId>) -> bool {
        if item.selection_mode != SelectionMode::Single {
            return false;
        }
        match choice {
            None if item.required => return false,
            Some(id) if item.price(id).is_none() => return false,
            _ => {}
        }
        let Some(slot) = self.single.get_mut(&item.id) else {
            return false;
        };
        if *slot == choice {
            return false;
        }
        *slot = choice;
        true
    }

    /// Toggle one option of a multi-mode item.
    ///
    /// Returns `true` when the state changed. Removing the last member of a
    /// required item's set is rejected; the state is left untouched so a
    /// required item can never be undercounted.
    pub fn toggle_multi(&mut self, item: &Item, price_id: EntityId) -> bool {
        if item.selection_mode != SelectionMode::Multi || item.price(price_id).is_none() {
            return false;
        }
        let Some(set) = self.multi.get_mut(&item.id) else {
            return false;
        };
        if set.contains(&price_id) {
            if item.required && set.len() == 1 {
                return false;
            }
            set.remove(&price_id);
        } else {
            set.insert(price_id);
        }
        true
    }

    /// Chosen option for a single-mode item, flattened: `None` for both
    /// "unknown item" and "no option chosen".
    pub fn chosen(&self, item_id: EntityId) -> Option<EntityId> {
        self.single.get(&item_id).copied().flatten()
    }

    /// Set of toggled options for a multi-mode item (empty for unknown).
    pub fn toggled(&self, item_id: EntityId) -> BTreeSet<EntityId> {
        self.multi.get(&item_id).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// Sum of the currently selected options across all priced items.
pub fn selected_total(vendor: &Vendor, state: &SelectionState) -> Won {
    vendor
        .priced_items()
        .map(|item| match item.selection_mode {
            SelectionMode::Multi => state
                .toggled(item.id)
                .iter()
                .filter_map(|id| item.price(*id))
                .map(|p| p.price)
                .sum(),
            SelectionMode::Single => state
                .chosen(item.id)
                .and_then(|id| item.price(id))
                .map(|p| p.price)
                .unwrap_or(0),
        })
        .sum()
}

/// The "from" price: required items at their default selections, optional
/// items contributing nothing regardless of any current selection.
pub fn base_total(vendor: &Vendor) -> Won {
    vendor
        .priced_items()
        .filter(|item| item.required)
        .map(|item| match item.selection_mode {
            SelectionMode::Multi => {
                let defaults: Won = item
                    .prices
                    .iter()
                    .filter(|p| p.is_default)
                    .map(|p| p.price)
                    .sum();
                if item.prices.iter().any(|p| p.is_default) {
                    defaults
                } else {
                    item.min_price_id()
                        .and_then(|id| item.price(id))
                        .map(|p| p.price)
                        .unwrap_or(0)
                }
            }
            SelectionMode::Single => item
                .base_price_id()
                .and_then(|id| item.price(id))
                .map(|p| p.price)
                .unwrap_or(0),
        })
        .sum()
}

/// Ceiling total assuming a user selects everything selectable: every option
/// of a multi item, the most expensive option of a single item.
pub fn max_total(vendor: &Vendor) -> Won {
    vendor
        .priced_items()
        .map(|item| match item.selection_mode {
            SelectionMode::Multi => item.price_sum(),
            SelectionMode::Single => item.max_price().unwrap_or(0),
        })
        .sum()
}

// ---------------------------------------------------------------------------
// Price range display
// ---------------------------------------------------------------------------

/// A vendor's displayed price envelope (base total up to max total).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub base: Won,
    pub max: Won,
}

impl PriceRange {
    /// The envelope for a vendor, or `None` when it has no priced item.
    pub fn of(vendor: &Vendor) -> Option<Self> {
        if vendor.priced_items().next().is_none() {
            return None;
        }
        Some(PriceRange {
            base: base_total(vendor),
            max: max_total(vendor),
        })
    }
}

impl fmt::Display for PriceRange {
    /// `"1500000"` when base and max coincide, `"1500000 ~ 2000000"` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.base == self.max {
            write!(f, "{}", self.base)
        } else {
            write!(f, "{} ~ {}", self.base, self.max)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
