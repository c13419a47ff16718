//! Comparison list: saved vendors plus their option selections.
//!
//! The list physically lives in a browser cookie, but nothing here knows
//! that: the [`CompareStore`] trait carries the load/save/remove/clear
//! contract plus synchronous change notification, and the cookie codec is a
//! pair of pure functions any storage layer can reuse. The wire format is
//! `urlencode(json(entries))`, tolerant of the legacy array-of-ids shape.

use std::collections::{BTreeMap, BTreeSet};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::catalog::{SelectionMode, Vendor};
use crate::selection::{self, SelectionState};
use crate::types::{EntityId, Won};

/// Cookie key the comparison list is stored under.
pub const COOKIE_KEY: &str = "weddit_compare";

/// Cookie lifetime: 180 days.
pub const COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 180;

/// Hard cap on saved entries.
pub const MAX_ENTRIES: usize = 50;

/// Wire sentinel for "no option chosen" in single-mode maps.
const NONE_OPTION: &str = "__none__";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A single-mode choice as stored in the cookie: a price id or the
/// `__none__` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleChoice(pub Option<EntityId>);

impl Serialize for SingleChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(id) => serializer.serialize_str(&id.to_string()),
            None => serializer.serialize_str(NONE_OPTION),
        }
    }
}

impl<'de> Deserialize<'de> for SingleChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == NONE_OPTION {
            return Ok(SingleChoice(None));
        }
        raw.parse()
            .map(|id| SingleChoice(Some(id)))
            .map_err(|_| D::Error::custom(format!("invalid price id: {raw}")))
    }
}

/// The saved selection state of one vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareSelection {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub single: BTreeMap<EntityId, SingleChoice>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub multi: BTreeMap<EntityId, BTreeSet<EntityId>>,
}

impl CompareSelection {
    /// Capture a live selection state for saving.
    pub fn from_state(state: &SelectionState) -> Self {
        CompareSelection {
            single: state
                .single
                .iter()
                .map(|(item, choice)| (*item, SingleChoice(*choice)))
                .collect(),
            multi: state.multi.clone(),
        }
    }

    /// Replay this saved selection onto a vendor.
    ///
    /// Starts from the vendor's initial state and applies each saved choice
    /// through the engine's mutation contract, so anything illegal (stale
    /// price ids, unchecking a required item's last option) is silently
    /// ignored instead of corrupting totals.
    pub fn replay(&self, vendor: &Vendor) -> SelectionState {
        let mut state = SelectionState::init(vendor);

        for item in vendor.priced_items() {
            match item.selection_mode {
                SelectionMode::Single => {
                    if let Some(SingleChoice(choice)) = self.single.get(&item.id) {
                        state.select_single(item, *choice);
                    }
                }
                SelectionMode::Multi => {
                    if let Some(wanted) = self.multi.get(&item.id) {
                        let current = state.toggled(item.id);
                        for id in current.difference(wanted) {
                            state.toggle_multi(item, *id);
                        }
                        for id in wanted.difference(&current) {
                            state.toggle_multi(item, *id);
                        }
                    }
                }
            }
        }

        state
    }
}

/// One saved vendor with its selection, as kept in the comparison list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareEntry {
    /// The saved vendor.
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<CompareSelection>,
    /// Unix epoch milliseconds of the last save.
    #[serde(
        default,
        rename = "savedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub saved_at: Option<i64>,
}

impl CompareEntry {
    /// A bare entry without a saved selection.
    pub fn new(id: EntityId) -> Self {
        CompareEntry {
            id,
            selection: None,
            saved_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Collapse duplicates (last write wins, keeping the later position) and
/// enforce the entry cap.
pub fn normalize(entries: Vec<CompareEntry>) -> Vec<CompareEntry> {
    let mut out: Vec<CompareEntry> = Vec::with_capacity(entries.len().min(MAX_ENTRIES));
    for entry in entries {
        out.retain(|e| e.id != entry.id);
        out.push(entry);
    }
    out.truncate(MAX_ENTRIES);
    out
}

// ---------------------------------------------------------------------------
// Cookie codec
// ---------------------------------------------------------------------------

/// Encode a normalized entry list into the cookie value.
pub fn encode_cookie(entries: &[CompareEntry]) -> String {
    let json = serde_json::to_string(entries).unwrap_or_else(|_| "[]".into());
    urlencoding::encode(&json).into_owned()
}

/// Decode a cookie value into entries.
///
/// Never fails: garbage yields an empty list, malformed entries are dropped
/// individually, and the legacy v1 format (a JSON array of vendor-id
/// strings) still decodes. The result is normalized.
pub fn decode_cookie(raw: &str) -> Vec<CompareEntry> {
    let Ok(decoded) = urlencoding::decode(raw) else {
        return Vec::new();
    };
    let Ok(Value::Array(values)) = serde_json::from_str::<Value>(&decoded) else {
        return Vec::new();
    };

    let entries = values
        .into_iter()
        .filter_map(|value| match value {
            // v1: bare vendor-id strings.
            Value::String(id) => id.parse().ok().map(CompareEntry::new),
            // v2: full entries; a broken selection degrades to none.
            Value::Object(mut obj) => {
                let id: EntityId = obj.get("id")?.as_str()?.parse().ok()?;
                let selection = obj
                    .remove("selection")
                    .and_then(|v| serde_json::from_value(v).ok());
                let saved_at = obj.get("savedAt").and_then(Value::as_i64);
                Some(CompareEntry {
                    id,
                    selection,
                    saved_at,
                })
            }
            _ => None,
        })
        .collect();

    normalize(entries)
}

// ---------------------------------------------------------------------------
// Store contract
// ---------------------------------------------------------------------------

/// Change observer, invoked synchronously with the post-mutation list.
pub type Listener = dyn Fn(&[CompareEntry]) + Send;

/// Persistence contract for the comparison list.
///
/// Implementations decide where the list lives (cookie, local storage,
/// server session); the selection engine never depends on that choice.
pub trait CompareStore {
    /// The current entry list, already normalized.
    fn load(&self) -> Vec<CompareEntry>;

    /// Overwrite the persisted list (normalizing: dedup by vendor,
    /// last write wins, capped at [`MAX_ENTRIES`]).
    fn save(&mut self, entries: Vec<CompareEntry>);

    /// Drop one vendor's entry, if present.
    fn remove(&mut self, vendor_id: EntityId);

    /// Drop everything.
    fn clear(&mut self);

    /// Register an observer called synchronously after every mutation.
    fn subscribe(&mut self, listener: Box<Listener>);
}

/// In-memory reference implementation of [`CompareStore`].
#[derive(Default)]
pub struct MemoryStore {
    entries: Vec<CompareEntry>,
    listeners: Vec<Box<Listener>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.entries);
        }
    }
}

impl CompareStore for MemoryStore {
    fn load(&self) -> Vec<CompareEntry> {
        self.entries.clone()
    }

    fn save(&mut self, entries: Vec<CompareEntry>) {
        self.entries = normalize(entries);
        self.notify();
    }

    fn remove(&mut self, vendor_id: EntityId) {
        self.entries.retain(|e| e.id != vendor_id);
        self.notify();
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.notify();
    }

    fn subscribe(&mut self, listener: Box<Listener>) {
        self.listeners.push(listener);
    }
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// Totals for a vendor under a saved selection, plus display lines like
/// `"기본 패키지: 평일 + 주말"` for the comparison page.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub base_total: Won,
    pub selected_total: Won,
    pub max_total: Won,
    pub lines: Vec<String>,
}

/// Price a saved selection against a vendor.
pub fn quote(vendor: &Vendor, selection: &CompareSelection) -> Quote {
    let state = selection.replay(vendor);

    let mut lines = Vec::new();
    for item in vendor.priced_items() {
        match item.selection_mode {
            SelectionMode::Multi => {
                let toggled = state.toggled(item.id);
                if toggled.is_empty() {
                    continue;
                }
                let names: Vec<&str> = item
                    .prices
                    .iter()
                    .filter(|p| toggled.contains(&p.id))
                    .map(|p| p.name.as_deref().unwrap_or("옵션"))
                    .collect();
                lines.push(format!("{}: {}", item.name, names.join(" + ")));
            }
            SelectionMode::Single => {
                let Some(price) = state.chosen(item.id).and_then(|id| item.price(id)) else {
                    continue;
                };
                lines.push(format!(
                    "{}: {}",
                    item.name,
                    price.name.as_deref().unwrap_or("기본")
                ));
            }
        }
    }

    Quote {
        base_total: selection::base_total(vendor),
        selected_total: selection::selected_total(vendor, &state),
        max_total: selection::max_total(vendor),
        lines,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
