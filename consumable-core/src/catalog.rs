//! Consumable item types and the rules for which ones a spell may become.

use crate::config::MessageKeys;
use crate::error::SelectionError;
use crate::spell::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of consumable a spell can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Scroll,
    Wand,
    /// Cantrip deck (5 cards). Only cantrips go here.
    #[serde(alias = "cantripDeck5", alias = "cantrip-deck-5")]
    CantripDeck,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Scroll => "scroll",
            ItemType::Wand => "wand",
            ItemType::CantripDeck => "cantripDeck",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scroll" => Ok(ItemType::Scroll),
            "wand" => Ok(ItemType::Wand),
            "cantripDeck" | "cantripDeck5" | "cantrip-deck-5" => Ok(ItemType::CantripDeck),
            other => Err(SelectionError::UnknownItemType(other.to_string())),
        }
    }
}

/// One catalog row: an item type and the key of its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub item_type: ItemType,
    pub label_key: String,
}

/// Fixed, ordered list of every consumable type with its label key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTypeCatalog {
    entries: Vec<CatalogEntry>,
}

impl ItemTypeCatalog {
    pub fn from_keys(keys: &MessageKeys) -> Self {
        let entry = |item_type, label_key: &str| CatalogEntry {
            item_type,
            label_key: label_key.to_string(),
        };
        Self {
            entries: vec![
                entry(ItemType::Scroll, &keys.scroll),
                entry(ItemType::Wand, &keys.wand),
                entry(ItemType::CantripDeck, &keys.cantrip_deck),
            ],
        }
    }

    /// Catalog for a key table, sharing the default one when keys match.
    pub fn for_keys(keys: &MessageKeys) -> Self {
        if *keys == MessageKeys::default() {
            DEFAULT_CATALOG.clone()
        } else {
            Self::from_keys(keys)
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn label_key(&self, item_type: ItemType) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.item_type == item_type)
            .map(|e| e.label_key.as_str())
    }
}

lazy_static::lazy_static! {
    /// Catalog built from the default message keys.
    pub static ref DEFAULT_CATALOG: ItemTypeCatalog =
        ItemTypeCatalog::from_keys(&MessageKeys::default());
}

/// Whether an item type may hold a spell of the given kind.
pub fn accepts(item_type: ItemType, is_cantrip: bool) -> bool {
    (item_type == ItemType::CantripDeck) == is_cantrip
}

/// The catalog rows a spell may be turned into, in catalog order.
///
/// Cantrips only fit a cantrip deck; everything else gets every other type.
pub fn valid_item_types(catalog: &ItemTypeCatalog, is_cantrip: bool) -> Vec<CatalogEntry> {
    catalog
        .entries()
        .iter()
        .filter(|e| accepts(e.item_type, is_cantrip))
        .cloned()
        .collect()
}

/// Every level from the spell's base level to 10.
pub fn valid_levels(base_level: Level) -> Vec<Level> {
    base_level.range_to_max().collect()
}

/// Item type preselected when a dialog opens.
pub fn default_item_type(is_cantrip: bool) -> ItemType {
    if is_cantrip {
        ItemType::CantripDeck
    } else {
        ItemType::Scroll
    }
}
