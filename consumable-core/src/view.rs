//! View-model handed to the render sink.

use crate::catalog::{CatalogEntry, ItemType};
use crate::spell::Level;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Display-ready state of the dialog.
///
/// Form field names on the host side are `itemType` and `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    /// Localization key of the window title.
    pub title: String,
    /// Host template identifier.
    pub template: String,
    /// Selectable item types, in catalog order.
    #[serde(serialize_with = "serialize_options")]
    pub item_type_options: Vec<CatalogEntry>,
    pub valid_levels: Vec<Level>,
    pub selected_item_type: ItemType,
    pub selected_level: Level,
}

impl ViewModel {
    pub fn offers_item_type(&self, item_type: ItemType) -> bool {
        self.item_type_options.iter().any(|o| o.item_type == item_type)
    }

    pub fn offers_level(&self, level: Level) -> bool {
        self.valid_levels.contains(&level)
    }
}

// Ordered `{ id: label_key }` object, the shape select widgets bind to.
fn serialize_options<S: Serializer>(options: &[CatalogEntry], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(options.len()))?;
    for option in options {
        map.serialize_entry(option.item_type.as_str(), &option.label_key)?;
    }
    map.end()
}
