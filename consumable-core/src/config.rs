//! Dialog configuration.
//!
//! Everything here is presentation metadata passed through to the host, with
//! one exception: `stay_open_on_rejection` changes how a refused submit ends.

use crate::error::SelectionError;
use serde::{Deserialize, Serialize};

/// Localization keys used by the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageKeys {
    pub title: String,
    pub scroll: String,
    pub wand: String,
    pub cantrip_deck: String,
    /// Warning shown when a 10th-level wand is submitted.
    pub tenth_level_wand: String,
}

impl MessageKeys {
    fn with_prefix(prefix: &str) -> Self {
        Self {
            title: format!("{prefix}.title"),
            scroll: format!("{prefix}.scroll"),
            wand: format!("{prefix}.wand"),
            cantrip_deck: format!("{prefix}.cantripDeck5"),
            tenth_level_wand: format!("{prefix}.10thLevelWand"),
        }
    }

    /// Keys of the casting item creation dialog.
    pub fn casting_item_create() -> Self {
        Self::with_prefix("PF2E.CastingItemCreateDialog")
    }

    /// Keys of the older scroll/wand popup.
    pub fn scroll_wand_popup() -> Self {
        Self::with_prefix("PF2E.ScrollWandPopup")
    }
}

impl Default for MessageKeys {
    fn default() -> Self {
        Self::casting_item_create()
    }
}

/// Window width requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowWidth {
    #[default]
    Auto,
    Pixels(u32),
}

/// Window behaviour flags for the host. The controller never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    pub classes: Vec<String>,
    pub width: WindowWidth,
    /// Host submits a `change` event on every field edit.
    pub submit_on_change: bool,
    /// Host-side auto close. The controller closes on every submit anyway.
    pub close_on_submit: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
            width: WindowWidth::Auto,
            submit_on_change: true,
            close_on_submit: false,
        }
    }
}

pub const CASTING_ITEM_CREATE_TEMPLATE: &str =
    "systems/pf2e/templates/popups/casting-item-create-dialog.hbs";
pub const SCROLL_WAND_POPUP_TEMPLATE: &str = "systems/pf2e/templates/popups/scroll-wand-popup.html";

/// Configuration for a selection dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    pub keys: MessageKeys,
    pub template: String,
    pub window: WindowOptions,
    /// Keep the dialog open after a refused submit (10th-level wand or a
    /// selection the view never offered).
    pub stay_open_on_rejection: bool,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            keys: MessageKeys::casting_item_create(),
            template: CASTING_ITEM_CREATE_TEMPLATE.to_string(),
            window: WindowOptions::default(),
            stay_open_on_rejection: false,
        }
    }
}

impl DialogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration matching the scroll/wand popup.
    pub fn scroll_wand_popup() -> Self {
        Self {
            keys: MessageKeys::scroll_wand_popup(),
            template: SCROLL_WAND_POPUP_TEMPLATE.to_string(),
            ..Self::default()
        }
    }

    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SelectionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_keys(mut self, keys: MessageKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_window(mut self, window: WindowOptions) -> Self {
        self.window = window;
        self
    }

    pub fn with_stay_open_on_rejection(mut self, stay_open: bool) -> Self {
        self.stay_open_on_rejection = stay_open;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_only_in_keys_and_template() {
        let popup = DialogConfig::scroll_wand_popup();
        let dialog = DialogConfig::default();
        assert_eq!(popup.keys.wand, "PF2E.ScrollWandPopup.wand");
        assert_eq!(dialog.keys.wand, "PF2E.CastingItemCreateDialog.wand");
        assert_eq!(
            dialog.keys.tenth_level_wand,
            "PF2E.CastingItemCreateDialog.10thLevelWand"
        );
        assert_eq!(popup.window, dialog.window);
        assert_ne!(popup.template, dialog.template);
    }

    #[test]
    fn test_window_defaults() {
        let window = WindowOptions::default();
        assert!(window.submit_on_change);
        assert!(!window.close_on_submit);
        assert_eq!(window.width, WindowWidth::Auto);
    }

    #[test]
    fn test_from_json_partial() {
        let config = DialogConfig::from_json(
            r#"{"stay_open_on_rejection": true, "window": {"width": {"pixels": 420}}}"#,
        )
        .unwrap();
        assert!(config.stay_open_on_rejection);
        assert_eq!(config.window.width, WindowWidth::Pixels(420));
        assert!(config.window.submit_on_change);
        assert_eq!(config.keys, MessageKeys::default());
    }

    #[test]
    fn test_from_json_partial_keys() {
        let config = DialogConfig::from_json(r#"{"keys": {"title": "My.title"}}"#).unwrap();
        assert_eq!(config.keys.title, "My.title");
        assert_eq!(config.keys.wand, MessageKeys::default().wand);
        assert_eq!(
            config.keys.tenth_level_wand,
            "PF2E.CastingItemCreateDialog.10thLevelWand"
        );
    }

    #[test]
    fn test_from_json_invalid() {
        let err = DialogConfig::from_json("{not json").unwrap_err();
        assert!(err.is_fatal());
    }
}
