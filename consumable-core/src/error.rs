//! Error types for the selection dialog.

use crate::catalog::ItemType;
use crate::spell::Level;
use thiserror::Error;

/// Boxed error returned by a completion handler.
pub type CompletionError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from building or driving a selection dialog.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The dialog was built without a spell. Fix the call site.
    #[error("Could not read spell data: no spell attached to dialog")]
    MissingSpell,

    #[error("Level {0} is out of range (0-10)")]
    LevelOutOfRange(i64),

    #[error("Unknown item type: {0}")]
    UnknownItemType(String),

    #[error("Invalid form data: {0}")]
    InvalidForm(String),

    /// The shell submitted a combination the view never offered.
    #[error("{item_type} at level {level} is not a legal selection for this spell")]
    IllegalSelection { item_type: ItemType, level: Level },

    #[error("Dialog is closed")]
    DialogClosed,

    #[error("Completion callback failed: {0}")]
    Completion(CompletionError),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl SelectionError {
    /// Whether this error signals a caller defect rather than bad user input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SelectionError::MissingSpell | SelectionError::Config(_))
    }
}
