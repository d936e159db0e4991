//! Seams between the dialog core and the host application.
//!
//! The host owns windows, templates, localization and item creation. The core
//! reaches it only through these traits, so a controller can be driven in
//! tests without any UI running.

use crate::catalog::ItemType;
use crate::controller::DialogId;
use crate::error::CompletionError;
use crate::spell::{Level, Spell};
use crate::view::ViewModel;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Draws the dialog and relays user input back as form events.
///
/// Form payloads sent back must use the field names `itemType` and `level`.
pub trait RenderSink: Send + Sync {
    /// Redraw the dialog from a fresh view-model.
    fn render(&self, view: &ViewModel);

    /// Tear the dialog window down. No events arrive afterwards.
    fn close(&self, dialog: DialogId);
}

/// User-visible notification channel.
pub trait NotificationSink: Send + Sync {
    /// Show a warning. Takes a localization key, not display text.
    fn warn(&self, message_key: &str);
}

/// Receives the validated selection, typically to create the item.
///
/// Called at most once per dialog.
#[async_trait]
pub trait CompletionHandler: Send + Sync {
    async fn complete(
        &self,
        level: Level,
        item_type: ItemType,
        spell: Arc<Spell>,
    ) -> Result<(), CompletionError>;
}

#[async_trait]
impl<F, Fut> CompletionHandler for F
where
    F: Fn(Level, ItemType, Arc<Spell>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), CompletionError>> + Send + 'static,
{
    async fn complete(
        &self,
        level: Level,
        item_type: ItemType,
        spell: Arc<Spell>,
    ) -> Result<(), CompletionError> {
        (self)(level, item_type, spell).await
    }
}
