//! Spell-to-consumable selection dialog.
//!
//! This crate provides the decision logic behind "turn this spell into a
//! scroll, wand or cantrip deck":
//! - Which item types and levels a spell may be made into
//! - A small Open/Closed state machine driven by host form events
//! - Submission validation, including the 10th-level wand rule
//!
//! Rendering, localization and item creation stay with the host, which plugs
//! in through the traits in [`host`].
//!
//! # Quick Start
//!
//! ```ignore
//! use consumable_core::{
//!     ConsumableSelectionController, DialogConfig, FormData, FormEvent, ItemType, Level, Spell,
//! };
//! use std::sync::Arc;
//!
//! let spell = Arc::new(Spell::new("Fireball", Level::new(3)?));
//! let mut dialog = ConsumableSelectionController::new(
//!     spell,
//!     |level, item_type, spell| async move { create_item(level, item_type, spell).await },
//!     my_renderer,
//!     my_notifier,
//!     DialogConfig::default(),
//! );
//!
//! my_renderer.render(&dialog.prepare_view_model()?);
//! dialog
//!     .handle_form_event(FormEvent::Submit, FormData::new(ItemType::Wand, Level::new(5)?))
//!     .await?;
//! ```

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod spell;
pub mod testing;
pub mod view;

// Primary public API
pub use catalog::{ItemType, ItemTypeCatalog};
pub use config::{DialogConfig, MessageKeys, WindowOptions};
pub use controller::{
    ConsumableSelectionController, DialogId, DialogPhase, EventOutcome, FormData, FormEvent,
    SelectionState, SharedController,
};
pub use error::{CompletionError, SelectionError};
pub use host::{CompletionHandler, NotificationSink, RenderSink};
pub use spell::{Level, Spell};
pub use testing::DialogHarness;
pub use view::ViewModel;
