//! The selection dialog state machine.
//!
//! A dialog starts `Open`, takes any number of `change` events, and ends
//! `Closed` on the first `submit`, whether completed, rejected or refused.
//! A closed dialog is never reopened; build a new one instead.

use crate::catalog::{default_item_type, valid_item_types, valid_levels, ItemType, ItemTypeCatalog};
use crate::config::DialogConfig;
use crate::error::SelectionError;
use crate::host::{CompletionHandler, NotificationSink, RenderSink};
use crate::spell::{Level, Spell};
use crate::view::ViewModel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Identifies one dialog instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialogId(Uuid);

impl DialogId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DialogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of form event relayed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormEvent {
    Change,
    Submit,
}

/// Form fields as sent back by the host. Both fields are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub item_type: ItemType,
    pub level: Level,
}

impl FormData {
    pub fn new(item_type: ItemType, level: Level) -> Self {
        Self { item_type, level }
    }

    /// Parse a raw `{"itemType": ..., "level": ...}` payload.
    pub fn from_json(json: &str) -> Result<Self, SelectionError> {
        serde_json::from_str(json).map_err(|e| SelectionError::InvalidForm(e.to_string()))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, SelectionError> {
        serde_json::from_value(value).map_err(|e| SelectionError::InvalidForm(e.to_string()))
    }
}

/// Current selection of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub item_type: ItemType,
    pub level: Level,
}

impl From<FormData> for SelectionState {
    fn from(data: FormData) -> Self {
        Self {
            item_type: data.item_type,
            level: data.level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Open,
    Closed,
}

/// Result of a handled form event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// State replaced and a redraw requested.
    Updated,
    /// The completion handler ran with the selection.
    Completed(SelectionState),
    /// Submit refused with a user-facing warning.
    Rejected { message_key: String },
}

/// Owns the selection for one spell and turns form events into results.
pub struct ConsumableSelectionController {
    id: DialogId,
    spell: Option<Arc<Spell>>,
    is_cantrip: bool,
    state: SelectionState,
    phase: DialogPhase,
    catalog: ItemTypeCatalog,
    config: DialogConfig,
    completion: Box<dyn CompletionHandler>,
    renderer: Box<dyn RenderSink>,
    notifier: Box<dyn NotificationSink>,
}

impl ConsumableSelectionController {
    /// Build a dialog for a spell.
    ///
    /// A missing spell is a caller bug: the dialog is still built so the host
    /// can tear it down, but rendering and submitting fail with
    /// [`SelectionError::MissingSpell`].
    pub fn new(
        spell: impl Into<Option<Arc<Spell>>>,
        completion: impl CompletionHandler + 'static,
        renderer: impl RenderSink + 'static,
        notifier: impl NotificationSink + 'static,
        config: DialogConfig,
    ) -> Self {
        let id = DialogId::new();
        let spell = spell.into();

        let is_cantrip = spell.as_ref().is_some_and(|s| s.is_cantrip());
        let level = match &spell {
            Some(s) => s.base_level,
            None => {
                error!(dialog = %id, "selection dialog built without a spell");
                Level::MIN
            }
        };

        Self {
            id,
            spell,
            is_cantrip,
            state: SelectionState {
                item_type: default_item_type(is_cantrip),
                level,
            },
            phase: DialogPhase::Open,
            catalog: ItemTypeCatalog::for_keys(&config.keys),
            config,
            completion: Box::new(completion),
            renderer: Box::new(renderer),
            notifier: Box::new(notifier),
        }
    }

    pub fn id(&self) -> DialogId {
        self.id
    }

    pub fn spell(&self) -> Option<&Arc<Spell>> {
        self.spell.as_ref()
    }

    pub fn is_cantrip(&self) -> bool {
        self.is_cantrip
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == DialogPhase::Open
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Build the view-model for the current state. Read-only.
    pub fn prepare_view_model(&self) -> Result<ViewModel, SelectionError> {
        let spell = self.spell.as_deref().ok_or_else(|| {
            error!(dialog = %self.id, "cannot render selection dialog: no spell");
            SelectionError::MissingSpell
        })?;

        Ok(ViewModel {
            title: self.config.keys.title.clone(),
            template: self.config.template.clone(),
            item_type_options: valid_item_types(&self.catalog, self.is_cantrip),
            valid_levels: valid_levels(spell.base_level),
            selected_item_type: self.state.item_type,
            selected_level: self.state.level,
        })
    }

    /// Apply a form event from the host.
    ///
    /// Both fields replace the current selection. `change` asks the host to
    /// redraw; `submit` validates, runs the completion handler and closes.
    pub async fn handle_form_event(
        &mut self,
        event: FormEvent,
        data: FormData,
    ) -> Result<EventOutcome, SelectionError> {
        if self.phase == DialogPhase::Closed {
            return Err(SelectionError::DialogClosed);
        }

        self.state = data.into();
        debug!(
            dialog = %self.id,
            ?event,
            item_type = %self.state.item_type,
            level = %self.state.level,
            "selection updated"
        );

        match event {
            FormEvent::Change => {
                let view = self.prepare_view_model()?;
                self.renderer.render(&view);
                Ok(EventOutcome::Updated)
            }
            FormEvent::Submit => self.submit().await,
        }
    }

    /// Close without submitting.
    pub fn cancel(&mut self) {
        if self.phase == DialogPhase::Open {
            debug!(dialog = %self.id, "selection dialog cancelled");
            self.close();
        }
    }

    async fn submit(&mut self) -> Result<EventOutcome, SelectionError> {
        let SelectionState { item_type, level } = self.state;

        // A 10th-level wand is selectable but not a legal item.
        if item_type == ItemType::Wand && level == Level::MAX {
            let message_key = self.config.keys.tenth_level_wand.clone();
            warn!(dialog = %self.id, "rejected 10th-level wand");
            self.notifier.warn(&message_key);
            if !self.config.stay_open_on_rejection {
                self.close();
            }
            return Ok(EventOutcome::Rejected { message_key });
        }

        let Some(spell) = self.spell.clone() else {
            error!(dialog = %self.id, "cannot submit selection dialog: no spell");
            self.close();
            return Err(SelectionError::MissingSpell);
        };

        let view = self.prepare_view_model()?;
        if !view.offers_item_type(item_type) || !view.offers_level(level) {
            warn!(dialog = %self.id, %item_type, %level, "submitted selection was never offered");
            if !self.config.stay_open_on_rejection {
                self.close();
            }
            return Err(SelectionError::IllegalSelection { item_type, level });
        }

        let result = self.completion.complete(level, item_type, spell).await;
        self.close();

        match result {
            Ok(()) => {
                info!(dialog = %self.id, %item_type, %level, "consumable selection completed");
                Ok(EventOutcome::Completed(self.state))
            }
            Err(e) => {
                error!(dialog = %self.id, error = %e, "completion handler failed");
                Err(SelectionError::Completion(e))
            }
        }
    }

    fn close(&mut self) {
        self.phase = DialogPhase::Closed;
        self.renderer.close(self.id);
        debug!(dialog = %self.id, "selection dialog closed");
    }
}

impl fmt::Debug for ConsumableSelectionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumableSelectionController")
            .field("id", &self.id)
            .field("spell", &self.spell)
            .field("is_cantrip", &self.is_cantrip)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// A controller behind an async mutex, for hosts that may deliver events
/// from more than one task. Events are applied one at a time.
#[derive(Clone)]
pub struct SharedController {
    inner: Arc<Mutex<ConsumableSelectionController>>,
}

impl SharedController {
    pub fn new(controller: ConsumableSelectionController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    pub async fn prepare_view_model(&self) -> Result<ViewModel, SelectionError> {
        self.inner.lock().await.prepare_view_model()
    }

    pub async fn handle_form_event(
        &self,
        event: FormEvent,
        data: FormData,
    ) -> Result<EventOutcome, SelectionError> {
        self.inner.lock().await.handle_form_event(event, data).await
    }

    pub async fn state(&self) -> SelectionState {
        self.inner.lock().await.state()
    }

    pub async fn is_open(&self) -> bool {
        self.inner.lock().await.is_open()
    }
}
