//! Testing utilities for selection dialogs.
//!
//! This module provides host doubles that record every call:
//! - `RecordingRenderer` for renders and closes
//! - `RecordingNotifier` for warnings
//! - `RecordingCompletion` for completion calls (optionally failing)
//! - `DialogHarness` for scripted dialog scenarios
//!
//! All doubles are cheap to clone; clones share their recordings.

use crate::catalog::ItemType;
use crate::config::DialogConfig;
use crate::controller::{ConsumableSelectionController, DialogId, EventOutcome, FormData, FormEvent};
use crate::error::{CompletionError, SelectionError};
use crate::host::{CompletionHandler, NotificationSink, RenderSink};
use crate::spell::{Level, Spell};
use crate::view::ViewModel;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Render sink that keeps every view-model it was given.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    renders: Arc<Mutex<Vec<ViewModel>>>,
    closed: Arc<Mutex<Vec<DialogId>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renders(&self) -> Vec<ViewModel> {
        lock(&self.renders).clone()
    }

    pub fn render_count(&self) -> usize {
        lock(&self.renders).len()
    }

    pub fn last_render(&self) -> Option<ViewModel> {
        lock(&self.renders).last().cloned()
    }

    pub fn closed_dialogs(&self) -> Vec<DialogId> {
        lock(&self.closed).clone()
    }
}

impl RenderSink for RecordingRenderer {
    fn render(&self, view: &ViewModel) {
        lock(&self.renders).push(view.clone());
    }

    fn close(&self, dialog: DialogId) {
        lock(&self.closed).push(dialog);
    }
}

/// Notification sink that keeps every warning key.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    warnings: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<String> {
        lock(&self.warnings).clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn warn(&self, message_key: &str) {
        lock(&self.warnings).push(message_key.to_string());
    }
}

/// One recorded completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCall {
    pub level: Level,
    pub item_type: ItemType,
    pub spell: Arc<Spell>,
}

/// Completion handler that records its calls.
#[derive(Debug, Clone, Default)]
pub struct RecordingCompletion {
    calls: Arc<Mutex<Vec<CompletionCall>>>,
    failure: Option<String>,
}

impl RecordingCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler that records the call, then fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            calls: Arc::default(),
            failure: Some(message.into()),
        }
    }

    pub fn calls(&self) -> Vec<CompletionCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

#[async_trait]
impl CompletionHandler for RecordingCompletion {
    async fn complete(
        &self,
        level: Level,
        item_type: ItemType,
        spell: Arc<Spell>,
    ) -> Result<(), CompletionError> {
        lock(&self.calls).push(CompletionCall {
            level,
            item_type,
            spell,
        });
        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

/// Test harness for running dialog scenarios.
pub struct DialogHarness {
    /// The dialog under test.
    pub controller: ConsumableSelectionController,
    pub renderer: RecordingRenderer,
    pub notifier: RecordingNotifier,
    pub completion: RecordingCompletion,
}

impl DialogHarness {
    /// Open a dialog for a spell with the default configuration.
    pub fn new(spell: Spell) -> Self {
        Self::with_config(spell, DialogConfig::default())
    }

    pub fn with_config(spell: Spell, config: DialogConfig) -> Self {
        Self::build(Some(Arc::new(spell)), RecordingCompletion::new(), config)
    }

    /// Open a dialog whose completion handler fails.
    pub fn with_failing_completion(spell: Spell, message: impl Into<String>) -> Self {
        Self::build(
            Some(Arc::new(spell)),
            RecordingCompletion::failing(message),
            DialogConfig::default(),
        )
    }

    /// Open a dialog with no spell attached.
    pub fn without_spell() -> Self {
        Self::build(None, RecordingCompletion::new(), DialogConfig::default())
    }

    fn build(spell: Option<Arc<Spell>>, completion: RecordingCompletion, config: DialogConfig) -> Self {
        let renderer = RecordingRenderer::new();
        let notifier = RecordingNotifier::new();
        let controller = ConsumableSelectionController::new(
            spell,
            completion.clone(),
            renderer.clone(),
            notifier.clone(),
            config,
        );

        Self {
            controller,
            renderer,
            notifier,
            completion,
        }
    }

    /// Send a `change` event.
    pub async fn change(&mut self, item_type: ItemType, level: u8) -> Result<EventOutcome, SelectionError> {
        let data = FormData::new(item_type, Level::new(level)?);
        self.controller.handle_form_event(FormEvent::Change, data).await
    }

    /// Send a `submit` event.
    pub async fn submit(&mut self, item_type: ItemType, level: u8) -> Result<EventOutcome, SelectionError> {
        let data = FormData::new(item_type, Level::new(level)?);
        self.controller.handle_form_event(FormEvent::Submit, data).await
    }

    pub fn view(&self) -> Result<ViewModel, SelectionError> {
        self.controller.prepare_view_model()
    }

    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.notifier.warnings()
    }

    pub fn completions(&self) -> Vec<CompletionCall> {
        self.completion.calls()
    }
}
