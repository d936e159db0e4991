//! Scenario tests for the selection dialog.
//!
//! These drive a controller through `DialogHarness` the way a host window
//! would: render, change fields, submit.
//!
//! Run with: `cargo test -p consumable-core --test dialog_flow`

use consumable_core::catalog::ItemType;
use consumable_core::config::DialogConfig;
use consumable_core::controller::{
    ConsumableSelectionController, EventOutcome, FormData, FormEvent, SelectionState,
    SharedController,
};
use consumable_core::testing::{DialogHarness, RecordingCompletion, RecordingNotifier, RecordingRenderer};
use consumable_core::{CompletionError, Level, SelectionError, Spell};
use std::sync::Arc;

fn level(n: u8) -> Level {
    Level::new(n).unwrap()
}

fn fireball() -> Spell {
    Spell::new("Fireball", level(3)).with_trait("fire")
}

fn option_ids(harness: &DialogHarness) -> Vec<ItemType> {
    harness
        .view()
        .unwrap()
        .item_type_options
        .iter()
        .map(|o| o.item_type)
        .collect()
}

// =============================================================================
// DERIVED OPTIONS AND DEFAULTS
// =============================================================================

#[test]
fn test_cantrip_only_offers_cantrip_deck() {
    for base in 0..=10 {
        let harness = DialogHarness::new(Spell::cantrip("Shield", level(base)));
        assert_eq!(option_ids(&harness), vec![ItemType::CantripDeck]);
        assert_eq!(harness.controller.state().item_type, ItemType::CantripDeck);
    }
}

#[test]
fn test_non_cantrip_offers_scroll_and_wand() {
    for base in 0..=10 {
        let harness = DialogHarness::new(Spell::new("Heal", level(base)));
        assert_eq!(option_ids(&harness), vec![ItemType::Scroll, ItemType::Wand]);
        assert_eq!(harness.controller.state().item_type, ItemType::Scroll);
    }
}

#[test]
fn test_levels_run_from_base_to_ten() {
    for base in 0..=10u8 {
        let harness = DialogHarness::new(Spell::new("Heal", level(base)));
        let view = harness.view().unwrap();
        let levels: Vec<u8> = view.valid_levels.iter().map(|l| l.get()).collect();
        assert_eq!(levels, (base..=10).collect::<Vec<_>>());
        assert_eq!(harness.controller.state().level, level(base));
    }
}

#[test]
fn test_view_model_is_idempotent() {
    let harness = DialogHarness::new(fireball());
    assert_eq!(harness.view().unwrap(), harness.view().unwrap());
    assert_eq!(harness.renderer.render_count(), 0);
}

#[test]
fn test_third_level_spell_end_to_end_view() {
    let harness = DialogHarness::new(fireball());
    let view = harness.view().unwrap();

    let levels: Vec<u8> = view.valid_levels.iter().map(|l| l.get()).collect();
    assert_eq!(levels, vec![3, 4, 5, 6, 7, 8, 9, 10]);
    assert_eq!(option_ids(&harness), vec![ItemType::Scroll, ItemType::Wand]);
    assert_eq!(view.selected_item_type, ItemType::Scroll);
    assert_eq!(view.selected_level, level(3));
    assert_eq!(view.title, "PF2E.CastingItemCreateDialog.title");
}

// =============================================================================
// CHANGE EVENTS
// =============================================================================

#[tokio::test]
async fn test_change_replaces_state_without_completing() {
    let mut harness = DialogHarness::new(fireball());

    let outcome = harness.change(ItemType::Wand, 7).await.unwrap();
    assert_eq!(outcome, EventOutcome::Updated);
    assert_eq!(
        harness.controller.state(),
        SelectionState {
            item_type: ItemType::Wand,
            level: level(7),
        }
    );
    assert!(harness.completions().is_empty());
    assert!(harness.is_open());
    assert_eq!(harness.renderer.render_count(), 1);
}

#[tokio::test]
async fn test_change_to_reserved_combination_is_allowed() {
    let mut harness = DialogHarness::new(fireball());
    harness.change(ItemType::Wand, 10).await.unwrap();

    assert!(harness.warnings().is_empty());
    assert!(harness.is_open());
}

// =============================================================================
// SUBMIT EVENTS
// =============================================================================

#[tokio::test]
async fn test_tenth_level_wand_is_rejected_and_closes() {
    let mut harness = DialogHarness::new(fireball());

    let outcome = harness.submit(ItemType::Wand, 10).await.unwrap();
    assert_eq!(
        outcome,
        EventOutcome::Rejected {
            message_key: "PF2E.CastingItemCreateDialog.10thLevelWand".to_string()
        }
    );
    assert_eq!(
        harness.warnings(),
        vec!["PF2E.CastingItemCreateDialog.10thLevelWand".to_string()]
    );
    assert!(harness.completions().is_empty());
    assert!(!harness.is_open());
    assert_eq!(harness.renderer.closed_dialogs(), vec![harness.controller.id()]);
}

#[tokio::test]
async fn test_ninth_level_wand_completes() {
    let mut harness = DialogHarness::new(fireball());

    let outcome = harness.submit(ItemType::Wand, 9).await.unwrap();
    assert_eq!(
        outcome,
        EventOutcome::Completed(SelectionState {
            item_type: ItemType::Wand,
            level: level(9),
        })
    );

    let calls = harness.completions();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].level, level(9));
    assert_eq!(calls[0].item_type, ItemType::Wand);
    assert_eq!(calls[0].spell.name, "Fireball");
    assert!(!harness.is_open());
}

#[tokio::test]
async fn test_cantrip_deck_submit_completes() {
    let mut harness = DialogHarness::new(Spell::cantrip("Electric Arc", level(1)));

    harness.submit(ItemType::CantripDeck, 1).await.unwrap();

    let calls = harness.completions();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].level, level(1));
    assert_eq!(calls[0].item_type, ItemType::CantripDeck);
    assert!(calls[0].spell.is_cantrip());
}

#[tokio::test]
async fn test_submit_after_close_is_refused() {
    let mut harness = DialogHarness::new(fireball());
    harness.submit(ItemType::Scroll, 3).await.unwrap();

    let err = harness.submit(ItemType::Scroll, 4).await.unwrap_err();
    assert!(matches!(err, SelectionError::DialogClosed));
    assert_eq!(harness.completion.call_count(), 1);
}

#[tokio::test]
async fn test_stay_open_on_rejection_allows_retry() {
    let config = DialogConfig::default().with_stay_open_on_rejection(true);
    let mut harness = DialogHarness::with_config(fireball(), config);

    harness.submit(ItemType::Wand, 10).await.unwrap();
    assert!(harness.is_open());

    harness.submit(ItemType::Wand, 8).await.unwrap();
    assert!(!harness.is_open());
    assert_eq!(harness.completion.call_count(), 1);
}

#[tokio::test]
async fn test_scroll_wand_popup_keys() {
    let mut harness = DialogHarness::with_config(fireball(), DialogConfig::scroll_wand_popup());

    let view = harness.view().unwrap();
    assert_eq!(view.title, "PF2E.ScrollWandPopup.title");
    assert_eq!(view.item_type_options[0].label_key, "PF2E.ScrollWandPopup.scroll");

    harness.submit(ItemType::Wand, 10).await.unwrap();
    assert_eq!(
        harness.warnings(),
        vec!["PF2E.ScrollWandPopup.10thLevelWand".to_string()]
    );
}

#[tokio::test]
async fn test_illegal_selection_is_refused_and_closes() {
    let mut harness = DialogHarness::new(fireball());

    let err = harness.submit(ItemType::CantripDeck, 3).await.unwrap_err();
    assert!(matches!(
        err,
        SelectionError::IllegalSelection {
            item_type: ItemType::CantripDeck,
            ..
        }
    ));
    assert!(harness.completions().is_empty());
    assert!(!harness.is_open());
    assert_eq!(harness.renderer.closed_dialogs(), vec![harness.controller.id()]);

    let err = harness.submit(ItemType::Scroll, 3).await.unwrap_err();
    assert!(matches!(err, SelectionError::DialogClosed));
}

#[tokio::test]
async fn test_illegal_level_with_stay_open_allows_retry() {
    let config = DialogConfig::default().with_stay_open_on_rejection(true);
    let mut harness = DialogHarness::with_config(fireball(), config);

    let err = harness.submit(ItemType::Scroll, 2).await.unwrap_err();
    assert!(matches!(
        err,
        SelectionError::IllegalSelection {
            item_type: ItemType::Scroll,
            ..
        }
    ));
    assert!(harness.is_open());

    harness.submit(ItemType::Scroll, 3).await.unwrap();
    assert!(!harness.is_open());
    assert_eq!(harness.completion.call_count(), 1);
}

#[tokio::test]
async fn test_failing_completion_still_closes() {
    let mut harness = DialogHarness::with_failing_completion(fireball(), "inventory full");

    let err = harness.submit(ItemType::Scroll, 3).await.unwrap_err();
    assert!(matches!(err, SelectionError::Completion(_)));
    assert!(err.to_string().contains("inventory full"));
    assert_eq!(harness.completion.call_count(), 1);
    assert!(!harness.is_open());
}

// =============================================================================
// MISSING SPELL
// =============================================================================

#[tokio::test]
async fn test_missing_spell_is_fatal() {
    let mut harness = DialogHarness::without_spell();

    let err = harness.view().unwrap_err();
    assert!(matches!(err, SelectionError::MissingSpell));
    assert!(err.is_fatal());

    let err = harness.change(ItemType::Scroll, 1).await.unwrap_err();
    assert!(matches!(err, SelectionError::MissingSpell));
    assert_eq!(harness.renderer.render_count(), 0);

    let err = harness.submit(ItemType::Scroll, 1).await.unwrap_err();
    assert!(matches!(err, SelectionError::MissingSpell));
    assert!(harness.completions().is_empty());
    assert!(!harness.is_open());
}

#[tokio::test]
async fn test_missing_spell_tenth_level_wand_is_still_rejected() {
    let mut harness = DialogHarness::without_spell();

    let outcome = harness.submit(ItemType::Wand, 10).await.unwrap();
    assert_eq!(
        outcome,
        EventOutcome::Rejected {
            message_key: "PF2E.CastingItemCreateDialog.10thLevelWand".to_string()
        }
    );
    assert_eq!(harness.warnings().len(), 1);
    assert!(harness.completions().is_empty());
    assert!(!harness.is_open());
}

// =============================================================================
// HOST WIRING
// =============================================================================

#[tokio::test]
async fn test_closure_completion_handler() {
    let seen = Arc::new(std::sync::Mutex::new(None));
    let sink = Arc::clone(&seen);

    let mut dialog = ConsumableSelectionController::new(
        Arc::new(fireball()),
        move |level: Level, item_type: ItemType, spell: Arc<Spell>| {
            *sink.lock().unwrap() = Some((level, item_type, spell.name.clone()));
            async { Ok::<(), CompletionError>(()) }
        },
        RecordingRenderer::new(),
        RecordingNotifier::new(),
        DialogConfig::default(),
    );

    let data = FormData::from_json(r#"{"itemType": "scroll", "level": 5}"#).unwrap();
    dialog.handle_form_event(FormEvent::Submit, data).await.unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        Some((level(5), ItemType::Scroll, "Fireball".to_string()))
    );
}

#[tokio::test]
async fn test_shared_controller_serializes_events() {
    let completion = RecordingCompletion::new();
    let shared = SharedController::new(ConsumableSelectionController::new(
        Arc::new(fireball()),
        completion.clone(),
        RecordingRenderer::new(),
        RecordingNotifier::new(),
        DialogConfig::default(),
    ));

    let mut tasks = Vec::new();
    for n in 3..=9 {
        let shared = shared.clone();
        tasks.push(tokio::spawn(async move {
            shared
                .handle_form_event(FormEvent::Submit, FormData::new(ItemType::Scroll, level(n)))
                .await
        }));
    }

    let mut completed = 0;
    let mut refused = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(EventOutcome::Completed(_)) => completed += 1,
            Err(SelectionError::DialogClosed) => refused += 1,
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    assert_eq!(completed, 1);
    assert_eq!(refused, 6);
    assert_eq!(completion.call_count(), 1);
    assert!(!shared.is_open().await);
}
