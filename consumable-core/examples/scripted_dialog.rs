//! Drive a selection dialog from a script of raw form payloads.
//!
//! Run with: `RUST_LOG=debug cargo run -p consumable-core --example scripted_dialog`

use consumable_core::{
    CompletionError, ConsumableSelectionController, DialogConfig, DialogId, FormData, FormEvent,
    ItemType, Level, NotificationSink, RenderSink, SelectionError, Spell, ViewModel,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

struct StdoutRenderer;

impl RenderSink for StdoutRenderer {
    fn render(&self, view: &ViewModel) {
        match serde_json::to_string_pretty(view) {
            Ok(json) => println!("render:\n{json}"),
            Err(e) => eprintln!("render failed: {e}"),
        }
    }

    fn close(&self, dialog: DialogId) {
        println!("close: {dialog}");
    }
}

struct StdoutNotifier;

impl NotificationSink for StdoutNotifier {
    fn warn(&self, message_key: &str) {
        println!("warning: {message_key}");
    }
}

async fn create_item(level: Level, item_type: ItemType, spell: Arc<Spell>) -> Result<(), CompletionError> {
    println!("created level {level} {item_type} of {}", spell.name);
    Ok(())
}

async fn run(spell: Spell, script: &[(&str, &str)]) -> Result<(), SelectionError> {
    println!("\n=== {} ===", spell.name);

    let mut dialog = ConsumableSelectionController::new(
        Arc::new(spell),
        create_item,
        StdoutRenderer,
        StdoutNotifier,
        DialogConfig::default(),
    );
    StdoutRenderer.render(&dialog.prepare_view_model()?);

    for (event, payload) in script {
        let event = if *event == "submit" {
            FormEvent::Submit
        } else {
            FormEvent::Change
        };
        let outcome = dialog
            .handle_form_event(event, FormData::from_json(payload)?)
            .await?;
        println!("outcome: {outcome:?}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    run(
        Spell::new("Fireball", Level::new(3)?),
        &[
            ("change", r#"{"itemType": "wand", "level": 5}"#),
            ("submit", r#"{"itemType": "wand", "level": 5}"#),
        ],
    )
    .await?;

    run(
        Spell::new("Heal", Level::new(1)?),
        &[("submit", r#"{"itemType": "wand", "level": 10}"#)],
    )
    .await?;

    run(
        Spell::cantrip("Electric Arc", Level::new(1)?),
        &[("submit", r#"{"itemType": "cantripDeck5", "level": 1}"#)],
    )
    .await?;

    Ok(())
}
