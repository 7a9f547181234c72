//! Replay a JSON-lines event script against fresh stores.
//!
//! Each non-blank line that does not start with `#` names a store and one
//! event in that store's wire format:
//!
//! ```text
//! {"store": "error", "event": {"type": "ADD_ERROR", "payload": {"type": "network", "message": "offline"}}}
//! {"store": "loading", "event": {"type": "START_OPERATION", "payload": {"key": "fetch"}}}
//! {"store": "display", "event": {"type": "TOGGLE"}}
//! ```

use anyhow::Context;
use lumen_app::loading::selectors;
use lumen_app::{
    AppConfig, DisplayModeContext, DisplayModeEvent, ErrorContext, ErrorEvent, LoadingContext,
    LoadingEvent, UiStores,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// One scripted event, tagged with the store it goes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "store", content = "event", rename_all = "lowercase")]
pub enum ScriptLine {
    /// `"store": "error"`
    Error(ErrorEvent),
    /// `"store": "loading"`
    Loading(LoadingEvent),
    /// `"store": "display"`
    Display(DisplayModeEvent),
}

/// Final state of all three stores after a replay.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    /// Script lines dispatched.
    pub events_applied: usize,
    /// Final error store snapshot.
    pub errors: Arc<ErrorContext>,
    /// Final loading store snapshot.
    pub loading: Arc<LoadingContext>,
    /// Unkeyed `is_loading` over the final loading snapshot.
    pub is_loading: bool,
    /// Unkeyed loading message over the final loading snapshot.
    pub loading_message: String,
    /// Final display mode snapshot.
    pub display: Arc<DisplayModeContext>,
}

/// Parse a script, reporting the 1-based line number of the first bad line.
pub fn parse_script(source: &str) -> anyhow::Result<Vec<ScriptLine>> {
    source
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            serde_json::from_str::<ScriptLine>(line)
                .with_context(|| format!("invalid event on line {number}"))
        })
        .collect()
}

/// Dispatch every line in order and collect the resulting snapshots.
pub fn replay(stores: &UiStores, lines: Vec<ScriptLine>) -> ReplayReport {
    let events_applied = lines.len();
    for line in lines {
        match line {
            ScriptLine::Error(event) => {
                stores.errors.dispatch(event);
            }
            ScriptLine::Loading(event) => {
                stores.loading.dispatch(event);
            }
            ScriptLine::Display(event) => {
                stores.display.dispatch(event);
            }
        }
    }

    let loading = stores.loading.snapshot();
    ReplayReport {
        events_applied,
        errors: stores.errors.snapshot(),
        is_loading: selectors::is_loading(Some(&*loading), None),
        loading_message: stores.loading.loading_message(None),
        loading,
        display: stores.display.snapshot(),
    }
}

/// Read `script`, replay it against stores built from `config`, and render
/// the report as JSON.
pub fn run(script: &Path, config: &AppConfig, pretty: bool) -> anyhow::Result<String> {
    let source = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read script {}", script.display()))?;
    let lines = parse_script(&source)?;
    tracing::info!(events = lines.len(), script = %script.display(), "replaying");

    let stores = UiStores::from_config(config);
    let report = replay(&stores, lines);

    let rendered = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(rendered)
}
