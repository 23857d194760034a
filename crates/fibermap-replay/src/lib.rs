//! Headless route editor shell.
//!
//! Replays a recorded list of map gestures against a [`RouteEditor`] backed by
//! a [`MemoryRouteStore`] and reports what the store holds afterwards.
//!
//! ## Script format
//!
//! ```json
//! {
//!   "shell": "modal",
//!   "record": { "id": "cabo-1", "kind": "cable", "coordenadas": [[0, 0], [1, 1]] },
//!   "events": [
//!     { "type": "handle_drag_move", "index": 1, "to": [5, 5] },
//!     { "type": "save" }
//!   ]
//! }
//! ```
//!
//! `records` seeds the store with extra records and `record_id` picks the one
//! to edit instead of `record`.

use fibermap_core::{
    EditorConfig, MemoryRouteStore, RecordKind, Route, RouteEditor, RouteRecord, RouteStore,
    ShellKind, SurfaceEvent,
};
use pollster::block_on;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

const SCRATCH_ID: &str = "replay";

/// Errors that stop a replay before it starts.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A recorded editing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Presentation shell to emulate.
    #[serde(default)]
    pub shell: ShellKind,
    /// Record being edited; also seeded into the store.
    #[serde(default)]
    pub record: Option<RouteRecord>,
    /// Other records in the store.
    #[serde(default)]
    pub records: Vec<RouteRecord>,
    /// Id of the record to edit, when it differs from `record`.
    #[serde(default)]
    pub record_id: Option<String>,
    /// Gestures in arrival order.
    pub events: Vec<SurfaceEvent>,
}

impl ReplayScript {
    /// Id of the edited record: `record_id`, else `record.id`, else a scratch cable.
    pub fn target_id(&self) -> &str {
        self.record_id
            .as_deref()
            .or(self.record.as_ref().map(|r| r.id.as_str()))
            .unwrap_or(SCRATCH_ID)
    }
}

/// What a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayOutcome {
    /// The edited record as the store holds it after the replay.
    pub record: Option<RouteRecord>,
    /// Whether a save reached the store.
    pub saved: bool,
    /// Working route left in the editor (empty after save or cancel).
    pub working_route: Route,
    /// One message per rejected event or failed store call.
    pub rejected: Vec<String>,
}

impl ReplayOutcome {
    /// The record's stored route value, `null` when it has none.
    pub fn stored_value(&self) -> Value {
        self.record
            .as_ref()
            .and_then(|r| r.coordenadas.clone())
            .unwrap_or(Value::Null)
    }
}

/// Load a replay script from a JSON file.
pub fn load_script(path: &Path) -> Result<ReplayScript, ReplayError> {
    read_json(path)
}

/// Load an editor config from a JSON file.
pub fn load_config(path: &Path) -> Result<EditorConfig, ReplayError> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ReplayError> {
    let text = fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ReplayError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Build the store a script edits against.
fn seed_store(script: &ReplayScript) -> MemoryRouteStore {
    let mut records = script.records.clone();
    records.extend(script.record.clone());
    if script.record.is_none() && script.record_id.is_none() {
        records.push(RouteRecord::new(SCRATCH_ID, RecordKind::Cable));
    }
    MemoryRouteStore::with_records(records)
}

/// Replay `script` and return what the store holds for the edited record.
///
/// Rejected events and store failures are logged and collected; the replay
/// keeps going, as an operator would after a failed gesture.
pub fn replay(script: ReplayScript, config: EditorConfig) -> ReplayOutcome {
    let id = script.target_id().to_string();
    let store = Rc::new(seed_store(&script));
    let rejected = Rc::new(RefCell::new(Vec::new()));
    let saved = Rc::new(RefCell::new(false));

    let initial = match block_on(store.load(&id)) {
        Ok(record) => record.coordenadas,
        Err(e) => {
            log::warn!("Cannot load record {}: {}", id, e);
            rejected.borrow_mut().push(format!("load: {}", e));
            None
        }
    };

    let sink = store.clone();
    let sink_id = id.clone();
    let sink_rejected = rejected.clone();
    let saved_flag = saved.clone();
    let mut editor = RouteEditor::new(script.shell, config, move |route| {
        match block_on(sink.save_route(&sink_id, route)) {
            Ok(()) => *saved_flag.borrow_mut() = true,
            Err(e) => {
                log::warn!("Cannot save record {}: {}", sink_id, e);
                sink_rejected.borrow_mut().push(format!("save: {}", e));
            }
        }
    });
    editor.open_stored(initial.as_ref());
    log::info!(
        "Replaying {} events on {} in {} editor",
        script.events.len(),
        id,
        script.shell
    );

    for (i, event) in script.events.into_iter().enumerate() {
        log::debug!("Event {}: {:?}", i, event);
        if let Err(e) = editor.handle_event(event) {
            rejected.borrow_mut().push(format!("event {}: {}", i, e));
        }
    }

    let working_route = editor.route().clone();
    drop(editor);
    let record = block_on(store.load(&id)).ok();
    let saved = *saved.borrow();
    let rejected = rejected.take();
    ReplayOutcome {
        record,
        saved,
        working_route,
        rejected,
    }
}
