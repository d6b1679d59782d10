//! Application-Layer: Controller, State, Events, Gesten und Host-Anbindung.

pub mod actions;
pub mod command_log;
pub mod controller;
pub mod deferred;
pub mod drag;
pub mod error;
pub mod events;
pub mod handlers;
pub mod history;
pub mod host;
mod intent_mapping;
pub mod render_scene;
/// Application State
///
/// Dieses Modul verwaltet den transienten Zustand des Editors (View, Auswahl, Geste, Telemetrie).
pub mod state;

pub use actions::{Action, ActionBatch, ActionKind, Record, TargetType};
pub use command_log::CommandLog;
pub use controller::AppController;
pub use error::{EditorError, ModalKind};
pub use events::{AppCommand, AppIntent, HitTarget, LabelGrip};
pub use history::EditHistory;
pub use host::{EditorHost, LocalHost, ModalRequest, TextMeasure};
pub use render_scene::build as build_render_scene;
pub use state::{AppState, LiveOverlay, Selectable, SelectionState, ViewState};
