use crate::app::deferred::DeferredDeletes;
use crate::app::drag::DragSession;
use crate::app::CommandLog;
use crate::shared::EditorOptions;

use super::{LiveOverlay, SelectionState, ViewState};

/// Hauptzustand des Editors (ohne die Topologie selbst, die gehört dem Host)
pub struct AppState {
    /// View-State
    pub view: ViewState,
    /// Selection-State
    pub selection: SelectionState,
    /// Aktive Zeiger-Geste (höchstens eine)
    pub session: Option<DragSession>,
    /// Live-Telemetrie inkl. Puffer während einer Geste
    pub live: LiveOverlay,
    /// Ausstehende Karten-Löschungen
    pub deferred: DeferredDeletes,
    /// Zuletzt gemeldete Host-Zeit in ms
    pub clock_ms: u64,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
}

impl AppState {
    /// Erstellt einen neuen App-State mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen App-State mit den gegebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            view: ViewState::new(),
            selection: SelectionState::new(),
            session: None,
            live: LiveOverlay::default(),
            deferred: DeferredDeletes::default(),
            clock_ms: 0,
            command_log: CommandLog::new(),
            options,
        }
    }

    /// Läuft gerade eine Geste?
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
