//! Handler für Selektions-Operationen.

use crate::app::AppState;

/// Hebt die aktuelle Selektion auf.
pub fn clear(state: &mut AppState) {
    if state.selection.selected.take().is_some() {
        log::debug!("Selektion aufgehoben");
    }
}
