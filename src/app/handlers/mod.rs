//! Feature-Handler für AppCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod editing;
pub mod gesture;
pub mod history;
pub mod maintenance;
pub mod selection;
pub mod telemetry;
pub mod view;

use crate::app::drag::finalize::FinalizeOutcome;
use crate::app::host::EditorHost;
use crate::app::AppState;

/// Übergibt den Batch eines Abschlusses und übernimmt dessen Nebenwirkungen.
pub(crate) fn apply_outcome(
    state: &mut AppState,
    host: &mut dyn EditorHost,
    outcome: FinalizeOutcome,
) -> anyhow::Result<()> {
    if let Some(batch) = outcome.batch {
        host.submit(batch)?;
    }
    if let Some(selection) = outcome.selection {
        state.selection.selected = selection;
    }
    for card_id in outcome.cancel_cards {
        state.deferred.cancel(card_id);
    }
    for card_id in outcome.schedule_cards {
        state.deferred.schedule(
            card_id,
            state.clock_ms,
            state.options.card_delete_debounce_ms,
        );
    }
    if let Some(offset) = outcome.modal_offset {
        state.view.modal_offset = offset;
    }
    Ok(())
}
