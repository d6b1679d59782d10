//! Handler für zeitgesteuerte Aufräumarbeiten.

use crate::app::drag::finalize::Draft;
use crate::app::host::EditorHost;
use crate::app::AppState;

/// Stellt die Editor-Uhr vor und löscht fällige, weiterhin verwaiste Karten.
///
/// Eine Karte, die inzwischen wieder Mitglieder hat oder meldet, bleibt bestehen.
/// Während einer Geste bleiben fällige Löschungen liegen, bis sie beendet ist.
pub fn advance_clock(
    state: &mut AppState,
    host: &mut dyn EditorHost,
    now_ms: u64,
) -> anyhow::Result<()> {
    state.clock_ms = now_ms;
    if state.is_dragging() {
        return Ok(());
    }
    let due = state.deferred.take_due(now_ms);
    if due.is_empty() {
        return Ok(());
    }
    let topology = host.topology();
    let mut draft = Draft::new(topology);
    for card_id in due {
        let Some(card) = topology.cards.get(&card_id) else {
            log::debug!("Karte {} bereits gelöscht", card_id);
            continue;
        };
        if card.reporting || !topology.card_is_empty(card_id) {
            log::debug!("Karte {} wird wieder genutzt, Löschung entfällt", card_id);
            continue;
        }
        for channel_id in &card.channel_ids {
            draft.remove_channel(*channel_id);
        }
        draft.remove_card(card_id);
        log::info!("Verwaiste Karte {} gelöscht", card_id);
    }
    if let Some(batch) = draft.into_batch("Verwaiste Karten löschen") {
        host.submit(batch)?;
    }
    Ok(())
}
