//! Handler für direkte Löschungen ohne Geste.

use super::apply_outcome;
use crate::app::drag::finalize::{ops, Draft, FinalizeOutcome};
use crate::app::host::EditorHost;
use crate::app::state::Selectable;
use crate::app::AppState;
use crate::core::{DeviceId, LinkId};

/// Löscht ein Gerät samt Links und Zonen-Mitgliedschaft.
pub fn delete_device(
    state: &mut AppState,
    host: &mut dyn EditorHost,
    device_id: DeviceId,
) -> anyhow::Result<()> {
    let topology = host.topology();
    if !topology.devices.contains_key(&device_id) {
        log::warn!("Gerät {} existiert nicht", device_id);
        return Ok(());
    }
    let mut draft = Draft::new(topology);
    let cards = ops::strip_links(&mut draft, device_id);
    ops::detach_from_zone(&mut draft, device_id);
    draft.remove_device(device_id);
    let schedule_cards = ops::orphaned_cards(&draft, &cards);

    let selection = state
        .selection
        .is_selected(Selectable::Device(device_id))
        .then_some(None);
    let outcome = FinalizeOutcome {
        batch: draft.into_batch("Gerät löschen"),
        selection,
        schedule_cards,
        ..FinalizeOutcome::default()
    };
    apply_outcome(state, host, outcome)
}

/// Löscht einen einzelnen Link.
pub fn delete_link(
    state: &mut AppState,
    host: &mut dyn EditorHost,
    link_id: LinkId,
) -> anyhow::Result<()> {
    let topology = host.topology();
    if !topology.links.contains_key(&link_id) {
        log::warn!("Link {} existiert nicht", link_id);
        return Ok(());
    }
    let mut draft = Draft::new(topology);
    let card = ops::delete_link(&mut draft, link_id);
    let schedule_cards = card
        .map(|card_id| ops::orphaned_cards(&draft, &[card_id]))
        .unwrap_or_default();
    let selection = state
        .selection
        .is_selected(Selectable::Link(link_id))
        .then_some(None);
    let outcome = FinalizeOutcome {
        batch: draft.into_batch("Link löschen"),
        selection,
        schedule_cards,
        ..FinalizeOutcome::default()
    };
    apply_outcome(state, host, outcome)
}
