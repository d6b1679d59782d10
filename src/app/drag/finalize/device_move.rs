use glam::Vec2;

use super::draft::Draft;
use super::{ops, FinalizeContext, FinalizeOutcome};
use crate::app::actions::Action;
use crate::app::drag::session::DeviceDrag;
use crate::app::state::Selectable;
use crate::core::{DeviceKind, Location};

/// Endposition auf der Karte: aktuelle Position, bei Überlappung die letzte freie.
fn resolve_position(drag: &DeviceDrag) -> Option<Vec2> {
    if drag.overlapping.is_empty() {
        Some(drag.current)
    } else {
        drag.last_free
    }
}

/// Gerät auf freier Kartenfläche abgelegt (Verschieben oder Platzieren aus dem Tray).
pub fn place_on_map(drag: &DeviceDrag, ctx: &FinalizeContext<'_>) -> FinalizeOutcome {
    let selected = Selectable::Device(drag.device_id);
    let Some(target) = resolve_position(drag) else {
        log::debug!(
            "Gerät {}: keine überlappungsfreie Position, springt zurück",
            drag.device_id
        );
        return FinalizeOutcome::select(selected);
    };
    let mut draft = Draft::new(ctx.topology);

    match drag.origin {
        Location::OnMap => {
            move_placed_device(&mut draft, drag, target);
            FinalizeOutcome {
                batch: draft.into_batch("Gerät verschieben"),
                selection: Some(Some(selected)),
                ..FinalizeOutcome::default()
            }
        }
        Location::InTray => {
            let Some(device) = draft.device_mut(drag.device_id) else {
                log::warn!("Gerät {} fehlt beim Platzieren", drag.device_id);
                return FinalizeOutcome::bounce();
            };
            device.location = Location::OnMap;
            device.position = target;
            draft.mark_reinserted(drag.device_id);
            if drag.kind == DeviceKind::Sensor {
                ops::create_zone(&mut draft, drag.device_id, target);
            }
            let batch = draft.into_batch("Gerät platzieren").map(|mut batch| {
                batch.actions.push(Action::selected(Some(selected)));
                batch
            });
            FinalizeOutcome {
                batch,
                selection: Some(Some(selected)),
                ..FinalizeOutcome::default()
            }
        }
    }
}

fn move_placed_device(draft: &mut Draft<'_>, drag: &DeviceDrag, target: Vec2) {
    if drag.kind != DeviceKind::Sensor {
        if let Some(device) = draft.device_mut(drag.device_id) {
            device.position = target;
        }
        ops::sync_device_links(draft, drag.device_id);
        return;
    }
    match drag.carried_zone {
        Some(zone_id) => {
            if let Some(zone) = draft.zone_mut(zone_id) {
                zone.anchor = target;
            }
            ops::layout_zone(draft, zone_id);
        }
        None => {
            ops::detach_from_zone(draft, drag.device_id);
            ops::create_zone(draft, drag.device_id, target);
        }
    }
}

/// Gerät von der Karte zurück ins Tray.
///
/// Alle Links und Zonen-/Kanal-Mitgliedschaften werden entfernt; ein nicht
/// gehörtes Gerät wird ganz gelöscht.
pub fn return_to_tray(drag: &DeviceDrag, ctx: &FinalizeContext<'_>) -> FinalizeOutcome {
    let mut draft = Draft::new(ctx.topology);
    let cards = ops::strip_links(&mut draft, drag.device_id);
    ops::detach_from_zone(&mut draft, drag.device_id);

    let heard = ctx.live.effective(ctx.topology, drag.device_id).heard;
    if heard {
        if let Some(device) = draft.device_mut(drag.device_id) {
            device.location = Location::InTray;
            device.position = drag.start_position;
        }
        draft.mark_reinserted(drag.device_id);
    } else {
        log::info!("Gerät {} nicht gehört, wird gelöscht", drag.device_id);
        draft.remove_device(drag.device_id);
    }

    let schedule_cards = ops::orphaned_cards(&draft, &cards);
    FinalizeOutcome {
        batch: draft.into_batch("Gerät ins Tray"),
        selection: Some(None),
        schedule_cards,
        ..FinalizeOutcome::default()
    }
}
