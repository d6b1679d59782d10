use glam::Vec2;

use super::draft::Draft;
use super::{ops, FinalizeContext, FinalizeOutcome};
use crate::app::drag::session::{DeviceDrag, ZoneDrag};
use crate::app::error::EditorError;
use crate::app::state::Selectable;
use crate::core::zone_order::insertion_index;
use crate::core::{DeviceId, Location, ZoneId};

/// Sensor auf eine Zone abgelegt: Einfügen bzw. Umsortieren.
///
/// Bleibt die berechnete Reihenfolge unverändert, entsteht kein Batch.
pub fn sensor_onto_zone(
    drag: &DeviceDrag,
    zone_id: ZoneId,
    ctx: &FinalizeContext<'_>,
) -> Result<FinalizeOutcome, EditorError> {
    let mut draft = Draft::new(ctx.topology);
    let Some(zone) = draft.zone(zone_id) else {
        return Err(EditorError::UnexpectedDispatch(format!(
            "Zone {} existiert nicht",
            zone_id
        )));
    };
    let sensor_id = drag.device_id;
    let rotation = zone.rotation_deg;
    let already_member = zone.contains(sensor_id);
    let current_order = zone.sensor_ids.clone();
    let others: Vec<DeviceId> = current_order
        .iter()
        .copied()
        .filter(|id| *id != sensor_id)
        .collect();
    let positions: Vec<Vec2> = others
        .iter()
        .filter_map(|id| draft.device(*id).map(|d| d.position))
        .collect();
    let index = insertion_index(drag.current, rotation, &positions);
    let selected = Selectable::Device(sensor_id);

    if already_member {
        let mut order = others;
        order.insert(index.min(order.len()), sensor_id);
        if order == current_order {
            log::debug!("Sensor {}: Reihenfolge in Zone {} unverändert", sensor_id, zone_id);
            return Ok(FinalizeOutcome::select(selected));
        }
        if let Some(zone) = draft.zone_mut(zone_id) {
            zone.remove_member(sensor_id);
        }
    } else {
        match drag.origin {
            Location::InTray => {
                if let Some(device) = draft.device_mut(sensor_id) {
                    device.location = Location::OnMap;
                }
                draft.mark_reinserted(sensor_id);
            }
            Location::OnMap => {
                ops::detach_from_zone(&mut draft, sensor_id);
            }
        }
    }
    ops::insert_into_zone(&mut draft, zone_id, sensor_id, index);

    Ok(FinalizeOutcome {
        batch: draft.into_batch("Sensor in Zone"),
        selection: Some(Some(selected)),
        ..FinalizeOutcome::default()
    })
}

/// Zonen-Körper auf der Karte verschoben.
pub fn move_zone_body(drag: &ZoneDrag, ctx: &FinalizeContext<'_>) -> FinalizeOutcome {
    let target = if drag.overlapping.is_empty() {
        Some(drag.current)
    } else {
        drag.last_free
    };
    let Some(target) = target else {
        return FinalizeOutcome::select(Selectable::Zone(drag.zone_id));
    };
    let mut draft = Draft::new(ctx.topology);
    if let Some(zone) = draft.zone_mut(drag.zone_id) {
        zone.anchor = target;
    }
    ops::layout_zone(&mut draft, drag.zone_id);
    FinalizeOutcome {
        batch: draft.into_batch("Zone verschieben"),
        selection: Some(Some(Selectable::Zone(drag.zone_id))),
        ..FinalizeOutcome::default()
    }
}
