//! Builder für Render-Szenen aus AppState und committeter Topologie.
//!
//! Die Vorschau der aktiven Geste läuft über dieselbe [`Draft`]-Überlagerung
//! wie der Abschluss; die committete Topologie bleibt unberührt.

use crate::app::drag::finalize::Draft;
use crate::app::drag::{apply_preview, Gesture};
use crate::app::state::Selectable;
use crate::app::AppState;
use crate::core::Topology;
use crate::shared::{RenderDevice, RenderLabel, RenderLink, RenderScene, RenderZone};

/// Baut eine RenderScene aus dem aktuellen AppState.
pub fn build(state: &AppState, topology: &Topology) -> RenderScene {
    let mut draft = Draft::new(topology);
    let mut dragged_device = None;
    let mut dragged_link = None;
    let mut overlapping = Vec::new();
    let mut hover_valid = None;
    let mut modal_offset = state.view.modal_offset;

    if let Some(session) = &state.session {
        apply_preview(session, &mut draft);
        hover_valid = session.hover.map(|h| h.valid);
        match &session.gesture {
            Gesture::Device(drag) => {
                dragged_device = Some(drag.device_id);
                overlapping.extend(drag.overlapping.iter().copied());
            }
            Gesture::Zone(drag) => overlapping.extend(drag.overlapping.iter().copied()),
            Gesture::Link(drag) => dragged_link = Some(drag.link_id),
            Gesture::ModalMove { current_offset, .. } => modal_offset = *current_offset,
            Gesture::Rotate(_) | Gesture::Translate(_) | Gesture::Pan { .. } => {}
        }
    }

    let selected = |item: Selectable| state.selection.is_selected(item);

    let devices = draft
        .devices()
        .map(|device| {
            let liveness = state
                .live
                .reported(device.id)
                .unwrap_or(device.liveness);
            RenderDevice {
                id: device.id,
                kind: device.kind,
                location: device.location,
                position: device.position,
                rotation_deg: device.rotation_deg,
                heard: liveness.heard,
                rssi: liveness.rssi,
                selected: selected(Selectable::Device(device.id)),
                dragged: dragged_device == Some(device.id),
            }
        })
        .collect();

    let zones = draft
        .zones()
        .map(|zone| RenderZone {
            id: zone.id,
            anchor: zone.anchor,
            rotation_deg: zone.rotation_deg,
            size: zone.size(),
            usage: zone.usage,
            selected: selected(Selectable::Zone(zone.id)),
        })
        .collect();

    let links = draft
        .links()
        .map(|link| RenderLink {
            id: link.id,
            kind: link.kind,
            points: link.points.clone(),
            selected: selected(Selectable::Link(link.id)),
            dragged: dragged_link == Some(link.id),
        })
        .collect();

    let labels = draft
        .labels()
        .map(|label| RenderLabel {
            id: label.id,
            text: label.text.clone(),
            position: label.position,
            rotation_deg: label.rotation_deg,
            selected: selected(Selectable::Label(label.id)),
        })
        .collect();

    RenderScene {
        map_view: draft.map_view(),
        viewport_size: state.view.viewport_size,
        devices,
        zones,
        links,
        labels,
        north_arrow: draft.north_arrow(),
        cabinet: draft.cabinet(),
        overlapping,
        hover_valid,
        modal_offset,
    }
}
