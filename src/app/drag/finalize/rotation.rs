use super::draft::Draft;
use super::ops;
use crate::app::actions::ActionBatch;
use crate::app::drag::session::{RotateDrag, RotateSubject};
use crate::core::Topology;

/// Setzt die Rotation; Zonen mit mehreren Mitgliedern werden neu angeordnet.
pub fn rotate_subject(draft: &mut Draft<'_>, subject: RotateSubject, rotation_deg: i32) {
    match subject {
        RotateSubject::Zone(zone_id) => {
            let Some(zone) = draft.zone_mut(zone_id) else {
                log::warn!("Zone {} fehlt beim Rotieren", zone_id);
                return;
            };
            zone.rotation_deg = rotation_deg;
            if zone.member_count() >= 2 {
                ops::layout_zone(draft, zone_id);
            }
        }
        RotateSubject::NorthArrow => {
            let mut arrow = draft.north_arrow();
            arrow.rotation_deg = rotation_deg;
            draft.set_north_arrow(arrow);
        }
        RotateSubject::Label(label_id) => {
            if let Some(label) = draft.label_mut(label_id) {
                label.rotation_deg = rotation_deg;
            }
        }
    }
}

/// Batch für eine abgeschlossene Rotation (`None` bei unverändertem Winkel).
pub fn finish(drag: &RotateDrag, topology: &Topology) -> Option<ActionBatch> {
    let mut draft = Draft::new(topology);
    rotate_subject(&mut draft, drag.subject, drag.current_deg);
    draft.into_batch("Rotieren")
}
