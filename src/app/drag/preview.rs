use super::finalize::{decor, ops, rotation, Draft};
use super::session::{DragSession, Gesture};

/// Überlagert die transiente Geometrie der Geste auf eine Arbeitskopie.
///
/// Anders als beim Abschluss wird nichts ersetzt oder validiert: gezeigt wird
/// genau die Position unter dem Zeiger.
pub fn apply_preview(session: &DragSession, draft: &mut Draft<'_>) {
    if !session.moved {
        return;
    }
    match &session.gesture {
        Gesture::Device(drag) => {
            if let Some(device) = draft.device_mut(drag.device_id) {
                device.position = drag.current;
            }
            if let Some(zone_id) = drag.carried_zone {
                if let Some(zone) = draft.zone_mut(zone_id) {
                    zone.anchor = drag.current;
                }
            }
            for link_id in &drag.own_links {
                if let Some(link) = draft.link_mut(*link_id) {
                    link.set_start(drag.current);
                }
            }
            for link_id in &drag.dependent_links {
                if let Some(link) = draft.link_mut(*link_id) {
                    link.set_end(drag.current);
                }
            }
        }
        Gesture::Zone(drag) => {
            if let Some(zone) = draft.zone_mut(drag.zone_id) {
                zone.anchor = drag.current;
            }
            ops::layout_zone(draft, drag.zone_id);
        }
        Gesture::Rotate(drag) => rotation::rotate_subject(draft, drag.subject, drag.current_deg),
        Gesture::Link(drag) => {
            if let Some(link) = draft.link_mut(drag.link_id) {
                link.points = drag.preview.points.clone();
            }
        }
        Gesture::Translate(drag) => decor::translate_subject(draft, drag.subject, drag.current),
        Gesture::ModalMove { .. } => {}
        Gesture::Pan { current_pan, .. } => {
            let mut view = draft.map_view();
            view.pan = *current_pan;
            draft.set_map_view(view);
        }
    }
}
