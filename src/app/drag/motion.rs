use std::collections::BTreeSet;

use glam::Vec2;

use super::session::{DragSession, Gesture, Region};
use crate::core::geometry::handle_angle;
use crate::core::{Footprint, ItemRef, MapView, OverlapEngine, ScreenTransform};
use crate::shared::EditorOptions;

/// Führt die aktive Geste auf eine neue Zeigerposition nach.
///
/// `model` ist die Zeigerposition im Modell-Raum unter der committeten
/// Ansicht `view`. Geändert wird ausschließlich der Sitzungszustand.
pub fn apply_motion(
    session: &mut DragSession,
    pointer: Vec2,
    model: Vec2,
    screen: &ScreenTransform,
    view: &MapView,
    options: &EditorOptions,
) {
    session.pointer_last = pointer;
    let on_map = session.region == Some(Region::Map);
    let travelled = pointer.distance(session.pointer_start);

    match &mut session.gesture {
        Gesture::Device(drag) => {
            drag.current = model + drag.grab_offset;
            if on_map {
                track_overlap(
                    &mut drag.footprint,
                    &drag.engine,
                    &mut drag.overlapping,
                    &mut drag.last_free,
                    drag.current,
                );
            } else {
                drag.overlapping.clear();
            }
        }
        Gesture::Zone(drag) => {
            drag.current = model + drag.grab_offset;
            track_overlap(
                &mut drag.footprint,
                &drag.engine,
                &mut drag.overlapping,
                &mut drag.last_free,
                drag.current,
            );
        }
        Gesture::Rotate(drag) => {
            drag.current_deg = handle_angle(drag.center, model, options.rotation_snap_deg);
        }
        Gesture::Link(drag) => {
            let active = match drag.active {
                Some(index) => index,
                None => {
                    if travelled < options.link_drag_threshold_px {
                        return;
                    }
                    let radius = view.px_to_model(options.joint_snap_radius_px);
                    let index = match drag.preview.nearest_joint(model, radius) {
                        Some(joint) => joint,
                        None => drag.preview.split_segment(drag.segment, model),
                    };
                    log::debug!("Link {}: Gelenk {} aktiv", drag.link_id, index);
                    drag.active = Some(index);
                    index
                }
            };
            drag.preview.points[active] = model;
        }
        Gesture::Translate(drag) => {
            drag.current = model + drag.grab_offset;
        }
        Gesture::ModalMove {
            start_offset,
            current_offset,
        } => {
            *current_offset = *start_offset + (pointer - session.pointer_start);
        }
        Gesture::Pan {
            start_pan,
            current_pan,
        } => {
            *current_pan =
                *start_pan + screen.to_local(pointer) - screen.to_local(session.pointer_start);
        }
    }
    session.moved = true;
}

fn track_overlap(
    footprint: &mut Footprint,
    engine: &OverlapEngine,
    overlapping: &mut BTreeSet<ItemRef>,
    last_free: &mut Option<Vec2>,
    current: Vec2,
) {
    *footprint = footprint.moved(current, footprint.rotation_deg);
    *overlapping = engine.find(footprint);
    if overlapping.is_empty() {
        *last_free = Some(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::drag::GrabKind;
    use crate::app::host::TextMeasure;
    use crate::core::{Device, DeviceKind, Link, LinkKind, LinkTarget, Location, Topology};

    struct Fixed;
    impl TextMeasure for Fixed {
        fn text_width(&self, _text: &str) -> f32 {
            0.0
        }
    }

    fn start(topo: &Topology, grab: GrabKind, at: Vec2) -> DragSession {
        DragSession::start(grab, topo, at, at, Vec2::ZERO, &Fixed).expect("Geste startet")
    }

    fn move_to(session: &mut DragSession, p: Vec2) {
        apply_motion(
            session,
            p,
            p,
            &ScreenTransform::default(),
            &MapView::new(),
            &EditorOptions::default(),
        );
    }

    fn two_repeaters() -> Topology {
        let mut topo = Topology::new();
        topo.add_device(Device::new(1, DeviceKind::Repeater, Location::OnMap, Vec2::ZERO));
        topo.add_device(Device::new(
            2,
            DeviceKind::Repeater,
            Location::OnMap,
            Vec2::new(200.0, 0.0),
        ));
        topo
    }

    #[test]
    fn overlap_keeps_last_free_position() {
        let topo = two_repeaters();
        let mut session = start(&topo, GrabKind::MapDevice(1), Vec2::ZERO);
        move_to(&mut session, Vec2::new(100.0, 0.0));
        move_to(&mut session, Vec2::new(180.0, 0.0));
        let Gesture::Device(drag) = &session.gesture else {
            panic!("Geräte-Geste erwartet");
        };
        assert_eq!(drag.current, Vec2::new(180.0, 0.0));
        assert_eq!(drag.last_free, Some(Vec2::new(100.0, 0.0)));
        assert!(drag.overlapping.contains(&ItemRef::Device(2)));
    }

    #[test]
    fn overlapping_start_is_not_remembered_as_free() {
        let mut topo = two_repeaters();
        topo.add_device(Device::new(3, DeviceKind::Repeater, Location::OnMap, Vec2::new(20.0, 0.0)));
        let session = start(&topo, GrabKind::MapDevice(1), Vec2::ZERO);
        let Gesture::Device(drag) = &session.gesture else {
            panic!("Geräte-Geste erwartet");
        };
        assert_eq!(drag.last_free, None);

        let free = start(&topo, GrabKind::MapDevice(2), Vec2::new(200.0, 0.0));
        let Gesture::Device(drag) = &free.gesture else {
            panic!("Geräte-Geste erwartet");
        };
        assert_eq!(drag.last_free, Some(Vec2::new(200.0, 0.0)));
    }

    #[test]
    fn link_waits_for_threshold_then_splits() {
        let mut topo = two_repeaters();
        topo.add_link(Link::new(
            1,
            LinkKind::Rf,
            1,
            LinkTarget::Device(2),
            Vec2::ZERO,
            Vec2::new(200.0, 0.0),
        ));
        let grab = GrabKind::RfLinkSegment {
            link_id: 1,
            segment: 0,
        };
        let mut session = start(&topo, grab, Vec2::new(100.0, 0.0));
        move_to(&mut session, Vec2::new(102.0, 0.0));
        let Gesture::Link(drag) = &session.gesture else {
            panic!("Link-Geste erwartet");
        };
        assert_eq!(drag.active, None);
        assert!(!session.moved);

        move_to(&mut session, Vec2::new(100.0, 30.0));
        let Gesture::Link(drag) = &session.gesture else {
            panic!("Link-Geste erwartet");
        };
        assert_eq!(drag.active, Some(1));
        assert_eq!(drag.preview.points.len(), 3);
        assert_eq!(drag.preview.points[1], Vec2::new(100.0, 30.0));
    }

    #[test]
    fn pan_accumulates_in_viewport_pixels() {
        let topo = Topology::new();
        let mut session = start(&topo, GrabKind::EmptyMap, Vec2::new(10.0, 10.0));
        move_to(&mut session, Vec2::new(30.0, 15.0));
        move_to(&mut session, Vec2::new(50.0, 20.0));
        let Gesture::Pan { current_pan, .. } = session.gesture else {
            panic!("Pan erwartet");
        };
        assert_eq!(current_pan, Vec2::new(40.0, 10.0));
    }
}
