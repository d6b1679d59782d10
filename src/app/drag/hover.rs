use super::session::{DeviceDrag, DragSession, Gesture, LinkDrag};
use crate::app::events::HitTarget;
use crate::core::{DeviceKind, LinkKind, LinkTarget, Location, Topology};

/// Prüft ein Ziel unter dem Zeiger für die aktive Geste.
///
/// `None`: Ziel ist für diese Geste bedeutungslos (wird nicht gemerkt).
/// `Some(valid)`: Ziel ist relevant; ungültige Ziele führen beim Loslassen
/// zum Zurückspringen.
pub fn validate_target(session: &DragSession, target: HitTarget, topology: &Topology) -> Option<bool> {
    match &session.gesture {
        Gesture::Device(drag) => validate_device_drop(drag, target, topology),
        Gesture::Link(drag) => validate_link_end(drag, target, topology),
        _ => None,
    }
}

fn validate_device_drop(drag: &DeviceDrag, target: HitTarget, topology: &Topology) -> Option<bool> {
    let placed = drag.origin == Location::OnMap;
    match target {
        HitTarget::Zone(zone_id) if drag.kind == DeviceKind::Sensor => Some(
            topology
                .zones
                .get(&zone_id)
                .is_some_and(|zone| zone.can_accept(drag.device_id)),
        ),
        HitTarget::Device(other) if other != drag.device_id && drag.kind.can_uplink() => {
            let other_dev = topology.devices.get(&other)?;
            if !other_dev.kind.accepts_uplink() {
                return None;
            }
            Some(
                placed
                    && other_dev.is_on_map()
                    && !topology.upstream_contains(other, drag.device_id),
            )
        }
        HitTarget::Channel(channel_id) if drag.kind == DeviceKind::Sensor => {
            Some(placed && topology.channels.contains_key(&channel_id))
        }
        _ => None,
    }
}

fn validate_link_end(drag: &LinkDrag, target: HitTarget, topology: &Topology) -> Option<bool> {
    if !drag.moves_terminal() {
        return None;
    }
    match (drag.kind, target) {
        (LinkKind::Rf, HitTarget::Device(other)) => {
            let other_dev = topology.devices.get(&other)?;
            Some(
                other != drag.owner
                    && other_dev.kind.accepts_uplink()
                    && other_dev.is_on_map()
                    && !topology.upstream_contains(other, drag.owner),
            )
        }
        (LinkKind::Cc, HitTarget::Channel(channel_id)) => {
            let Some(channel) = topology.channels.get(&channel_id) else {
                return Some(false);
            };
            let current = topology
                .links
                .get(&drag.link_id)
                .and_then(|link| match link.target {
                    LinkTarget::Channel(id) => topology.channels.get(&id),
                    LinkTarget::Device(_) => None,
                });
            Some(current.is_none_or(|current| current.kind == channel.kind))
        }
        (LinkKind::Rf, HitTarget::Channel(_)) => Some(false),
        (LinkKind::Cc, HitTarget::Device(other)) if other != drag.owner => Some(false),
        _ => None,
    }
}
