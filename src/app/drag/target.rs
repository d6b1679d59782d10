use crate::app::events::{HitTarget, LabelGrip};
use crate::core::{DeviceId, DeviceKind, LabelId, LinkId, LinkKind, Location, Topology, ZoneId};

/// Art des gegriffenen Elements; bestimmt, welche Geste entsteht.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabKind {
    /// Gerät im Tray
    TrayDevice(DeviceId),
    /// Sensor oder Repeater auf der Karte
    MapDevice(DeviceId),
    /// Radio auf der Karte
    Radio(DeviceId),
    /// Access-Point auf der Karte
    AccessPoint(DeviceId),
    ZoneBody(ZoneId),
    ZoneRotateHandle(ZoneId),
    RfLinkSegment { link_id: LinkId, segment: usize },
    CcLinkSegment { link_id: LinkId, segment: usize },
    NorthArrowHandle,
    LabelTranslate(LabelId),
    LabelRotate(LabelId),
    Cabinet,
    ModalHeader,
    /// Freie Kartenfläche (Pan)
    EmptyMap,
}

impl GrabKind {
    /// Gegriffenes Gerät, falls es sich um ein Gerät handelt.
    pub fn device_id(self) -> Option<DeviceId> {
        match self {
            GrabKind::TrayDevice(id)
            | GrabKind::MapDevice(id)
            | GrabKind::Radio(id)
            | GrabKind::AccessPoint(id) => Some(id),
            _ => None,
        }
    }
}

/// Ordnet ein gemeldetes Ziel einer Griff-Art zu.
///
/// Liefert `None` für Ziele, an denen nichts gezogen werden kann, oder wenn
/// der referenzierte Datensatz fehlt.
pub fn classify(target: HitTarget, topology: &Topology) -> Option<GrabKind> {
    let grab = match target {
        HitTarget::Device(id) => {
            let Some(device) = topology.devices.get(&id) else {
                log::warn!("Gerät {} nicht gefunden, Geste verworfen", id);
                return None;
            };
            match (device.location, device.kind) {
                (Location::InTray, _) => GrabKind::TrayDevice(id),
                (Location::OnMap, DeviceKind::Radio) => GrabKind::Radio(id),
                (Location::OnMap, DeviceKind::AccessPoint) => GrabKind::AccessPoint(id),
                (Location::OnMap, DeviceKind::Sensor | DeviceKind::Repeater) => {
                    GrabKind::MapDevice(id)
                }
            }
        }
        HitTarget::Zone(id) => {
            if !topology.zones.contains_key(&id) {
                log::warn!("Zone {} nicht gefunden, Geste verworfen", id);
                return None;
            }
            GrabKind::ZoneBody(id)
        }
        HitTarget::ZoneRotateHandle(id) => {
            if !topology.zones.contains_key(&id) {
                log::warn!("Zone {} nicht gefunden, Geste verworfen", id);
                return None;
            }
            GrabKind::ZoneRotateHandle(id)
        }
        HitTarget::LinkSegment { link_id, segment } => {
            let Some(link) = topology.links.get(&link_id) else {
                log::warn!("Link {} nicht gefunden, Geste verworfen", link_id);
                return None;
            };
            match link.kind {
                LinkKind::Rf => GrabKind::RfLinkSegment { link_id, segment },
                LinkKind::Cc => GrabKind::CcLinkSegment { link_id, segment },
            }
        }
        HitTarget::NorthArrowHandle => GrabKind::NorthArrowHandle,
        HitTarget::Label { label_id, grip } => {
            if !topology.labels.contains_key(&label_id) {
                log::warn!("Label {} nicht gefunden, Geste verworfen", label_id);
                return None;
            }
            match grip {
                LabelGrip::Body => GrabKind::LabelTranslate(label_id),
                LabelGrip::Rotate => GrabKind::LabelRotate(label_id),
            }
        }
        HitTarget::Cabinet => {
            topology.cabinet?;
            GrabKind::Cabinet
        }
        HitTarget::ModalHeader => GrabKind::ModalHeader,
        HitTarget::Map => GrabKind::EmptyMap,
        HitTarget::Channel(_) | HitTarget::Tray => return None,
    };
    Some(grab)
}
