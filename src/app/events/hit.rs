use crate::core::{ChannelId, DeviceId, LabelId, LinkId, ZoneId};

/// Griff an einem Textlabel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelGrip {
    /// Text selbst: verschieben
    Body,
    /// Dreh-Griff
    Rotate,
}

/// Element unter dem Zeiger, wie es der Host meldet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTarget {
    /// Gerät (Karte oder Tray, je nach Datensatz)
    Device(DeviceId),
    /// Körper einer Sensor-Zone
    Zone(ZoneId),
    /// Dreh-Griff einer Sensor-Zone
    ZoneRotateHandle(ZoneId),
    /// Segment eines Links
    LinkSegment { link_id: LinkId, segment: usize },
    /// Anschluss eines Kanals
    Channel(ChannelId),
    /// Dreh-Griff des Nordpfeils
    NorthArrowHandle,
    /// Textlabel
    Label { label_id: LabelId, grip: LabelGrip },
    /// Schaltschrank-Symbol
    Cabinet,
    /// Kopfzeile des Modal-Dialogs
    ModalHeader,
    /// Freie Kartenfläche
    Map,
    /// Freie Tray-Fläche
    Tray,
}

impl HitTarget {
    /// Fläche (Karte/Tray) statt Element?
    pub fn is_surface(self) -> bool {
        matches!(self, HitTarget::Map | HitTarget::Tray)
    }
}
