//! Geräte des Netzes: Sensoren, Repeater, Radios und Access-Points.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{LinkId, ZoneId};

/// ID eines Geräts
pub type DeviceId = u64;

/// Geräteart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Fahrzeug-Sensor (Mitglied einer Sensor-Zone, kann CC-Links haben)
    Sensor,
    /// Funk-Repeater
    Repeater,
    /// Funk-Empfänger (Upstream-Ziel)
    Radio,
    /// Access-Point
    AccessPoint,
}

impl DeviceKind {
    /// Darf ein RF-Uplink von diesem Gerät ausgehen?
    pub fn can_uplink(self) -> bool {
        matches!(self, DeviceKind::Sensor | DeviceKind::Repeater)
    }

    /// Kann dieses Gerät Ziel eines RF-Uplinks sein?
    pub fn accepts_uplink(self) -> bool {
        matches!(self, DeviceKind::Repeater | DeviceKind::Radio)
    }
}

/// Aufenthaltsort eines Geräts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Location {
    /// Platziert auf der Karte
    OnMap,
    /// Unplatziert im Geräte-Tray
    #[default]
    InTray,
}

/// Extern gepflegte Lebendigkeits-Informationen (Telemetrie)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Liveness {
    /// Gerät wurde vom Netz gehört
    pub heard: bool,
    /// Letzte Empfangsstärke
    pub rssi: Option<i32>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self {
            heard: true,
            rssi: None,
        }
    }
}

/// Ein Gerät der Topologie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Eindeutige ID
    pub id: DeviceId,
    /// Geräteart
    pub kind: DeviceKind,
    /// Karte oder Tray
    pub location: Location,
    /// Mittelpunkt im Modell-Raum (nur auf der Karte relevant)
    pub position: Vec2,
    /// Rotation in ganzen Grad (0–359, im Uhrzeigersinn)
    pub rotation_deg: i32,
    /// Zugehörige Sensor-Zone (nur Sensoren auf der Karte)
    pub zone_id: Option<ZoneId>,
    /// Ausgehender RF-Uplink
    pub rf_link: Option<LinkId>,
    /// Ausgehende CC-Links (nur Sensoren)
    pub cc_links: Vec<LinkId>,
    /// Telemetrie-Flags
    pub liveness: Liveness,
}

impl Device {
    /// Erstellt ein Gerät ohne Links.
    pub fn new(id: DeviceId, kind: DeviceKind, location: Location, position: Vec2) -> Self {
        Self {
            id,
            kind,
            location,
            position,
            rotation_deg: 0,
            zone_id: None,
            rf_link: None,
            cc_links: Vec::new(),
            liveness: Liveness::default(),
        }
    }

    /// Gibt `true` zurück, wenn das Gerät auf der Karte liegt.
    pub fn is_on_map(&self) -> bool {
        self.location == Location::OnMap
    }

    /// Alle ausgehenden Links (RF zuerst, dann CC).
    pub fn own_links(&self) -> impl Iterator<Item = LinkId> + '_ {
        self.rf_link.iter().copied().chain(self.cc_links.iter().copied())
    }
}
