//! Controller-Karten und ihre adressierbaren Kanäle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::DeviceId;

/// ID eines Kanals
pub type ChannelId = u64;
/// ID einer Controller-Karte
pub type CardId = u64;

/// Signalart eines Kanals; CC-Links wechseln nur zwischen gleichartigen Kanälen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Anwesenheits-Kontakt
    Presence,
    /// Zähl-Impuls
    Pulse,
}

/// Ein über CC verbundener Sensor mit seinem kanalbezogenen Flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMember {
    /// Verbundener Sensor
    pub sensor_id: DeviceId,
    /// Sensor liefert auf diesem Kanal Meldungen
    pub enabled: bool,
}

/// Ein Kanal einer Controller-Karte
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Eindeutige ID
    pub id: ChannelId,
    /// Besitzende Karte
    pub card_id: CardId,
    /// Signalart
    pub kind: ChannelKind,
    /// Anschlusspunkt der CC-Links im Modell-Raum
    pub anchor: Vec2,
    /// Verbundene Sensoren
    pub members: Vec<ChannelMember>,
}

impl Channel {
    /// Erstellt einen leeren Kanal.
    pub fn new(id: ChannelId, card_id: CardId, kind: ChannelKind, anchor: Vec2) -> Self {
        Self {
            id,
            card_id,
            kind,
            anchor,
            members: Vec::new(),
        }
    }

    /// Prüft ob der Sensor verbunden ist.
    pub fn has_sensor(&self, sensor_id: DeviceId) -> bool {
        self.members.iter().any(|m| m.sensor_id == sensor_id)
    }

    /// Fügt einen Sensor mit Standard-Flag hinzu (keine Duplikate).
    pub fn add_sensor(&mut self, sensor_id: DeviceId) {
        if !self.has_sensor(sensor_id) {
            self.members.push(ChannelMember {
                sensor_id,
                enabled: true,
            });
        }
    }

    /// Entfernt einen Sensor; gibt `true` zurück falls vorhanden.
    pub fn remove_sensor(&mut self, sensor_id: DeviceId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.sensor_id != sensor_id);
        self.members.len() < before
    }
}

/// Eine Controller-Karte
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Eindeutige ID
    pub id: CardId,
    /// Kanäle der Karte in Slot-Reihenfolge
    pub channel_ids: Vec<ChannelId>,
    /// Karte meldet sich (extern gepflegt)
    pub reporting: bool,
}

impl Card {
    /// Erstellt eine meldende Karte ohne Kanäle.
    pub fn new(id: CardId) -> Self {
        Self {
            id,
            channel_ids: Vec::new(),
            reporting: true,
        }
    }
}
