//! Die zentrale Topologie-Datenstruktur: Geräte, Zonen, Links, Karten und Dekoration.
//!
//! Alle Elemente liegen in Arenen (`IndexMap` nach ID); Querverweise laufen
//! ausschließlich über IDs.

use glam::Vec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::footprint::{Footprint, ItemRef};
use super::overlap::OverlapEngine;
use super::viewport::MapView;
use super::{
    Cabinet, Card, CardId, Channel, ChannelId, Device, DeviceId, LabelId, Link, LinkId,
    LinkTarget, NorthArrow, SensorZone, TextLabel, ZoneId,
};

/// Vollständiger, committeter Zustand des Netzes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    /// Alle Geräte (Karte und Tray)
    pub devices: IndexMap<DeviceId, Device>,
    /// Alle Sensor-Zonen
    pub zones: IndexMap<ZoneId, SensorZone>,
    /// Alle Links (RF und CC)
    pub links: IndexMap<LinkId, Link>,
    /// Alle Kanäle aller Karten
    pub channels: IndexMap<ChannelId, Channel>,
    /// Alle Controller-Karten
    pub cards: IndexMap<CardId, Card>,
    /// Freie Textlabels
    pub labels: IndexMap<LabelId, TextLabel>,
    /// Nordpfeil
    pub north_arrow: NorthArrow,
    /// Schaltschrank-Symbol (optional)
    pub cabinet: Option<Cabinet>,
    /// Persistierte Kartenansicht
    pub map_view: MapView,
}

fn next_id<V>(map: &IndexMap<u64, V>) -> u64 {
    map.keys().max().copied().unwrap_or(0) + 1
}

impl Topology {
    /// Erstellt eine leere Topologie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt ein Gerät ein (oder ersetzt es).
    pub fn add_device(&mut self, device: Device) {
        self.devices.insert(device.id, device);
    }

    /// Fügt eine Zone ein (oder ersetzt sie).
    pub fn add_zone(&mut self, zone: SensorZone) {
        self.zones.insert(zone.id, zone);
    }

    /// Fügt einen Link ein und trägt ihn beim besitzenden Gerät ein.
    pub fn add_link(&mut self, link: Link) {
        if let Some(owner) = self.devices.get_mut(&link.owner) {
            match link.kind {
                super::LinkKind::Rf => owner.rf_link = Some(link.id),
                super::LinkKind::Cc => {
                    if !owner.cc_links.contains(&link.id) {
                        owner.cc_links.push(link.id);
                    }
                }
            }
        }
        if let LinkTarget::Channel(channel_id) = link.target {
            if let Some(channel) = self.channels.get_mut(&channel_id) {
                channel.add_sensor(link.owner);
            }
        }
        self.links.insert(link.id, link);
    }

    /// Fügt eine Karte samt Kanälen ein.
    pub fn add_card(&mut self, mut card: Card, channels: Vec<Channel>) {
        for channel in channels {
            if !card.channel_ids.contains(&channel.id) {
                card.channel_ids.push(channel.id);
            }
            self.channels.insert(channel.id, channel);
        }
        self.cards.insert(card.id, card);
    }

    /// Fügt ein Textlabel ein.
    pub fn add_label(&mut self, label: TextLabel) {
        self.labels.insert(label.id, label);
    }

    /// Berechnet die nächste freie Geräte-ID.
    pub fn next_device_id(&self) -> DeviceId {
        next_id(&self.devices)
    }

    /// Berechnet die nächste freie Zonen-ID.
    pub fn next_zone_id(&self) -> ZoneId {
        next_id(&self.zones)
    }

    /// Berechnet die nächste freie Link-ID.
    pub fn next_link_id(&self) -> LinkId {
        next_id(&self.links)
    }

    /// Ankerpunkt eines Link-Ziels (Geräteposition bzw. Kanal-Anschluss).
    pub fn target_anchor(&self, target: LinkTarget) -> Option<Vec2> {
        match target {
            LinkTarget::Device(id) => self.devices.get(&id).map(|d| d.position),
            LinkTarget::Channel(id) => self.channels.get(&id).map(|c| c.anchor),
        }
    }

    /// Links, deren Ziel das Gerät ist (Endpunkt muss dem Gerät folgen).
    pub fn links_targeting(&self, device_id: DeviceId) -> Vec<LinkId> {
        self.links
            .values()
            .filter(|l| l.target == LinkTarget::Device(device_id))
            .map(|l| l.id)
            .collect()
    }

    /// Vorhandener CC-Link eines Sensors auf einen Kanal.
    pub fn cc_link_between(&self, sensor_id: DeviceId, channel_id: ChannelId) -> Option<LinkId> {
        self.links
            .values()
            .find(|l| l.owner == sensor_id && l.target == LinkTarget::Channel(channel_id))
            .map(|l| l.id)
    }

    /// Prüft, ob alle Kanäle einer Karte leer sind.
    pub fn card_is_empty(&self, card_id: CardId) -> bool {
        self.cards.get(&card_id).is_some_and(|card| {
            card.channel_ids.iter().all(|cid| {
                self.channels
                    .get(cid)
                    .is_none_or(|channel| channel.members.is_empty())
            })
        })
    }

    /// Prüft, ob `device_id` in der Upstream-Kette ab `start` liegt (inkl. `start`).
    pub fn upstream_contains(&self, start: DeviceId, device_id: DeviceId) -> bool {
        let mut current = Some(start);
        let mut steps = 0;
        while let Some(id) = current {
            if id == device_id {
                return true;
            }
            steps += 1;
            if steps > self.devices.len() {
                log::warn!("Upstream-Kette ab Gerät {} enthält einen Zyklus", start);
                return true;
            }
            current = self
                .devices
                .get(&id)
                .and_then(|d| d.rf_link)
                .and_then(|lid| self.links.get(&lid))
                .and_then(|l| match l.target {
                    LinkTarget::Device(next) => Some(next),
                    LinkTarget::Channel(_) => None,
                });
        }
        false
    }

    /// Footprints aller kollisionsrelevanten Elemente auf der Karte.
    ///
    /// Sensoren in Zonen werden über die Zone abgedeckt; Elemente aus
    /// `exclude` werden ausgelassen.
    pub fn placed_footprints(&self, exclude: &[ItemRef]) -> Vec<Footprint> {
        let zones = self
            .zones
            .values()
            .map(Footprint::for_zone)
            .filter(|fp| !exclude.contains(&fp.item));
        let devices = self
            .devices
            .values()
            .filter(|d| d.is_on_map() && d.zone_id.is_none())
            .map(Footprint::for_device)
            .filter(|fp| !exclude.contains(&fp.item));
        zones.chain(devices).collect()
    }

    /// Overlap-Engine über alle platzierten Elemente außer `exclude`.
    pub fn overlap_engine(&self, exclude: &[ItemRef]) -> OverlapEngine {
        OverlapEngine::new(self.placed_footprints(exclude))
    }

    /// Oberstes Element unter einem Modell-Punkt.
    pub fn hit_test(&self, point: Vec2) -> Option<ItemRef> {
        self.overlap_engine(&[]).hit(point)
    }

    /// Prüft die Struktur-Invarianten und liefert eine Beschreibung des ersten Verstoßes.
    ///
    /// - Jeder Link hat ≥ 1 Segment, beginnt an seinem Gerät und endet am Ziel-Anker
    /// - Jede Zone hat 1–3 Mitglieder und passende Lücken
    /// - Kanal-Mitgliedschaften entsprechen den CC-Links
    pub fn check_invariants(&self) -> Result<(), String> {
        for link in self.links.values() {
            let start = self
                .devices
                .get(&link.owner)
                .map(|d| d.position)
                .ok_or_else(|| format!("Link {}: Besitzer {} fehlt", link.id, link.owner))?;
            let end = self
                .target_anchor(link.target)
                .ok_or_else(|| format!("Link {}: Ziel {:?} fehlt", link.id, link.target))?;
            if !link.is_anchored(start, end) {
                return Err(format!("Link {}: Endpunkte nicht verankert", link.id));
            }
        }
        for zone in self.zones.values() {
            if zone.sensor_ids.is_empty() || zone.sensor_ids.len() > 3 {
                return Err(format!("Zone {}: {} Mitglieder", zone.id, zone.sensor_ids.len()));
            }
            if zone.gaps.len() + 1 != zone.sensor_ids.len() {
                return Err(format!("Zone {}: Lücken passen nicht", zone.id));
            }
            for sid in &zone.sensor_ids {
                if self.devices.get(sid).and_then(|d| d.zone_id) != Some(zone.id) {
                    return Err(format!("Zone {}: Sensor {} verweist nicht zurück", zone.id, sid));
                }
            }
        }
        for channel in self.channels.values() {
            for member in &channel.members {
                if self.cc_link_between(member.sensor_id, channel.id).is_none() {
                    return Err(format!(
                        "Kanal {}: Sensor {} ohne CC-Link",
                        channel.id, member.sensor_id
                    ));
                }
            }
        }
        Ok(())
    }
}
