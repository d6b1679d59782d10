//! Gemeinsame Fixtures für die Integrationstests.

#![allow(dead_code)]

use glam::Vec2;
use sensornet_topology_editor::core::zone::member_positions_for;
use sensornet_topology_editor::core::{ChannelKind, LinkId, ZoneId};
use sensornet_topology_editor::{
    AppController, AppIntent, AppState, Card, Channel, Device, DeviceKind, HitTarget, Link,
    LinkKind, LinkTarget, LocalHost, Location, SensorZone, Topology,
};

/// Controller, State und Host in einem Paket
pub struct Editor {
    pub controller: AppController,
    pub state: AppState,
    pub host: LocalHost,
}

impl Editor {
    pub fn new(topology: Topology) -> Self {
        init_logging();
        let state = AppState::new();
        let host = LocalHost::from_options(topology, &state.options);
        Self {
            controller: AppController::new(),
            state,
            host,
        }
    }

    pub fn send(&mut self, intent: AppIntent) {
        self.controller
            .handle_intent(&mut self.state, &mut self.host, intent)
            .expect("Intent sollte ohne Fehler durchlaufen");
    }

    pub fn press(&mut self, x: f32, y: f32, target: HitTarget) {
        self.send(AppIntent::PointerDown {
            pointer: Vec2::new(x, y),
            target: Some(target),
        });
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.send(AppIntent::PointerMoved {
            pointer: Vec2::new(x, y),
        });
    }

    pub fn enter(&mut self, target: HitTarget) {
        self.send(AppIntent::PointerEntered { target });
    }

    pub fn leave(&mut self, target: HitTarget) {
        self.send(AppIntent::PointerLeft { target });
    }

    pub fn release(&mut self, x: f32, y: f32) {
        self.send(AppIntent::PointerReleased {
            pointer: Vec2::new(x, y),
        });
    }

    pub fn topology(&self) -> &Topology {
        use sensornet_topology_editor::EditorHost;
        self.host.topology()
    }

    pub fn batch_count(&self) -> usize {
        self.host.submitted().len()
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn device(id: u64, kind: DeviceKind, location: Location, x: f32, y: f32) -> Device {
    Device::new(id, kind, location, Vec2::new(x, y))
}

pub fn tray_sensor(id: u64) -> Device {
    device(id, DeviceKind::Sensor, Location::InTray, 0.0, 0.0)
}

/// Legt eine Zone mit den gegebenen (bereits eingefügten) Sensoren an.
pub fn put_zone(topo: &mut Topology, zone_id: ZoneId, anchor: Vec2, members: &[u64]) {
    let mut zone = SensorZone::new(zone_id, anchor, members[0]);
    for (i, id) in members.iter().enumerate().skip(1) {
        zone.insert_member(i, *id);
    }
    let positions = member_positions_for(anchor, zone.rotation_deg, members.len());
    for (id, position) in members.iter().zip(positions) {
        let sensor = topo.devices.get_mut(id).expect("Sensor vorhanden");
        sensor.location = Location::OnMap;
        sensor.position = position;
        sensor.zone_id = Some(zone_id);
    }
    topo.add_zone(zone);
}

/// Karte mit einem Kanal.
pub fn put_card(topo: &mut Topology, card_id: u64, channel_id: u64, anchor: Vec2, reporting: bool) {
    let mut card = Card::new(card_id);
    card.reporting = reporting;
    topo.add_card(
        card,
        vec![Channel::new(channel_id, card_id, ChannelKind::Presence, anchor)],
    );
}

/// Link mit genau einem Segment zwischen Besitzer und Ziel-Anker.
pub fn put_link(topo: &mut Topology, link_id: LinkId, kind: LinkKind, owner: u64, target: LinkTarget) {
    let start = topo.devices[&owner].position;
    let end = topo.target_anchor(target).expect("Ziel vorhanden");
    topo.add_link(Link::new(link_id, kind, owner, target, start, end));
}
