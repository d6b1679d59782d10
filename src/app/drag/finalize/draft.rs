//! Arbeitskopie für das Abschließen einer Geste.
//!
//! Eine `Draft` überlagert die committete Topologie: nur berührte Datensätze
//! werden kopiert. Am Ende wird die Differenz in Berührungs-Reihenfolge zu
//! Aktionen. Dieselbe Überlagerung dient der Vorschau während der Geste.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use crate::app::actions::{Action, ActionBatch, Record, TargetType};
use crate::core::{
    Cabinet, Card, CardId, Channel, ChannelId, Device, DeviceId, LabelId, Link, LinkId,
    LinkTarget, MapView, NorthArrow, SensorZone, TextLabel, Topology, ZoneId,
};

/// Überlagerung einer Arena: `Some` = ersetzt/neu, `None` = gelöscht.
#[derive(Debug, Clone)]
struct Layer<V> {
    entries: IndexMap<u64, Option<V>>,
}

impl<V> Default for Layer<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V: Clone> Layer<V> {
    fn get<'a>(&'a self, base: &'a IndexMap<u64, V>, id: u64) -> Option<&'a V> {
        match self.entries.get(&id) {
            Some(slot) => slot.as_ref(),
            None => base.get(&id),
        }
    }

    fn get_mut(&mut self, base: &IndexMap<u64, V>, id: u64) -> Option<&mut V> {
        if !self.entries.contains_key(&id) {
            let copy = base.get(&id)?.clone();
            self.entries.insert(id, Some(copy));
        }
        self.entries.get_mut(&id)?.as_mut()
    }

    fn put(&mut self, id: u64, value: V) {
        self.entries.insert(id, Some(value));
    }

    fn remove(&mut self, id: u64) {
        self.entries.insert(id, None);
    }

    fn values<'a>(&'a self, base: &'a IndexMap<u64, V>) -> impl Iterator<Item = &'a V> + 'a {
        let existing = base.iter().filter_map(move |(id, v)| match self.entries.get(id) {
            Some(slot) => slot.as_ref(),
            None => Some(v),
        });
        let added = self
            .entries
            .iter()
            .filter(move |(id, _)| !base.contains_key(*id))
            .filter_map(|(_, slot)| slot.as_ref());
        existing.chain(added)
    }

    fn max_id(&self, base: &IndexMap<u64, V>) -> u64 {
        base.keys()
            .chain(self.entries.keys())
            .max()
            .copied()
            .unwrap_or(0)
    }
}

/// Arbeitskopie über einer committeten Topologie.
#[derive(Debug, Clone)]
pub struct Draft<'a> {
    base: &'a Topology,
    devices: Layer<Device>,
    zones: Layer<SensorZone>,
    links: Layer<Link>,
    channels: Layer<Channel>,
    cards: Layer<Card>,
    labels: Layer<TextLabel>,
    north_arrow: Option<NorthArrow>,
    cabinet: Option<Option<Cabinet>>,
    map_view: Option<MapView>,
    touched: IndexSet<(TargetType, u64)>,
    reinserted: HashSet<DeviceId>,
}

impl<'a> Draft<'a> {
    /// Erstellt eine leere Überlagerung.
    pub fn new(base: &'a Topology) -> Self {
        Self {
            base,
            devices: Layer::default(),
            zones: Layer::default(),
            links: Layer::default(),
            channels: Layer::default(),
            cards: Layer::default(),
            labels: Layer::default(),
            north_arrow: None,
            cabinet: None,
            map_view: None,
            touched: IndexSet::new(),
            reinserted: HashSet::new(),
        }
    }

    /// Committete Topologie unter der Überlagerung
    pub fn base(&self) -> &'a Topology {
        self.base
    }

    fn touch(&mut self, target: TargetType, id: u64) {
        self.touched.insert((target, id));
    }

    // ── Geräte ──────────────────────────────────────────────────────

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.get(&self.base.devices, id)
    }

    pub fn device_mut(&mut self, id: DeviceId) -> Option<&mut Device> {
        self.touch(TargetType::Device, id);
        self.devices.get_mut(&self.base.devices, id)
    }

    pub fn remove_device(&mut self, id: DeviceId) {
        self.touch(TargetType::Device, id);
        self.devices.remove(id);
    }

    /// Gerät als DELETE+ADD-Paar statt UPDATE ausgeben (Wechsel Tray ↔ Karte).
    pub fn mark_reinserted(&mut self, id: DeviceId) {
        self.touch(TargetType::Device, id);
        self.reinserted.insert(id);
    }

    pub fn devices(&self) -> impl Iterator<Item = &Device> + '_ {
        self.devices.values(&self.base.devices)
    }

    // ── Zonen ───────────────────────────────────────────────────────

    pub fn zone(&self, id: ZoneId) -> Option<&SensorZone> {
        self.zones.get(&self.base.zones, id)
    }

    pub fn zone_mut(&mut self, id: ZoneId) -> Option<&mut SensorZone> {
        self.touch(TargetType::Zone, id);
        self.zones.get_mut(&self.base.zones, id)
    }

    pub fn put_zone(&mut self, zone: SensorZone) {
        self.touch(TargetType::Zone, zone.id);
        self.zones.put(zone.id, zone);
    }

    pub fn remove_zone(&mut self, id: ZoneId) {
        self.touch(TargetType::Zone, id);
        self.zones.remove(id);
    }

    pub fn zones(&self) -> impl Iterator<Item = &SensorZone> + '_ {
        self.zones.values(&self.base.zones)
    }

    /// Nächste freie Zonen-ID (inkl. neu angelegter Zonen)
    pub fn next_zone_id(&self) -> ZoneId {
        self.zones.max_id(&self.base.zones) + 1
    }

    // ── Links ───────────────────────────────────────────────────────

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(&self.base.links, id)
    }

    pub fn link_mut(&mut self, id: LinkId) -> Option<&mut Link> {
        self.touch(TargetType::Link, id);
        self.links.get_mut(&self.base.links, id)
    }

    pub fn put_link(&mut self, link: Link) {
        self.touch(TargetType::Link, link.id);
        self.links.put(link.id, link);
    }

    pub fn remove_link(&mut self, id: LinkId) {
        self.touch(TargetType::Link, id);
        self.links.remove(id);
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> + '_ {
        self.links.values(&self.base.links)
    }

    /// Nächste freie Link-ID (inkl. neu angelegter Links)
    pub fn next_link_id(&self) -> LinkId {
        self.links.max_id(&self.base.links) + 1
    }

    /// Links, deren Ziel das Gerät ist
    pub fn links_targeting(&self, device_id: DeviceId) -> Vec<LinkId> {
        self.links()
            .filter(|l| l.target == LinkTarget::Device(device_id))
            .map(|l| l.id)
            .collect()
    }

    // ── Kanäle und Karten ───────────────────────────────────────────

    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(&self.base.channels, id)
    }

    pub fn channel_mut(&mut self, id: ChannelId) -> Option<&mut Channel> {
        self.touch(TargetType::Channel, id);
        self.channels.get_mut(&self.base.channels, id)
    }

    pub fn remove_channel(&mut self, id: ChannelId) {
        self.touch(TargetType::Channel, id);
        self.channels.remove(id);
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&self.base.cards, id)
    }

    pub fn remove_card(&mut self, id: CardId) {
        self.touch(TargetType::Card, id);
        self.cards.remove(id);
    }

    /// Sind alle Kanäle der Karte in der Arbeitskopie leer?
    pub fn card_is_empty(&self, card_id: CardId) -> bool {
        self.card(card_id).is_some_and(|card| {
            card.channel_ids
                .iter()
                .all(|cid| self.channel(*cid).is_none_or(|c| c.members.is_empty()))
        })
    }

    // ── Dekoration und Ansicht ──────────────────────────────────────

    pub fn label(&self, id: LabelId) -> Option<&TextLabel> {
        self.labels.get(&self.base.labels, id)
    }

    pub fn label_mut(&mut self, id: LabelId) -> Option<&mut TextLabel> {
        self.touch(TargetType::Label, id);
        self.labels.get_mut(&self.base.labels, id)
    }

    pub fn labels(&self) -> impl Iterator<Item = &TextLabel> + '_ {
        self.labels.values(&self.base.labels)
    }

    pub fn north_arrow(&self) -> NorthArrow {
        self.north_arrow.unwrap_or(self.base.north_arrow)
    }

    pub fn set_north_arrow(&mut self, arrow: NorthArrow) {
        self.touch(TargetType::NorthArrow, 0);
        self.north_arrow = Some(arrow);
    }

    pub fn cabinet(&self) -> Option<Cabinet> {
        self.cabinet.unwrap_or(self.base.cabinet)
    }

    pub fn set_cabinet(&mut self, cabinet: Option<Cabinet>) {
        self.touch(TargetType::Cabinet, 0);
        self.cabinet = Some(cabinet);
    }

    pub fn map_view(&self) -> MapView {
        self.map_view.unwrap_or(self.base.map_view)
    }

    pub fn set_map_view(&mut self, view: MapView) {
        self.touch(TargetType::MapView, 0);
        self.map_view = Some(view);
    }

    // ── Abschluss ───────────────────────────────────────────────────

    /// Differenz zur committeten Topologie als Aktionen in Berührungs-Reihenfolge.
    pub fn into_actions(self) -> Vec<Action> {
        let mut actions = Vec::new();
        for &(target, id) in &self.touched {
            match target {
                TargetType::Device => diff_keyed(
                    &mut actions,
                    self.base.devices.get(&id),
                    self.devices.entries.get(&id),
                    Record::Device,
                    self.reinserted.contains(&id),
                ),
                TargetType::Zone => diff_keyed(
                    &mut actions,
                    self.base.zones.get(&id),
                    self.zones.entries.get(&id),
                    Record::Zone,
                    false,
                ),
                TargetType::Link => diff_keyed(
                    &mut actions,
                    self.base.links.get(&id),
                    self.links.entries.get(&id),
                    Record::Link,
                    false,
                ),
                TargetType::Channel => diff_keyed(
                    &mut actions,
                    self.base.channels.get(&id),
                    self.channels.entries.get(&id),
                    Record::Channel,
                    false,
                ),
                TargetType::Card => diff_keyed(
                    &mut actions,
                    self.base.cards.get(&id),
                    self.cards.entries.get(&id),
                    Record::Card,
                    false,
                ),
                TargetType::Label => diff_keyed(
                    &mut actions,
                    self.base.labels.get(&id),
                    self.labels.entries.get(&id),
                    Record::Label,
                    false,
                ),
                TargetType::NorthArrow => {
                    if let Some(arrow) = self.north_arrow.filter(|a| *a != self.base.north_arrow) {
                        actions.push(Action::update(
                            Record::NorthArrow(self.base.north_arrow),
                            Record::NorthArrow(arrow),
                        ));
                    }
                }
                TargetType::Cabinet => {
                    if let Some(after) = self.cabinet {
                        diff_keyed(
                            &mut actions,
                            self.base.cabinet.as_ref(),
                            Some(&after),
                            Record::Cabinet,
                            false,
                        );
                    }
                }
                TargetType::MapView => {
                    if let Some(view) = self.map_view.filter(|v| *v != self.base.map_view) {
                        actions.push(Action::update(
                            Record::MapView(self.base.map_view),
                            Record::MapView(view),
                        ));
                    }
                }
                TargetType::Selection => {}
            }
        }
        actions
    }

    /// Differenz als Batch; `None`, wenn sich nichts geändert hat.
    pub fn into_batch(self, description: &str) -> Option<ActionBatch> {
        let actions = self.into_actions();
        if actions.is_empty() {
            None
        } else {
            Some(ActionBatch::new(description, actions))
        }
    }
}

fn diff_keyed<V: Clone + PartialEq>(
    actions: &mut Vec<Action>,
    before: Option<&V>,
    after: Option<&Option<V>>,
    wrap: fn(V) -> Record,
    reinsert: bool,
) {
    let Some(after) = after else {
        return;
    };
    match (before, after) {
        (None, Some(new)) => actions.push(Action::add(wrap(new.clone()))),
        (Some(old), None) => actions.push(Action::delete(wrap(old.clone()))),
        (Some(old), Some(new)) if reinsert => {
            actions.push(Action::delete(wrap(old.clone())));
            actions.push(Action::add(wrap(new.clone())));
        }
        (Some(old), Some(new)) if old != new => {
            actions.push(Action::update(wrap(old.clone()), wrap(new.clone())));
        }
        _ => {}
    }
}
