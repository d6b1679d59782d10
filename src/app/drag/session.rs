use std::collections::BTreeSet;

use glam::Vec2;

use super::target::GrabKind;
use crate::app::events::HitTarget;
use crate::app::host::TextMeasure;
use crate::app::state::Selectable;
use crate::core::footprint::zone_size;
use crate::core::{
    DeviceId, DeviceKind, Footprint, ItemRef, LabelId, Link, LinkId, LinkKind, Location,
    OverlapEngine, Topology, ZoneId,
};

/// Fläche, über der sich der Zeiger befindet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Map,
    Tray,
}

/// Geprüftes Ziel unter dem Zeiger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hover {
    pub target: HitTarget,
    pub valid: bool,
}

/// Sichtbarer Zustand der Geste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// Gedrückt, noch nicht bewegt
    Armed,
    /// Bewegt, kein relevantes Ziel
    Tracking,
    /// Über einem geprüften Ziel
    OverTarget { valid: bool },
}

/// Gerät ziehen (Karte, Tray, Radio, Access-Point)
#[derive(Debug, Clone)]
pub struct DeviceDrag {
    pub device_id: DeviceId,
    pub kind: DeviceKind,
    pub origin: Location,
    /// Position beim Greifen (Tray-Geräte: Zeigerposition)
    pub start_position: Vec2,
    /// Versatz Zeiger → Gerätemitte im Modell-Raum
    pub grab_offset: Vec2,
    pub current: Vec2,
    /// Letzte überlappungsfreie Position auf der Karte
    pub last_free: Option<Vec2>,
    /// Footprint, der auf Überlappung geprüft wird
    pub footprint: Footprint,
    pub engine: OverlapEngine,
    pub overlapping: BTreeSet<ItemRef>,
    /// Links, die am Gerät beginnen
    pub own_links: Vec<LinkId>,
    /// Links, die am Gerät enden
    pub dependent_links: Vec<LinkId>,
    /// Zone, die mitwandert (Sensor ist einziges Mitglied)
    pub carried_zone: Option<ZoneId>,
}

/// Zonen-Körper ziehen
#[derive(Debug, Clone)]
pub struct ZoneDrag {
    pub zone_id: ZoneId,
    pub start_anchor: Vec2,
    pub grab_offset: Vec2,
    pub current: Vec2,
    pub last_free: Option<Vec2>,
    pub footprint: Footprint,
    pub engine: OverlapEngine,
    pub overlapping: BTreeSet<ItemRef>,
}

/// Was rotiert wird
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateSubject {
    Zone(ZoneId),
    NorthArrow,
    Label(LabelId),
}

/// Rotation über einen Dreh-Griff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateDrag {
    pub subject: RotateSubject,
    pub center: Vec2,
    pub start_deg: i32,
    pub current_deg: i32,
}

/// Link-Gelenk ziehen
#[derive(Debug, Clone)]
pub struct LinkDrag {
    pub link_id: LinkId,
    pub kind: LinkKind,
    pub owner: DeviceId,
    /// Gegriffenes Segment
    pub segment: usize,
    /// Greifpunkt im Modell-Raum
    pub grab_point: Vec2,
    pub start_points: Vec<Vec2>,
    /// Transiente Kopie des Links
    pub preview: Link,
    /// Bewegtes Gelenk; `None` solange die Klick-Schwelle nicht überschritten ist
    pub active: Option<usize>,
}

impl LinkDrag {
    /// Wird der Endpunkt (Ziel-Anschluss) bewegt?
    pub fn moves_terminal(&self) -> bool {
        self.active == Some(self.preview.terminal_index())
    }
}

/// Was verschoben wird
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateSubject {
    Label(LabelId),
    Cabinet,
}

/// Freies Verschieben von Dekoration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslateDrag {
    pub subject: TranslateSubject,
    pub start: Vec2,
    pub grab_offset: Vec2,
    pub current: Vec2,
}

/// Gestenspezifischer Zustand
#[derive(Debug, Clone)]
pub enum Gesture {
    Device(DeviceDrag),
    Zone(ZoneDrag),
    Rotate(RotateDrag),
    Link(LinkDrag),
    Translate(TranslateDrag),
    /// Modal über die Kopfzeile verschieben (nur Ansicht)
    ModalMove {
        start_offset: Vec2,
        current_offset: Vec2,
    },
    /// Karte verschieben
    Pan { start_pan: Vec2, current_pan: Vec2 },
}

/// Eine aktive Zeiger-Geste
#[derive(Debug, Clone)]
pub struct DragSession {
    pub grab: GrabKind,
    pub gesture: Gesture,
    /// Zeigerposition beim Drücken
    pub pointer_start: Vec2,
    /// Letzte gemeldete Zeigerposition
    pub pointer_last: Vec2,
    /// Wurde seit dem Drücken bewegt?
    pub moved: bool,
    pub region: Option<Region>,
    pub hover: Option<Hover>,
}

impl DragSession {
    /// Erstellt eine Sitzung aus vorbereitetem Gesten-Zustand.
    pub fn new(grab: GrabKind, gesture: Gesture, pointer: Vec2, region: Option<Region>) -> Self {
        Self {
            grab,
            gesture,
            pointer_start: pointer,
            pointer_last: pointer,
            moved: false,
            region,
            hover: None,
        }
    }

    /// Aktueller Zustand der Geste
    pub fn phase(&self) -> DragPhase {
        match (self.moved, self.hover) {
            (false, _) => DragPhase::Armed,
            (true, Some(hover)) => DragPhase::OverTarget { valid: hover.valid },
            (true, None) => DragPhase::Tracking,
        }
    }

    /// Auswählbares Element, das die Geste bewegt (Pan und Modal: keines).
    pub fn subject(&self) -> Option<Selectable> {
        match &self.gesture {
            Gesture::Device(drag) => Some(Selectable::Device(drag.device_id)),
            Gesture::Zone(drag) => Some(Selectable::Zone(drag.zone_id)),
            Gesture::Rotate(drag) => Some(match drag.subject {
                RotateSubject::Zone(id) => Selectable::Zone(id),
                RotateSubject::NorthArrow => Selectable::NorthArrow,
                RotateSubject::Label(id) => Selectable::Label(id),
            }),
            Gesture::Link(drag) => Some(Selectable::Link(drag.link_id)),
            Gesture::Translate(drag) => Some(match drag.subject {
                TranslateSubject::Label(id) => Selectable::Label(id),
                TranslateSubject::Cabinet => Selectable::Cabinet,
            }),
            Gesture::ModalMove { .. } | Gesture::Pan { .. } => None,
        }
    }

    /// Beginnt eine Geste auf dem gegriffenen Element.
    ///
    /// `model` ist die Zeigerposition im Modell-Raum. Liefert `None`, wenn
    /// referenzierte Daten fehlen.
    pub fn start<M: TextMeasure + ?Sized>(
        grab: GrabKind,
        topology: &Topology,
        pointer: Vec2,
        model: Vec2,
        modal_offset: Vec2,
        measure: &M,
    ) -> Option<Self> {
        let (gesture, region) = match grab {
            GrabKind::TrayDevice(id)
            | GrabKind::MapDevice(id)
            | GrabKind::Radio(id)
            | GrabKind::AccessPoint(id) => {
                let drag = start_device_drag(topology, id, model)?;
                let region = match drag.origin {
                    Location::OnMap => Region::Map,
                    Location::InTray => Region::Tray,
                };
                (Gesture::Device(drag), Some(region))
            }
            GrabKind::ZoneBody(id) => {
                let zone = topology.zones.get(&id)?;
                let footprint = Footprint::for_zone(zone);
                let engine = topology.overlap_engine(&[footprint.item]);
                let last_free = engine.find(&footprint).is_empty().then_some(zone.anchor);
                let drag = ZoneDrag {
                    zone_id: id,
                    start_anchor: zone.anchor,
                    grab_offset: zone.anchor - model,
                    current: zone.anchor,
                    last_free,
                    footprint,
                    engine,
                    overlapping: BTreeSet::new(),
                };
                (Gesture::Zone(drag), Some(Region::Map))
            }
            GrabKind::ZoneRotateHandle(id) => {
                let zone = topology.zones.get(&id)?;
                let drag = RotateDrag {
                    subject: RotateSubject::Zone(id),
                    center: zone.anchor,
                    start_deg: zone.rotation_deg,
                    current_deg: zone.rotation_deg,
                };
                (Gesture::Rotate(drag), Some(Region::Map))
            }
            GrabKind::NorthArrowHandle => {
                let arrow = topology.north_arrow;
                let drag = RotateDrag {
                    subject: RotateSubject::NorthArrow,
                    center: arrow.position,
                    start_deg: arrow.rotation_deg,
                    current_deg: arrow.rotation_deg,
                };
                (Gesture::Rotate(drag), Some(Region::Map))
            }
            GrabKind::LabelRotate(id) => {
                let label = topology.labels.get(&id)?;
                let drag = RotateDrag {
                    subject: RotateSubject::Label(id),
                    center: label.center(measure.text_width(&label.text)),
                    start_deg: label.rotation_deg,
                    current_deg: label.rotation_deg,
                };
                (Gesture::Rotate(drag), Some(Region::Map))
            }
            GrabKind::RfLinkSegment { link_id, segment }
            | GrabKind::CcLinkSegment { link_id, segment } => {
                let link = topology.links.get(&link_id)?;
                let drag = LinkDrag {
                    link_id,
                    kind: link.kind,
                    owner: link.owner,
                    segment: segment.min(link.segment_count().saturating_sub(1)),
                    grab_point: model,
                    start_points: link.points.clone(),
                    preview: link.clone(),
                    active: None,
                };
                (Gesture::Link(drag), Some(Region::Map))
            }
            GrabKind::LabelTranslate(id) => {
                let label = topology.labels.get(&id)?;
                let drag = TranslateDrag {
                    subject: TranslateSubject::Label(id),
                    start: label.position,
                    grab_offset: label.position - model,
                    current: label.position,
                };
                (Gesture::Translate(drag), Some(Region::Map))
            }
            GrabKind::Cabinet => {
                let cabinet = topology.cabinet?;
                let drag = TranslateDrag {
                    subject: TranslateSubject::Cabinet,
                    start: cabinet.position,
                    grab_offset: cabinet.position - model,
                    current: cabinet.position,
                };
                (Gesture::Translate(drag), Some(Region::Map))
            }
            GrabKind::ModalHeader => (
                Gesture::ModalMove {
                    start_offset: modal_offset,
                    current_offset: modal_offset,
                },
                None,
            ),
            GrabKind::EmptyMap => (
                Gesture::Pan {
                    start_pan: topology.map_view.pan,
                    current_pan: topology.map_view.pan,
                },
                Some(Region::Map),
            ),
        };
        Some(Self::new(grab, gesture, pointer, region))
    }
}

fn start_device_drag(topology: &Topology, id: DeviceId, model: Vec2) -> Option<DeviceDrag> {
    let device = topology.devices.get(&id)?;
    let mut exclude = vec![ItemRef::Device(id)];
    let mut footprint = Footprint::for_device(device);
    let mut carried_zone = None;

    if device.kind == DeviceKind::Sensor {
        // Sensoren landen immer in einer Zone: geprüft wird der Zonen-Footprint
        footprint.size = zone_size(1);
        footprint.rotation_deg = 0.0;
        if let Some(zone) = device.zone_id.and_then(|zid| topology.zones.get(&zid)) {
            if zone.member_count() == 1 {
                footprint.rotation_deg = zone.rotation_deg as f32;
                carried_zone = Some(zone.id);
                exclude.push(ItemRef::Zone(zone.id));
            }
        }
    }

    let (start_position, grab_offset) = match device.location {
        Location::OnMap => (device.position, device.position - model),
        Location::InTray => (model, Vec2::ZERO),
    };
    footprint.anchor = start_position;
    let engine = topology.overlap_engine(&exclude);
    // Startposition zählt nur als frei, wenn dort nichts überlappt
    let last_free = (device.location == Location::OnMap && engine.find(&footprint).is_empty())
        .then_some(start_position);

    Some(DeviceDrag {
        device_id: id,
        kind: device.kind,
        origin: device.location,
        start_position,
        grab_offset,
        current: start_position,
        last_free,
        footprint,
        engine,
        overlapping: BTreeSet::new(),
        own_links: device.own_links().collect(),
        dependent_links: topology.links_targeting(id),
        carried_zone,
    })
}
