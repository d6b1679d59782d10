//! Render-Szene als expliziter Übergabevertrag zwischen App und Host-Renderer.
//!
//! Enthält die committete Topologie, überlagert mit der transienten Geometrie
//! der aktiven Geste. Der Renderer muss nichts über Gesten wissen.

use glam::Vec2;

use crate::core::{
    Cabinet, DeviceId, DeviceKind, ItemRef, LabelId, LinkId, LinkKind, Location, MapView,
    NorthArrow, ZoneId, ZoneUsage,
};

/// Ein Gerät, wie es in diesem Frame gezeichnet wird
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDevice {
    pub id: DeviceId,
    pub kind: DeviceKind,
    pub location: Location,
    pub position: Vec2,
    pub rotation_deg: i32,
    /// Vom Netz gehört (Live-Telemetrie, sonst Datensatz)
    pub heard: bool,
    pub rssi: Option<i32>,
    pub selected: bool,
    /// Wird gerade gezogen
    pub dragged: bool,
}

/// Eine Sensor-Zone in diesem Frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderZone {
    pub id: ZoneId,
    pub anchor: Vec2,
    pub rotation_deg: i32,
    pub size: Vec2,
    pub usage: ZoneUsage,
    pub selected: bool,
}

/// Ein Link als Polylinie
#[derive(Debug, Clone, PartialEq)]
pub struct RenderLink {
    pub id: LinkId,
    pub kind: LinkKind,
    pub points: Vec<Vec2>,
    pub selected: bool,
    pub dragged: bool,
}

/// Ein Textlabel
#[derive(Debug, Clone, PartialEq)]
pub struct RenderLabel {
    pub id: LabelId,
    pub text: String,
    pub position: Vec2,
    pub rotation_deg: i32,
    pub selected: bool,
}

/// Read-only Daten für einen Render-Frame.
#[derive(Debug, Clone, Default)]
pub struct RenderScene {
    /// Ansicht inkl. transientem Pan
    pub map_view: MapView,
    /// Viewport-Größe in Pixeln [Breite, Höhe]
    pub viewport_size: [f32; 2],
    pub devices: Vec<RenderDevice>,
    pub zones: Vec<RenderZone>,
    pub links: Vec<RenderLink>,
    pub labels: Vec<RenderLabel>,
    pub north_arrow: NorthArrow,
    pub cabinet: Option<Cabinet>,
    /// Elemente, die der gezogene Footprint aktuell überlappt
    pub overlapping: Vec<ItemRef>,
    /// Gültigkeit des Ziels unter dem Zeiger (`None` = kein relevantes Ziel)
    pub hover_valid: Option<bool>,
    /// Versatz des Modal-Dialogs
    pub modal_offset: Vec2,
}

impl RenderScene {
    /// Sucht ein Gerät nach ID.
    pub fn device(&self, id: DeviceId) -> Option<&RenderDevice> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Sucht eine Zone nach ID.
    pub fn zone(&self, id: ZoneId) -> Option<&RenderZone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// Sucht einen Link nach ID.
    pub fn link(&self, id: LinkId) -> Option<&RenderLink> {
        self.links.iter().find(|l| l.id == id)
    }
}
