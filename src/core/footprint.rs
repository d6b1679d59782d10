//! Bounding-Rechtecke platzierter Elemente für den Kollisionstest.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{rect_corners, rotate, Aabb};
use super::{Device, DeviceId, SensorZone, ZoneId};

/// Größe punktförmiger Geräte (Sensor außerhalb Zone, Repeater, Radio, Access-Point).
pub const DEVICE_SIZE: Vec2 = Vec2::new(56.0, 56.0);
/// Zonenbreite nach Mitgliederzahl 1/2/3.
pub const ZONE_WIDTHS: [f32; 3] = [88.0, 102.0, 128.0];
/// Zonenhöhe (unabhängig von der Mitgliederzahl).
pub const ZONE_HEIGHT: f32 = 56.0;

/// Footprint-Größe einer Zone mit `count` Mitgliedern (0 wird wie 1 behandelt).
pub fn zone_size(count: usize) -> Vec2 {
    let idx = count.clamp(1, ZONE_WIDTHS.len()) - 1;
    Vec2::new(ZONE_WIDTHS[idx], ZONE_HEIGHT)
}

/// Referenz auf ein kollisionsrelevantes Element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemRef {
    /// Punktförmiges Gerät
    Device(DeviceId),
    /// Sensor-Zone
    Zone(ZoneId),
}

/// Rotiertes Rechteck eines Elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Zugehöriges Element
    pub item: ItemRef,
    /// Mittelpunkt (Rotationszentrum)
    pub anchor: Vec2,
    /// Breite/Höhe vor Rotation
    pub size: Vec2,
    /// Rotation in Grad
    pub rotation_deg: f32,
}

impl Footprint {
    /// Footprint eines Geräts an seiner aktuellen Position.
    pub fn for_device(device: &Device) -> Self {
        Self {
            item: ItemRef::Device(device.id),
            anchor: device.position,
            size: DEVICE_SIZE,
            rotation_deg: device.rotation_deg as f32,
        }
    }

    /// Footprint einer Zone an ihrem aktuellen Anker.
    pub fn for_zone(zone: &SensorZone) -> Self {
        Self {
            item: ItemRef::Zone(zone.id),
            anchor: zone.anchor,
            size: zone.size(),
            rotation_deg: zone.rotation_deg as f32,
        }
    }

    /// Kopie an anderer Position/Rotation (für transiente Drag-Geometrie).
    pub fn moved(self, anchor: Vec2, rotation_deg: f32) -> Self {
        Self {
            anchor,
            rotation_deg,
            ..self
        }
    }

    /// Ist das Rechteck rotiert?
    pub fn is_rotated(&self) -> bool {
        self.rotation_deg.rem_euclid(360.0) != 0.0
    }

    /// Rotierte Ecken in Label-Reihenfolge UL, UR, LR, LL.
    pub fn corners(&self) -> Vec<Vec2> {
        let base = rect_corners(self.anchor, self.size);
        if self.is_rotated() {
            rotate(&base, self.rotation_deg, self.anchor)
        } else {
            base.to_vec()
        }
    }

    /// Box über die UL–LR-Diagonale der (rotierten) Ecken.
    pub fn diagonal_box(&self) -> Aabb {
        let c = self.corners();
        Aabb::from_diagonal(c[0], c[2])
    }

    /// Radius des umschließenden Kreises.
    pub fn radius(&self) -> f32 {
        self.size.length() * 0.5
    }
}
