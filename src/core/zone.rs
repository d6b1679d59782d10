//! Sensor-Zonen: logische Gruppen aus 1–3 benachbarten Sensoren.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::footprint::zone_size;
use super::geometry::rotate_point;
use super::DeviceId;

/// ID einer Sensor-Zone
pub type ZoneId = u64;

/// Maximale Mitgliederzahl einer Zone.
pub const MAX_ZONE_MEMBERS: usize = 3;

/// Feste relative Mitglieds-Offsets entlang der Zonenbreite (0 = linker Rand, 1 = rechter Rand).
const MEMBER_FRACTIONS: [&[f32]; 3] = [&[0.5], &[0.25, 0.75], &[1.0 / 6.0, 0.5, 5.0 / 6.0]];

/// Aus der Mitgliederzahl abgeleitete Nutzung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneUsage {
    /// Ein Sensor: Haltelinie
    #[default]
    Stopbar,
    /// Zwei Sensoren: Geschwindigkeitsmessung
    Speed2,
    /// Drei Sensoren: Geschwindigkeitsmessung mit drei Punkten
    Speed3,
}

impl ZoneUsage {
    /// Leitet die Nutzung aus der Mitgliederzahl ab.
    pub fn from_count(count: usize) -> Self {
        match count {
            0 | 1 => ZoneUsage::Stopbar,
            2 => ZoneUsage::Speed2,
            _ => ZoneUsage::Speed3,
        }
    }

    /// Textueller Tag wie im Datenmodell verwendet.
    pub fn as_str(self) -> &'static str {
        match self {
            ZoneUsage::Stopbar => "stopbar",
            ZoneUsage::Speed2 => "speed2",
            ZoneUsage::Speed3 => "speed3",
        }
    }
}

/// Abstand und Längenkorrektur zwischen zwei benachbarten Mitgliedern.
///
/// `None` bedeutet "nicht gesetzt".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneGap {
    /// Abstand zwischen den Sensoren
    pub spacing: Option<f32>,
    /// Längenkorrektur
    pub length_correction: Option<f32>,
}

impl ZoneGap {
    /// Halbiert beide Werte (für das Einfügen eines Sensors dazwischen).
    pub fn halved(self) -> Self {
        Self {
            spacing: self.spacing.map(|v| v * 0.5),
            length_correction: self.length_correction.map(|v| v * 0.5),
        }
    }

    /// Vereinigt zwei Lücken zu einer (beim Entfernen des mittleren Sensors).
    pub fn merged(self, other: Self) -> Self {
        fn sum(a: Option<f32>, b: Option<f32>) -> Option<f32> {
            match (a, b) {
                (None, None) => None,
                (a, b) => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
            }
        }
        Self {
            spacing: sum(self.spacing, other.spacing),
            length_correction: sum(self.length_correction, other.length_correction),
        }
    }
}

/// Eine Sensor-Zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorZone {
    /// Eindeutige ID
    pub id: ZoneId,
    /// Geordnete Mitglieder (1–3)
    pub sensor_ids: Vec<DeviceId>,
    /// Mittelpunkt der Zone im Modell-Raum
    pub anchor: Vec2,
    /// Rotation in ganzen Grad
    pub rotation_deg: i32,
    /// Abgeleitete Nutzung
    pub usage: ZoneUsage,
    /// Lücken zwischen benachbarten Mitgliedern (`sensor_ids.len() - 1` Einträge)
    pub gaps: Vec<ZoneGap>,
}

impl SensorZone {
    /// Erstellt eine Zone mit genau einem Mitglied.
    pub fn new(id: ZoneId, anchor: Vec2, sensor_id: DeviceId) -> Self {
        Self {
            id,
            sensor_ids: vec![sensor_id],
            anchor,
            rotation_deg: 0,
            usage: ZoneUsage::Stopbar,
            gaps: Vec::new(),
        }
    }

    /// Anzahl der Mitglieder
    pub fn member_count(&self) -> usize {
        self.sensor_ids.len()
    }

    /// Prüft, ob der Sensor Mitglied ist.
    pub fn contains(&self, sensor_id: DeviceId) -> bool {
        self.sensor_ids.contains(&sensor_id)
    }

    /// Darf `sensor_id` die Zone betreten? (<3 Mitglieder, oder 3 und bereits Mitglied)
    pub fn can_accept(&self, sensor_id: DeviceId) -> bool {
        self.member_count() < MAX_ZONE_MEMBERS
            || (self.member_count() == MAX_ZONE_MEMBERS && self.contains(sensor_id))
    }

    /// Fügt einen Sensor an `index` ein und teilt die Lücken auf.
    ///
    /// Vorne/hinten entsteht eine leere Lücke; dazwischen wird die bisherige
    /// Lücke gleichmäßig auf beide neuen Lücken verteilt.
    pub fn insert_member(&mut self, index: usize, sensor_id: DeviceId) {
        let n = self.sensor_ids.len();
        let index = index.min(n);
        if n > 0 {
            if index == 0 {
                self.gaps.insert(0, ZoneGap::default());
            } else if index == n {
                self.gaps.push(ZoneGap::default());
            } else {
                let half = self.gaps[index - 1].halved();
                self.gaps[index - 1] = half;
                self.gaps.insert(index, half);
            }
        }
        self.sensor_ids.insert(index, sensor_id);
        self.usage = ZoneUsage::from_count(self.sensor_ids.len());
    }

    /// Entfernt einen Sensor; gibt den bisherigen Index zurück.
    pub fn remove_member(&mut self, sensor_id: DeviceId) -> Option<usize> {
        let index = self.sensor_ids.iter().position(|&id| id == sensor_id)?;
        let n = self.sensor_ids.len();
        if n > 1 && !self.gaps.is_empty() {
            if index == 0 {
                self.gaps.remove(0);
            } else if index == n - 1 {
                self.gaps.pop();
            } else {
                let merged = self.gaps[index - 1].merged(self.gaps[index]);
                self.gaps[index - 1] = merged;
                self.gaps.remove(index);
            }
        }
        self.sensor_ids.remove(index);
        self.usage = ZoneUsage::from_count(self.sensor_ids.len());
        Some(index)
    }

    /// Footprint-Größe passend zur Mitgliederzahl.
    pub fn size(&self) -> Vec2 {
        zone_size(self.member_count())
    }

    /// Mitglieds-Positionen: feste Offsets relativ zum Anker, rotiert mit der Zone.
    pub fn member_positions(&self) -> Vec<Vec2> {
        member_positions_for(self.anchor, self.rotation_deg, self.member_count())
    }
}

/// Mitglieds-Positionen für eine Zone mit `count` Mitgliedern.
pub fn member_positions_for(anchor: Vec2, rotation_deg: i32, count: usize) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }
    let fractions = MEMBER_FRACTIONS[count.min(MAX_ZONE_MEMBERS) - 1];
    let width = zone_size(count).x;
    fractions
        .iter()
        .map(|f| {
            let local = anchor + Vec2::new((f - 0.5) * width, 0.0);
            rotate_point(local, rotation_deg as f32, anchor)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn usage_follows_member_count() {
        let mut zone = SensorZone::new(1, Vec2::ZERO, 10);
        assert_eq!(zone.usage, ZoneUsage::Stopbar);
        zone.insert_member(1, 11);
        assert_eq!(zone.usage, ZoneUsage::Speed2);
        zone.insert_member(2, 12);
        assert_eq!(zone.usage.as_str(), "speed3");
    }

    #[test]
    fn insert_between_splits_gap_evenly() {
        let mut zone = SensorZone::new(1, Vec2::ZERO, 10);
        zone.insert_member(1, 11);
        zone.gaps[0] = ZoneGap {
            spacing: Some(12.0),
            length_correction: Some(2.0),
        };
        zone.insert_member(1, 12);
        assert_eq!(zone.sensor_ids, vec![10, 12, 11]);
        assert_eq!(zone.gaps.len(), 2);
        for gap in &zone.gaps {
            assert_eq!(gap.spacing, Some(6.0));
            assert_eq!(gap.length_correction, Some(1.0));
        }
    }

    #[test]
    fn insert_at_ends_adds_unset_gap() {
        let mut zone = SensorZone::new(1, Vec2::ZERO, 10);
        zone.insert_member(0, 9);
        assert_eq!(zone.sensor_ids, vec![9, 10]);
        assert_eq!(zone.gaps, vec![ZoneGap::default()]);
    }

    #[test]
    fn remove_middle_merges_gaps() {
        let mut zone = SensorZone::new(1, Vec2::ZERO, 10);
        zone.insert_member(1, 11);
        zone.gaps[0].spacing = Some(10.0);
        zone.insert_member(1, 12);
        let removed = zone.remove_member(12);
        assert_eq!(removed, Some(1));
        assert_eq!(zone.sensor_ids, vec![10, 11]);
        assert_eq!(zone.gaps.len(), 1);
        assert_eq!(zone.gaps[0].spacing, Some(10.0));
        assert_eq!(zone.gaps[0].length_correction, None);
    }

    #[test]
    fn can_accept_respects_capacity() {
        let mut zone = SensorZone::new(1, Vec2::ZERO, 10);
        zone.insert_member(1, 11);
        zone.insert_member(2, 12);
        assert!(!zone.can_accept(13));
        assert!(zone.can_accept(12));
    }

    #[test]
    fn member_positions_rotate_with_zone() {
        let anchor = Vec2::new(100.0, 100.0);
        let flat = member_positions_for(anchor, 0, 2);
        assert_relative_eq!(flat[0].x, 100.0 - 0.25 * 102.0);
        assert_relative_eq!(flat[1].x, 100.0 + 0.25 * 102.0);
        assert_relative_eq!(flat[0].y, 100.0);

        let turned = member_positions_for(anchor, 90, 2);
        assert_relative_eq!(turned[0].x, 100.0, epsilon = 1e-3);
        assert_relative_eq!(turned[0].y, 100.0 - 0.25 * 102.0, epsilon = 1e-3);
        assert_relative_eq!(turned[1].y, 100.0 + 0.25 * 102.0, epsilon = 1e-3);
    }
}
