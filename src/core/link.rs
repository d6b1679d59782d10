//! Gerichtete Links als Polylinie von einem Gerät zu einem Ziel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::closest_point_on_segment;
use super::{ChannelId, DeviceId};

/// ID eines Links
pub type LinkId = u64;

/// Art des Links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// Funk-Uplink zu Radio/Repeater
    Rf,
    /// Kabel-Link zu einem Kanal einer Controller-Karte
    Cc,
}

/// Ziel eines Links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkTarget {
    /// Upstream-Gerät (Radio oder Repeater)
    Device(DeviceId),
    /// Kanal einer Controller-Karte
    Channel(ChannelId),
}

/// Ein Link als Polylinie.
///
/// Die Punktliste hat mindestens zwei Einträge; Segment `i` läuft von
/// `points[i]` nach `points[i + 1]`, so dass benachbarte Segmente sich
/// immer einen Gelenkpunkt teilen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Eindeutige ID
    pub id: LinkId,
    /// RF oder CC
    pub kind: LinkKind,
    /// Besitzendes (sendendes) Gerät
    pub owner: DeviceId,
    /// Ziel
    pub target: LinkTarget,
    /// Polylinien-Punkte (erster = Geräteposition, letzter = Ziel-Anker)
    pub points: Vec<Vec2>,
}

impl Link {
    /// Erstellt einen Link mit genau einem Segment.
    pub fn new(
        id: LinkId,
        kind: LinkKind,
        owner: DeviceId,
        target: LinkTarget,
        start: Vec2,
        end: Vec2,
    ) -> Self {
        Self {
            id,
            kind,
            owner,
            target,
            points: vec![start, end],
        }
    }

    /// Anzahl der Segmente
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Iterator über alle Segmente als `(A, B)`.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Startpunkt (Position des besitzenden Geräts)
    pub fn start(&self) -> Vec2 {
        self.points[0]
    }

    /// Endpunkt (Anker des Ziels)
    pub fn end(&self) -> Vec2 {
        self.points[self.points.len() - 1]
    }

    /// Index des End-Gelenks
    pub fn terminal_index(&self) -> usize {
        self.points.len() - 1
    }

    /// Setzt den Startpunkt.
    pub fn set_start(&mut self, p: Vec2) {
        self.points[0] = p;
    }

    /// Setzt den Endpunkt.
    pub fn set_end(&mut self, p: Vec2) {
        let last = self.points.len() - 1;
        self.points[last] = p;
    }

    /// Nächstes Segment zu `p` als `(Segment-Index, Distanz)`.
    pub fn nearest_segment(&self, p: Vec2) -> Option<(usize, f32)> {
        self.segments()
            .enumerate()
            .map(|(i, (a, b))| (i, closest_point_on_segment(a, b, p).distance(p)))
            .min_by(|x, y| x.1.total_cmp(&y.1))
    }

    /// Nächstes bewegliches Gelenk (alle Punkte außer dem Start) innerhalb `radius`.
    pub fn nearest_joint(&self, p: Vec2, radius: f32) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, q)| (i, q.distance(p)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|x, y| x.1.total_cmp(&y.1))
            .map(|(i, _)| i)
    }

    /// Teilt Segment `segment` an `p` und gibt den Index des neuen Gelenks zurück.
    pub fn split_segment(&mut self, segment: usize, p: Vec2) -> usize {
        let index = (segment + 1).min(self.points.len() - 1);
        self.points.insert(index, p);
        index
    }

    /// Prüft die Verbindungs-Invariante gegen Start- und Zielposition.
    pub fn is_anchored(&self, start: Vec2, end: Vec2) -> bool {
        self.points.len() >= 2 && self.start() == start && self.end() == end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Link {
        let mut link = Link::new(
            1,
            LinkKind::Rf,
            10,
            LinkTarget::Device(20),
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
        );
        link.split_segment(0, Vec2::new(50.0, 20.0));
        link
    }

    #[test]
    fn split_inserts_joint_between_segment_ends() {
        let link = sample();
        assert_eq!(link.segment_count(), 2);
        assert_eq!(link.points[1], Vec2::new(50.0, 20.0));
        let segs: Vec<_> = link.segments().collect();
        assert_eq!(segs[0].1, segs[1].0);
    }

    #[test]
    fn nearest_segment_picks_closest() {
        let link = sample();
        let (idx, _) = link.nearest_segment(Vec2::new(80.0, 8.0)).unwrap();
        assert_eq!(idx, 1);
    }

    #[test]
    fn nearest_joint_ignores_start_point() {
        let link = sample();
        assert_eq!(link.nearest_joint(Vec2::new(1.0, 1.0), 10.0), None);
        assert_eq!(link.nearest_joint(Vec2::new(52.0, 18.0), 10.0), Some(1));
        assert_eq!(link.nearest_joint(Vec2::new(97.0, 0.0), 10.0), Some(2));
    }

    #[test]
    fn anchored_checks_both_ends() {
        let link = sample();
        assert!(link.is_anchored(Vec2::ZERO, Vec2::new(100.0, 0.0)));
        assert!(!link.is_anchored(Vec2::ZERO, Vec2::new(90.0, 0.0)));
    }
}
