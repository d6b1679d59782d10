//! Overlap-Engine: findet alle platzierten Elemente, deren rotiertes
//! Bounding-Rechteck eine Kandidaten-Platzierung schneidet.

use std::collections::BTreeSet;

use glam::Vec2;

use super::footprint::{Footprint, ItemRef};
use super::geometry::{boxes_overlap, point_in_polygon};
use super::spatial::SpatialIndex;

/// Prüft zwei Footprints auf Überlappung.
///
/// Überlappung liegt vor, wenn die Diagonal-Boxen sich schneiden. Ist
/// mindestens eines der Rechtecke rotiert, genügt auch eine Ecke des einen
/// im Polygon des anderen.
pub fn footprints_overlap(a: &Footprint, b: &Footprint) -> bool {
    if boxes_overlap(a.diagonal_box(), b.diagonal_box()) {
        return true;
    }
    if !a.is_rotated() && !b.is_rotated() {
        return false;
    }
    let ca = a.corners();
    let cb = b.corners();
    ca.iter().any(|&p| point_in_polygon(p, &cb)) || cb.iter().any(|&p| point_in_polygon(p, &ca))
}

/// Liefert alle Elemente aus `existing`, die `candidate` überlappen (ohne den Kandidaten selbst).
pub fn find_overlaps<'a>(
    candidate: &Footprint,
    existing: impl IntoIterator<Item = &'a Footprint>,
) -> BTreeSet<ItemRef> {
    existing
        .into_iter()
        .filter(|fp| fp.item != candidate.item)
        .filter(|fp| footprints_overlap(candidate, fp))
        .map(|fp| fp.item)
        .collect()
}

/// Vorberechnete Overlap-Suche über eine feste Menge platzierter Elemente.
///
/// Wird einmal pro Drag-Session gebaut; jeder Move-Tick fragt nur die
/// Kandidaten im Umkreis über den KD-Tree ab.
#[derive(Debug, Clone)]
pub struct OverlapEngine {
    footprints: Vec<Footprint>,
    index: SpatialIndex,
    max_radius: f32,
}

impl OverlapEngine {
    /// Baut die Engine aus den gegebenen Footprints.
    pub fn new(footprints: Vec<Footprint>) -> Self {
        let index = SpatialIndex::from_footprints(&footprints);
        let max_radius = footprints
            .iter()
            .map(Footprint::radius)
            .fold(0.0_f32, f32::max);
        Self {
            footprints,
            index,
            max_radius,
        }
    }

    /// Anzahl der berücksichtigten Elemente
    pub fn len(&self) -> usize {
        self.footprints.len()
    }

    /// Gibt `true` zurück, wenn keine Elemente berücksichtigt werden.
    pub fn is_empty(&self) -> bool {
        self.footprints.is_empty()
    }

    /// Alle Elemente, die den Kandidaten überlappen.
    pub fn find(&self, candidate: &Footprint) -> BTreeSet<ItemRef> {
        let radius = candidate.radius() + self.max_radius;
        let nearby = self
            .index
            .within_radius(candidate.anchor, radius)
            .into_iter()
            .map(|idx| &self.footprints[idx]);
        find_overlaps(candidate, nearby)
    }

    /// Oberstes Element (zuletzt eingefügt), dessen Rechteck `point` enthält.
    pub fn hit(&self, point: Vec2) -> Option<ItemRef> {
        self.index
            .within_radius(point, self.max_radius)
            .into_iter()
            .rev()
            .map(|idx| &self.footprints[idx])
            .find(|fp| point_in_polygon(point, &fp.corners()))
            .map(|fp| fp.item)
    }
}
