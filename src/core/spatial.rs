//! Spatial-Index (KD-Tree) über Footprint-Anker für schnelle Kandidaten-Abfragen.

use glam::Vec2;
use kiddo::{KdTree, SquaredEuclidean};

use super::footprint::{Footprint, ItemRef};

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// Gefundenes Element
    pub item: ItemRef,
    /// Euklidische Distanz zwischen Anker und Suchpunkt
    pub distance: f32,
}

/// Read-only Spatial-Index über die Anker einer Footprint-Liste.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    items: Vec<ItemRef>,
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            items: Vec::new(),
        }
    }

    /// Baut einen Index aus den übergebenen Footprints (Reihenfolge bleibt erhalten).
    pub fn from_footprints(footprints: &[Footprint]) -> Self {
        let entries: Vec<[f64; 2]> = footprints
            .iter()
            .map(|fp| [fp.anchor.x as f64, fp.anchor.y as f64])
            .collect();
        let tree: KdTree<f64, 2> = (&entries).into();
        let items = footprints.iter().map(|fp| fp.item).collect();
        Self { tree, items }
    }

    /// Gibt die Anzahl indexierter Elemente zurück.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Gibt `true` zurück, wenn keine Elemente im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Findet das nächste Element zur gegebenen Position.
    pub fn nearest(&self, query: Vec2) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x as f64, query.y as f64]);
        let item = *self.items.get(result.item as usize)?;

        Some(SpatialMatch {
            item,
            distance: (result.distance as f32).sqrt(),
        })
    }

    /// Liefert die Positionen (Indizes in der Footprint-Liste) aller Anker im Radius.
    pub fn within_radius(&self, query: Vec2, radius: f32) -> Vec<usize> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut hits: Vec<usize> = self
            .tree
            .within::<SquaredEuclidean>(&[query.x as f64, query.y as f64], (radius * radius) as f64)
            .into_iter()
            .map(|entry| entry.item as usize)
            .filter(|&idx| idx < self.items.len())
            .collect();
        hits.sort_unstable();
        hits
    }
}
