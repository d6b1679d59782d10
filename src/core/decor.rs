//! Karten-Dekoration: Nordpfeil, Textlabels und Schaltschrank-Symbol.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// ID eines Textlabels
pub type LabelId = u64;

/// Nordpfeil (nur Rotation ist editierbar)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NorthArrow {
    /// Mittelpunkt
    pub position: Vec2,
    /// Rotation in ganzen Grad
    pub rotation_deg: i32,
}

impl Default for NorthArrow {
    fn default() -> Self {
        Self {
            position: Vec2::new(40.0, 40.0),
            rotation_deg: 0,
        }
    }
}

/// Freies Textlabel auf der Karte
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    /// Eindeutige ID
    pub id: LabelId,
    /// Anzeigetext
    pub text: String,
    /// Linke Kante, vertikale Mitte der Textzeile
    pub position: Vec2,
    /// Rotation in ganzen Grad um die Textmitte
    pub rotation_deg: i32,
}

impl TextLabel {
    /// Rotationszentrum bei gegebener gemessener Textbreite.
    pub fn center(&self, text_width: f32) -> Vec2 {
        self.position + Vec2::new(text_width * 0.5, 0.0)
    }
}

/// Schaltschrank-Symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cabinet {
    /// Mittelpunkt
    pub position: Vec2,
}
