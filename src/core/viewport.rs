//! Koordinaten-Kette: Zeiger → Viewport-lokal → Modell-Raum.
//!
//! Jede Stufe ist einzeln invertierbar. Pan und Zoom bilden die Karten-Kamera,
//! der Bild-Anker verschiebt das Modell relativ zum Hintergrundbild.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Bildschirm-Transformation des Viewports (Position auf der Seite, Pixel-Dichte).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    /// Obere linke Ecke des Viewports in Zeiger-Koordinaten
    pub origin: Vec2,
    /// Skalierung Zeiger-Pixel → Viewport-Pixel (z.B. CSS-Zoom)
    pub scale: f32,
}

impl ScreenTransform {
    /// Zeiger-Koordinaten → Viewport-lokale Koordinaten.
    pub fn to_local(&self, pointer: Vec2) -> Vec2 {
        (pointer - self.origin) / self.scale
    }

    /// Viewport-lokale Koordinaten → Zeiger-Koordinaten.
    pub fn to_pointer(&self, local: Vec2) -> Vec2 {
        local * self.scale + self.origin
    }
}

impl Default for ScreenTransform {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

/// Persistierte Kartenansicht: Pan, Zoom und Bild-Anker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// Verschiebung in Viewport-Pixeln
    pub pan: Vec2,
    /// Zoom-Faktor (1.0 = Originalgröße)
    pub zoom: f32,
    /// Versatz des Hintergrundbilds im Modell-Raum
    pub image_anchor: Vec2,
}

impl MapView {
    /// Erstellt eine Ansicht ohne Pan/Zoom.
    pub fn new() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            image_anchor: Vec2::ZERO,
        }
    }

    /// Viewport-lokale Koordinaten → Modell-Raum.
    pub fn local_to_model(&self, local: Vec2) -> Vec2 {
        (local - self.pan) / self.zoom - self.image_anchor
    }

    /// Modell-Raum → Viewport-lokale Koordinaten.
    pub fn model_to_local(&self, model: Vec2) -> Vec2 {
        (model + self.image_anchor) * self.zoom + self.pan
    }

    /// Rechnet eine Pixel-Distanz in Modell-Einheiten um.
    pub fn px_to_model(&self, px: f32) -> f32 {
        px / self.zoom
    }

    /// Zoomt um `factor`, so dass `focus_local` an derselben Bildschirmstelle bleibt.
    pub fn zoom_about(&mut self, factor: f32, focus_local: Vec2, min: f32, max: f32) {
        let model = self.local_to_model(focus_local);
        self.zoom = (self.zoom * factor).clamp(min, max);
        // Pan so korrigieren, dass der Fokuspunkt fix bleibt
        self.pan = focus_local - (model + self.image_anchor) * self.zoom;
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

/// Vollständige Kette Zeiger → Modell.
pub fn pointer_to_model(screen: &ScreenTransform, view: &MapView, pointer: Vec2) -> Vec2 {
    view.local_to_model(screen.to_local(pointer))
}

/// Vollständige Kette Modell → Zeiger.
pub fn model_to_pointer(screen: &ScreenTransform, view: &MapView, model: Vec2) -> Vec2 {
    screen.to_pointer(view.model_to_local(model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_view() -> MapView {
        MapView {
            pan: Vec2::new(30.0, -12.0),
            zoom: 2.5,
            image_anchor: Vec2::new(7.0, 3.0),
        }
    }

    #[test]
    fn screen_transform_roundtrip() {
        let screen = ScreenTransform {
            origin: Vec2::new(200.0, 80.0),
            scale: 1.25,
        };
        let p = Vec2::new(512.0, 300.0);
        let back = screen.to_pointer(screen.to_local(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-4);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-4);
    }

    #[test]
    fn local_to_model_removes_pan_zoom_and_anchor() {
        let view = sample_view();
        let model = view.local_to_model(Vec2::new(80.0, 38.0));
        // (80-30)/2.5 - 7 = 13, (38+12)/2.5 - 3 = 17
        assert_relative_eq!(model.x, 13.0);
        assert_relative_eq!(model.y, 17.0);
        let local = view.model_to_local(model);
        assert_relative_eq!(local.x, 80.0, epsilon = 1e-4);
        assert_relative_eq!(local.y, 38.0, epsilon = 1e-4);
    }

    #[test]
    fn full_chain_is_invertible() {
        let screen = ScreenTransform {
            origin: Vec2::new(10.0, 20.0),
            scale: 0.5,
        };
        let view = sample_view();
        let m = Vec2::new(123.0, -45.0);
        let p = model_to_pointer(&screen, &view, m);
        let back = pointer_to_model(&screen, &view, p);
        assert_relative_eq!(back.x, m.x, epsilon = 1e-3);
        assert_relative_eq!(back.y, m.y, epsilon = 1e-3);
    }

    #[test]
    fn zoom_about_keeps_focus_fixed() {
        let mut view = sample_view();
        let focus = Vec2::new(400.0, 300.0);
        let before = view.local_to_model(focus);
        view.zoom_about(2.0, focus, 0.1, 10.0);
        assert_relative_eq!(view.zoom, 5.0);
        let after = view.local_to_model(focus);
        assert_relative_eq!(before.x, after.x, epsilon = 1e-3);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-3);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut view = MapView::new();
        view.zoom_about(100.0, Vec2::ZERO, 0.1, 4.0);
        assert_relative_eq!(view.zoom, 4.0);
    }
}
