use glam::Vec2;

use crate::core::ScreenTransform;

/// View-bezogener Anwendungszustand
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Zeiger → Viewport-Transformation des Hosts
    pub screen: ScreenTransform,
    /// Aktuelle Viewport-Größe in Pixel
    pub viewport_size: [f32; 2],
    /// Versatz des Modal-Dialogs (per Kopfzeile verschiebbar, nicht persistiert)
    pub modal_offset: Vec2,
}

impl ViewState {
    /// Erstellt den Standard-View-Zustand.
    pub fn new() -> Self {
        Self {
            screen: ScreenTransform::default(),
            viewport_size: [0.0, 0.0],
            modal_offset: Vec2::ZERO,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
