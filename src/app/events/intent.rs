use glam::Vec2;

use super::HitTarget;
use crate::core::{DeviceId, LinkId, Liveness, ScreenTransform};

/// App-Intent Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
/// Alle Zeiger-Positionen sind Host-Zeigerkoordinaten.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Zeiger gedrückt; ohne Ziel wird auf der Karte per Hit-Test gesucht
    PointerDown {
        pointer: Vec2,
        target: Option<HitTarget>,
    },
    /// Zeiger bewegt
    PointerMoved { pointer: Vec2 },
    /// Zeiger hat ein Element oder eine Fläche betreten
    PointerEntered { target: HitTarget },
    /// Zeiger hat ein Element oder eine Fläche verlassen
    PointerLeft { target: HitTarget },
    /// Zeiger losgelassen
    PointerReleased { pointer: Vec2 },
    /// Zeiger hat Karte und Tray verlassen
    SurfaceLeft,
    /// Geste abbrechen (z.B. Escape)
    CancelRequested,
    /// Kamera zoomen um einen Fokuspunkt
    CameraZoom { factor: f32, focus: Vec2 },
    /// Mausrad-Schritte (positiv = hinein)
    ScrollZoom { steps: f32, focus: Vec2 },
    /// Host-Viewport hat sich geändert
    ViewportChanged {
        screen: ScreenTransform,
        size: [f32; 2],
    },
    /// Neue Telemetrie für ein Gerät
    TelemetryReceived {
        device_id: DeviceId,
        liveness: Liveness,
    },
    /// Zeitgeber des Hosts
    Tick { now_ms: u64 },
    /// Gerät löschen (Kontextmenü)
    DeleteDeviceRequested { device_id: DeviceId },
    /// Link löschen (Kontextmenü)
    DeleteLinkRequested { link_id: LinkId },
    /// Auswahl aufheben
    ClearSelectionRequested,
    /// Undo
    UndoRequested,
    /// Redo
    RedoRequested,
}
