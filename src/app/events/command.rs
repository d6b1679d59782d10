use glam::Vec2;

use super::HitTarget;
use crate::core::{DeviceId, LinkId, Liveness, ScreenTransform};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Geste auf einem Ziel beginnen
    BeginGesture { pointer: Vec2, target: HitTarget },
    /// Aktive Geste nachführen
    UpdateGesture { pointer: Vec2 },
    /// Ziel unter dem Zeiger prüfen und merken
    EnterTarget { target: HitTarget },
    /// Ziel unter dem Zeiger verlassen
    LeaveTarget { target: HitTarget },
    /// Geste abschließen
    EndGesture { pointer: Vec2 },
    /// Geste verwerfen, sofern kein gültiges Ziel anliegt
    LeaveSurface,
    /// Geste verwerfen
    AbortGesture,
    /// Kamera zoomen
    ZoomCamera { factor: f32, focus: Vec2 },
    /// Viewport setzen
    SetViewport {
        screen: ScreenTransform,
        size: [f32; 2],
    },
    /// Telemetrie sofort übernehmen
    ApplyTelemetry {
        device_id: DeviceId,
        liveness: Liveness,
    },
    /// Telemetrie bis Gestenende puffern
    QueueTelemetry {
        device_id: DeviceId,
        liveness: Liveness,
    },
    /// Uhr vorstellen und fällige Karten löschen
    AdvanceClock { now_ms: u64 },
    /// Gerät löschen
    DeleteDevice { device_id: DeviceId },
    /// Link löschen
    DeleteLink { link_id: LinkId },
    /// Auswahl aufheben
    ClearSelection,
    /// Undo
    Undo,
    /// Redo
    Redo,
}
