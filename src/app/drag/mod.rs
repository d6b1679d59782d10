//! Zeiger-Gesten: Klassifikation des gegriffenen Elements, Sitzungszustand,
//! Nachführen, Ziel-Validierung und Abschluss zu Aktions-Batches.
//!
//! Ablauf: ARMED (gedrückt) → TRACKING (bewegt) ⇄ OVER_TARGET (Ziel geprüft)
//! → COMMITTING bzw. ABORTING → IDLE. Zwischenstände leben nur in der
//! Sitzung und werden erst beim Abschluss zu Aktionen.

pub mod finalize;
mod hover;
mod motion;
mod preview;
mod session;
mod target;

pub use hover::validate_target;
pub use motion::apply_motion;
pub use preview::apply_preview;
pub use session::{
    DeviceDrag, DragPhase, DragSession, Gesture, Hover, LinkDrag, Region, RotateDrag,
    RotateSubject, TranslateDrag, TranslateSubject, ZoneDrag,
};
pub use target::{classify, GrabKind};
