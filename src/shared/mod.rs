//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `app` und dem darstellenden Host geteilt werden,
//! um direkte Abhängigkeiten zu vermeiden.

pub mod options;
mod render_scene;

pub use options::EditorOptions;
pub use options::{CHANNEL_CAPACITY, JOINT_SNAP_RADIUS_PX, LINK_DRAG_THRESHOLD_PX, ROTATION_SNAP_DEG};
pub use render_scene::{RenderDevice, RenderLabel, RenderLink, RenderScene, RenderZone};
