//! Handler für Kamera und Viewport.

use glam::Vec2;

use crate::app::drag::finalize::pan;
use crate::app::host::EditorHost;
use crate::app::AppState;
use crate::core::ScreenTransform;

/// Zoomt um einen Fokuspunkt (Zeiger-Koordinaten) und übergibt die neue Ansicht.
pub fn zoom(
    state: &AppState,
    host: &mut dyn EditorHost,
    factor: f32,
    focus: Vec2,
) -> anyhow::Result<()> {
    let focus_local = state.view.screen.to_local(focus);
    match pan::zoom(factor, focus_local, host.topology(), &state.options) {
        Some(batch) => host.submit(batch)?,
        None => log::debug!("Zoom am Limit, keine Änderung"),
    }
    Ok(())
}

/// Übernimmt Lage und Größe des Viewports.
pub fn set_viewport(state: &mut AppState, screen: ScreenTransform, size: [f32; 2]) {
    state.view.screen = screen;
    state.view.viewport_size = size;
}
