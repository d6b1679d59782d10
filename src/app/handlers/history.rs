//! Handler für Undo/Redo-Operationen.

use crate::app::host::EditorHost;

/// Führt einen Undo-Schritt aus, falls vorhanden.
pub fn undo(host: &mut dyn EditorHost) -> anyhow::Result<()> {
    if host.undo()? {
        log::info!("Undo ausgeführt");
    } else {
        log::debug!("Undo: nichts zu tun");
    }
    Ok(())
}

/// Führt einen Redo-Schritt aus, falls vorhanden.
pub fn redo(host: &mut dyn EditorHost) -> anyhow::Result<()> {
    if host.redo()? {
        log::info!("Redo ausgeführt");
    } else {
        log::debug!("Redo: nichts zu tun");
    }
    Ok(())
}
