//! Handler für eingehende Telemetrie.

use crate::app::AppState;
use crate::core::{DeviceId, Liveness};

/// Übernimmt eine Meldung sofort.
pub fn apply(state: &mut AppState, device_id: DeviceId, liveness: Liveness) {
    state.live.apply(device_id, liveness);
}

/// Puffert eine Meldung bis zum Ende der laufenden Geste.
pub fn queue(state: &mut AppState, device_id: DeviceId, liveness: Liveness) {
    log::trace!("Telemetrie für Gerät {} gepuffert", device_id);
    state.live.enqueue(device_id, liveness);
}
