use std::collections::HashMap;

use crate::core::{DeviceId, Liveness, Topology};

/// Von außen gemeldete Lebenszeichen der Geräte.
///
/// Während einer Geste werden Meldungen nur gepuffert und erst nach deren
/// Ende übernommen, damit die Darstellung nicht unter dem Zeiger springt.
#[derive(Debug, Clone, Default)]
pub struct LiveOverlay {
    liveness: HashMap<DeviceId, Liveness>,
    queued: Vec<(DeviceId, Liveness)>,
}

impl LiveOverlay {
    /// Übernimmt eine Meldung sofort.
    pub fn apply(&mut self, device_id: DeviceId, liveness: Liveness) {
        self.liveness.insert(device_id, liveness);
    }

    /// Puffert eine Meldung bis zum Ende der Geste.
    pub fn enqueue(&mut self, device_id: DeviceId, liveness: Liveness) {
        self.queued.push((device_id, liveness));
    }

    /// Anzahl gepufferter Meldungen
    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    /// Übernimmt alle gepufferten Meldungen in Eingangsreihenfolge.
    pub fn flush(&mut self) -> usize {
        let count = self.queued.len();
        for (id, liveness) in std::mem::take(&mut self.queued) {
            self.liveness.insert(id, liveness);
        }
        count
    }

    /// Zuletzt gemeldeter Zustand eines Geräts (ohne Rückfall auf den Datensatz).
    pub fn reported(&self, device_id: DeviceId) -> Option<Liveness> {
        self.liveness.get(&device_id).copied()
    }

    /// Wirksamer Zustand: Meldung, sonst Datensatz, sonst Standard.
    pub fn effective(&self, topology: &Topology, device_id: DeviceId) -> Liveness {
        self.reported(device_id)
            .or_else(|| topology.devices.get(&device_id).map(|d| d.liveness))
            .unwrap_or_default()
    }
}
