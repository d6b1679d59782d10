//! Fehlertypen des Application-Layers.

use crate::core::{ChannelId, ChannelKind, DeviceId, LinkId};

/// Fehler beim Abschließen einer Geste oder beim Anwenden eines Batches.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    /// Kanal hat bereits die maximale Anzahl Sensoren
    #[error("Kanal {channel} ist voll ({capacity} Sensoren verbunden)")]
    ChannelFull {
        /// Betroffener Kanal
        channel: ChannelId,
        /// Kapazität des Kanals
        capacity: usize,
    },
    /// Sensor ist bereits mit diesem Kanal verbunden
    #[error("Sensor {sensor} ist bereits mit Kanal {channel} verbunden")]
    DuplicateLink {
        /// Betroffener Sensor
        sensor: DeviceId,
        /// Betroffener Kanal
        channel: ChannelId,
    },
    /// Uplink würde einen Kreis in der Repeater-Kette schließen
    #[error("Gerät {target} liegt bereits hinter Gerät {device}, Uplink würde einen Kreis bilden")]
    CyclicUplink {
        /// Gerät, dessen Uplink gesetzt wird
        device: DeviceId,
        /// Gewähltes Uplink-Ziel
        target: DeviceId,
    },
    /// CC-Link soll auf einen Kanal anderer Signalart wechseln
    #[error("Link {link} kann nicht von {from:?} auf {to:?} (Kanal {channel}) wechseln")]
    ChannelKindMismatch {
        /// Betroffener Link
        link: LinkId,
        /// Gewählter Kanal
        channel: ChannelId,
        /// Signalart des bisherigen Kanals
        from: ChannelKind,
        /// Signalart des gewählten Kanals
        to: ChannelKind,
    },
    /// Batch passt nicht zum aktuellen Zustand
    #[error("Aktion auf {target} nicht anwendbar: {reason}")]
    InconsistentAction {
        /// Ziel der Aktion
        target: String,
        /// Grund
        reason: &'static str,
    },
    /// Kombination aus Geste und Ziel, die es nicht geben darf
    #[error("Unerwartete Dispatch-Kombination: {0}")]
    UnexpectedDispatch(String),
}

impl EditorError {
    /// Modal-Art für Ablehnungen, die dem Benutzer angezeigt werden.
    pub fn modal_kind(&self) -> Option<ModalKind> {
        match self {
            EditorError::ChannelFull { .. } => Some(ModalKind::CapacityExceeded),
            EditorError::DuplicateLink { .. } => Some(ModalKind::DuplicateLink),
            EditorError::CyclicUplink { .. } => Some(ModalKind::CyclicUplink),
            EditorError::ChannelKindMismatch { .. } => Some(ModalKind::ChannelKindMismatch),
            _ => None,
        }
    }
}

/// Art eines Fehler-Modals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    /// Kapazität überschritten
    CapacityExceeded,
    /// Doppelter Link
    DuplicateLink,
    /// Kreis in der Uplink-Kette
    CyclicUplink,
    /// Kanal anderer Signalart
    ChannelKindMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_map_to_modals() {
        let full = EditorError::ChannelFull {
            channel: 4,
            capacity: 15,
        };
        assert_eq!(full.modal_kind(), Some(ModalKind::CapacityExceeded));
        assert!(full.to_string().contains("15"));
        let dispatch = EditorError::UnexpectedDispatch("x".into());
        assert_eq!(dispatch.modal_kind(), None);
        let cycle = EditorError::CyclicUplink {
            device: 1,
            target: 3,
        };
        assert_eq!(cycle.modal_kind(), Some(ModalKind::CyclicUplink));
        let mismatch = EditorError::ChannelKindMismatch {
            link: 1,
            channel: 11,
            from: ChannelKind::Presence,
            to: ChannelKind::Pulse,
        };
        assert_eq!(mismatch.modal_kind(), Some(ModalKind::ChannelKindMismatch));
    }
}
