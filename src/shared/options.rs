//! Zentrale Konfiguration für den Topologie-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Gesten ──────────────────────────────────────────────────────────

/// Rasterschritt für Rotationen (Grad).
pub const ROTATION_SNAP_DEG: f32 = 5.0;
/// Radius (Screen-Pixel), in dem ein vorhandenes Link-Gelenk wiederverwendet wird.
pub const JOINT_SNAP_RADIUS_PX: f32 = 10.0;
/// Mindestbewegung (Screen-Pixel), ab der eine Link-Geste als Drag statt Klick gilt.
pub const LINK_DRAG_THRESHOLD_PX: f32 = 4.0;

// ── Kapazitäten ─────────────────────────────────────────────────────

/// Maximale Anzahl Sensoren pro CC-Kanal.
pub const CHANNEL_CAPACITY: usize = 15;

// ── Verzögertes Aufräumen ───────────────────────────────────────────

/// Entprell-Zeit (ms), bevor eine verwaiste, nicht meldende Karte gelöscht wird.
pub const CARD_DELETE_DEBOUNCE_MS: u64 = 1500;

// ── Kamera ──────────────────────────────────────────────────────────

/// Minimaler Zoom-Faktor.
pub const ZOOM_MIN: f32 = 0.25;
/// Maximaler Zoom-Faktor.
pub const ZOOM_MAX: f32 = 8.0;
/// Zoom-Schritt bei Mausrad-Scroll.
pub const SCROLL_ZOOM_STEP: f32 = 1.1;

// ── Undo ────────────────────────────────────────────────────────────

/// Maximale Tiefe der Undo-History.
pub const HISTORY_DEPTH: usize = 200;

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `sensornet_topology_editor.toml` gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Gesten ──────────────────────────────────────────────────
    /// Rasterschritt für Rotationen (Grad)
    pub rotation_snap_deg: f32,
    /// Gelenk-Fangradius in Screen-Pixeln
    pub joint_snap_radius_px: f32,
    /// Klick/Drag-Schwelle für Link-Gesten in Screen-Pixeln
    pub link_drag_threshold_px: f32,

    // ── Kapazitäten ─────────────────────────────────────────────
    /// Maximale Sensoren pro CC-Kanal
    pub channel_capacity: usize,

    // ── Aufräumen ───────────────────────────────────────────────
    /// Entprell-Zeit für das Löschen verwaister Karten (ms)
    #[serde(default = "default_card_delete_debounce_ms")]
    pub card_delete_debounce_ms: u64,

    // ── Kamera ──────────────────────────────────────────────────
    /// Minimaler Zoom-Faktor
    pub zoom_min: f32,
    /// Maximaler Zoom-Faktor
    pub zoom_max: f32,
    /// Zoom-Schritt bei Mausrad-Scroll
    pub scroll_zoom_step: f32,

    // ── Undo ────────────────────────────────────────────────────
    /// Maximale Undo-Tiefe
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            rotation_snap_deg: ROTATION_SNAP_DEG,
            joint_snap_radius_px: JOINT_SNAP_RADIUS_PX,
            link_drag_threshold_px: LINK_DRAG_THRESHOLD_PX,
            channel_capacity: CHANNEL_CAPACITY,
            card_delete_debounce_ms: CARD_DELETE_DEBOUNCE_MS,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            scroll_zoom_step: SCROLL_ZOOM_STEP,
            history_depth: HISTORY_DEPTH,
        }
    }
}

/// Serde-Default für `card_delete_debounce_ms` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_card_delete_debounce_ms() -> u64 {
    CARD_DELETE_DEBOUNCE_MS
}

/// Serde-Default für `history_depth`.
fn default_history_depth() -> usize {
    HISTORY_DEPTH
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content).unwrap_or_else(|e| {
                log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                Self::default()
            }),
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Parst Optionen aus einem TOML-String.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("sensornet_topology_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("sensornet_topology_editor.toml")
    }
}
