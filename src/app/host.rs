//! Schnittstelle zum Host, der die Topologie besitzt.
//!
//! Der Editor liest nur die committete Topologie und übergibt Änderungen
//! ausschließlich als [`ActionBatch`]. [`LocalHost`] ist ein vollständiger
//! In-Process-Host mit Undo/Redo für Tests und eingebettete Nutzung.

use std::sync::Arc;

use super::actions::ActionBatch;
use super::error::{EditorError, ModalKind};
use super::history::EditHistory;
use crate::core::Topology;
use crate::shared::EditorOptions;

/// Misst die Breite eines gerenderten Textes (für Label-Rotationszentren).
pub trait TextMeasure {
    /// Breite von `text` in Modell-Einheiten
    fn text_width(&self, text: &str) -> f32;
}

/// Besitzer der Topologie, an den der Editor Batches übergibt.
pub trait EditorHost: TextMeasure {
    /// Committete Topologie (nur lesend)
    fn topology(&self) -> &Topology;

    /// Wendet einen Batch atomar an.
    fn submit(&mut self, batch: ActionBatch) -> Result<(), EditorError>;

    /// Zeigt dem Benutzer ein Fehler-Modal.
    fn show_modal(&mut self, kind: ModalKind, message: &str);

    /// Macht den letzten Batch rückgängig.
    fn undo(&mut self) -> Result<bool, EditorError> {
        Ok(false)
    }

    /// Stellt den zuletzt rückgängig gemachten Batch wieder her.
    fn redo(&mut self) -> Result<bool, EditorError> {
        Ok(false)
    }
}

/// Ein angezeigtes Modal
#[derive(Debug, Clone, PartialEq)]
pub struct ModalRequest {
    /// Art
    pub kind: ModalKind,
    /// Meldungstext
    pub message: String,
}

/// In-Process-Host: hält die Topologie, wendet Batches über [`EditHistory`] an
/// und protokolliert Batches und Modals.
pub struct LocalHost {
    topology: Arc<Topology>,
    history: EditHistory,
    submitted: Vec<ActionBatch>,
    modals: Vec<ModalRequest>,
    char_width: f32,
}

impl LocalHost {
    /// Standard-Zeichenbreite für die Textmessung
    pub const DEFAULT_CHAR_WIDTH: f32 = 7.0;

    /// Erstellt einen Host mit gegebener Topologie und Undo-Tiefe.
    pub fn new(topology: Topology, history_depth: usize) -> Self {
        Self {
            topology: Arc::new(topology),
            history: EditHistory::new_with_capacity(history_depth),
            submitted: Vec::new(),
            modals: Vec::new(),
            char_width: Self::DEFAULT_CHAR_WIDTH,
        }
    }

    /// Erstellt einen Host, dessen Undo-Tiefe aus den Editor-Optionen kommt.
    pub fn from_options(topology: Topology, options: &EditorOptions) -> Self {
        Self::new(topology, options.history_depth)
    }

    /// Setzt die feste Zeichenbreite der Textmessung.
    pub fn with_char_width(mut self, char_width: f32) -> Self {
        self.char_width = char_width;
        self
    }

    /// Alle bisher übergebenen Batches
    pub fn submitted(&self) -> &[ActionBatch] {
        &self.submitted
    }

    /// Zuletzt übergebener Batch
    pub fn last_batch(&self) -> Option<&ActionBatch> {
        self.submitted.last()
    }

    /// Alle angezeigten Modals
    pub fn modals(&self) -> &[ModalRequest] {
        &self.modals
    }

    /// Zugriff auf die History
    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Topologie als geteilte Referenz (O(1)-Klon)
    pub fn shared_topology(&self) -> Arc<Topology> {
        Arc::clone(&self.topology)
    }
}

impl TextMeasure for LocalHost {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }
}

impl EditorHost for LocalHost {
    fn topology(&self) -> &Topology {
        &self.topology
    }

    fn submit(&mut self, batch: ActionBatch) -> Result<(), EditorError> {
        log::info!(
            "Batch '{}' mit {} Aktionen übergeben",
            batch.description,
            batch.len()
        );
        self.history.submit(&mut self.topology, batch.clone())?;
        self.submitted.push(batch);
        Ok(())
    }

    fn show_modal(&mut self, kind: ModalKind, message: &str) {
        log::warn!("Modal {:?}: {}", kind, message);
        self.modals.push(ModalRequest {
            kind,
            message: message.to_string(),
        });
    }

    fn undo(&mut self) -> Result<bool, EditorError> {
        self.history.undo(&mut self.topology)
    }

    fn redo(&mut self) -> Result<bool, EditorError> {
        self.history.redo(&mut self.topology)
    }
}
