//! Entprelltes Löschen verwaister Controller-Karten.
//!
//! Wird eine Karte durch eine Geste leer und meldet sich nicht mehr, wird sie
//! nicht sofort gelöscht, sondern nach einer Frist. Trifft vorher ein neuer
//! Link auf der Karte ein, wird der Eintrag verworfen.

use indexmap::IndexMap;

use crate::core::CardId;

/// Ausstehende Karten-Löschungen, nach Karte geschlüsselt (je Karte höchstens eine).
#[derive(Debug, Clone, Default)]
pub struct DeferredDeletes {
    pending: IndexMap<CardId, u64>,
}

impl DeferredDeletes {
    /// Plant die Löschung; ein vorhandener Eintrag wird neu gestartet.
    pub fn schedule(&mut self, card_id: CardId, now_ms: u64, debounce_ms: u64) {
        let due = now_ms.saturating_add(debounce_ms);
        self.pending.insert(card_id, due);
        log::debug!("Karte {} zum Löschen vorgemerkt (fällig bei {} ms)", card_id, due);
    }

    /// Verwirft eine geplante Löschung. Gibt `true` zurück, wenn eine existierte.
    pub fn cancel(&mut self, card_id: CardId) -> bool {
        let removed = self.pending.shift_remove(&card_id).is_some();
        if removed {
            log::debug!("Löschung von Karte {} verworfen", card_id);
        }
        removed
    }

    /// Ist für die Karte eine Löschung geplant?
    pub fn is_pending(&self, card_id: CardId) -> bool {
        self.pending.contains_key(&card_id)
    }

    /// Anzahl geplanter Löschungen
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Gibt `true` zurück, wenn nichts geplant ist.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Entnimmt alle fälligen Karten; jede Karte wird genau einmal geliefert.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<CardId> {
        let due: Vec<CardId> = self
            .pending
            .iter()
            .filter(|(_, &at)| at <= now_ms)
            .map(|(&id, _)| id)
            .collect();
        for id in &due {
            self.pending.shift_remove(id);
        }
        due
    }
}
