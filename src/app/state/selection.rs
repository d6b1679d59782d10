use serde::{Deserialize, Serialize};

use crate::core::{DeviceId, LabelId, LinkId, ZoneId};

/// Auswählbares Element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selectable {
    Device(DeviceId),
    Zone(ZoneId),
    Link(LinkId),
    Label(LabelId),
    NorthArrow,
    Cabinet,
}

/// Auswahlbezogener Anwendungszustand (genau ein Element oder keines)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Aktuell ausgewähltes Element
    pub selected: Option<Selectable>,
}

impl SelectionState {
    /// Erstellt einen leeren Selektionszustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wählt ein Element aus (ersetzt die bisherige Auswahl).
    pub fn select(&mut self, item: Selectable) {
        self.selected = Some(item);
    }

    /// Hebt die Auswahl auf.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Prüft, ob das Element ausgewählt ist.
    pub fn is_selected(&self, item: Selectable) -> bool {
        self.selected == Some(item)
    }
}
