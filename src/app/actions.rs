//! Aktionen und Aktions-Batches: die einzige Form, in der der Editor
//! Änderungen an den Host übergibt.
//!
//! Jede Aktion trägt den vollständigen Datensatz vor und nach der Änderung,
//! damit der Host sie ohne Rückfragen anwenden oder invertieren kann.

use serde::{Deserialize, Serialize};

use crate::core::{
    Cabinet, Card, Channel, Device, Link, MapView, NorthArrow, SensorZone, TextLabel,
};

use super::state::Selectable;

/// Art einer Aktion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionKind {
    /// Datensatz neu anlegen
    Add,
    /// Datensatz ersetzen
    Update,
    /// Datensatz entfernen
    Delete,
    /// Auswahl-Hinweis an den Host (ändert keine Topologie)
    Selected,
}

/// Datensatz-Art, auf die sich eine Aktion bezieht
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Device,
    Zone,
    Link,
    Channel,
    Card,
    Label,
    NorthArrow,
    Cabinet,
    MapView,
    Selection,
}

/// Vollständiger Datensatz eines Topologie-Elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Record {
    Device(Device),
    Zone(SensorZone),
    Link(Link),
    Channel(Channel),
    Card(Card),
    Label(TextLabel),
    NorthArrow(NorthArrow),
    Cabinet(Cabinet),
    MapView(MapView),
    Selection(Option<Selectable>),
}

impl Record {
    /// Datensatz-Art
    pub fn target_type(&self) -> TargetType {
        match self {
            Record::Device(_) => TargetType::Device,
            Record::Zone(_) => TargetType::Zone,
            Record::Link(_) => TargetType::Link,
            Record::Channel(_) => TargetType::Channel,
            Record::Card(_) => TargetType::Card,
            Record::Label(_) => TargetType::Label,
            Record::NorthArrow(_) => TargetType::NorthArrow,
            Record::Cabinet(_) => TargetType::Cabinet,
            Record::MapView(_) => TargetType::MapView,
            Record::Selection(_) => TargetType::Selection,
        }
    }

    /// ID des Datensatzes (0 für Einzelobjekte)
    pub fn target_id(&self) -> u64 {
        match self {
            Record::Device(d) => d.id,
            Record::Zone(z) => z.id,
            Record::Link(l) => l.id,
            Record::Channel(c) => c.id,
            Record::Card(c) => c.id,
            Record::Label(l) => l.id,
            Record::NorthArrow(_)
            | Record::Cabinet(_)
            | Record::MapView(_)
            | Record::Selection(_) => 0,
        }
    }
}

/// Eine einzelne Änderung
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Art der Änderung
    pub kind: ActionKind,
    /// Datensatz-Art
    pub target: TargetType,
    /// ID des Datensatzes
    pub target_id: u64,
    /// Zustand vorher (`None` bei ADD)
    pub before: Option<Record>,
    /// Zustand nachher (`None` bei DELETE)
    pub after: Option<Record>,
}

impl Action {
    /// Neuer Datensatz.
    pub fn add(after: Record) -> Self {
        Self {
            kind: ActionKind::Add,
            target: after.target_type(),
            target_id: after.target_id(),
            before: None,
            after: Some(after),
        }
    }

    /// Geänderter Datensatz.
    pub fn update(before: Record, after: Record) -> Self {
        Self {
            kind: ActionKind::Update,
            target: after.target_type(),
            target_id: after.target_id(),
            before: Some(before),
            after: Some(after),
        }
    }

    /// Entfernter Datensatz.
    pub fn delete(before: Record) -> Self {
        Self {
            kind: ActionKind::Delete,
            target: before.target_type(),
            target_id: before.target_id(),
            before: Some(before),
            after: None,
        }
    }

    /// Auswahl-Hinweis.
    pub fn selected(selection: Option<Selectable>) -> Self {
        Self {
            kind: ActionKind::Selected,
            target: TargetType::Selection,
            target_id: 0,
            before: None,
            after: Some(Record::Selection(selection)),
        }
    }

    /// Gegenaktion: ADD ↔ DELETE, vorher ↔ nachher.
    pub fn inverse(&self) -> Self {
        let kind = match self.kind {
            ActionKind::Add => ActionKind::Delete,
            ActionKind::Delete => ActionKind::Add,
            other => other,
        };
        Self {
            kind,
            target: self.target,
            target_id: self.target_id,
            before: self.after.clone(),
            after: self.before.clone(),
        }
    }

    /// Ändert die Aktion die Topologie?
    pub fn is_structural(&self) -> bool {
        self.kind != ActionKind::Selected
    }
}

/// Geordnete Liste von Aktionen, die der Host atomar anwendet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionBatch {
    /// Kurzbeschreibung für Undo-Menü und Log
    pub description: String,
    /// Aktionen in Anwendungs-Reihenfolge
    pub actions: Vec<Action>,
}

impl ActionBatch {
    /// Erstellt einen Batch.
    pub fn new(description: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            description: description.into(),
            actions,
        }
    }

    /// Anzahl der Aktionen
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Gibt `true` zurück, wenn der Batch leer ist.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Anzahl der topologie-ändernden Aktionen.
    pub fn structural_len(&self) -> usize {
        self.actions.iter().filter(|a| a.is_structural()).count()
    }

    /// Gegen-Batch in umgekehrter Reihenfolge (Auswahl-Hinweise entfallen).
    pub fn inverse(&self) -> Self {
        Self {
            description: self.description.clone(),
            actions: self
                .actions
                .iter()
                .rev()
                .filter(|a| a.is_structural())
                .map(Action::inverse)
                .collect(),
        }
    }

    /// Serialisiert den Batch als JSON für einen externen Host.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Liest einen Batch aus JSON.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DeviceKind, Location};
    use glam::Vec2;

    fn repeater_at(x: f32, y: f32) -> Device {
        Device::new(7, DeviceKind::Repeater, Location::OnMap, Vec2::new(x, y))
    }

    #[test]
    fn inverse_swaps_kind_and_records() {
        let add = Action::add(Record::Device(repeater_at(1.0, 2.0)));
        let inv = add.inverse();
        assert_eq!(inv.kind, ActionKind::Delete);
        assert_eq!(inv.before, add.after);
        assert!(inv.after.is_none());

        let upd = Action::update(
            Record::Device(repeater_at(1.0, 2.0)),
            Record::Device(repeater_at(5.0, 6.0)),
        );
        let inv = upd.inverse();
        assert_eq!(inv.kind, ActionKind::Update);
        assert_eq!(inv.after, upd.before);
    }

    #[test]
    fn batch_inverse_reverses_order_and_drops_selection() {
        let batch = ActionBatch::new(
            "Gerät platzieren",
            vec![
                Action::delete(Record::Device(repeater_at(0.0, 0.0))),
                Action::add(Record::Device(repeater_at(3.0, 3.0))),
                Action::selected(Some(Selectable::Device(7))),
            ],
        );
        assert_eq!(batch.structural_len(), 2);
        let inv = batch.inverse();
        assert_eq!(inv.len(), 2);
        assert_eq!(inv.actions[0].kind, ActionKind::Delete);
        assert_eq!(inv.actions[1].kind, ActionKind::Add);
    }

    #[test]
    fn json_uses_uppercase_kinds() {
        let batch = ActionBatch::new(
            "Verschieben",
            vec![Action::update(
                Record::Device(repeater_at(0.0, 0.0)),
                Record::Device(repeater_at(1.0, 0.0)),
            )],
        );
        let json = batch.to_json().expect("serialisierbar");
        assert!(json.contains("\"UPDATE\""));
        assert!(json.contains("\"device\""));
        let back = ActionBatch::from_json(&json).expect("parsebar");
        assert_eq!(back, batch);
    }
}
