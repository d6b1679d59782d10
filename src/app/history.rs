use std::sync::Arc;

use indexmap::IndexMap;

use super::actions::{Action, ActionBatch, ActionKind, Record};
use super::error::EditorError;
use crate::core::Topology;

/// Einfacher Undo/Redo-Manager über Aktions-Batches.
///
/// Gespeichert werden die angewendeten Batches selbst; Undo wendet den
/// Gegen-Batch an, Redo den Batch erneut.
#[derive(Debug, Default)]
pub struct EditHistory {
    undo_stack: Vec<ActionBatch>,
    redo_stack: Vec<ActionBatch>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Wendet einen Batch atomar an und legt ihn auf den Undo-Stack.
    pub fn submit(
        &mut self,
        topology: &mut Arc<Topology>,
        batch: ActionBatch,
    ) -> Result<(), EditorError> {
        apply_batch(topology, &batch)?;
        if batch.structural_len() > 0 {
            push_bounded(&mut self.undo_stack, batch, self.max_depth);
            self.redo_stack.clear();
        }
        Ok(())
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Macht den letzten Batch rückgängig. Gibt `false` zurück, wenn nichts zu tun war.
    pub fn undo(&mut self, topology: &mut Arc<Topology>) -> Result<bool, EditorError> {
        let Some(batch) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = apply_batch(topology, &batch.inverse()) {
            self.undo_stack.push(batch);
            return Err(e);
        }
        push_bounded(&mut self.redo_stack, batch, self.max_depth);
        Ok(true)
    }

    /// Stellt den zuletzt rückgängig gemachten Batch wieder her.
    pub fn redo(&mut self, topology: &mut Arc<Topology>) -> Result<bool, EditorError> {
        let Some(batch) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = apply_batch(topology, &batch) {
            self.redo_stack.push(batch);
            return Err(e);
        }
        push_bounded(&mut self.undo_stack, batch, self.max_depth);
        Ok(true)
    }
}

fn push_bounded(stack: &mut Vec<ActionBatch>, batch: ActionBatch, max_depth: usize) {
    if stack.len() >= max_depth.max(1) {
        stack.remove(0);
    }
    stack.push(batch);
}

/// Wendet alle Aktionen eines Batches an; schlägt eine fehl, bleibt die
/// Topologie unverändert.
pub fn apply_batch(topology: &mut Arc<Topology>, batch: &ActionBatch) -> Result<(), EditorError> {
    let mut working = Topology::clone(topology);
    for action in batch.actions.iter().filter(|a| a.is_structural()) {
        apply_action(&mut working, action)?;
    }
    *topology = Arc::new(working);
    log::debug!(
        "Batch '{}' angewendet ({} Aktionen)",
        batch.description,
        batch.len()
    );
    Ok(())
}

fn apply_action(topology: &mut Topology, action: &Action) -> Result<(), EditorError> {
    let record = match action.kind {
        ActionKind::Delete => action.before.as_ref(),
        _ => action.after.as_ref(),
    };
    let Some(record) = record else {
        return Err(inconsistent(action, "Datensatz fehlt"));
    };
    match record {
        Record::Device(d) => apply_keyed(&mut topology.devices, action, d.id, d),
        Record::Zone(z) => apply_keyed(&mut topology.zones, action, z.id, z),
        Record::Link(l) => apply_keyed(&mut topology.links, action, l.id, l),
        Record::Channel(c) => apply_keyed(&mut topology.channels, action, c.id, c),
        Record::Card(c) => apply_keyed(&mut topology.cards, action, c.id, c),
        Record::Label(l) => apply_keyed(&mut topology.labels, action, l.id, l),
        Record::NorthArrow(arrow) => {
            topology.north_arrow = *arrow;
            Ok(())
        }
        Record::Cabinet(cabinet) => {
            topology.cabinet = match action.kind {
                ActionKind::Delete => None,
                _ => Some(*cabinet),
            };
            Ok(())
        }
        Record::MapView(view) => {
            topology.map_view = *view;
            Ok(())
        }
        Record::Selection(_) => Ok(()),
    }
}

fn apply_keyed<V: Clone>(
    map: &mut IndexMap<u64, V>,
    action: &Action,
    id: u64,
    value: &V,
) -> Result<(), EditorError> {
    match action.kind {
        ActionKind::Add => {
            if map.contains_key(&id) {
                return Err(inconsistent(action, "ID existiert bereits"));
            }
            map.insert(id, value.clone());
        }
        ActionKind::Update => {
            let Some(slot) = map.get_mut(&id) else {
                return Err(inconsistent(action, "ID existiert nicht"));
            };
            *slot = value.clone();
        }
        ActionKind::Delete => {
            if map.shift_remove(&id).is_none() {
                return Err(inconsistent(action, "ID existiert nicht"));
            }
        }
        ActionKind::Selected => {}
    }
    Ok(())
}

fn inconsistent(action: &Action, reason: &'static str) -> EditorError {
    EditorError::InconsistentAction {
        target: format!("{:?} {}", action.target, action.target_id),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Device, DeviceKind, Location};
    use glam::Vec2;

    fn topology_with_repeater() -> Arc<Topology> {
        let mut topo = Topology::new();
        topo.add_device(Device::new(
            1,
            DeviceKind::Repeater,
            Location::OnMap,
            Vec2::new(10.0, 10.0),
        ));
        Arc::new(topo)
    }

    fn move_batch(topo: &Topology, to: Vec2) -> ActionBatch {
        let before = topo.devices[&1].clone();
        let mut after = before.clone();
        after.position = to;
        ActionBatch::new(
            "Verschieben",
            vec![Action::update(Record::Device(before), Record::Device(after))],
        )
    }

    #[test]
    fn empty_history_cannot_undo_or_redo() {
        let history = EditHistory::new_with_capacity(10);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_and_redo_restore_positions() {
        let mut topo = topology_with_repeater();
        let mut history = EditHistory::new_with_capacity(10);
        let batch = move_batch(&topo, Vec2::new(50.0, 80.0));
        history.submit(&mut topo, batch).expect("anwendbar");
        assert_eq!(topo.devices[&1].position, Vec2::new(50.0, 80.0));

        assert!(history.undo(&mut topo).expect("undo"));
        assert_eq!(topo.devices[&1].position, Vec2::new(10.0, 10.0));
        assert!(history.can_redo());

        assert!(history.redo(&mut topo).expect("redo"));
        assert_eq!(topo.devices[&1].position, Vec2::new(50.0, 80.0));
    }

    #[test]
    fn failing_action_leaves_topology_untouched() {
        let mut topo = topology_with_repeater();
        let snapshot = Topology::clone(&topo);
        let duplicate = Device::new(1, DeviceKind::Radio, Location::OnMap, Vec2::ZERO);
        let moved = move_batch(&topo, Vec2::new(1.0, 1.0));
        let mut actions = moved.actions;
        actions.push(Action::add(Record::Device(duplicate)));
        let mut history = EditHistory::new_with_capacity(10);
        let err = history
            .submit(&mut topo, ActionBatch::new("kaputt", actions))
            .expect_err("doppelte ID");
        assert!(matches!(err, EditorError::InconsistentAction { .. }));
        assert_eq!(*topo, snapshot);
        assert!(!history.can_undo());
    }

    #[test]
    fn new_submit_clears_redo_stack() {
        let mut topo = topology_with_repeater();
        let mut history = EditHistory::new_with_capacity(10);
        let first = move_batch(&topo, Vec2::new(20.0, 20.0));
        history.submit(&mut topo, first).expect("anwendbar");
        history.undo(&mut topo).expect("undo");
        assert!(history.can_redo());
        let second = move_batch(&topo, Vec2::new(30.0, 30.0));
        history.submit(&mut topo, second).expect("anwendbar");
        assert!(!history.can_redo());
    }

    #[test]
    fn respects_max_depth() {
        let mut topo = topology_with_repeater();
        let mut history = EditHistory::new_with_capacity(3);
        for i in 1..=5 {
            let batch = move_batch(&topo, Vec2::splat(i as f32 * 10.0));
            history.submit(&mut topo, batch).expect("anwendbar");
        }
        let mut undo_count = 0;
        while history.undo(&mut topo).expect("undo") {
            undo_count += 1;
        }
        assert_eq!(undo_count, 3);
        assert_eq!(topo.devices[&1].position, Vec2::splat(20.0));
    }
}
