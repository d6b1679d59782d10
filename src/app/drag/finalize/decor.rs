use glam::Vec2;

use super::draft::Draft;
use crate::app::actions::ActionBatch;
use crate::app::drag::session::{TranslateDrag, TranslateSubject};
use crate::core::{Cabinet, Topology};

/// Setzt die Position eines Labels bzw. des Schaltschranks.
pub fn translate_subject(draft: &mut Draft<'_>, subject: TranslateSubject, position: Vec2) {
    match subject {
        TranslateSubject::Label(label_id) => {
            if let Some(label) = draft.label_mut(label_id) {
                label.position = position;
            }
        }
        TranslateSubject::Cabinet => {
            if draft.cabinet().is_some() {
                draft.set_cabinet(Some(Cabinet { position }));
            }
        }
    }
}

/// Batch für eine abgeschlossene Verschiebung.
pub fn finish(drag: &TranslateDrag, topology: &Topology) -> Option<ActionBatch> {
    let mut draft = Draft::new(topology);
    translate_subject(&mut draft, drag.subject, drag.current);
    draft.into_batch("Verschieben")
}
