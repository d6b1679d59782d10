//! Abschluss einer Geste: Dispatch nach Geste und geprüftem Ziel, Aufbau des
//! Aktions-Batches und der Nebenwirkungen (Auswahl, verzögerte Löschungen).

pub mod decor;
mod device_move;
pub mod draft;
mod link_drop;
pub mod ops;
pub mod pan;
pub mod rotation;
mod zone_drop;

use glam::Vec2;

pub use draft::Draft;

use super::session::{DragSession, Gesture, Region};
use crate::app::actions::ActionBatch;
use crate::app::error::EditorError;
use crate::app::events::HitTarget;
use crate::app::state::{LiveOverlay, Selectable};
use crate::core::{CardId, Location, Topology};
use crate::shared::EditorOptions;

/// Lesender Kontext für den Abschluss
pub struct FinalizeContext<'a> {
    pub topology: &'a Topology,
    pub live: &'a LiveOverlay,
    pub options: &'a EditorOptions,
}

/// Ergebnis eines Abschlusses; ohne Batch springt die Darstellung zurück.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FinalizeOutcome {
    /// Zu übergebender Batch
    pub batch: Option<ActionBatch>,
    /// Neue Auswahl (`Some(None)` hebt sie auf, `None` lässt sie unverändert)
    pub selection: Option<Option<Selectable>>,
    /// Karten, deren Löschung geplant werden soll
    pub schedule_cards: Vec<CardId>,
    /// Karten, deren geplante Löschung verworfen wird
    pub cancel_cards: Vec<CardId>,
    /// Neuer Modal-Versatz
    pub modal_offset: Option<Vec2>,
}

impl FinalizeOutcome {
    /// Keine Änderung, Auswahl bleibt.
    pub fn bounce() -> Self {
        Self::default()
    }

    /// Nur Auswahl setzen (Klick ohne Bewegung).
    pub fn select(item: Selectable) -> Self {
        Self {
            selection: Some(Some(item)),
            ..Self::default()
        }
    }

    fn with_batch(batch: Option<ActionBatch>, selection: Option<Selectable>) -> Self {
        Self {
            batch,
            selection: Some(selection),
            ..Self::default()
        }
    }
}

/// Schließt die Geste ab.
///
/// Ablehnungen (voller Kanal, doppelter Link) kommen als Fehler zurück und
/// erzeugen keine Aktionen.
pub fn finalize(session: DragSession, ctx: &FinalizeContext<'_>) -> Result<FinalizeOutcome, EditorError> {
    let subject = session.subject();
    if let Some(hover) = session.hover.filter(|h| !h.valid) {
        log::debug!("Ungültiges Ziel {:?}, Geste springt zurück", hover.target);
        return Ok(subject.map_or_else(FinalizeOutcome::bounce, FinalizeOutcome::select));
    }
    let hover_target = session.hover.map(|h| h.target);

    match session.gesture {
        Gesture::Device(drag) => {
            let selected = Selectable::Device(drag.device_id);
            if !session.moved {
                return Ok(FinalizeOutcome::select(selected));
            }
            match (hover_target, session.region) {
                (Some(HitTarget::Zone(zone_id)), _) => {
                    zone_drop::sensor_onto_zone(&drag, zone_id, ctx)
                }
                (Some(HitTarget::Device(target)), _) => {
                    link_drop::uplink_by_drop(&drag, target, ctx)
                }
                (Some(HitTarget::Channel(channel_id)), _) => {
                    link_drop::cc_link_by_drop(&drag, channel_id, ctx)
                }
                (Some(other), _) => Err(EditorError::UnexpectedDispatch(format!(
                    "Gerät {} auf {:?}",
                    drag.device_id, other
                ))),
                (None, Some(Region::Map)) => Ok(device_move::place_on_map(&drag, ctx)),
                (None, Some(Region::Tray)) if drag.origin == Location::OnMap => {
                    Ok(device_move::return_to_tray(&drag, ctx))
                }
                (None, _) => Ok(FinalizeOutcome::select(selected)),
            }
        }
        Gesture::Zone(drag) => {
            if !session.moved {
                return Ok(FinalizeOutcome::select(Selectable::Zone(drag.zone_id)));
            }
            Ok(zone_drop::move_zone_body(&drag, ctx))
        }
        Gesture::Rotate(drag) => {
            if !session.moved {
                return Ok(FinalizeOutcome::with_batch(None, subject));
            }
            let batch = rotation::finish(&drag, ctx.topology);
            Ok(FinalizeOutcome::with_batch(batch, subject))
        }
        Gesture::Link(drag) => {
            if drag.active.is_none() {
                return Ok(FinalizeOutcome::select(Selectable::Link(drag.link_id)));
            }
            link_drop::finish_link_edit(&drag, hover_target, ctx)
        }
        Gesture::Translate(drag) => {
            if !session.moved {
                return Ok(FinalizeOutcome::with_batch(None, subject));
            }
            let batch = decor::finish(&drag, ctx.topology);
            Ok(FinalizeOutcome::with_batch(batch, subject))
        }
        Gesture::ModalMove { current_offset, .. } => Ok(FinalizeOutcome {
            modal_offset: Some(current_offset),
            ..FinalizeOutcome::default()
        }),
        Gesture::Pan {
            start_pan,
            current_pan,
        } => {
            if !session.moved {
                return Ok(FinalizeOutcome {
                    selection: Some(None),
                    ..FinalizeOutcome::default()
                });
            }
            Ok(FinalizeOutcome {
                batch: pan::finish(start_pan, current_pan, ctx.topology),
                ..FinalizeOutcome::default()
            })
        }
    }
}
