//! Handler für Zeiger-Gesten: Beginn, Nachführen, Ziele, Abschluss, Abbruch.

use glam::Vec2;

use super::apply_outcome;
use crate::app::drag::finalize::{finalize, FinalizeContext};
use crate::app::drag::{apply_motion, classify, validate_target, DragSession, Hover, Region};
use crate::app::events::HitTarget;
use crate::app::host::EditorHost;
use crate::app::AppState;
use crate::core::viewport::pointer_to_model;

/// Beginnt eine Geste auf dem Ziel unter dem Zeiger.
pub fn begin(state: &mut AppState, host: &mut dyn EditorHost, pointer: Vec2, target: HitTarget) {
    let topology = host.topology();
    let Some(grab) = classify(target, topology) else {
        if target == HitTarget::Tray {
            state.selection.clear();
        }
        return;
    };
    let model = pointer_to_model(&state.view.screen, &topology.map_view, pointer);
    state.session = DragSession::start(
        grab,
        topology,
        pointer,
        model,
        state.view.modal_offset,
        &*host,
    );
    if state.session.is_some() {
        log::debug!("Geste {:?} begonnen", grab);
    }
}

/// Führt die aktive Geste nach.
pub fn update(state: &mut AppState, host: &dyn EditorHost, pointer: Vec2) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    let topology = host.topology();
    let model = pointer_to_model(&state.view.screen, &topology.map_view, pointer);
    apply_motion(
        session,
        pointer,
        model,
        &state.view.screen,
        &topology.map_view,
        &state.options,
    );
}

/// Zeiger betritt ein Element oder eine Fläche.
pub fn enter(state: &mut AppState, host: &dyn EditorHost, target: HitTarget) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    match target {
        HitTarget::Map => session.region = Some(Region::Map),
        HitTarget::Tray => session.region = Some(Region::Tray),
        _ => {
            session.hover = validate_target(session, target, host.topology())
                .map(|valid| Hover { target, valid });
        }
    }
}

/// Zeiger verlässt ein Element oder eine Fläche.
pub fn leave(state: &mut AppState, target: HitTarget) {
    let Some(session) = state.session.as_mut() else {
        return;
    };
    match target {
        HitTarget::Map if session.region == Some(Region::Map) => session.region = None,
        HitTarget::Tray if session.region == Some(Region::Tray) => session.region = None,
        _ => {
            if session.hover.is_some_and(|h| h.target == target) {
                session.hover = None;
            }
        }
    }
}

/// Schließt die aktive Geste ab und übergibt das Ergebnis dem Host.
///
/// Ablehnungen werden als Modal angezeigt und erzeugen keine Aktionen.
pub fn end(state: &mut AppState, host: &mut dyn EditorHost, pointer: Vec2) -> anyhow::Result<()> {
    if state
        .session
        .as_ref()
        .is_some_and(|s| s.pointer_last != pointer)
    {
        update(state, host, pointer);
    }
    let Some(session) = state.session.take() else {
        return Ok(());
    };
    let ctx = FinalizeContext {
        topology: host.topology(),
        live: &state.live,
        options: &state.options,
    };
    let result = finalize(session, &ctx);
    let applied = match result {
        Ok(outcome) => apply_outcome(state, host, outcome),
        Err(err) => match err.modal_kind() {
            Some(kind) => {
                host.show_modal(kind, &err.to_string());
                Ok(())
            }
            None => Err(err.into()),
        },
    };
    flush_telemetry(state);
    applied
}

/// Zeiger hat Karte und Tray verlassen: abbrechen, außer ein gültiges Ziel liegt an.
pub fn leave_surface(state: &mut AppState) {
    let keep = state
        .session
        .as_ref()
        .is_some_and(|s| s.hover.is_some_and(|h| h.valid));
    if !keep {
        abort(state);
    }
}

/// Verwirft die aktive Geste; die Darstellung springt zurück und das
/// gegriffene Element bleibt ausgewählt.
pub fn abort(state: &mut AppState) {
    if let Some(session) = state.session.take() {
        log::debug!("Geste {:?} abgebrochen", session.grab);
        if let Some(subject) = session.subject() {
            state.selection.select(subject);
        }
    }
    flush_telemetry(state);
}

fn flush_telemetry(state: &mut AppState) {
    let flushed = state.live.flush();
    if flushed > 0 {
        log::debug!("{} gepufferte Telemetrie-Meldungen übernommen", flushed);
    }
}
