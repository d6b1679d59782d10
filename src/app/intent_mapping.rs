//! Mapping von UI-Intents auf mutierende App-Commands.
//!
//! Hier entscheidet sich, welche Eingaben während einer aktiven Geste
//! verschluckt oder gepuffert werden.

use super::events::HitTarget;
use super::{AppCommand, AppIntent, AppState};
use crate::core::viewport::pointer_to_model;
use crate::core::{ItemRef, Topology};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(
    state: &AppState,
    topology: &Topology,
    intent: AppIntent,
) -> Vec<AppCommand> {
    let dragging = state.is_dragging();
    match intent {
        AppIntent::PointerDown { pointer, target } => {
            if dragging {
                log::debug!("PointerDown während aktiver Geste verworfen");
                return vec![];
            }
            let target = target.unwrap_or_else(|| hit_test_map(state, topology, pointer));
            vec![AppCommand::BeginGesture { pointer, target }]
        }
        AppIntent::PointerMoved { pointer } if dragging => {
            vec![AppCommand::UpdateGesture { pointer }]
        }
        AppIntent::PointerEntered { target } if dragging => {
            vec![AppCommand::EnterTarget { target }]
        }
        AppIntent::PointerLeft { target } if dragging => {
            vec![AppCommand::LeaveTarget { target }]
        }
        AppIntent::PointerReleased { pointer } if dragging => {
            vec![AppCommand::EndGesture { pointer }]
        }
        AppIntent::SurfaceLeft if dragging => vec![AppCommand::LeaveSurface],
        AppIntent::CancelRequested if dragging => vec![AppCommand::AbortGesture],
        AppIntent::PointerMoved { .. }
        | AppIntent::PointerEntered { .. }
        | AppIntent::PointerLeft { .. }
        | AppIntent::PointerReleased { .. }
        | AppIntent::SurfaceLeft
        | AppIntent::CancelRequested => vec![],
        AppIntent::CameraZoom { factor, focus } => {
            if dragging {
                vec![]
            } else {
                vec![AppCommand::ZoomCamera { factor, focus }]
            }
        }
        AppIntent::ScrollZoom { steps, focus } => {
            if dragging || steps == 0.0 {
                vec![]
            } else {
                let factor = state.options.scroll_zoom_step.powf(steps);
                vec![AppCommand::ZoomCamera { factor, focus }]
            }
        }
        AppIntent::ViewportChanged { screen, size } => {
            vec![AppCommand::SetViewport { screen, size }]
        }
        AppIntent::TelemetryReceived {
            device_id,
            liveness,
        } => {
            if dragging {
                vec![AppCommand::QueueTelemetry {
                    device_id,
                    liveness,
                }]
            } else {
                vec![AppCommand::ApplyTelemetry {
                    device_id,
                    liveness,
                }]
            }
        }
        AppIntent::Tick { now_ms } => vec![AppCommand::AdvanceClock { now_ms }],
        AppIntent::DeleteDeviceRequested { device_id } if !dragging => {
            vec![AppCommand::DeleteDevice { device_id }]
        }
        AppIntent::DeleteLinkRequested { link_id } if !dragging => {
            vec![AppCommand::DeleteLink { link_id }]
        }
        AppIntent::ClearSelectionRequested if !dragging => vec![AppCommand::ClearSelection],
        AppIntent::UndoRequested if !dragging => vec![AppCommand::Undo],
        AppIntent::RedoRequested if !dragging => vec![AppCommand::Redo],
        AppIntent::DeleteDeviceRequested { .. }
        | AppIntent::DeleteLinkRequested { .. }
        | AppIntent::ClearSelectionRequested
        | AppIntent::UndoRequested
        | AppIntent::RedoRequested => {
            log::debug!("Editier-Intent während aktiver Geste verworfen");
            vec![]
        }
    }
}

fn hit_test_map(state: &AppState, topology: &Topology, pointer: glam::Vec2) -> HitTarget {
    let model = pointer_to_model(&state.view.screen, &topology.map_view, pointer);
    match topology.hit_test(model) {
        Some(ItemRef::Device(id)) => HitTarget::Device(id),
        Some(ItemRef::Zone(id)) => HitTarget::Zone(id),
        None => HitTarget::Map,
    }
}
