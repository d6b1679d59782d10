//! Application Controller für zentrale Event-Verarbeitung.

use super::host::EditorHost;
use super::render_scene;
use super::{AppCommand, AppIntent, AppState};
use crate::shared::RenderScene;

/// Orchestriert Host-Events und Handler auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut AppState,
        host: &mut dyn EditorHost,
        intent: AppIntent,
    ) -> anyhow::Result<()> {
        let commands = super::intent_mapping::map_intent_to_commands(state, host.topology(), intent);
        for command in commands {
            self.handle_command(state, host, command)?;
        }

        Ok(())
    }

    /// Führt mutierende Commands aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        host: &mut dyn EditorHost,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Gesten ===
            AppCommand::BeginGesture { pointer, target } => {
                handlers::gesture::begin(state, host, pointer, target)
            }
            AppCommand::UpdateGesture { pointer } => handlers::gesture::update(state, host, pointer),
            AppCommand::EnterTarget { target } => handlers::gesture::enter(state, host, target),
            AppCommand::LeaveTarget { target } => handlers::gesture::leave(state, target),
            AppCommand::EndGesture { pointer } => handlers::gesture::end(state, host, pointer)?,
            AppCommand::LeaveSurface => handlers::gesture::leave_surface(state),
            AppCommand::AbortGesture => handlers::gesture::abort(state),

            // === Kamera & Viewport ===
            AppCommand::ZoomCamera { factor, focus } => {
                handlers::view::zoom(state, host, factor, focus)?
            }
            AppCommand::SetViewport { screen, size } => {
                handlers::view::set_viewport(state, screen, size)
            }

            // === Telemetrie ===
            AppCommand::ApplyTelemetry {
                device_id,
                liveness,
            } => handlers::telemetry::apply(state, device_id, liveness),
            AppCommand::QueueTelemetry {
                device_id,
                liveness,
            } => handlers::telemetry::queue(state, device_id, liveness),
            AppCommand::AdvanceClock { now_ms } => {
                handlers::maintenance::advance_clock(state, host, now_ms)?
            }

            // === Editing ===
            AppCommand::DeleteDevice { device_id } => {
                handlers::editing::delete_device(state, host, device_id)?
            }
            AppCommand::DeleteLink { link_id } => {
                handlers::editing::delete_link(state, host, link_id)?
            }

            // === Selektion ===
            AppCommand::ClearSelection => handlers::selection::clear(state),

            // === History ===
            AppCommand::Undo => handlers::history::undo(host)?,
            AppCommand::Redo => handlers::history::redo(host)?,
        }

        Ok(())
    }

    /// Baut die Render-Szene aus dem AppState und der Topologie des Hosts.
    pub fn build_render_scene(&self, state: &AppState, host: &dyn EditorHost) -> RenderScene {
        render_scene::build(state, host.topology())
    }
}
