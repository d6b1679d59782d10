//! Application State: Ansicht, Auswahl, aktive Geste, Live-Telemetrie.

mod app_state;
mod live;
mod selection;
mod view;

pub use app_state::AppState;
pub use live::LiveOverlay;
pub use selection::{Selectable, SelectionState};
pub use view::ViewState;
