//! SensorNet Topology Editor Library.
//! Editor-Kern für Sensor-/Repeater-/Radio-Netze: Domänenmodell, Gesten und
//! Aktions-Batches, ohne eigenes Rendering.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    Action, ActionBatch, ActionKind, AppCommand, AppController, AppIntent, AppState, EditHistory,
    EditorError, EditorHost, HitTarget, LocalHost, ModalKind, Selectable, TextMeasure, ViewState,
};
pub use core::{
    Card, Channel, Device, DeviceKind, Link, LinkKind, LinkTarget, Location, MapView,
    ScreenTransform, SensorZone, SpatialIndex, SpatialMatch, Topology,
};
pub use shared::{EditorOptions, RenderScene};
