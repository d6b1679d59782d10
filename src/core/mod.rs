//! Core-Domänentypen: Geräte, Zonen, Links, Kanäle, Topologie, Geometrie und Overlap-Engine.

pub mod channel;
pub mod decor;
pub mod device;
pub mod footprint;
/// Reine Geometrie-Funktionen (Rotation, Polygon-Tests, Winkel-Snapping)
pub mod geometry;
pub mod link;
pub mod overlap;
pub mod spatial;
pub mod topology;
pub mod viewport;
pub mod zone;
pub mod zone_order;

pub use channel::{Card, CardId, Channel, ChannelId, ChannelKind, ChannelMember};
pub use decor::{Cabinet, LabelId, NorthArrow, TextLabel};
pub use device::{Device, DeviceId, DeviceKind, Liveness, Location};
pub use footprint::{Footprint, ItemRef};
pub use link::{Link, LinkId, LinkKind, LinkTarget};
pub use overlap::{find_overlaps, OverlapEngine};
pub use spatial::{SpatialIndex, SpatialMatch};
pub use topology::Topology;
pub use viewport::{MapView, ScreenTransform};
pub use zone::{SensorZone, ZoneGap, ZoneId, ZoneUsage};
