use glam::Vec2;

use super::draft::Draft;
use crate::app::actions::ActionBatch;
use crate::core::Topology;
use crate::shared::EditorOptions;

/// Persistiert den Pan als MapView-Update; unverändert → kein Batch.
pub fn finish(start_pan: Vec2, current_pan: Vec2, topology: &Topology) -> Option<ActionBatch> {
    if start_pan == current_pan {
        return None;
    }
    let mut draft = Draft::new(topology);
    let mut view = draft.map_view();
    view.pan = current_pan;
    draft.set_map_view(view);
    draft.into_batch("Karte verschieben")
}

/// Zoomt um einen Fokuspunkt (Viewport-lokal) und persistiert die Ansicht.
pub fn zoom(
    factor: f32,
    focus_local: Vec2,
    topology: &Topology,
    options: &EditorOptions,
) -> Option<ActionBatch> {
    let mut draft = Draft::new(topology);
    let mut view = draft.map_view();
    view.zoom_about(factor, focus_local, options.zoom_min, options.zoom_max);
    draft.set_map_view(view);
    draft.into_batch("Zoom")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_pan_is_skipped() {
        let topo = Topology::new();
        assert!(finish(Vec2::new(3.0, 4.0), Vec2::new(3.0, 4.0), &topo).is_none());
        let batch = finish(Vec2::ZERO, Vec2::new(12.0, -4.0), &topo).expect("Batch");
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn zoom_at_limit_is_skipped() {
        let mut topo = Topology::new();
        topo.map_view.zoom = 8.0;
        let options = EditorOptions::default();
        assert!(zoom(2.0, Vec2::new(50.0, 50.0), &topo, &options).is_none());
        assert!(zoom(0.5, Vec2::new(50.0, 50.0), &topo, &options).is_some());
    }
}
