//! Link-Gesten, Uplinks und verzögertes Löschen verwaister Karten.

mod common;

use common::{device, put_card, put_link, Editor};
use glam::Vec2;
use sensornet_topology_editor::core::{Card, Channel, ChannelKind};
use sensornet_topology_editor::{
    AppIntent, DeviceKind, HitTarget, Link, LinkKind, LinkTarget, Location, Selectable, Topology,
};

/// Radio 1 bei (300,0), Repeater 2 bei (0,0) mit Uplink über ein Gelenk bei (150,50).
fn bent_uplink() -> Topology {
    let mut topo = Topology::new();
    topo.add_device(device(1, DeviceKind::Radio, Location::OnMap, 300.0, 0.0));
    topo.add_device(device(2, DeviceKind::Repeater, Location::OnMap, 0.0, 0.0));
    let mut link = Link::new(
        1,
        LinkKind::Rf,
        2,
        LinkTarget::Device(1),
        Vec2::ZERO,
        Vec2::new(300.0, 0.0),
    );
    link.points.insert(1, Vec2::new(150.0, 50.0));
    topo.add_link(link);
    topo
}

/// Sensor 1 bei (0,0) per CC an Kanal 10 (Karte 5, meldet nicht); Kanal 11 auf Karte 6.
fn cc_setup() -> Topology {
    let mut topo = Topology::new();
    put_card(&mut topo, 5, 10, Vec2::new(300.0, 0.0), false);
    put_card(&mut topo, 6, 11, Vec2::new(300.0, 100.0), true);
    topo.add_device(device(1, DeviceKind::Sensor, Location::OnMap, 0.0, 0.0));
    topo.add_device(device(2, DeviceKind::Sensor, Location::OnMap, 0.0, 200.0));
    put_link(&mut topo, 1, LinkKind::Cc, 1, LinkTarget::Channel(10));
    topo
}

fn grab_cc_terminal(editor: &mut Editor) {
    editor.press(
        250.0,
        0.0,
        HitTarget::LinkSegment {
            link_id: 1,
            segment: 0,
        },
    );
    editor.move_to(296.0, 2.0);
}

#[test]
fn test_small_moves_near_joint_reuse_it() {
    let mut editor = Editor::new(bent_uplink());
    editor.press(
        140.0,
        45.0,
        HitTarget::LinkSegment {
            link_id: 1,
            segment: 0,
        },
    );
    editor.move_to(147.0, 48.0);
    editor.move_to(149.0, 49.0);
    editor.move_to(152.0, 51.0);
    editor.release(152.0, 51.0);

    let link = &editor.topology().links[&1];
    assert_eq!(link.points.len(), 3);
    assert_eq!(link.points[1], Vec2::new(152.0, 51.0));
    assert_eq!(editor.host.last_batch().expect("Batch").len(), 1);
    editor.topology().check_invariants().expect("Invarianten");
}

#[test]
fn test_move_away_from_joints_splits_segment() {
    let mut editor = Editor::new(bent_uplink());
    editor.press(
        75.0,
        25.0,
        HitTarget::LinkSegment {
            link_id: 1,
            segment: 0,
        },
    );
    editor.move_to(80.0, 40.0);
    editor.move_to(82.0, 44.0);
    editor.release(82.0, 44.0);

    let link = &editor.topology().links[&1];
    assert_eq!(
        link.points,
        vec![
            Vec2::ZERO,
            Vec2::new(82.0, 44.0),
            Vec2::new(150.0, 50.0),
            Vec2::new(300.0, 0.0)
        ]
    );
}

#[test]
fn test_click_below_threshold_only_selects_link() {
    let mut editor = Editor::new(bent_uplink());
    editor.press(
        75.0,
        25.0,
        HitTarget::LinkSegment {
            link_id: 1,
            segment: 0,
        },
    );
    editor.move_to(76.0, 26.0);
    editor.release(76.0, 26.0);

    assert_eq!(editor.batch_count(), 0);
    assert_eq!(editor.topology().links[&1].points.len(), 3);
    assert!(editor.state.selection.is_selected(Selectable::Link(1)));
}

#[test]
fn test_rf_terminal_released_without_target_bounces() {
    let mut editor = Editor::new(bent_uplink());
    editor.press(
        250.0,
        20.0,
        HitTarget::LinkSegment {
            link_id: 1,
            segment: 1,
        },
    );
    editor.move_to(296.0, 2.0);
    editor.move_to(400.0, 200.0);
    editor.release(400.0, 200.0);

    assert_eq!(editor.batch_count(), 0);
    assert_eq!(editor.topology().links[&1].end(), Vec2::new(300.0, 0.0));
    assert!(editor.state.selection.is_selected(Selectable::Link(1)));
}

#[test]
fn test_cc_terminal_moves_to_other_channel_and_schedules_old_card() {
    let mut editor = Editor::new(cc_setup());
    grab_cc_terminal(&mut editor);
    editor.enter(HitTarget::Channel(11));
    editor.move_to(300.0, 100.0);
    editor.release(300.0, 100.0);

    let topo = editor.topology();
    let link = &topo.links[&1];
    assert_eq!(link.target, LinkTarget::Channel(11));
    assert_eq!(link.end(), Vec2::new(300.0, 100.0));
    assert!(topo.channels[&10].members.is_empty());
    assert!(topo.channels[&11].has_sensor(1));
    topo.check_invariants().expect("Invarianten");
    assert!(editor.state.deferred.is_pending(5));
    assert!(!editor.state.deferred.is_pending(6));

    editor.send(AppIntent::Tick { now_ms: 1000 });
    assert!(editor.topology().cards.contains_key(&5));

    editor.send(AppIntent::Tick { now_ms: 1600 });
    assert!(!editor.topology().cards.contains_key(&5));
    assert!(!editor.topology().channels.contains_key(&10));
    let batches = editor.batch_count();

    editor.send(AppIntent::Tick { now_ms: 5000 });
    assert_eq!(editor.batch_count(), batches);
}

#[test]
fn test_new_link_cancels_pending_card_delete() {
    let mut editor = Editor::new(cc_setup());
    grab_cc_terminal(&mut editor);
    editor.move_to(200.0, 300.0);
    editor.release(200.0, 300.0);

    assert!(editor.topology().links.is_empty());
    assert!(editor.topology().channels[&10].members.is_empty());
    assert!(editor.state.deferred.is_pending(5));

    editor.press(0.0, 200.0, HitTarget::Device(2));
    editor.enter(HitTarget::Channel(10));
    editor.move_to(300.0, 0.0);
    editor.release(300.0, 0.0);
    assert!(editor.topology().channels[&10].has_sensor(2));
    assert!(!editor.state.deferred.is_pending(5));

    editor.send(AppIntent::Tick { now_ms: 2000 });
    assert!(editor.topology().cards.contains_key(&5));
}

#[test]
fn test_uplink_by_dropping_repeater_onto_radio() {
    let mut topo = Topology::new();
    topo.add_device(device(1, DeviceKind::Radio, Location::OnMap, 300.0, 0.0));
    topo.add_device(device(3, DeviceKind::Repeater, Location::OnMap, 0.0, 200.0));
    let mut editor = Editor::new(topo);

    editor.press(0.0, 200.0, HitTarget::Device(3));
    editor.enter(HitTarget::Device(1));
    editor.move_to(300.0, 0.0);
    editor.release(300.0, 0.0);

    let topo = editor.topology();
    let link_id = topo.devices[&3].rf_link.expect("Uplink");
    let link = &topo.links[&link_id];
    assert_eq!(link.target, LinkTarget::Device(1));
    assert_eq!(link.points, vec![Vec2::new(0.0, 200.0), Vec2::new(300.0, 0.0)]);
    assert_eq!(topo.devices[&3].position, Vec2::new(0.0, 200.0));
}

#[test]
fn test_cyclic_uplink_target_is_invalid() {
    let mut topo = bent_uplink();
    topo.add_device(device(3, DeviceKind::Repeater, Location::OnMap, 0.0, 200.0));
    put_link(&mut topo, 2, LinkKind::Rf, 3, LinkTarget::Device(2));
    let mut editor = Editor::new(topo);

    editor.press(0.0, 0.0, HitTarget::Device(2));
    editor.enter(HitTarget::Device(3));
    editor.move_to(0.0, 200.0);
    editor.release(0.0, 200.0);

    assert_eq!(editor.batch_count(), 0);
    assert_eq!(editor.topology().links[&1].target, LinkTarget::Device(1));
}

#[test]
fn test_delete_device_strips_links_and_schedules_card() {
    let mut editor = Editor::new(cc_setup());
    editor.state.selection.select(Selectable::Device(1));
    editor.send(AppIntent::DeleteDeviceRequested { device_id: 1 });

    let topo = editor.topology();
    assert!(!topo.devices.contains_key(&1));
    assert!(topo.links.is_empty());
    assert!(topo.channels[&10].members.is_empty());
    assert!(editor.state.deferred.is_pending(5));
    assert!(editor.state.selection.selected.is_none());
    assert_eq!(editor.batch_count(), 1);
}

#[test]
fn test_delete_link_request() {
    let mut editor = Editor::new(bent_uplink());
    editor.send(AppIntent::DeleteLinkRequested { link_id: 1 });
    let topo = editor.topology();
    assert!(topo.links.is_empty());
    assert_eq!(topo.devices[&2].rf_link, None);

    editor.send(AppIntent::DeleteLinkRequested { link_id: 1 });
    assert_eq!(editor.batch_count(), 1);
}

#[test]
fn test_cc_terminal_rejects_channel_of_other_kind() {
    let mut topo = cc_setup();
    topo.add_card(
        Card::new(7),
        vec![Channel::new(12, 7, ChannelKind::Pulse, Vec2::new(300.0, 300.0))],
    );
    let mut editor = Editor::new(topo);
    grab_cc_terminal(&mut editor);
    editor.enter(HitTarget::Channel(12));
    editor.move_to(300.0, 300.0);
    let scene = editor
        .controller
        .build_render_scene(&editor.state, &editor.host);
    assert_eq!(scene.hover_valid, Some(false));
    editor.release(300.0, 300.0);

    let topo = editor.topology();
    assert_eq!(editor.batch_count(), 0);
    assert_eq!(topo.links[&1].target, LinkTarget::Channel(10));
    assert!(topo.channels[&10].has_sensor(1));
    assert!(topo.channels[&12].members.is_empty());
    assert!(!editor.state.deferred.is_pending(5));
    assert!(editor.state.selection.is_selected(Selectable::Link(1)));
}

#[test]
fn test_tick_during_drag_holds_back_card_delete() {
    let mut editor = Editor::new(cc_setup());
    editor.send(AppIntent::DeleteLinkRequested { link_id: 1 });
    assert!(editor.state.deferred.is_pending(5));

    editor.press(0.0, 200.0, HitTarget::Device(2));
    editor.enter(HitTarget::Channel(10));
    editor.move_to(300.0, 0.0);
    editor.send(AppIntent::Tick { now_ms: 5000 });
    assert!(editor.topology().cards.contains_key(&5));
    assert!(editor.topology().channels.contains_key(&10));
    editor.release(300.0, 0.0);

    assert!(editor.topology().channels[&10].has_sensor(2));
    assert!(!editor.state.deferred.is_pending(5));
    editor.send(AppIntent::Tick { now_ms: 9000 });
    assert!(editor.topology().cards.contains_key(&5));
}

#[test]
fn test_due_card_delete_fires_on_first_tick_after_drag() {
    let mut editor = Editor::new(cc_setup());
    editor.send(AppIntent::DeleteLinkRequested { link_id: 1 });

    editor.press(0.0, 200.0, HitTarget::Device(2));
    editor.move_to(40.0, 240.0);
    editor.send(AppIntent::Tick { now_ms: 5000 });
    assert!(editor.topology().cards.contains_key(&5));
    editor.release(40.0, 240.0);

    editor.send(AppIntent::Tick { now_ms: 5100 });
    assert!(!editor.topology().cards.contains_key(&5));
    assert!(!editor.topology().channels.contains_key(&10));
}
