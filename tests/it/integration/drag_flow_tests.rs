//! Drag sequences end to end.

use crate::helpers::{SCROLL, TestScopeBuilder};
use pointer_interactions::actions::DragOptionsPatch;
use pointer_interactions::coords::point;
use pointer_interactions::{Axis, LockAxis, Phase, Point, StartAxis};

#[test]
fn test_drag_lifecycle() {
    let mut t = TestScopeBuilder::new()
        .with_drag(DragOptionsPatch::default())
        .build();

    let id = t.down(1, 0.0, 0.0, 0.0);
    t.move_to(1, 5.0, 0.0, 16.0);
    t.move_to(1, 10.0, 0.0, 32.0);
    t.up(1, 10.0, 0.0, 48.0);

    assert_eq!(t.types(), vec!["dragstart", "dragmove", "dragmove", "dragend"]);

    let events = t.log.events();
    let start = &events[0];
    assert_eq!(start.page, Point::ZERO);
    assert_eq!(start.delta, Point::ZERO);
    assert_eq!(start.timestamp, 0.0);

    let first_move = &events[1];
    assert_eq!(first_move.page, point(5.0, 0.0));
    assert_eq!(first_move.client, point(5.0, -SCROLL.1));
    assert_eq!(first_move.delta, point(5.0, 0.0));
    assert_eq!(first_move.dt, 16.0);

    assert_eq!(events[2].delta, point(5.0, 0.0));

    let end = &events[3];
    assert_eq!(end.page, point(10.0, 0.0));
    assert_eq!(end.delta, Point::ZERO);
    assert_eq!(end.duration, 48.0);
    assert!(end.swipe.is_none());

    assert!(t.scope.interaction(id).is_none());
}

#[test]
fn test_start_page_is_constant() {
    let mut t = TestScopeBuilder::new()
        .with_drag(DragOptionsPatch::default())
        .build();

    t.down(1, 3.0, 4.0, 0.0);
    t.move_to(1, 20.0, 4.0, 10.0);
    t.move_to(1, 40.0, 9.0, 20.0);
    t.up(1, 40.0, 9.0, 30.0);

    for event in t.log.events() {
        assert_eq!(event.start_page, point(3.0, 4.0), "{}", event.event_type);
        assert_eq!(event.start_client, point(3.0, 4.0 - SCROLL.1));
        assert_eq!(event.t0, 0.0);
    }
}

#[test]
fn test_fast_release_is_a_swipe() {
    let mut t = TestScopeBuilder::new()
        .with_drag(DragOptionsPatch::default())
        .build();

    t.down(1, 0.0, 0.0, 0.0);
    t.move_to(1, 20.0, 0.0, 10.0);
    t.move_to(1, 40.0, 0.0, 20.0);
    t.up(1, 40.0, 0.0, 30.0);

    let swipe = t.last_event().swipe.expect("swipe on a fast release");
    assert!(swipe.right);
    assert!(!swipe.left && !swipe.up && !swipe.down);
    assert!(swipe.speed >= 600.0);
}

#[test]
fn test_late_release_is_not_a_swipe() {
    let mut t = TestScopeBuilder::new()
        .with_drag(DragOptionsPatch::default())
        .build();

    t.down(1, 0.0, 0.0, 0.0);
    t.move_to(1, 20.0, 0.0, 10.0);
    t.move_to(1, 40.0, 0.0, 20.0);
    t.up(1, 40.0, 0.0, 400.0);

    assert!(t.last_event().swipe.is_none());
}

#[test]
fn test_lock_axis_start_follows_first_move() {
    let mut t = TestScopeBuilder::new()
        .with_drag(DragOptionsPatch {
            lock_axis: Some(LockAxis::Start),
            ..Default::default()
        })
        .build();

    let id = t.down(1, 0.0, 0.0, 0.0);
    t.move_to(1, 6.0, 2.0, 16.0);
    t.move_to(1, 8.0, 30.0, 32.0);

    let prepared = *t.scope.interaction(id).unwrap().prepared().unwrap();
    assert_eq!(prepared.axis, LockAxis::X);

    let last = t.last_event();
    assert_eq!(last.axis, Some(Axis::X));
    assert_eq!(last.page, point(8.0, 0.0));
    assert_eq!(last.client, point(8.0, -SCROLL.1));
    assert_eq!(last.delta, point(2.0, 0.0));
}

#[test]
fn test_y_lock_keeps_x_at_start() {
    let mut t = TestScopeBuilder::new()
        .with_drag(DragOptionsPatch {
            lock_axis: Some(LockAxis::Y),
            ..Default::default()
        })
        .build();

    t.down(1, 10.0, 10.0, 0.0);
    t.move_to(1, 25.0, 40.0, 16.0);
    t.up(1, 25.0, 40.0, 32.0);

    for event in t.events_named("dragmove") {
        assert_eq!(event.page.x, 10.0);
        assert_eq!(event.delta.x, 0.0);
        assert_eq!(event.velocity.x, 0.0);
    }
    assert_eq!(t.events_named("dragmove")[0].page.y, 40.0);
}

#[test]
fn test_x_lock_leaves_no_velocity_on_y() {
    let mut t = TestScopeBuilder::new()
        .with_drag(DragOptionsPatch {
            lock_axis: Some(LockAxis::X),
            ..Default::default()
        })
        .build();

    let id = t.down(1, 0.0, 0.0, 0.0);
    t.move_to(1, 5.0, 7.0, 16.0);
    t.move_to(1, 10.0, 7.0, 32.0);

    let delta = *t.scope.interaction(id).unwrap().pointer_delta();
    assert_eq!(delta.page.vy, 0.0);
    assert_eq!(delta.client.vy, 0.0);
    assert_eq!(delta.page.vx, 312.5);
    assert_eq!(delta.page.speed, 312.5);
    assert_eq!(t.last_event().page, point(10.0, 0.0));
}

#[test]
fn test_legacy_axis_option() {
    let mut t = TestScopeBuilder::new()
        .with_drag(DragOptionsPatch {
            axis: Some(Axis::X),
            ..Default::default()
        })
        .build();

    t.down(1, 0.0, 0.0, 0.0);
    t.move_to(1, 5.0, 5.0, 16.0);

    let last = t.last_event();
    assert_eq!(last.page, point(5.0, 0.0));
    assert_eq!(last.delta, point(5.0, 0.0));
}

#[test]
fn test_start_axis_rejects_other_direction() {
    let mut t = TestScopeBuilder::new()
        .with_drag(DragOptionsPatch {
            start_axis: Some(StartAxis::X),
            ..Default::default()
        })
        .build();

    let id = t.down(1, 0.0, 0.0, 0.0);
    t.move_to(1, 0.0, 10.0, 16.0);
    t.move_to(1, 30.0, 10.0, 32.0);

    assert!(t.types().is_empty());
    let interaction = t.scope.interaction(id).unwrap();
    assert!(interaction.prepared().is_none());
    assert_eq!(interaction.phase(), Phase::Moving);
    // Coordinates are still tracked
    assert_eq!(interaction.cur_coords().page, point(30.0, 10.0));

    t.up(1, 30.0, 10.0, 48.0);
    assert!(t.types().is_empty());
}

#[test]
fn test_start_axis_accepts_matching_direction() {
    let mut t = TestScopeBuilder::new()
        .with_drag(DragOptionsPatch {
            start_axis: Some(StartAxis::Y),
            ..Default::default()
        })
        .build();

    t.down(1, 0.0, 0.0, 0.0);
    t.move_to(1, 1.0, 10.0, 16.0);

    assert_eq!(t.types(), vec!["dragstart", "dragmove"]);
}

#[test]
fn test_moves_within_tolerance_do_not_start() {
    let mut t = TestScopeBuilder::new()
        .with_drag(DragOptionsPatch::default())
        .build();

    let id = t.down(1, 0.0, 0.0, 0.0);
    t.move_to(1, 0.5, 0.5, 16.0);

    assert!(t.types().is_empty());
    assert_eq!(t.scope.interaction(id).unwrap().phase(), Phase::Down);

    t.move_to(1, 3.0, 0.0, 32.0);
    assert_eq!(t.types(), vec!["dragstart", "dragmove"]);
}

#[test]
fn test_disabled_drag_tracks_only() {
    let mut t = TestScopeBuilder::new()
        .with_drag(DragOptionsPatch {
            enabled: Some(false),
            ..Default::default()
        })
        .build();

    let id = t.down(1, 0.0, 0.0, 0.0);
    t.move_to(1, 10.0, 0.0, 16.0);

    assert!(t.types().is_empty());
    let interaction = t.scope.interaction(id).unwrap();
    assert!(!interaction.is_interacting());
    assert_eq!(interaction.pointer_delta().page.x, 10.0);
}
