//! Two-pointer gestures and pointer joins.

use crate::helpers::TestScopeBuilder;
use pointer_interactions::actions::DragOptionsPatch;
use pointer_interactions::{ActionName, Phase, Rect};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn gesture_scope() -> crate::helpers::TestScope {
    TestScopeBuilder::new().with_gesture().build()
}

#[test]
fn test_second_touch_joins_interaction() {
    let mut t = gesture_scope();

    let first = t.touch_down(1, 0.0, 0.0, 0.0);
    let second = t.touch_down(2, 100.0, 0.0, 10.0);

    assert_eq!(first, second);
    let interaction = t.scope.interaction(first).unwrap();
    assert_eq!(interaction.pointer_count(), 2);
    assert_eq!(interaction.phase(), Phase::Down);
    // Start is re-taken at the pointers' average
    assert_eq!(interaction.start_coords().page.x, 50.0);
}

#[test]
fn test_mouse_does_not_join() {
    let mut t = gesture_scope();

    let first = t.touch_down(1, 0.0, 0.0, 0.0);
    let second = t.down(2, 100.0, 0.0, 10.0);

    assert_ne!(first, second);
    assert_eq!(t.scope.interactions().count(), 2);
}

#[test]
fn test_pinch_and_rotate() {
    let mut t = gesture_scope();

    let id = t.touch_down(1, 0.0, 0.0, 0.0);
    t.touch_down(2, 100.0, 0.0, 10.0);
    t.touch_move(2, 200.0, 0.0, 20.0);

    assert_eq!(t.types(), vec!["gesturestart", "gesturemove"]);
    let prepared = *t.scope.interaction(id).unwrap().prepared().unwrap();
    assert_eq!(prepared.name, ActionName::Gesture);

    let start = t.events_named("gesturestart")[0].gesture.unwrap();
    assert_eq!(start.distance, 200.0);
    assert_eq!(start.scale, 1.0);
    assert_eq!(start.bounds, Rect::new(0.0, 0.0, 200.0, 0.0));

    t.touch_move(2, 0.0, 400.0, 30.0);
    let g = t.last_event().gesture.unwrap();
    assert!(approx(g.distance, 400.0));
    assert!(approx(g.scale, 2.0));
    assert!(approx(g.ds, 1.0));
    assert!(approx(g.angle, 90.0));
    assert!(approx(g.da, 90.0));
}

#[test]
fn test_lifting_one_pointer_ends_and_rearms() {
    let mut t = gesture_scope();

    let id = t.touch_down(1, 0.0, 0.0, 0.0);
    t.touch_down(2, 100.0, 0.0, 10.0);
    t.touch_move(2, 200.0, 0.0, 20.0);
    t.touch_up(2, 200.0, 0.0, 30.0);

    assert_eq!(t.types(), vec!["gesturestart", "gesturemove", "gestureend"]);
    let end = t.last_event().gesture.unwrap();
    assert_eq!(end.scale, 1.0);
    assert_eq!(end.ds, 0.0);

    let interaction = t.scope.interaction(id).expect("one pointer still down");
    assert_eq!(interaction.phase(), Phase::Down);
    assert_eq!(interaction.pointer_count(), 1);
    assert!(interaction.prepared().is_none());
    assert!(interaction.gesture_state().is_none());

    // One pointer cannot gesture; nothing else is enabled
    t.touch_move(1, 50.0, 0.0, 40.0);
    assert_eq!(t.types().len(), 3);

    t.touch_up(1, 50.0, 0.0, 50.0);
    assert!(t.scope.interaction(id).is_none());
}

#[test]
fn test_join_ends_running_drag() {
    let mut t = TestScopeBuilder::new()
        .with_drag(DragOptionsPatch::default())
        .with_gesture()
        .build();

    let id = t.touch_down(1, 0.0, 0.0, 0.0);
    t.touch_move(1, 10.0, 0.0, 16.0);
    assert_eq!(t.types(), vec!["dragstart", "dragmove"]);

    t.touch_down(2, 100.0, 0.0, 32.0);
    assert_eq!(t.types(), vec!["dragstart", "dragmove", "dragend"]);

    t.touch_move(2, 120.0, 0.0, 48.0);
    assert_eq!(t.types()[3], "gesturestart");
    let prepared = *t.scope.interaction(id).unwrap().prepared().unwrap();
    assert_eq!(prepared.name, ActionName::Gesture);
}
