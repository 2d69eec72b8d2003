//! Coordinate sets, merges and the delta engine.

use pointer_interactions::axis::AxisConstraint;
use pointer_interactions::coords::{
    CoordinateSet, Delta, DeltaEngine, DeltaSet, Merge, Point, PointPatch, copy_coords, point,
};
use pointer_interactions::{Axis, InteractionSettings};

#[test]
fn test_copy_coords_overwrites_every_field() {
    let src = CoordinateSet::new(point(10.0, 20.0), point(1.0, 2.0), 99.0);
    let mut dst = CoordinateSet::new(point(-1.0, -1.0), point(-2.0, -2.0), 1.0);

    copy_coords(&mut dst, &src);

    assert_eq!(dst, src);
}

#[test]
fn test_point_merge_overwrites_present_keys() {
    let mut p = point(1.0, 2.0);
    p.merge(PointPatch { x: Some(5.0), y: None });
    assert_eq!(p, point(5.0, 2.0));

    p.merge(point(0.0, 0.0));
    assert_eq!(p, Point::ZERO);
}

#[test]
fn test_frame_delta_offset_and_velocity() {
    let start = point(0.0, 0.0);
    let prev = point(3.0, 4.0);
    let cur = point(6.0, 8.0);

    // 3,4 -> 6,8 over 0.5 s
    let delta = DeltaEngine::frame_delta(start, prev, cur, 0.5);

    assert_eq!(delta.offset(), point(6.0, 8.0));
    assert_eq!(delta.velocity(), point(6.0, 8.0));
    assert_eq!(delta.speed, 10.0);
}

#[test]
fn test_dt_is_floored() {
    let a = CoordinateSet::new(Point::ZERO, Point::ZERO, 100.0);
    let b = CoordinateSet::new(Point::ZERO, Point::ZERO, 100.0);
    let min = InteractionSettings::default().min_dt_secs;

    assert_eq!(DeltaEngine::dt_secs(&a, &b, min), min);
}

#[test]
fn test_update_pointer_delta_both_frames() {
    let start = CoordinateSet::new(point(0.0, 0.0), point(100.0, 100.0), 0.0);
    let prev = CoordinateSet::new(point(5.0, 0.0), point(105.0, 100.0), 500.0);
    let cur = CoordinateSet::new(point(10.0, 0.0), point(110.0, 100.0), 1000.0);
    let mut target = DeltaSet::default();

    DeltaEngine::update_pointer_delta(&mut target, &start, &prev, &cur, 0.001);

    assert_eq!(target.page, Delta { x: 10.0, y: 0.0, vx: 10.0, vy: 0.0, speed: 10.0 });
    assert_eq!(target.client, Delta { x: 10.0, y: 0.0, vx: 10.0, vy: 0.0, speed: 10.0 });
    assert_eq!(target.dt, 500.0);
}

#[test]
fn test_event_delta() {
    assert_eq!(DeltaEngine::event_delta(point(1.0, 1.0), point(4.0, -1.0)), point(3.0, -2.0));
}

#[test]
fn test_axis_constraint_xy_is_noop() {
    let start = CoordinateSet::new(point(0.0, 1.0), point(2.0, 3.0), 0.0);
    let (mut page, mut client, mut delta) = (point(-1.0, -2.0), point(-3.0, -4.0), point(-5.0, -6.0));

    let frozen = AxisConstraint::apply(Axis::Xy, &start, &mut page, &mut client, &mut delta);

    assert!(frozen.is_none());
    assert_eq!((page, client, delta), (point(-1.0, -2.0), point(-3.0, -4.0), point(-5.0, -6.0)));
}
