//! Delta engine - pointer deltas, per-event deltas and velocity.
//!
//! ## Performance Notes
//!
//! These run on every pointer move. They are plain arithmetic on `Copy`
//! values and never allocate.

use super::{CoordinateSet, Delta, DeltaSet, Point};

pub struct DeltaEngine;

impl DeltaEngine {
    /// Elapsed seconds between two samples, floored at `min_dt_secs`
    #[inline]
    pub fn dt_secs(prev: &CoordinateSet, cur: &CoordinateSet, min_dt_secs: f64) -> f64 {
        ((cur.timestamp - prev.timestamp) / 1000.0).max(min_dt_secs)
    }

    /// Displacement since `start` plus the velocity of the last step
    #[inline]
    pub fn frame_delta(start: Point, prev: Point, cur: Point, dt_secs: f64) -> Delta {
        let offset = cur - start;
        let velocity = (cur - prev) / dt_secs;
        Delta {
            x: offset.x,
            y: offset.y,
            vx: velocity.x,
            vy: velocity.y,
            speed: velocity.length(),
        }
    }

    /// Recompute `pointer_delta` in place.
    ///
    /// `x`/`y` are measured from `start`. `vx`/`vy` come from the step
    /// `prev -> cur` over the elapsed time between those two samples.
    pub fn update_pointer_delta(
        target: &mut DeltaSet,
        start: &CoordinateSet,
        prev: &CoordinateSet,
        cur: &CoordinateSet,
        min_dt_secs: f64,
    ) {
        let dt = Self::dt_secs(prev, cur, min_dt_secs);
        target.page = Self::frame_delta(start.page, prev.page, cur.page, dt);
        target.client = Self::frame_delta(start.client, prev.client, cur.client, dt);
        target.dt = cur.timestamp - prev.timestamp;
    }

    /// Per-event delta between two consecutive emitted events
    #[inline]
    pub fn event_delta(prev: Point, cur: Point) -> Point {
        cur - prev
    }
}
