//! Paired page/client coordinate sets and their deltas.

use super::{Merge, Point};
use serde::{Deserialize, Serialize};

/// Page and client position of a pointer (or pointer group) at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSet {
    pub page: Point,
    pub client: Point,
    /// Milliseconds on the input source's clock
    pub timestamp: f64,
}

impl CoordinateSet {
    pub fn new(page: Point, client: Point, timestamp: f64) -> Self {
        Self { page, client, timestamp }
    }

    /// In-place copy of every field of `src`
    #[inline]
    pub fn copy_from(&mut self, src: &CoordinateSet) {
        self.page = src.page;
        self.client = src.client;
        self.timestamp = src.timestamp;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Copies `src` into `dst` field by field. `dst` keeps its place in whatever
/// owns it, so handles to the owner observe the new values.
#[inline]
pub fn copy_coords(dst: &mut CoordinateSet, src: &CoordinateSet) {
    dst.copy_from(src);
}

/// Displacement in one frame plus the velocity it was moving at
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub speed: f64,
}

impl Delta {
    #[inline]
    pub fn offset(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn velocity(&self) -> Point {
        Point::new(self.vx, self.vy)
    }
}

/// Partial delta update
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub vx: Option<f64>,
    pub vy: Option<f64>,
    pub speed: Option<f64>,
}

impl Merge<DeltaPatch> for Delta {
    fn merge(&mut self, patch: DeltaPatch) {
        if let Some(v) = patch.x {
            self.x = v;
        }
        if let Some(v) = patch.y {
            self.y = v;
        }
        if let Some(v) = patch.vx {
            self.vx = v;
        }
        if let Some(v) = patch.vy {
            self.vy = v;
        }
        if let Some(v) = patch.speed {
            self.speed = v;
        }
    }
}

impl Merge<Delta> for Delta {
    fn merge(&mut self, patch: Delta) {
        *self = patch;
    }
}

/// Deltas for both frames. Used as an interaction's `pointer_delta`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaSet {
    pub page: Delta,
    pub client: Delta,
    /// Milliseconds between the two samples the velocity came from
    pub dt: f64,
}

impl DeltaSet {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
