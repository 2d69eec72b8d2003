//! 2D points, rects and edge sets.

use super::Merge;
use crate::axis::Dimension;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Sub};

/// A point (or vector) in one coordinate frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Shorthand constructor, mirrors `Point::new`
#[inline]
pub fn point(x: f64, y: f64) -> Point {
    Point { x, y }
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length
    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn get(self, dim: Dimension) -> f64 {
        match dim {
            Dimension::X => self.x,
            Dimension::Y => self.y,
        }
    }

    #[inline]
    pub fn set(&mut self, dim: Dimension, value: f64) {
        match dim {
            Dimension::X => self.x = value,
            Dimension::Y => self.y = value,
        }
    }

    /// Average of a set of points, `None` when empty
    pub fn average<I: IntoIterator<Item = Point>>(points: I) -> Option<Point> {
        let mut sum = Point::ZERO;
        let mut count = 0usize;
        for p in points {
            sum += p;
            count += 1;
        }
        (count > 0).then(|| sum / count as f64)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        point(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        point(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Div<f64> for Point {
    type Output = Point;
    fn div(self, rhs: f64) -> Point {
        point(self.x / rhs, self.y / rhs)
    }
}

/// Partial point update
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Merge<PointPatch> for Point {
    fn merge(&mut self, patch: PointPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
    }
}

impl Merge<Point> for Point {
    fn merge(&mut self, patch: Point) {
        self.x = patch.x;
        self.y = patch.y;
    }
}

/// Axis-aligned rect stored by its edges.
///
/// Width and height are derived, so a rect with crossed edges reports a
/// negative size. Resize with `Invert::Negate` relies on that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn from_origin_size(origin: Point, width: f64, height: f64) -> Self {
        Self::new(origin.x, origin.y, origin.x + width, origin.y + height)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Bounding box of a set of points, `None` when empty
    pub fn bounding<I: IntoIterator<Item = Point>>(points: I) -> Option<Rect> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut rect = Rect::new(first.x, first.y, first.x, first.y);
        for p in iter {
            rect.left = rect.left.min(p.x);
            rect.top = rect.top.min(p.y);
            rect.right = rect.right.max(p.x);
            rect.bottom = rect.bottom.max(p.y);
        }
        Some(rect)
    }

    /// Edge-wise difference `self - other`
    pub fn edge_delta(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left - other.left,
            self.top - other.top,
            self.right - other.right,
            self.bottom - other.bottom,
        )
    }
}

/// Set of rect edges, used for resize handles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Edges {
    pub const NONE: Self = Self { left: false, right: false, top: false, bottom: false };
    pub const ALL: Self = Self { left: true, right: true, top: true, bottom: true };
    pub const BOTTOM_RIGHT: Self = Self { left: false, right: true, top: false, bottom: true };

    #[inline]
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }

    #[inline]
    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    #[inline]
    pub fn vertical(&self) -> bool {
        self.top || self.bottom
    }
}
