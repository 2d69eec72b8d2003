//! Coordinate frames and the delta engine.
//!
//! ## Modules
//!
//! - `point` - `Point`, `Rect`, `Edges` and their patch types
//! - `set` - `CoordinateSet` (page + client), `Delta`/`DeltaSet`, `copy_coords`
//! - `delta` - `DeltaEngine`: pointer deltas, per-event deltas and velocity
//!
//! Coordinate sets live inside the `Interaction` that owns them and are always
//! updated in place, so anything reading through an `InteractionId` handle sees
//! the current values.

mod delta;
mod point;
mod set;

pub use delta::DeltaEngine;
pub use point::{Edges, Point, PointPatch, Rect, point};
pub use set::{CoordinateSet, Delta, DeltaPatch, DeltaSet, copy_coords};

/// Typed counterpart of a shallow `extend`: fields present in the patch
/// overwrite the target, absent ones are left alone.
pub trait Merge<P> {
    fn merge(&mut self, patch: P);
}
