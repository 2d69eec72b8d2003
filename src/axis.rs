//! Axis locking.
//!
//! ## Policy
//!
//! With an `x` or `y` axis, the opposite dimension of an in-flight event is
//! frozen: its delta becomes `0` and its page/client values are reset to the
//! interaction's start coordinates. The active dimension passes through
//! untouched. `xy` leaves the event alone.
//!
//! `LockAxis::Start` is resolved exactly once, on the first move of an
//! interaction, to whichever dimension moved further. It is never
//! re-evaluated for the rest of the interaction.

use crate::coords::{CoordinateSet, Point};
use crate::error::InteractionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two dimensions of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    X,
    Y,
}

impl Dimension {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// Axis an action is constrained to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    #[default]
    Xy,
}

impl Axis {
    /// The single free dimension, `None` for `xy`
    #[inline]
    pub fn dimension(self) -> Option<Dimension> {
        match self {
            Self::X => Some(Dimension::X),
            Self::Y => Some(Dimension::Y),
            Self::Xy => None,
        }
    }

    /// Which dimension a movement is mostly along. Equal magnitudes give `xy`.
    pub fn dominant(movement: Point) -> Self {
        let (ax, ay) = (movement.x.abs(), movement.y.abs());
        if ax > ay {
            Self::X
        } else if ax < ay {
            Self::Y
        } else {
            Self::Xy
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Xy => "xy",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = InteractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "xy" => Ok(Self::Xy),
            other => Err(InteractionError::InvalidAxis(other.to_string())),
        }
    }
}

/// Axis lock requested in options. `Start` defers the choice to the first move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockAxis {
    X,
    Y,
    #[default]
    Xy,
    Start,
}

impl LockAxis {
    /// Concrete axis, or `None` while still waiting for the first move
    pub fn fixed(self) -> Option<Axis> {
        match self {
            Self::X => Some(Axis::X),
            Self::Y => Some(Axis::Y),
            Self::Xy => Some(Axis::Xy),
            Self::Start => None,
        }
    }

    /// Resolve against the first movement. `Start` always picks one
    /// dimension; a tie goes to `x`.
    pub fn resolve(self, first_move: Point) -> Axis {
        match self.fixed() {
            Some(axis) => axis,
            None => match Axis::dominant(first_move) {
                Axis::Y => Axis::Y,
                Axis::X | Axis::Xy => Axis::X,
            },
        }
    }
}

impl From<Axis> for LockAxis {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::X,
            Axis::Y => Self::Y,
            Axis::Xy => Self::Xy,
        }
    }
}

impl FromStr for LockAxis {
    type Err = InteractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            other => other.parse::<Axis>().map(Self::from),
        }
    }
}

/// Direction a drag must begin in to be accepted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartAxis {
    X,
    Y,
    #[default]
    Xy,
}

impl StartAxis {
    /// Whether a first movement along `movement` satisfies this start axis.
    /// A diagonal (`xy`) movement is always accepted.
    pub fn accepts(self, movement: Axis) -> bool {
        match (self, movement) {
            (Self::Xy, _) | (_, Axis::Xy) => true,
            (Self::X, Axis::X) | (Self::Y, Axis::Y) => true,
            _ => false,
        }
    }
}

impl FromStr for StartAxis {
    type Err = InteractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Axis>()? {
            Axis::X => Ok(Self::X),
            Axis::Y => Ok(Self::Y),
            Axis::Xy => Ok(Self::Xy),
        }
    }
}

/// Applies the axis lock to in-flight event fields
pub struct AxisConstraint;

impl AxisConstraint {
    /// Freeze the dimension opposite `axis`.
    ///
    /// Returns the frozen dimension, `None` when `axis` is `xy` and nothing
    /// was touched.
    pub fn apply(
        axis: Axis,
        start: &CoordinateSet,
        page: &mut Point,
        client: &mut Point,
        delta: &mut Point,
    ) -> Option<Dimension> {
        let frozen = axis.dimension()?.opposite();
        page.set(frozen, start.page.get(frozen));
        client.set(frozen, start.client.get(frozen));
        delta.set(frozen, 0.0);
        Some(frozen)
    }

    /// Freeze the dimension opposite `axis` of a coordinate set against `start`
    pub fn freeze_coords(axis: Axis, start: &CoordinateSet, coords: &mut CoordinateSet) {
        if let Some(dim) = axis.dimension() {
            let frozen = dim.opposite();
            coords.page.set(frozen, start.page.get(frozen));
            coords.client.set(frozen, start.client.get(frozen));
        }
    }
}
