//! Error types for the interaction core.
//!
//! The move path never fails: skipped handlers, an unset `prepared` action and
//! empty signal topics are normal. Errors are reserved for API misuse (input
//! routed to something that does not exist) and for settings I/O.

use crate::actions::ActionName;
use crate::interactable::InteractableId;
use crate::interaction::{InteractionId, PointerId};
use thiserror::Error;

/// Errors surfaced by `Scope` and the settings loader
#[derive(Error, Debug)]
pub enum InteractionError {
    /// Move/up/cancel for a pointer no interaction owns
    #[error("no interaction owns pointer {0}")]
    UnknownPointer(PointerId),

    /// Pointer down routed without a target interactable
    #[error("pointer {0} went down without a target")]
    MissingTarget(PointerId),

    /// Pointer down on an interactable that was never added
    #[error("unknown interactable {0}")]
    UnknownInteractable(InteractableId),

    /// Cancellation requested for an interaction that already ended
    #[error("unknown interaction {0}")]
    UnknownInteraction(InteractionId),

    /// A prepared action names a plugin that is not in the registry
    #[error("action `{0}` is not registered")]
    ActionNotRegistered(ActionName),

    /// Axis string that is not one of x, y, xy (or start, where allowed)
    #[error("invalid axis: {0}")]
    InvalidAxis(String),

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error from serde_json
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for interaction operations
pub type InteractionResult<T> = Result<T, InteractionError>;
