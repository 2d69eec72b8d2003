//! Pointer interaction core.
//!
//! Turns a stream of raw pointer events (mouse, touch, pen) into drag, resize,
//! and gesture interactions. The crate owns the pointer lifecycle, keeps the
//! page/client coordinate frames and their deltas consistent, and lets action
//! plugins rewrite in-flight events before they reach the application.
//!
//! ## Architecture
//!
//! ```text
//! PointerEvent -> Scope -> Interaction (coords, phase)
//!                   |         |
//!                   |         +-> SignalBus: before-action-move -> action-move
//!                   |                           (drag / resize / gesture handlers)
//!                   +-> EventSink: dragstart, dragmove, dragend, ...
//! ```
//!
//! - `coords` - Points, coordinate sets, deltas and the delta engine
//! - `axis` - Axis lock types and the constraint policy
//! - `signals` - Ordered named-topic dispatch
//! - `event` - The in-flight `InteractEvent`
//! - `interactable` - Targets and their per-action options
//! - `interaction` - The per-pointer state machine
//! - `actions` - Action plugin contract and the built-in plugins
//! - `scope` - Dispatch context that drives everything above

pub mod actions;
pub mod axis;
pub mod constants;
pub mod coords;
pub mod error;
pub mod event;
pub mod interactable;
pub mod interaction;
pub mod logging;
pub mod perf;
pub mod scope;
pub mod settings;
pub mod signals;

pub use actions::{ActionName, ActionPlugin, ActionRegistry, ActionSet};
pub use axis::{Axis, LockAxis, StartAxis};
pub use coords::{CoordinateSet, Delta, DeltaSet, Merge, Point, Rect};
pub use error::{InteractionError, InteractionResult};
pub use event::{EventLog, EventPhase, EventSink, EventType, InteractEvent};
pub use interactable::{CapabilityArg, Interactable, InteractableId, SurfaceId};
pub use interaction::{
    Interaction, InteractionId, Phase, PointerEvent, PointerId, PointerKind, PointerType,
    PreparedAction,
};
pub use scope::Scope;
pub use settings::InteractionSettings;
pub use signals::{Signal, SignalArgs, SignalBus};
