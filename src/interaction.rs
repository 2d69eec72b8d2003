//! Interaction state machine - one in-flight gesture session.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Down        (pointer down bound to an interactable)
//! Down -> Moving      (first move beyond the move tolerance)
//! Moving -> Ending    (pointer up while an action is running)
//! Ending -> Idle      (after the end event is emitted)
//! Down -> Down        (pointer set changed; start coords re-snapshotted)
//!
//! Any -> Idle         (cancel - no end event, nothing committed)
//! ```
//!
//! The interaction owns its coordinate sets and updates them in place. With
//! several pointers, `cur_coords` is their average.

use crate::actions::{ActionName, GestureState, ResizeState};
use crate::axis::LockAxis;
use crate::coords::{CoordinateSet, DeltaEngine, DeltaSet, Edges, Point};
use crate::event::InteractEvent;
use crate::interactable::InteractableId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a pointer from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointerId(pub u32);

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to an interaction owned by a `Scope`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct InteractionId(u64);

impl InteractionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    #[default]
    Mouse,
    Touch,
    Pen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Normalized pointer input from the binding layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pointer_id: PointerId,
    #[serde(default)]
    pub pointer_type: PointerType,
    pub page: Point,
    pub client: Point,
    /// Milliseconds
    pub timestamp: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, pointer_id: PointerId, page: Point, client: Point, timestamp: f64) -> Self {
        Self {
            kind,
            pointer_id,
            pointer_type: PointerType::Mouse,
            page,
            client,
            timestamp,
        }
    }

    pub fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }

    pub fn coords(&self) -> CoordinateSet {
        CoordinateSet::new(self.page, self.client, self.timestamp)
    }
}

/// The action an interaction will perform once it starts moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedAction {
    pub name: ActionName,
    /// Axis lock. `Start` is resolved on the first move.
    #[serde(default)]
    pub axis: LockAxis,
    /// Edges being resized
    #[serde(default)]
    pub edges: Edges,
}

impl PreparedAction {
    pub fn new(name: ActionName) -> Self {
        Self {
            name,
            axis: LockAxis::Xy,
            edges: Edges::NONE,
        }
    }

    pub fn drag(axis: LockAxis) -> Self {
        Self { axis, ..Self::new(ActionName::Drag) }
    }

    pub fn resize(edges: Edges) -> Self {
        Self { edges, ..Self::new(ActionName::Resize) }
    }

    pub fn gesture() -> Self {
        Self::new(ActionName::Gesture)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Down,
    Moving,
    Ending,
}

/// A pointer taking part in an interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub id: PointerId,
    pub pointer_type: PointerType,
    pub coords: CoordinateSet,
}

#[derive(Debug, Clone)]
pub struct Interaction {
    id: InteractionId,
    target: InteractableId,
    phase: Phase,
    pointers: Vec<PointerState>,
    prepared: Option<PreparedAction>,
    start_coords: CoordinateSet,
    prev_coords: CoordinateSet,
    cur_coords: CoordinateSet,
    pointer_delta: DeltaSet,
    down_time: f64,
    prev_event: Option<InteractEvent>,
    resize_state: Option<ResizeState>,
    gesture_state: Option<GestureState>,
}

impl Interaction {
    /// Idle interaction with no pointers
    pub fn new(id: InteractionId, target: InteractableId) -> Self {
        Self {
            id,
            target,
            phase: Phase::Idle,
            pointers: Vec::new(),
            prepared: None,
            start_coords: CoordinateSet::default(),
            prev_coords: CoordinateSet::default(),
            cur_coords: CoordinateSet::default(),
            pointer_delta: DeltaSet::default(),
            down_time: 0.0,
            prev_event: None,
            resize_state: None,
            gesture_state: None,
        }
    }

    #[inline]
    pub fn id(&self) -> InteractionId {
        self.id
    }

    #[inline]
    pub fn target(&self) -> InteractableId {
        self.target
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn is_down(&self) -> bool {
        self.phase == Phase::Down
    }

    pub fn is_moving(&self) -> bool {
        self.phase == Phase::Moving
    }

    /// Returns true if an action has started and not yet ended
    pub fn is_interacting(&self) -> bool {
        matches!(self.phase, Phase::Moving | Phase::Ending) && self.prepared.is_some()
    }

    // ------------------------------------------------------------------------
    // Prepared action
    // ------------------------------------------------------------------------

    pub fn prepared(&self) -> Option<&PreparedAction> {
        self.prepared.as_ref()
    }

    pub fn prepared_mut(&mut self) -> Option<&mut PreparedAction> {
        self.prepared.as_mut()
    }

    pub fn set_prepared(&mut self, prepared: Option<PreparedAction>) {
        self.prepared = prepared;
    }

    /// Drop the prepared action. Used by plugins to veto a start.
    pub fn clear_prepared(&mut self) {
        self.prepared = None;
    }

    // ------------------------------------------------------------------------
    // Coordinates
    // ------------------------------------------------------------------------

    pub fn start_coords(&self) -> &CoordinateSet {
        &self.start_coords
    }

    pub fn start_coords_mut(&mut self) -> &mut CoordinateSet {
        &mut self.start_coords
    }

    pub fn cur_coords(&self) -> &CoordinateSet {
        &self.cur_coords
    }

    pub fn cur_coords_mut(&mut self) -> &mut CoordinateSet {
        &mut self.cur_coords
    }

    pub fn prev_coords(&self) -> &CoordinateSet {
        &self.prev_coords
    }

    pub fn pointer_delta(&self) -> &DeltaSet {
        &self.pointer_delta
    }

    pub fn pointer_delta_mut(&mut self) -> &mut DeltaSet {
        &mut self.pointer_delta
    }

    /// Timestamp of the pointer down that started this session
    pub fn down_time(&self) -> f64 {
        self.down_time
    }

    /// Last event emitted for the running action
    pub fn prev_event(&self) -> Option<&InteractEvent> {
        self.prev_event.as_ref()
    }

    pub fn set_prev_event(&mut self, event: InteractEvent) {
        self.prev_event = Some(event);
    }

    /// Client-space distance between the current and start positions
    pub fn distance_from_start(&self) -> f64 {
        (self.cur_coords.client - self.start_coords.client).length()
    }

    // ------------------------------------------------------------------------
    // Pointers
    // ------------------------------------------------------------------------

    pub fn pointers(&self) -> &[PointerState] {
        &self.pointers
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn has_pointer(&self, id: PointerId) -> bool {
        self.pointers.iter().any(|p| p.id == id)
    }

    /// Type of the first pointer, mouse when there is none
    pub fn pointer_type(&self) -> PointerType {
        self.pointers.first().map(|p| p.pointer_type).unwrap_or_default()
    }

    /// Page positions of every pointer, in arrival order
    pub fn pointer_pages(&self) -> impl Iterator<Item = Point> + '_ {
        self.pointers.iter().map(|p| p.coords.page)
    }

    /// Add a pressed pointer. From `Idle` this starts the session. Otherwise
    /// the pointer set changed, so the session falls back to `Down` and the
    /// start coordinates are taken again.
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        if let Some(existing) = self.pointers.iter_mut().find(|p| p.id == event.pointer_id) {
            existing.coords = event.coords();
        } else {
            self.pointers.push(PointerState {
                id: event.pointer_id,
                pointer_type: event.pointer_type,
                coords: event.coords(),
            });
        }

        if self.phase == Phase::Idle {
            self.down_time = event.timestamp;
        }
        self.phase = Phase::Down;
        self.refresh_cur_coords(event.timestamp);
        self.snapshot_start();
    }

    /// Record a pointer's new position and recompute `cur_coords`.
    /// Returns false if the pointer is not part of this interaction.
    ///
    /// `prev_coords` comes from the raw pointer positions, so axis freezing
    /// applied to `cur_coords` never shows up as movement in `pointer_delta`.
    pub fn update_pointer(&mut self, event: &PointerEvent) -> bool {
        let Some(index) = self.pointers.iter().position(|p| p.id == event.pointer_id) else {
            return false;
        };
        let prev = self.raw_coords(self.cur_coords.timestamp);
        self.prev_coords.copy_from(&prev);
        self.pointers[index].coords = event.coords();
        self.refresh_cur_coords(event.timestamp);
        true
    }

    /// Remove a pointer. Returns how many remain.
    pub fn remove_pointer(&mut self, id: PointerId) -> usize {
        self.pointers.retain(|p| p.id != id);
        self.pointers.len()
    }

    /// Average of the pressed pointers, falling back to `cur_coords` per
    /// frame when there are none
    fn raw_coords(&self, timestamp: f64) -> CoordinateSet {
        let mut coords = self.cur_coords;
        if let Some(page) = Point::average(self.pointers.iter().map(|p| p.coords.page)) {
            coords.page = page;
        }
        if let Some(client) = Point::average(self.pointers.iter().map(|p| p.coords.client)) {
            coords.client = client;
        }
        coords.timestamp = timestamp;
        coords
    }

    fn refresh_cur_coords(&mut self, timestamp: f64) {
        let raw = self.raw_coords(timestamp);
        self.cur_coords.copy_from(&raw);
    }

    /// Recompute `pointer_delta` from start/prev/cur
    pub fn update_pointer_delta(&mut self, min_dt_secs: f64) {
        DeltaEngine::update_pointer_delta(
            &mut self.pointer_delta,
            &self.start_coords,
            &self.prev_coords,
            &self.cur_coords,
            min_dt_secs,
        );
    }

    /// Take `cur_coords` as the new start and zero the deltas
    pub fn snapshot_start(&mut self) {
        self.start_coords.copy_from(&self.cur_coords);
        self.prev_coords.copy_from(&self.cur_coords);
        self.pointer_delta.clear();
    }

    // ------------------------------------------------------------------------
    // Plugin state
    // ------------------------------------------------------------------------

    pub fn resize_state(&self) -> Option<&ResizeState> {
        self.resize_state.as_ref()
    }

    pub fn resize_state_mut(&mut self) -> Option<&mut ResizeState> {
        self.resize_state.as_mut()
    }

    pub fn set_resize_state(&mut self, state: Option<ResizeState>) {
        self.resize_state = state;
    }

    pub fn gesture_state(&self) -> Option<&GestureState> {
        self.gesture_state.as_ref()
    }

    pub fn gesture_state_mut(&mut self) -> Option<&mut GestureState> {
        self.gesture_state.as_mut()
    }

    pub fn set_gesture_state(&mut self, state: Option<GestureState>) {
        self.gesture_state = state;
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Down -> Moving
    pub fn begin_moving(&mut self) {
        if self.phase == Phase::Down {
            self.phase = Phase::Moving;
        }
    }

    /// Moving -> Ending
    pub fn begin_ending(&mut self) {
        if self.phase == Phase::Moving {
            self.phase = Phase::Ending;
        }
    }

    /// Some pointers are still pressed after the action ended: back to `Down`
    /// with a fresh start so the next move resolves a new action.
    pub fn rearm(&mut self, timestamp: f64) {
        self.clear_action();
        self.phase = Phase::Down;
        self.refresh_cur_coords(timestamp);
        self.snapshot_start();
    }

    /// Back to `Idle`, clearing everything tied to the session
    pub fn reset(&mut self) {
        self.clear_action();
        self.phase = Phase::Idle;
        self.pointers.clear();
        self.start_coords.clear();
        self.prev_coords.clear();
        self.cur_coords.clear();
        self.pointer_delta.clear();
        self.down_time = 0.0;
    }

    fn clear_action(&mut self) {
        self.prepared = None;
        self.prev_event = None;
        self.resize_state = None;
        self.gesture_state = None;
    }
}
