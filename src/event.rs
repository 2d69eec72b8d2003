//! In-flight interaction events and the application-facing sink.
//!
//! An `InteractEvent` is built from the interaction's coordinates, handed
//! through the action signal handlers (which may rewrite it), and finally
//! emitted to the `EventSink` as `dragstart`, `dragmove`, `dragend` and so on.

use crate::actions::ActionName;
use crate::axis::Axis;
use crate::constants::{SWIPE_ANGLE_OVERLAP, SWIPE_MAX_GAP_MS, SWIPE_MIN_SPEED};
use crate::coords::{Edges, Point, Rect};
use crate::interactable::InteractableId;
use crate::interaction::{Interaction, InteractionId, PointerType};
use crate::settings::{DeltaSource, InteractionSettings};
use serde::{Serialize, Serializer};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Lifecycle phase of an action event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventPhase {
    Start,
    Move,
    End,
}

impl EventPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Move => "move",
            Self::End => "end",
        }
    }
}

/// Action + phase, displayed as `dragmove`, `resizeend`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventType {
    pub action: ActionName,
    pub phase: EventPhase,
}

impl EventType {
    pub fn new(action: ActionName, phase: EventPhase) -> Self {
        Self { action, phase }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.action.as_str(), self.phase.as_str())
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Resize-specific event fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResizeEventData {
    pub edges: Edges,
    pub rect: Rect,
    pub delta_rect: Rect,
}

/// Gesture-specific event fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GestureEventData {
    pub distance: f64,
    /// Degrees
    pub angle: f64,
    pub da: f64,
    pub scale: f64,
    pub ds: f64,
    pub bounds: Rect,
}

/// Direction flags of a fast release
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Swipe {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub angle: f64,
    pub speed: f64,
    pub velocity: Point,
}

impl Swipe {
    /// Classify a release velocity. `None` when too slow.
    pub fn from_velocity(velocity: Point, speed: f64) -> Option<Self> {
        if speed < SWIPE_MIN_SPEED {
            return None;
        }
        let mut angle = velocity.y.atan2(velocity.x).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        let o = SWIPE_ANGLE_OVERLAP;
        let left = (135.0 - o..225.0 + o).contains(&angle);
        let up = (225.0 - o..315.0 + o).contains(&angle);
        let right = angle >= 315.0 - o || angle < 45.0 + o;
        let down = (45.0 - o..135.0 + o).contains(&angle);
        Some(Self { up, down, left, right, angle, speed, velocity })
    }
}

/// The in-flight event (`iEvent`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub interaction: InteractionId,
    pub target: InteractableId,
    pub pointer_type: PointerType,
    pub page: Point,
    pub client: Point,
    pub start_page: Point,
    pub start_client: Point,
    /// Change since the previous event of this interaction
    pub delta: Point,
    pub velocity: Point,
    pub speed: f64,
    pub timestamp: f64,
    /// Timestamp of the pointer down that began the interaction
    pub t0: f64,
    pub dt: f64,
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize: Option<ResizeEventData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gesture: Option<GestureEventData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe: Option<Swipe>,
}

impl InteractEvent {
    /// Event with every coordinate at zero
    pub fn new(event_type: EventType, interaction: InteractionId, target: InteractableId) -> Self {
        Self {
            event_type,
            interaction,
            target,
            pointer_type: PointerType::default(),
            page: Point::ZERO,
            client: Point::ZERO,
            start_page: Point::ZERO,
            start_client: Point::ZERO,
            delta: Point::ZERO,
            velocity: Point::ZERO,
            speed: 0.0,
            timestamp: 0.0,
            t0: 0.0,
            dt: 0.0,
            duration: 0.0,
            axis: None,
            resize: None,
            gesture: None,
            swipe: None,
        }
    }

    /// Build the unconstrained event for `phase` from the interaction's
    /// coordinates. Handlers constrain it afterwards.
    pub fn from_interaction(
        interaction: &Interaction,
        action: ActionName,
        phase: EventPhase,
        settings: &InteractionSettings,
    ) -> Self {
        let cur = interaction.cur_coords();
        let start = interaction.start_coords();
        let pointer_delta = interaction.pointer_delta();

        let mut event = Self::new(EventType::new(action, phase), interaction.id(), interaction.target());
        event.pointer_type = interaction.pointer_type();

        // Start events sit at the start position so the first move carries the
        // whole distance. End events repeat the last reported position.
        let (page, client, timestamp) = match (phase, interaction.prev_event()) {
            (EventPhase::Start, _) => (start.page, start.client, start.timestamp),
            (EventPhase::End, Some(prev)) => (prev.page, prev.client, cur.timestamp),
            _ => (cur.page, cur.client, cur.timestamp),
        };
        event.page = page;
        event.client = client;
        event.start_page = start.page;
        event.start_client = start.client;
        event.timestamp = timestamp;
        event.t0 = interaction.down_time();
        event.duration = timestamp - interaction.down_time();

        let frame = match settings.delta_source {
            DeltaSource::Page => &pointer_delta.page,
            DeltaSource::Client => &pointer_delta.client,
        };
        event.velocity = frame.velocity();
        event.speed = frame.speed;

        if let (EventPhase::Move | EventPhase::End, Some(prev)) = (phase, interaction.prev_event()) {
            event.delta = match settings.delta_source {
                DeltaSource::Page => event.page - prev.page,
                DeltaSource::Client => event.client - prev.client,
            };
            event.dt = event.timestamp - prev.timestamp;
        }

        if phase == EventPhase::End {
            event.swipe = interaction.prev_event().and_then(|prev| {
                if event.timestamp - prev.timestamp > SWIPE_MAX_GAP_MS {
                    return None;
                }
                Swipe::from_velocity(prev.velocity, prev.speed)
            });
        }

        event
    }
}

/// Receives finalized events after every handler has run
pub trait EventSink {
    fn emit(&mut self, event: &InteractEvent);
}

impl<F: FnMut(&InteractEvent)> EventSink for F {
    fn emit(&mut self, event: &InteractEvent) {
        self(event)
    }
}

/// Recording sink. Clones share the same log, so keep one and hand the other
/// to the scope.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<InteractEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<InteractEvent> {
        self.events.borrow().clone()
    }

    /// Event type names in emission order
    pub fn types(&self) -> Vec<String> {
        self.events.borrow().iter().map(|e| e.event_type.to_string()).collect()
    }

    pub fn last(&self) -> Option<InteractEvent> {
        self.events.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &InteractEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
