//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestScopeBuilder` - Builder for a scope with one configured interactable
//! - `TestScope` - The built fixture with pointer shorthands and the event log
//! - `pointer()` / `touch()` - Pointer event constructors

#![allow(dead_code)]

use pointer_interactions::actions::{DragOptionsPatch, ResizeOptionsPatch};
use pointer_interactions::coords::point;
use pointer_interactions::{
    ActionSet, EventLog, InteractEvent, InteractableId, InteractionId, InteractionSettings,
    PointerEvent, PointerId, PointerKind, PointerType, Rect, Scope, SurfaceId,
};

/// Client coordinates are page coordinates minus this scroll offset
pub const SCROLL: (f64, f64) = (0.0, 50.0);

// ============================================================================
// Pointer events
// ============================================================================

/// Mouse event at page `(x, y)`
pub fn pointer(kind: PointerKind, id: u32, x: f64, y: f64, t: f64) -> PointerEvent {
    PointerEvent::new(
        kind,
        PointerId(id),
        point(x, y),
        point(x - SCROLL.0, y - SCROLL.1),
        t,
    )
}

/// Touch event at page `(x, y)`
pub fn touch(kind: PointerKind, id: u32, x: f64, y: f64, t: f64) -> PointerEvent {
    pointer(kind, id, x, y, t).with_pointer_type(PointerType::Touch)
}

// ============================================================================
// TestScopeBuilder
// ============================================================================

/// Builder for a scope with the default actions and one interactable.
///
/// # Example
/// ```ignore
/// let mut t = TestScopeBuilder::new()
///     .with_drag(DragOptionsPatch::default())
///     .build();
/// t.down(1, 0.0, 0.0, 0.0);
/// ```
pub struct TestScopeBuilder {
    settings: InteractionSettings,
    capabilities: ActionSet,
    drag: Option<DragOptionsPatch>,
    resize: Option<ResizeOptionsPatch>,
    gesture: bool,
    rect: Option<Rect>,
}

impl Default for TestScopeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScopeBuilder {
    pub fn new() -> Self {
        Self {
            settings: InteractionSettings::default(),
            capabilities: ActionSet::ALL,
            drag: None,
            resize: None,
            gesture: false,
            rect: None,
        }
    }

    pub fn with_settings(mut self, settings: InteractionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_capabilities(mut self, capabilities: ActionSet) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Enable drag with `patch` applied
    pub fn with_drag(mut self, patch: DragOptionsPatch) -> Self {
        self.drag = Some(patch);
        self
    }

    /// Enable resize with `patch` applied on a target occupying `rect`
    pub fn with_resize(mut self, patch: ResizeOptionsPatch, rect: Rect) -> Self {
        self.resize = Some(patch);
        self.rect = Some(rect);
        self
    }

    pub fn with_gesture(mut self) -> Self {
        self.gesture = true;
        self
    }

    pub fn build(self) -> TestScope {
        let mut scope = Scope::with_default_actions(self.settings);
        let log = EventLog::new();
        scope.set_sink(log.clone());

        let target = scope.add_interactable(SurfaceId(1), self.capabilities);
        let interactable = scope
            .interactable_mut(target)
            .expect("interactable was just added");
        interactable.set_rect(self.rect);
        if let Some(patch) = self.drag {
            interactable.set_draggable(patch);
        }
        if let Some(patch) = self.resize {
            interactable.set_resizable(patch);
        }
        if self.gesture {
            interactable.set_gesturable(true);
        }

        TestScope { scope, log, target }
    }
}

// ============================================================================
// TestScope
// ============================================================================

pub struct TestScope {
    pub scope: Scope,
    pub log: EventLog,
    pub target: InteractableId,
}

impl TestScope {
    pub fn down(&mut self, id: u32, x: f64, y: f64, t: f64) -> InteractionId {
        self.scope
            .pointer_down(&pointer(PointerKind::Down, id, x, y, t), self.target, None)
            .expect("pointer down")
    }

    pub fn touch_down(&mut self, id: u32, x: f64, y: f64, t: f64) -> InteractionId {
        self.scope
            .pointer_down(&touch(PointerKind::Down, id, x, y, t), self.target, None)
            .expect("touch down")
    }

    pub fn move_to(&mut self, id: u32, x: f64, y: f64, t: f64) -> InteractionId {
        self.scope
            .pointer_move(&pointer(PointerKind::Move, id, x, y, t))
            .expect("pointer move")
    }

    pub fn touch_move(&mut self, id: u32, x: f64, y: f64, t: f64) -> InteractionId {
        self.scope
            .pointer_move(&touch(PointerKind::Move, id, x, y, t))
            .expect("touch move")
    }

    pub fn up(&mut self, id: u32, x: f64, y: f64, t: f64) -> InteractionId {
        self.scope
            .pointer_up(&pointer(PointerKind::Up, id, x, y, t))
            .expect("pointer up")
    }

    pub fn touch_up(&mut self, id: u32, x: f64, y: f64, t: f64) -> InteractionId {
        self.scope
            .pointer_up(&touch(PointerKind::Up, id, x, y, t))
            .expect("touch up")
    }

    pub fn types(&self) -> Vec<String> {
        self.log.types()
    }

    pub fn last_event(&self) -> InteractEvent {
        self.log.last().expect("at least one event")
    }

    /// Events whose type name equals `name`
    pub fn events_named(&self, name: &str) -> Vec<InteractEvent> {
        self.log
            .events()
            .into_iter()
            .filter(|e| e.event_type.to_string() == name)
            .collect()
    }
}
