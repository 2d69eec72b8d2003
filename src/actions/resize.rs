//! Resize action.
//!
//! The target's rect is snapshotted when the resize starts. Each move shifts
//! the grabbed edges by the event delta and reports the resulting rect and how
//! much each edge moved since the previous event (`delta_rect`).
//!
//! With `invert: none` the rect never turns inside out: an edge dragged past
//! its opposite edge is clamped there. `reposition` swaps crossed edges,
//! `negate` lets width/height go negative.

use super::{ActionChecker, ActionName, ActionPlugin};
use crate::coords::{Edges, Merge, Rect};
use crate::event::ResizeEventData;
use crate::interactable::{ActionOptions, Interactable};
use crate::interaction::{Interaction, PreparedAction};
use crate::settings::InteractionSettings;
use crate::signals::{Signal, SignalArgs, SignalBus};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Invert {
    #[default]
    None,
    Negate,
    Reposition,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeOptions {
    pub enabled: bool,
    /// Edges that can be grabbed. `None` means the bottom-right corner.
    pub edges: Option<Edges>,
    /// Grab distance; falls back to the settings' per-pointer-type margin
    pub margin: Option<f64>,
    pub square: bool,
    pub preserve_aspect_ratio: bool,
    pub invert: Invert,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeOptionsPatch {
    pub enabled: Option<bool>,
    pub edges: Option<Edges>,
    pub margin: Option<f64>,
    pub square: Option<bool>,
    pub preserve_aspect_ratio: Option<bool>,
    pub invert: Option<Invert>,
}

impl Merge<ResizeOptionsPatch> for ResizeOptions {
    fn merge(&mut self, patch: ResizeOptionsPatch) {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(edges) = patch.edges {
            self.edges = Some(edges);
        }
        if let Some(margin) = patch.margin {
            self.margin = Some(margin);
        }
        if let Some(square) = patch.square {
            self.square = square;
        }
        if let Some(preserve) = patch.preserve_aspect_ratio {
            self.preserve_aspect_ratio = preserve;
        }
        if let Some(invert) = patch.invert {
            self.invert = invert;
        }
    }
}

impl ActionOptions for ResizeOptions {
    type Patch = ResizeOptionsPatch;

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn patch_enabled(patch: &ResizeOptionsPatch) -> Option<bool> {
        patch.enabled
    }
}

/// Per-interaction resize bookkeeping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeState {
    pub start: Rect,
    /// Edges moved by raw deltas, may be crossed
    pub current: Rect,
    /// `current` after the invert policy; this is what events report
    pub inverted: Rect,
    pub previous: Rect,
    /// width / height at start (1 when square)
    pub aspect_ratio: f64,
    /// Edges the pointer grabbed
    pub edges: Edges,
    /// Edges actually moved; widened when the aspect ratio is kept
    pub linked_edges: Edges,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Resize;

impl ActionPlugin for Resize {
    fn name(&self) -> ActionName {
        ActionName::Resize
    }

    fn checker(&self) -> ActionChecker {
        check
    }

    fn subscribe(&self, signals: &mut SignalBus) {
        signals.on_action(Signal::ActionStart, ActionName::Resize, on_start);
        signals.on_action(Signal::ActionMove, ActionName::Resize, on_move);
        signals.on_action(Signal::ActionEnd, ActionName::Resize, on_move);
    }
}

/// Which of `wanted` edges of `rect` lie within `margin` of `at`
pub fn edges_at(rect: &Rect, at: crate::coords::Point, wanted: Edges, margin: f64) -> Edges {
    let in_x_span = at.x >= rect.left - margin && at.x <= rect.right + margin;
    let in_y_span = at.y >= rect.top - margin && at.y <= rect.bottom + margin;
    if !(in_x_span && in_y_span) {
        return Edges::NONE;
    }
    Edges {
        left: wanted.left && (at.x - rect.left).abs() <= margin,
        right: wanted.right && (at.x - rect.right).abs() <= margin,
        top: wanted.top && (at.y - rect.top).abs() <= margin,
        bottom: wanted.bottom && (at.y - rect.bottom).abs() <= margin,
    }
}

fn check(
    interaction: &Interaction,
    interactable: &Interactable,
    settings: &InteractionSettings,
) -> Option<PreparedAction> {
    let options = interactable.resizable();
    if !options.enabled {
        return None;
    }
    let rect = interactable.rect()?;
    let margin = options
        .margin
        .unwrap_or_else(|| settings.resize_margin(interaction.pointer_type()));
    let wanted = options.edges.unwrap_or(Edges::BOTTOM_RIGHT);

    // Hit test where the pointer went down, not where it has moved to
    let edges = edges_at(&rect, interaction.start_coords().page, wanted, margin);
    edges.any().then(|| PreparedAction::resize(edges))
}

/// Edges moved together when the aspect ratio is kept: a lone horizontal
/// edge drags the bottom along, a lone vertical edge drags the right.
fn link_edges(edges: Edges) -> Edges {
    let mut linked = edges;
    if edges.horizontal() && !edges.vertical() {
        linked.bottom = true;
    } else if edges.vertical() && !edges.horizontal() {
        linked.right = true;
    }
    linked
}

fn on_start(args: &mut SignalArgs<'_>) {
    let Some(interactable) = args.interactable else {
        return;
    };
    let Some(rect) = interactable.rect() else {
        warn!(interaction = %args.interaction.id(), "Resize needs the target rect; not starting");
        args.interaction.clear_prepared();
        return;
    };
    let Some(edges) = args.interaction.prepared().map(|p| p.edges) else {
        return;
    };
    let options = interactable.resizable();

    // A flat rect has no usable ratio
    let ratio = rect.width() / rect.height();
    let aspect_ratio = if options.square || !ratio.is_finite() || ratio == 0.0 {
        1.0
    } else {
        ratio
    };
    let linked_edges = if options.square || options.preserve_aspect_ratio {
        link_edges(edges)
    } else {
        edges
    };

    args.interaction.set_resize_state(Some(ResizeState {
        start: rect,
        current: rect,
        inverted: rect,
        previous: rect,
        aspect_ratio,
        edges,
        linked_edges,
    }));

    if let Some(event) = args.event.as_deref_mut() {
        event.resize = Some(ResizeEventData {
            edges,
            rect,
            delta_rect: Rect::default(),
        });
    }
}

fn on_move(args: &mut SignalArgs<'_>) {
    let Some(options) = args.interactable.map(|i| *i.resizable()) else {
        return;
    };
    let Some(event) = args.event.as_deref_mut() else {
        return;
    };
    let Some(state) = args.interaction.resize_state_mut() else {
        return;
    };

    let keep_ratio = options.square || options.preserve_aspect_ratio;
    let original = state.edges;
    let mut d = event.delta;

    if keep_ratio {
        let ratio = state.aspect_ratio;
        if (original.left && original.bottom) || (original.right && original.top) {
            d.y = -d.x / ratio;
        } else if original.horizontal() {
            d.y = d.x / ratio;
        } else if original.vertical() {
            d.x = d.y * ratio;
        }
    }

    let edges = if keep_ratio { state.linked_edges } else { original };
    state.previous = state.inverted;

    if edges.top {
        state.current.top += d.y;
    }
    if edges.bottom {
        state.current.bottom += d.y;
    }
    if edges.left {
        state.current.left += d.x;
    }
    if edges.right {
        state.current.right += d.x;
    }

    match options.invert {
        Invert::Negate => state.inverted = state.current,
        Invert::Reposition => {
            let mut r = state.current;
            if r.top > r.bottom {
                std::mem::swap(&mut r.top, &mut r.bottom);
            }
            if r.left > r.right {
                std::mem::swap(&mut r.left, &mut r.right);
            }
            state.inverted = r;
        }
        Invert::None => {
            let (cur, start) = (state.current, state.start);
            state.inverted = Rect::new(
                cur.left.min(start.right),
                cur.top.min(start.bottom),
                cur.right.max(start.left),
                cur.bottom.max(start.top),
            );
        }
    }

    event.resize = Some(ResizeEventData {
        edges: original,
        rect: state.inverted,
        delta_rect: state.inverted.edge_delta(&state.previous),
    });
}
