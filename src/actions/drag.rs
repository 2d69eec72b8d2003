//! Drag action.
//!
//! ## Handlers
//!
//! - `action-start`: resolves `lock_axis: start` against the first movement and
//!   vetoes the drag when the movement does not match `start_axis`
//! - `before-action-move`: freezes the locked-out dimension of `cur_coords`
//! - `action-move` / `action-end`: applies the axis constraint to the event

use super::{ActionChecker, ActionName, ActionPlugin};
use crate::axis::{Axis, AxisConstraint, LockAxis, StartAxis};
use crate::coords::Merge;
use crate::interactable::{ActionOptions, Interactable};
use crate::interaction::{Interaction, PreparedAction};
use crate::settings::InteractionSettings;
use crate::signals::{Signal, SignalArgs, SignalBus};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragOptions {
    pub enabled: bool,
    /// Legacy single-axis setting, used when `lock_axis` is `xy`
    pub axis: Axis,
    pub lock_axis: LockAxis,
    pub start_axis: StartAxis,
}

impl DragOptions {
    /// Lock the drag will be prepared with
    pub fn effective_lock(&self) -> LockAxis {
        match self.lock_axis {
            LockAxis::Xy => self.axis.into(),
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragOptionsPatch {
    pub enabled: Option<bool>,
    pub axis: Option<Axis>,
    pub lock_axis: Option<LockAxis>,
    pub start_axis: Option<StartAxis>,
}

impl Merge<DragOptionsPatch> for DragOptions {
    fn merge(&mut self, patch: DragOptionsPatch) {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(axis) = patch.axis {
            self.axis = axis;
        }
        if let Some(lock_axis) = patch.lock_axis {
            self.lock_axis = lock_axis;
        }
        if let Some(start_axis) = patch.start_axis {
            self.start_axis = start_axis;
        }
    }
}

impl ActionOptions for DragOptions {
    type Patch = DragOptionsPatch;

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn patch_enabled(patch: &DragOptionsPatch) -> Option<bool> {
        patch.enabled
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Drag;

impl ActionPlugin for Drag {
    fn name(&self) -> ActionName {
        ActionName::Drag
    }

    fn checker(&self) -> ActionChecker {
        check
    }

    fn subscribe(&self, signals: &mut SignalBus) {
        signals.on_action(Signal::ActionStart, ActionName::Drag, on_start);
        signals.on_action(Signal::BeforeActionMove, ActionName::Drag, before_move);
        signals.on_action(Signal::ActionMove, ActionName::Drag, constrain_event);
        signals.on_action(Signal::ActionEnd, ActionName::Drag, constrain_event);
    }
}

fn check(
    _interaction: &Interaction,
    interactable: &Interactable,
    _settings: &InteractionSettings,
) -> Option<PreparedAction> {
    let options = interactable.draggable();
    options
        .enabled
        .then(|| PreparedAction::drag(options.effective_lock()))
}

fn on_start(args: &mut SignalArgs<'_>) {
    let Some(options) = args.interactable.map(|i| *i.draggable()) else {
        return;
    };
    let movement = args.interaction.pointer_delta().client.offset();
    let movement_axis = Axis::dominant(movement);

    if !options.start_axis.accepts(movement_axis) {
        debug!(
            interaction = %args.interaction.id(),
            start_axis = ?options.start_axis,
            movement = %movement_axis,
            "Drag start direction rejected"
        );
        args.interaction.clear_prepared();
        return;
    }

    let Some(prepared) = args.interaction.prepared_mut() else {
        return;
    };
    let axis = prepared.axis.resolve(movement);
    prepared.axis = axis.into();

    if let Some(event) = args.event.as_deref_mut() {
        event.axis = Some(axis);
    }
}

fn before_move(args: &mut SignalArgs<'_>) {
    let Some(axis) = args.interaction.prepared().and_then(|p| p.axis.fixed()) else {
        return;
    };
    let start = *args.interaction.start_coords();
    AxisConstraint::freeze_coords(axis, &start, args.interaction.cur_coords_mut());
}

fn constrain_event(args: &mut SignalArgs<'_>) {
    let Some(axis) = args.interaction.prepared().and_then(|p| p.axis.fixed()) else {
        trace!(interaction = %args.interaction.id(), "Drag axis unresolved, event left as is");
        return;
    };
    let start = *args.interaction.start_coords();
    let Some(event) = args.event.as_deref_mut() else {
        return;
    };

    if let Some(frozen) = AxisConstraint::apply(
        axis,
        &start,
        &mut event.page,
        &mut event.client,
        &mut event.delta,
    ) {
        event.velocity.set(frozen, 0.0);
        event.speed = event.velocity.get(frozen.opposite()).abs();
    }
    event.axis = Some(axis);
}
