//! Two-pointer gestures.
//!
//! Distance and angle are taken between the first two pointers of the
//! interaction. `scale` is relative to the distance at gesture start, `ds` and
//! `da` are the change since the previous gesture event. Angles are degrees.

use super::{ActionChecker, ActionName, ActionPlugin};
use crate::constants::GESTURE_POINTERS;
use crate::coords::{Merge, Rect};
use crate::event::GestureEventData;
use crate::interactable::{ActionOptions, Interactable};
use crate::interaction::{Interaction, PreparedAction};
use crate::settings::InteractionSettings;
use crate::signals::{Signal, SignalArgs, SignalBus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureOptions {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureOptionsPatch {
    pub enabled: Option<bool>,
}

impl Merge<GestureOptionsPatch> for GestureOptions {
    fn merge(&mut self, patch: GestureOptionsPatch) {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
    }
}

impl ActionOptions for GestureOptions {
    type Patch = GestureOptionsPatch;

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn patch_enabled(patch: &GestureOptionsPatch) -> Option<bool> {
        patch.enabled
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureState {
    pub start_distance: f64,
    pub start_angle: f64,
    pub prev_distance: f64,
    pub prev_angle: f64,
    pub prev_scale: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Gesture;

impl ActionPlugin for Gesture {
    fn name(&self) -> ActionName {
        ActionName::Gesture
    }

    fn checker(&self) -> ActionChecker {
        check
    }

    fn subscribe(&self, signals: &mut SignalBus) {
        signals.on_action(Signal::ActionStart, ActionName::Gesture, on_start);
        signals.on_action(Signal::ActionMove, ActionName::Gesture, on_move);
        signals.on_action(Signal::ActionEnd, ActionName::Gesture, on_move);
    }
}

fn check(
    interaction: &Interaction,
    interactable: &Interactable,
    _settings: &InteractionSettings,
) -> Option<PreparedAction> {
    (interactable.gesturable().enabled && interaction.pointer_count() >= GESTURE_POINTERS)
        .then(PreparedAction::gesture)
}

/// Distance and angle (degrees) from the first to the second pointer
fn span(interaction: &Interaction) -> Option<(f64, f64)> {
    let mut pages = interaction.pointer_pages();
    let a = pages.next()?;
    let b = pages.next()?;
    let d = b - a;
    Some((d.length(), d.y.atan2(d.x).to_degrees()))
}

/// Fold an angle difference into (-180, 180]
fn normalize_degrees(mut angle: f64) -> f64 {
    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle <= -180.0 {
        angle += 360.0;
    }
    angle
}

fn bounds(interaction: &Interaction) -> Rect {
    Rect::bounding(interaction.pointer_pages()).unwrap_or_default()
}

fn on_start(args: &mut SignalArgs<'_>) {
    let Some((distance, angle)) = span(args.interaction) else {
        args.interaction.clear_prepared();
        return;
    };
    args.interaction.set_gesture_state(Some(GestureState {
        start_distance: distance,
        start_angle: angle,
        prev_distance: distance,
        prev_angle: angle,
        prev_scale: 1.0,
    }));

    let bounds = bounds(args.interaction);
    if let Some(event) = args.event.as_deref_mut() {
        event.gesture = Some(GestureEventData {
            distance,
            angle,
            da: 0.0,
            scale: 1.0,
            ds: 0.0,
            bounds,
        });
    }
}

fn on_move(args: &mut SignalArgs<'_>) {
    let current = span(args.interaction);
    let bounds = bounds(args.interaction);
    let Some(state) = args.interaction.gesture_state_mut() else {
        return;
    };

    // A pointer already lifted: report the last known values
    let (distance, angle) = current.unwrap_or((state.prev_distance, state.prev_angle));
    let scale = if state.start_distance > 0.0 {
        distance / state.start_distance
    } else {
        state.prev_scale
    };

    let data = GestureEventData {
        distance,
        angle,
        da: normalize_degrees(angle - state.prev_angle),
        scale,
        ds: scale - state.prev_scale,
        bounds,
    };
    state.prev_distance = distance;
    state.prev_angle = angle;
    state.prev_scale = scale;

    if let Some(event) = args.event.as_deref_mut() {
        event.gesture = Some(data);
    }
}
