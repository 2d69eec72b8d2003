//! Dispatch context.
//!
//! A `Scope` owns the signal bus, the action registry, every interactable and
//! every live interaction. Pointer input enters through `pointer_down`,
//! `pointer_move`, `pointer_up` and `pointer_cancel` (or `dispatch`), is routed
//! to the interaction that owns the pointer, and leaves as `InteractEvent`s
//! handed to the `EventSink`.
//!
//! ## Move pipeline
//!
//! ```text
//! update coords -> pointer delta -> `move`
//!   Down, beyond tolerance: resolve prepared -> `action-start` -> emit <action>start
//!   Moving + prepared:      `before-action-move` -> build event -> `action-move`
//!                           -> `after-action-move` -> emit <action>move
//! ```
//!
//! On release the running action gets `action-end` and an `<action>end`
//! event. Cancellation skips both.

use crate::actions::{ActionName, ActionPlugin, ActionRegistry, ActionSet, Drag, Gesture, Resize};
use crate::constants::GESTURE_POINTERS;
use crate::error::{InteractionError, InteractionResult};
use crate::event::{EventPhase, EventSink, InteractEvent};
use crate::interactable::{Interactable, InteractableId, SurfaceId};
use crate::interaction::{
    Interaction, InteractionId, Phase, PointerEvent, PointerId, PointerKind, PointerType,
    PreparedAction,
};
use crate::profile_scope;
use crate::settings::InteractionSettings;
use crate::signals::{Signal, SignalArgs, SignalBus};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace, warn};

pub struct Scope {
    signals: SignalBus,
    actions: ActionRegistry,
    settings: InteractionSettings,
    interactables: BTreeMap<InteractableId, Interactable>,
    interactions: BTreeMap<InteractionId, Interaction>,
    next_interactable: u64,
    next_interaction: u64,
    sink: Box<dyn EventSink>,
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("signals", &self.signals)
            .field("actions", &self.actions.names())
            .field("settings", &self.settings)
            .field("interactables", &self.interactables.len())
            .field("interactions", &self.interactions.len())
            .finish_non_exhaustive()
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new(InteractionSettings::default())
    }
}

impl Scope {
    /// Empty scope: no actions registered, events are dropped
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            signals: SignalBus::new(),
            actions: ActionRegistry::new(),
            settings,
            interactables: BTreeMap::new(),
            interactions: BTreeMap::new(),
            next_interactable: 1,
            next_interaction: 1,
            sink: Box::new(|_: &InteractEvent| {}),
        }
    }

    /// Scope with gesture, resize and drag registered, checked in that order
    pub fn with_default_actions(settings: InteractionSettings) -> Self {
        let mut scope = Self::new(settings);
        Gesture.init(&mut scope);
        Resize.init(&mut scope);
        Drag.init(&mut scope);
        scope
    }

    pub fn set_sink(&mut self, sink: impl EventSink + 'static) {
        self.sink = Box::new(sink);
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut InteractionSettings {
        &mut self.settings
    }

    pub fn signals(&self) -> &SignalBus {
        &self.signals
    }

    pub fn signals_mut(&mut self) -> &mut SignalBus {
        &mut self.signals
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut ActionRegistry {
        &mut self.actions
    }

    // ------------------------------------------------------------------------
    // Interactables
    // ------------------------------------------------------------------------

    /// Bind a surface. Its capabilities cannot change afterwards.
    pub fn add_interactable(&mut self, surface: SurfaceId, capabilities: ActionSet) -> InteractableId {
        let id = InteractableId::new(self.next_interactable);
        self.next_interactable += 1;
        self.interactables
            .insert(id, Interactable::new(id, surface, capabilities));
        debug!(interactable = %id, surface = surface.0, "Interactable added");
        id
    }

    pub fn interactable(&self, id: InteractableId) -> Option<&Interactable> {
        self.interactables.get(&id)
    }

    pub fn interactable_mut(&mut self, id: InteractableId) -> Option<&mut Interactable> {
        self.interactables.get_mut(&id)
    }

    /// Unbind a surface, cancelling any interaction that targets it
    pub fn remove_interactable(&mut self, id: InteractableId) -> Option<Interactable> {
        let targeting: Vec<InteractionId> = self
            .interactions
            .values()
            .filter(|i| i.target() == id)
            .map(Interaction::id)
            .collect();
        for interaction in targeting {
            self.cancel(interaction);
        }
        self.interactables.remove(&id)
    }

    // ------------------------------------------------------------------------
    // Interactions
    // ------------------------------------------------------------------------

    /// Create an idle interaction bound to `target`
    pub fn new_interaction(&mut self, target: InteractableId) -> InteractionResult<InteractionId> {
        if !self.interactables.contains_key(&target) {
            return Err(InteractionError::UnknownInteractable(target));
        }
        let id = InteractionId::new(self.next_interaction);
        self.next_interaction += 1;
        self.interactions.insert(id, Interaction::new(id, target));
        self.fire_on(Signal::New, id, None);
        Ok(id)
    }

    pub fn interaction(&self, id: InteractionId) -> Option<&Interaction> {
        self.interactions.get(&id)
    }

    pub fn interaction_mut(&mut self, id: InteractionId) -> Option<&mut Interaction> {
        self.interactions.get_mut(&id)
    }

    pub fn interactions(&self) -> impl Iterator<Item = &Interaction> {
        self.interactions.values()
    }

    /// Interaction currently holding `pointer`
    pub fn interaction_for_pointer(&self, pointer: PointerId) -> Option<InteractionId> {
        self.interactions
            .values()
            .find(|i| i.has_pointer(pointer))
            .map(Interaction::id)
    }

    /// Fire `signal` for an interaction, passing `event` to the handlers.
    /// Returns how many handlers ran.
    pub fn fire(
        &mut self,
        signal: Signal,
        id: InteractionId,
        event: Option<&mut InteractEvent>,
    ) -> InteractionResult<usize> {
        if !self.interactions.contains_key(&id) {
            return Err(InteractionError::UnknownInteraction(id));
        }
        Ok(self.fire_on(signal, id, event))
    }

    fn fire_on(&mut self, signal: Signal, id: InteractionId, event: Option<&mut InteractEvent>) -> usize {
        let Some(interaction) = self.interactions.get_mut(&id) else {
            return 0;
        };
        let interactable = self.interactables.get(&interaction.target());
        let mut args = SignalArgs {
            interaction,
            interactable,
            event,
            settings: &self.settings,
        };
        self.signals.fire(signal, &mut args)
    }

    // ------------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------------

    /// Route any pointer event. `target` is only read for `Down`.
    pub fn dispatch(
        &mut self,
        event: &PointerEvent,
        target: Option<InteractableId>,
    ) -> InteractionResult<InteractionId> {
        match event.kind {
            PointerKind::Down => {
                let target = target.ok_or(InteractionError::MissingTarget(event.pointer_id))?;
                self.pointer_down(event, target, None)
            }
            PointerKind::Move => self.pointer_move(event),
            PointerKind::Up => self.pointer_up(event),
            PointerKind::Cancel => self.pointer_cancel(event),
        }
    }

    /// A pointer went down on `target`. `prepared` pre-selects the action;
    /// otherwise it is resolved on the first move beyond the tolerance.
    ///
    /// A touch or pen pointer joins an unfinished single-pointer interaction on
    /// the same gesture-enabled target instead of starting a new one.
    pub fn pointer_down(
        &mut self,
        event: &PointerEvent,
        target: InteractableId,
        prepared: Option<PreparedAction>,
    ) -> InteractionResult<InteractionId> {
        let Some(interactable) = self.interactables.get(&target) else {
            return Err(InteractionError::UnknownInteractable(target));
        };
        if let Some(prepared) = prepared {
            if !self.actions.contains(prepared.name) {
                return Err(InteractionError::ActionNotRegistered(prepared.name));
            }
        }
        if let Some(existing) = self.interaction_for_pointer(event.pointer_id) {
            debug!(pointer = %event.pointer_id, interaction = %existing, "Pointer already down, ignoring");
            return Ok(existing);
        }

        let gesture_target = interactable.is_enabled(ActionName::Gesture);
        let joinable = (event.pointer_type != PointerType::Mouse && gesture_target)
            .then(|| {
                self.interactions.values().find(|i| {
                    i.target() == target
                        && matches!(i.phase(), Phase::Down | Phase::Moving)
                        && i.pointer_count() < GESTURE_POINTERS
                })
            })
            .flatten()
            .map(Interaction::id);

        let id = match joinable {
            Some(id) => {
                self.join(id, event);
                id
            }
            None => {
                let id = self.new_interaction(target)?;
                if let Some(interaction) = self.interactions.get_mut(&id) {
                    interaction.pointer_down(event);
                }
                debug!(interaction = %id, pointer = %event.pointer_id, target = %target, "Interaction down");
                id
            }
        };

        if let (Some(prepared), Some(interaction)) = (prepared, self.interactions.get_mut(&id)) {
            interaction.set_prepared(Some(prepared));
        }
        self.fire_on(Signal::Down, id, None);
        Ok(id)
    }

    /// Add a pointer to a running interaction. A started action ends first and
    /// the interaction starts over from `Down`.
    fn join(&mut self, id: InteractionId, event: &PointerEvent) {
        let interacting = self.interactions.get(&id).is_some_and(Interaction::is_interacting);
        if interacting {
            self.end_action(id);
        }
        if let Some(interaction) = self.interactions.get_mut(&id) {
            if interacting {
                interaction.rearm(event.timestamp);
            }
            interaction.pointer_down(event);
            debug!(
                interaction = %id,
                pointer = %event.pointer_id,
                pointers = interaction.pointer_count(),
                "Pointer joined interaction"
            );
        }
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) -> InteractionResult<InteractionId> {
        profile_scope!("pointer_move");

        let id = self
            .interaction_for_pointer(event.pointer_id)
            .ok_or(InteractionError::UnknownPointer(event.pointer_id))?;
        let tolerance = self.settings.pointer_move_tolerance;
        let min_dt = self.settings.min_dt_secs;

        let (phase, beyond_tolerance) = {
            let Some(interaction) = self.interactions.get_mut(&id) else {
                return Err(InteractionError::UnknownInteraction(id));
            };
            interaction.update_pointer(event);
            interaction.update_pointer_delta(min_dt);
            (interaction.phase(), interaction.distance_from_start() > tolerance)
        };
        self.fire_on(Signal::Move, id, None);

        match phase {
            Phase::Down if beyond_tolerance => {
                if let Some(interaction) = self.interactions.get_mut(&id) {
                    interaction.begin_moving();
                }
                if self.start_action(id) {
                    self.run_action_event(id, EventPhase::Move);
                }
            }
            Phase::Down => {
                trace!(interaction = %id, "Move within tolerance");
            }
            Phase::Moving => {
                if self.interactions.get(&id).is_some_and(Interaction::is_interacting) {
                    self.run_action_event(id, EventPhase::Move);
                }
            }
            Phase::Idle | Phase::Ending => {}
        }
        Ok(id)
    }

    /// Release a pointer. Any release ends the running action. The interaction
    /// survives while other pointers stay pressed.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> InteractionResult<InteractionId> {
        let id = self
            .interaction_for_pointer(event.pointer_id)
            .ok_or(InteractionError::UnknownPointer(event.pointer_id))?;
        let min_dt = self.settings.min_dt_secs;

        let interacting = match self.interactions.get_mut(&id) {
            Some(interaction) => {
                interaction.update_pointer(event);
                interaction.update_pointer_delta(min_dt);
                interaction.is_interacting()
            }
            None => return Err(InteractionError::UnknownInteraction(id)),
        };
        if interacting {
            self.end_action(id);
        }
        self.fire_on(Signal::Up, id, None);

        let remaining = self
            .interactions
            .get_mut(&id)
            .map_or(0, |i| i.remove_pointer(event.pointer_id));
        if remaining > 0 {
            if let Some(interaction) = self.interactions.get_mut(&id) {
                interaction.rearm(event.timestamp);
            }
            debug!(interaction = %id, remaining, "Pointer up, interaction rearmed");
        } else {
            self.finish(id);
            debug!(interaction = %id, "Interaction finished");
        }
        Ok(id)
    }

    /// The input source lost the pointer. Cancels its whole interaction.
    pub fn pointer_cancel(&mut self, event: &PointerEvent) -> InteractionResult<InteractionId> {
        let id = self
            .interaction_for_pointer(event.pointer_id)
            .ok_or(InteractionError::UnknownPointer(event.pointer_id))?;
        self.cancel(id);
        Ok(id)
    }

    /// Cancel an interaction from outside. No end event is emitted.
    pub fn cancel_interaction(&mut self, id: InteractionId) -> InteractionResult<()> {
        if !self.interactions.contains_key(&id) {
            return Err(InteractionError::UnknownInteraction(id));
        }
        self.cancel(id);
        Ok(())
    }

    fn cancel(&mut self, id: InteractionId) {
        self.fire_on(Signal::Cancel, id, None);
        self.finish(id);
        debug!(interaction = %id, "Interaction cancelled");
    }

    fn finish(&mut self, id: InteractionId) {
        self.fire_on(Signal::Stop, id, None);
        if let Some(mut interaction) = self.interactions.remove(&id) {
            interaction.reset();
        }
    }

    // ------------------------------------------------------------------------
    // Action lifecycle
    // ------------------------------------------------------------------------

    /// Resolve the prepared action if needed and run its start.
    /// Returns true if the action started.
    fn start_action(&mut self, id: InteractionId) -> bool {
        let Some(interaction) = self.interactions.get_mut(&id) else {
            return false;
        };
        let Some(interactable) = self.interactables.get(&interaction.target()) else {
            warn!(interaction = %id, target = %interaction.target(), "Interaction target is gone");
            return false;
        };

        if interaction.prepared().is_none() {
            let resolved = self.actions.resolve(interaction, interactable, &self.settings);
            interaction.set_prepared(resolved);
        }
        let Some(name) = interaction.prepared().map(|p| p.name) else {
            debug!(interaction = %id, "No action matched, tracking coordinates only");
            return false;
        };
        if !interactable.is_enabled(name) {
            debug!(interaction = %id, action = %name, "Action disabled on target, tracking coordinates only");
            interaction.clear_prepared();
            return false;
        }

        let started = self.run_action_event(id, EventPhase::Start);
        if started {
            debug!(interaction = %id, action = %name, "Action started");
        }
        started
    }

    fn end_action(&mut self, id: InteractionId) {
        if let Some(interaction) = self.interactions.get_mut(&id) {
            interaction.begin_ending();
        }
        self.run_action_event(id, EventPhase::End);
    }

    /// Build the event for `phase`, pass it through the handlers and emit it.
    /// Returns false when there is no prepared action or a handler dropped it.
    fn run_action_event(&mut self, id: InteractionId, phase: EventPhase) -> bool {
        if phase == EventPhase::Move {
            self.fire_on(Signal::BeforeActionMove, id, None);
        }

        let Some(interaction) = self.interactions.get(&id) else {
            return false;
        };
        let Some(name) = interaction.prepared().map(|p| p.name) else {
            return false;
        };
        let mut event = InteractEvent::from_interaction(interaction, name, phase, &self.settings);

        let signal = match phase {
            EventPhase::Start => Signal::ActionStart,
            EventPhase::Move => Signal::ActionMove,
            EventPhase::End => Signal::ActionEnd,
        };
        self.fire_on(signal, id, Some(&mut event));

        let still_prepared = self
            .interactions
            .get(&id)
            .and_then(Interaction::prepared)
            .is_some_and(|p| p.name == name);
        if !still_prepared {
            debug!(interaction = %id, action = %name, phase = phase.as_str(), "Action dropped by handler");
            return false;
        }

        if phase == EventPhase::Move {
            self.fire_on(Signal::AfterActionMove, id, Some(&mut event));
        }

        trace!(interaction = %id, event = %event.event_type, "Emitting event");
        self.sink.emit(&event);
        if let Some(interaction) = self.interactions.get_mut(&id) {
            interaction.set_prev_event(event);
        }
        true
    }
}
