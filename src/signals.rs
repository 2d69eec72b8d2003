//! Signal bus - ordered, named-topic dispatch.
//!
//! Handlers for a topic run synchronously in registration order and share one
//! mutable `SignalArgs`, so later handlers see what earlier ones wrote. Firing
//! a topic with no handlers does nothing.
//!
//! `fire` borrows the bus immutably and `on` needs it mutably, so a handler can
//! never add registrations to a topic while it is firing.
//!
//! ## Write contract per topic
//!
//! | topic | may write |
//! |---|---|
//! | `before-action-move` | `interaction.cur_coords` only |
//! | `action-start` / `action-move` / `action-end` | `event`, plugin state, `prepared` (veto) |
//! | everything else | nothing (observers) |

use crate::actions::ActionName;
use crate::event::InteractEvent;
use crate::interactable::Interactable;
use crate::interaction::Interaction;
use crate::profile_scope;
use crate::settings::InteractionSettings;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Lifecycle topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    New,
    Down,
    Move,
    ActionStart,
    BeforeActionMove,
    ActionMove,
    AfterActionMove,
    ActionEnd,
    Up,
    Cancel,
    Stop,
}

impl Signal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Down => "down",
            Self::Move => "move",
            Self::ActionStart => "action-start",
            Self::BeforeActionMove => "before-action-move",
            Self::ActionMove => "action-move",
            Self::AfterActionMove => "after-action-move",
            Self::ActionEnd => "action-end",
            Self::Up => "up",
            Self::Cancel => "cancel",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload passed through every handler of one dispatch
pub struct SignalArgs<'a> {
    pub interaction: &'a mut Interaction,
    pub interactable: Option<&'a Interactable>,
    /// In-flight event, present for action start/move/end topics
    pub event: Option<&'a mut InteractEvent>,
    pub settings: &'a InteractionSettings,
}

impl SignalArgs<'_> {
    /// Whether handlers owned by `action` should see this dispatch
    fn admits(&self, action: ActionName) -> bool {
        let prepared = self.interaction.prepared().map(|p| p.name) == Some(action);
        let enabled = self.interactable.is_some_and(|i| i.is_enabled(action));
        prepared && enabled
    }
}

pub type Handler = Box<dyn Fn(&mut SignalArgs<'_>)>;

struct Registration {
    owner: Option<ActionName>,
    handler: Handler,
}

#[derive(Default)]
pub struct SignalBus {
    topics: HashMap<Signal, Vec<Registration>>,
}

impl fmt::Debug for SignalBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (signal, regs) in &self.topics {
            map.entry(&signal.as_str(), &regs.len());
        }
        map.finish()
    }
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer that runs for every dispatch of `signal`
    pub fn on<F>(&mut self, signal: Signal, handler: F)
    where
        F: Fn(&mut SignalArgs<'_>) + 'static,
    {
        self.push(signal, None, Box::new(handler));
    }

    /// Register a handler owned by `action`. It only runs while `action` is
    /// the interaction's prepared action and is enabled on its target.
    pub fn on_action<F>(&mut self, signal: Signal, action: ActionName, handler: F)
    where
        F: Fn(&mut SignalArgs<'_>) + 'static,
    {
        self.push(signal, Some(action), Box::new(handler));
    }

    fn push(&mut self, signal: Signal, owner: Option<ActionName>, handler: Handler) {
        self.topics
            .entry(signal)
            .or_default()
            .push(Registration { owner, handler });
    }

    /// Run every handler of `signal` in registration order.
    /// Returns how many handlers actually ran.
    pub fn fire(&self, signal: Signal, args: &mut SignalArgs<'_>) -> usize {
        profile_scope!(signal.as_str());

        let Some(registrations) = self.topics.get(&signal) else {
            return 0;
        };

        let mut ran = 0;
        for registration in registrations {
            if let Some(owner) = registration.owner {
                // Re-checked per handler: an earlier handler may have vetoed
                if !args.admits(owner) {
                    continue;
                }
            }
            (registration.handler)(args);
            ran += 1;
        }

        trace!(signal = %signal, interaction = %args.interaction.id(), ran, "Signal fired");
        ran
    }

    pub fn handler_count(&self, signal: Signal) -> usize {
        self.topics.get(&signal).map_or(0, Vec::len)
    }
}
