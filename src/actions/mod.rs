//! Action plugins.
//!
//! Each action (drag, resize, gesture) is a plugin. `init` registers the action
//! name and its accessor name in the scope's `ActionRegistry`, records the
//! checker used to resolve an unset `prepared` action, and subscribes the
//! plugin's handlers on the signal bus. Handlers are registered as owned by the
//! action, so the bus only runs them while that action is prepared and enabled
//! on the interaction's target.
//!
//! ## Modules
//!
//! - `drag` - Axis-lockable dragging
//! - `resize` - Edge-based resizing of the target rect
//! - `gesture` - Two-pointer scale/rotate gestures

pub mod drag;
pub mod gesture;
pub mod resize;

pub use drag::{Drag, DragOptions, DragOptionsPatch};
pub use gesture::{Gesture, GestureOptions, GestureOptionsPatch, GestureState};
pub use resize::{Invert, Resize, ResizeOptions, ResizeOptionsPatch, ResizeState};

use crate::interactable::Interactable;
use crate::interaction::{Interaction, PreparedAction};
use crate::scope::Scope;
use crate::settings::InteractionSettings;
use crate::signals::SignalBus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Name of a built-in action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionName {
    Drag,
    Resize,
    Gesture,
}

impl ActionName {
    pub const ALL: [ActionName; 3] = [Self::Drag, Self::Resize, Self::Gesture];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Resize => "resize",
            Self::Gesture => "gesture",
        }
    }

    /// Name of the capability accessor on `Interactable`
    pub fn method_name(self) -> &'static str {
        match self {
            Self::Drag => "draggable",
            Self::Resize => "resizable",
            Self::Gesture => "gesturable",
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        match self {
            Self::Drag => 1,
            Self::Resize => 1 << 1,
            Self::Gesture => 1 << 2,
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed set of actions an interactable supports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b111);

    pub fn of(actions: &[ActionName]) -> Self {
        Self(actions.iter().fold(0, |bits, a| bits | a.bit()))
    }

    #[inline]
    pub fn contains(self, action: ActionName) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn with(self, action: ActionName) -> Self {
        Self(self.0 | action.bit())
    }

    pub fn iter(self) -> impl Iterator<Item = ActionName> {
        ActionName::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}

/// Decides whether an action applies to an interaction that has no
/// `prepared` action yet. Called on the first move beyond the tolerance.
pub type ActionChecker =
    fn(&Interaction, &Interactable, &InteractionSettings) -> Option<PreparedAction>;

/// Registered action names, their accessor names and checkers
#[derive(Debug, Default)]
pub struct ActionRegistry {
    names: Vec<ActionName>,
    method_dict: BTreeMap<ActionName, &'static str>,
    checkers: BTreeMap<ActionName, ActionChecker>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action. Returns `false` if it was already registered, in
    /// which case nothing changes.
    pub fn register(
        &mut self,
        name: ActionName,
        method: &'static str,
        checker: ActionChecker,
    ) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name);
        self.method_dict.insert(name, method);
        self.checkers.insert(name, checker);
        true
    }

    /// Registered names, in registration order
    pub fn names(&self) -> &[ActionName] {
        &self.names
    }

    pub fn method_dict(&self) -> &BTreeMap<ActionName, &'static str> {
        &self.method_dict
    }

    pub fn method_name(&self, name: ActionName) -> Option<&'static str> {
        self.method_dict.get(&name).copied()
    }

    #[inline]
    pub fn contains(&self, name: ActionName) -> bool {
        self.names.contains(&name)
    }

    /// First registered action that is enabled on `interactable` and whose
    /// checker accepts the interaction
    pub fn resolve(
        &self,
        interaction: &Interaction,
        interactable: &Interactable,
        settings: &InteractionSettings,
    ) -> Option<PreparedAction> {
        self.names
            .iter()
            .filter(|name| interactable.is_enabled(**name))
            .find_map(|name| {
                let checker = self.checkers.get(name)?;
                checker(interaction, interactable, settings)
            })
    }
}

/// Contract every action plugin implements
pub trait ActionPlugin {
    fn name(&self) -> ActionName;

    fn method_name(&self) -> &'static str {
        self.name().method_name()
    }

    fn checker(&self) -> ActionChecker;

    /// Subscribe the plugin's signal handlers
    fn subscribe(&self, signals: &mut SignalBus);

    /// Register the action in `scope` and subscribe its handlers.
    /// A second call for the same action is a no-op.
    fn init(&self, scope: &mut Scope) {
        let name = self.name();
        if scope.actions_mut().register(name, self.method_name(), self.checker()) {
            self.subscribe(scope.signals_mut());
            debug!(action = %name, method = self.method_name(), "Action registered");
        } else {
            debug!(action = %name, "Action already registered");
        }
    }
}
