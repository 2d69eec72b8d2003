//! Interactables - a bound surface plus its per-action options.
//!
//! The set of actions an interactable can perform is fixed when it is built.
//! Each action has an accessor pair:
//!
//! - `draggable()` returns the live `DragOptions`
//! - `set_draggable(true | false)` only toggles `enabled`
//! - `set_draggable(patch)` merges the patch, enables the action unless the
//!   patch says `enabled: Some(false)`, and notifies the `OptionHooks`
//!
//! `resizable`/`set_resizable` and `gesturable`/`set_gesturable` behave the same.

use crate::actions::{
    ActionName, ActionSet, DragOptions, DragOptionsPatch, GestureOptions, GestureOptionsPatch,
    ResizeOptions, ResizeOptionsPatch,
};
use crate::coords::{Merge, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Handle to an interactable owned by a `Scope`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct InteractableId(u64);

impl InteractableId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InteractableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle to the rendering-layer surface the interactable is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u64);

/// Argument of a `set_*able` accessor
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityArg<P> {
    /// Set `enabled` and nothing else
    Toggle(bool),
    /// Merge into the options
    Patch(P),
}

impl<P> From<bool> for CapabilityArg<P> {
    fn from(enabled: bool) -> Self {
        Self::Toggle(enabled)
    }
}

impl From<DragOptionsPatch> for CapabilityArg<DragOptionsPatch> {
    fn from(patch: DragOptionsPatch) -> Self {
        Self::Patch(patch)
    }
}

impl From<ResizeOptionsPatch> for CapabilityArg<ResizeOptionsPatch> {
    fn from(patch: ResizeOptionsPatch) -> Self {
        Self::Patch(patch)
    }
}

impl From<GestureOptionsPatch> for CapabilityArg<GestureOptionsPatch> {
    fn from(patch: GestureOptionsPatch) -> Self {
        Self::Patch(patch)
    }
}

/// Shared shape of per-action option structs
pub trait ActionOptions: Merge<Self::Patch> {
    type Patch;

    fn enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
    fn patch_enabled(patch: &Self::Patch) -> Option<bool>;
}

/// Listener registration collaborators, notified when a patch is applied
pub trait OptionHooks {
    /// Per-action options were replaced
    fn set_per_action(&mut self, action: ActionName);
    /// Per-action event listeners should be re-registered
    fn set_on_events(&mut self, action: ActionName);
}

/// Hooks that do nothing
#[derive(Debug, Default)]
pub struct NoopHooks;

impl OptionHooks for NoopHooks {
    fn set_per_action(&mut self, _action: ActionName) {}
    fn set_on_events(&mut self, _action: ActionName) {}
}

/// Options for every action, whether or not the interactable supports it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractableOptions {
    pub drag: DragOptions,
    pub resize: ResizeOptions,
    pub gesture: GestureOptions,
}

pub struct Interactable {
    id: InteractableId,
    surface: SurfaceId,
    capabilities: ActionSet,
    options: InteractableOptions,
    rect: Option<Rect>,
    hooks: Box<dyn OptionHooks>,
}

impl fmt::Debug for Interactable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interactable")
            .field("id", &self.id)
            .field("surface", &self.surface)
            .field("capabilities", &self.capabilities)
            .field("options", &self.options)
            .field("rect", &self.rect)
            .finish_non_exhaustive()
    }
}

impl Interactable {
    pub fn new(id: InteractableId, surface: SurfaceId, capabilities: ActionSet) -> Self {
        Self {
            id,
            surface,
            capabilities,
            options: InteractableOptions::default(),
            rect: None,
            hooks: Box::new(NoopHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: impl OptionHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    #[inline]
    pub fn id(&self) -> InteractableId {
        self.id
    }

    #[inline]
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn capabilities(&self) -> ActionSet {
        self.capabilities
    }

    pub fn options(&self) -> &InteractableOptions {
        &self.options
    }

    /// Bounds of the surface in page coordinates, needed for resizing
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Option<Rect>) -> &mut Self {
        self.rect = rect;
        self
    }

    /// Supported and switched on
    pub fn is_enabled(&self, action: ActionName) -> bool {
        self.capabilities.contains(action)
            && match action {
                ActionName::Drag => self.options.drag.enabled,
                ActionName::Resize => self.options.resize.enabled,
                ActionName::Gesture => self.options.gesture.enabled,
            }
    }

    pub fn draggable(&self) -> &DragOptions {
        &self.options.drag
    }

    pub fn set_draggable(&mut self, arg: impl Into<CapabilityArg<DragOptionsPatch>>) -> &mut Self {
        let supported = self.capabilities.contains(ActionName::Drag);
        configure(
            &mut self.options.drag,
            self.hooks.as_mut(),
            ActionName::Drag,
            supported,
            arg.into(),
        );
        self
    }

    pub fn resizable(&self) -> &ResizeOptions {
        &self.options.resize
    }

    pub fn set_resizable(&mut self, arg: impl Into<CapabilityArg<ResizeOptionsPatch>>) -> &mut Self {
        let supported = self.capabilities.contains(ActionName::Resize);
        configure(
            &mut self.options.resize,
            self.hooks.as_mut(),
            ActionName::Resize,
            supported,
            arg.into(),
        );
        self
    }

    pub fn gesturable(&self) -> &GestureOptions {
        &self.options.gesture
    }

    pub fn set_gesturable(&mut self, arg: impl Into<CapabilityArg<GestureOptionsPatch>>) -> &mut Self {
        let supported = self.capabilities.contains(ActionName::Gesture);
        configure(
            &mut self.options.gesture,
            self.hooks.as_mut(),
            ActionName::Gesture,
            supported,
            arg.into(),
        );
        self
    }
}

fn configure<O: ActionOptions>(
    options: &mut O,
    hooks: &mut dyn OptionHooks,
    action: ActionName,
    supported: bool,
    arg: CapabilityArg<O::Patch>,
) {
    if !supported {
        debug!(action = %action, "Ignoring options for unsupported action");
        return;
    }

    match arg {
        CapabilityArg::Toggle(enabled) => options.set_enabled(enabled),
        CapabilityArg::Patch(patch) => {
            let enabled = O::patch_enabled(&patch).unwrap_or(true);
            options.merge(patch);
            options.set_enabled(enabled);
            hooks.set_per_action(action);
            hooks.set_on_events(action);
        }
    }
}
