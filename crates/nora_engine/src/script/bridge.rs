//! Foreign-component bridge
//!
//! [`ScriptComponent`] adapts a [`ScriptObject`] to the [`Component`]
//! contract. Script failures stop at this boundary: they are logged under
//! [`SCRIPT_TARGET`] and the hook is treated as a no-op, so a broken script
//! never takes its entity's other components down with it.

use super::host::{ScriptObject, START_HOOK, UPDATE_HOOK};
use crate::foundation::logging::SCRIPT_TARGET;
use crate::scene::{tags, CapabilitySet, Component, ComponentContext, ComponentError, EntityId, OwnerSlot};

/// Lifecycle position of a bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// Not yet added to an entity
    Unattached,
    /// Owned by an entity, not started
    Attached,
    /// Start pass has run
    Started,
}

/// Component backed by a script object
pub struct ScriptComponent {
    owner: OwnerSlot,
    object: Box<dyn ScriptObject>,
    state: BridgeState,
}

impl ScriptComponent {
    /// Wrap a script object
    pub fn new(object: impl ScriptObject + 'static) -> Self {
        Self::from_boxed(Box::new(object))
    }

    /// Wrap an already boxed script object
    pub fn from_boxed(object: Box<dyn ScriptObject>) -> Self {
        Self {
            owner: OwnerSlot::new(),
            object,
            state: BridgeState::Unattached,
        }
    }

    /// Wrapped object
    pub fn object(&self) -> &dyn ScriptObject {
        self.object.as_ref()
    }

    /// Wrapped object, mutable
    pub fn object_mut(&mut self) -> &mut dyn ScriptObject {
        self.object.as_mut()
    }

    /// Whether the wrapped object's class satisfies a capability tag
    pub fn satisfies(&self, tag: &str) -> bool {
        self.object.is_instance_of(tag)
    }

    /// Lifecycle position
    pub fn state(&self) -> BridgeState {
        self.state
    }

    fn invoke(&mut self, hook: &str, ctx: &mut ComponentContext<'_>) {
        if !self.object.has_hook(hook) {
            return;
        }
        if let Err(err) = self.object.call_hook(hook, ctx) {
            log::error!(
                target: SCRIPT_TARGET,
                "Script exception in {}.{} on entity {}: {}",
                self.object.class_name(),
                hook,
                ctx.owner(),
                err
            );
        }
    }
}

impl Component for ScriptComponent {
    fn name(&self) -> &str {
        self.object.class_name()
    }

    fn owner_slot(&self) -> &OwnerSlot {
        &self.owner
    }

    fn owner_slot_mut(&mut self) -> &mut OwnerSlot {
        &mut self.owner
    }

    fn on_attach(&mut self, owner: EntityId) {
        if self.owner.attach(owner) {
            if self.state == BridgeState::Unattached {
                self.state = BridgeState::Attached;
            }
        } else {
            log::warn!(
                target: SCRIPT_TARGET,
                "{} is already attached to {:?}; ignoring attach to {}",
                self.object.class_name(),
                self.owner.get(),
                owner
            );
        }
    }

    fn start(&mut self, ctx: &mut ComponentContext<'_>) -> Result<(), ComponentError> {
        match self.state {
            BridgeState::Attached => self.state = BridgeState::Started,
            BridgeState::Unattached => log::debug!(
                target: SCRIPT_TARGET,
                "{} started before being attached",
                self.object.class_name()
            ),
            BridgeState::Started => {}
        }
        self.invoke(START_HOOK, ctx);
        Ok(())
    }

    fn update(&mut self, ctx: &mut ComponentContext<'_>) -> Result<(), ComponentError> {
        self.invoke(UPDATE_HOOK, ctx);
        Ok(())
    }

    fn capabilities(&self) -> CapabilitySet {
        let mut set = CapabilitySet::UPDATABLE;
        set.set(CapabilitySet::RENDERABLE, self.satisfies(tags::RENDERABLE));
        set.set(CapabilitySet::CAMERA, self.satisfies(tags::CAMERA_PROVIDER));
        set.set(CapabilitySet::GUI, self.satisfies(tags::GUI_RENDERABLE));
        set
    }
}

impl std::fmt::Debug for ScriptComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptComponent")
            .field("class", &self.object.class_name())
            .field("owner", &self.owner.get())
            .field("state", &self.state)
            .finish()
    }
}
