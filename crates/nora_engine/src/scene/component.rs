//! Component contract
//!
//! A component is an attachable behavior unit exclusively owned by one
//! [`Entity`](super::Entity). It receives `start` once and `update` every
//! frame, always through a [`ComponentContext`] that lends it its owner's
//! transform and the frame timing. Components never hold pointers into the
//! graph: the owner back-reference is an [`EntityId`].
//!
//! Capabilities beyond updating (rendering, providing a camera, drawing GUI)
//! are opted into by overriding the `as_*` accessors, see
//! [`capability`](super::capability).

use std::any::Any;

use super::capability::{CameraProvider, CapabilitySet, GuiRenderable, Renderable};
use super::entity::EntityId;
use super::transform::Transform;

/// Errors a component lifecycle hook can report
///
/// These never abort a pass: the owning entity logs them and moves on to the
/// next component.
#[derive(thiserror::Error, Debug)]
pub enum ComponentError {
    /// Generic failure raised by a component
    #[error("{component} failed: {message}")]
    Failed {
        /// Component that failed
        component: String,
        /// What went wrong
        message: String,
    },
}

impl ComponentError {
    /// Shorthand for [`ComponentError::Failed`]
    pub fn failed(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            component: component.into(),
            message: message.into(),
        }
    }
}

/// Per-frame state handed to every lifecycle call
///
/// Replaces process-wide time and window statics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Seconds since the runtime started
    pub total_time: f32,
    /// Frames completed before this one
    pub frame: u64,
    /// Frames per second, sampled once per second
    pub fps: f32,
    /// Render target size in pixels
    pub screen_size: (u32, u32),
}

impl FrameContext {
    /// Context for a fixed-step frame
    pub fn fixed(delta_time: f32, frame: u64) -> Self {
        Self {
            delta_time,
            total_time: delta_time * frame as f32,
            frame,
            ..Self::default()
        }
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        Self {
            delta_time: 0.0,
            total_time: 0.0,
            frame: 0,
            fps: 0.0,
            screen_size: (800, 600),
        }
    }
}

/// What a component sees of its owner during `start`/`update`
pub struct ComponentContext<'a> {
    owner: EntityId,
    owner_name: &'a str,
    transform: &'a mut Transform,
    frame: &'a FrameContext,
}

impl<'a> ComponentContext<'a> {
    /// Context for the component being dispatched on `owner`
    pub fn new(owner: EntityId, owner_name: &'a str, transform: &'a mut Transform, frame: &'a FrameContext) -> Self {
        Self {
            owner,
            owner_name,
            transform,
            frame,
        }
    }

    /// Id of the owning entity
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Name of the owning entity (may be empty)
    pub fn owner_name(&self) -> &str {
        self.owner_name
    }

    /// Owner transform
    pub fn transform(&self) -> &Transform {
        self.transform
    }

    /// Owner transform, mutable
    pub fn transform_mut(&mut self) -> &mut Transform {
        self.transform
    }

    /// Frame timing
    pub fn frame(&self) -> &FrameContext {
        self.frame
    }

    /// Seconds since the previous frame
    pub fn delta_time(&self) -> f32 {
        self.frame.delta_time
    }
}

/// Set-once storage for a component's owner back-reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnerSlot(Option<EntityId>);

impl OwnerSlot {
    /// Empty slot
    pub const fn new() -> Self {
        Self(None)
    }

    /// Current owner
    pub fn get(&self) -> Option<EntityId> {
        self.0
    }

    /// Record `owner` unless one is already recorded
    ///
    /// Returns false when the slot already held an owner; the original owner
    /// is kept.
    pub fn attach(&mut self, owner: EntityId) -> bool {
        match self.0 {
            None => {
                self.0 = Some(owner);
                true
            }
            Some(existing) => existing == owner,
        }
    }
}

/// Upcast helper so `dyn Component` can be downcast to its concrete type
pub trait AsAny: Any {
    /// `&self` as `&dyn Any`
    fn as_any(&self) -> &dyn Any;
    /// `&mut self` as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Base behavior unit attached to entities
pub trait Component: AsAny {
    /// Name used in diagnostics
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Storage for the owner back-reference
    fn owner_slot(&self) -> &OwnerSlot;

    /// Mutable storage for the owner back-reference
    fn owner_slot_mut(&mut self) -> &mut OwnerSlot;

    /// Owning entity, `None` until attached
    fn owner(&self) -> Option<EntityId> {
        self.owner_slot().get()
    }

    /// Called once when the component is attached to `owner`
    ///
    /// The default records the owner. Overrides doing one-time setup should
    /// still record it.
    fn on_attach(&mut self, owner: EntityId) {
        if !self.owner_slot_mut().attach(owner) {
            log::warn!(
                "{} is already attached to {:?}; ignoring attach to {:?}",
                self.name(),
                self.owner(),
                owner
            );
        }
    }

    /// Called once by the scene's start pass
    fn start(&mut self, _ctx: &mut ComponentContext<'_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Called every frame after the owner's transform was recomputed
    fn update(&mut self, _ctx: &mut ComponentContext<'_>) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Renderable capability
    fn as_renderable(&self) -> Option<&(dyn Renderable + 'static)> {
        None
    }

    /// Renderable capability, mutable
    fn as_renderable_mut(&mut self) -> Option<&mut (dyn Renderable + 'static)> {
        None
    }

    /// Camera capability
    fn as_camera(&self) -> Option<&(dyn CameraProvider + 'static)> {
        None
    }

    /// Camera capability, mutable
    fn as_camera_mut(&mut self) -> Option<&mut (dyn CameraProvider + 'static)> {
        None
    }

    /// GUI capability
    fn as_gui(&self) -> Option<&(dyn GuiRenderable + 'static)> {
        None
    }

    /// GUI capability, mutable
    fn as_gui_mut(&mut self) -> Option<&mut (dyn GuiRenderable + 'static)> {
        None
    }

    /// Capabilities this component exposes
    fn capabilities(&self) -> CapabilitySet {
        let mut set = CapabilitySet::UPDATABLE;
        set.set(CapabilitySet::RENDERABLE, self.as_renderable().is_some());
        set.set(CapabilitySet::CAMERA, self.as_camera().is_some());
        set.set(CapabilitySet::GUI, self.as_gui().is_some());
        set
    }
}
