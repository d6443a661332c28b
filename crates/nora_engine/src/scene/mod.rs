//! Scene graph and component model
//!
//! ## Architecture
//!
//! ```text
//! Scene
//!  └─ Entity (root)            owns Transform + components + children
//!      ├─ Box<dyn Component>   native or ScriptComponent (bridge)
//!      └─ Entity (child)       parent link is an EntityId
//! ```
//!
//! Every frame the scene walks its roots depth-first: an entity recomputes its
//! world matrix from its parent's, updates its components in attach order and
//! then recurses. A failing component is logged and never stops the pass.

mod capability;
mod component;
mod entity;
mod scene_graph;
mod transform;

#[cfg(test)]
mod tests;

pub use capability::{
    tags, CameraProvider, Capability, CapabilitySet, CapabilityTag, ComponentRef, GuiRenderable, Renderable,
};
pub use component::{AsAny, Component, ComponentContext, ComponentError, FrameContext, OwnerSlot};
pub use entity::{Entity, EntityId};
pub use scene_graph::Scene;
pub use transform::Transform;
