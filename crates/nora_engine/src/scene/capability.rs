//! Capability traits and typed component lookup
//!
//! Rendering, camera and GUI behavior are separate traits layered on
//! [`Component`]. A component opts in by returning itself from the matching
//! `as_*` accessor, so `dyn Component` can be asked for any of them without
//! knowing the concrete type.
//!
//! [`Capability`] is the query key used by `Entity::get_component` and the
//! scene queries. It names the tag the scripting layer is asked about and how
//! to cast a native component.

use bitflags::bitflags;

use super::component::{AsAny, Component};
use super::entity::EntityId;
use super::transform::Transform;
use crate::core::config::MESH_SHADER;
use crate::foundation::math::Mat4;
use crate::render::{GuiPass, RenderError, RenderPass};
use crate::script::ScriptComponent;

bitflags! {
    /// Capabilities a component exposes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CapabilitySet: u8 {
        /// Receives start/update (every component)
        const UPDATABLE = 1 << 0;
        /// Draws in the 3D pass
        const RENDERABLE = 1 << 1;
        /// Provides view and projection matrices
        const CAMERA = 1 << 2;
        /// Draws in the GUI pass
        const GUI = 1 << 3;
    }
}

/// Name a capability is known by in the scripting layer
pub type CapabilityTag = &'static str;

/// Well-known capability tags
pub mod tags {
    use super::CapabilityTag;

    /// Any component
    pub const COMPONENT: CapabilityTag = "Component";
    /// [`Renderable`](super::Renderable)
    pub const RENDERABLE: CapabilityTag = "RenderComponent";
    /// [`CameraProvider`](super::CameraProvider)
    pub const CAMERA_PROVIDER: CapabilityTag = "CameraProvider";
    /// [`GuiRenderable`](super::GuiRenderable)
    pub const GUI_RENDERABLE: CapabilityTag = "GuiComponent";
}

/// Draws into the 3D pass
pub trait Renderable: Component {
    /// Shader category used to pick the shader for this component
    fn shader_category(&self) -> &str {
        MESH_SHADER
    }

    /// Issue draw calls for this frame
    fn render(&self, pass: &mut RenderPass<'_>) -> Result<(), RenderError>;
}

/// Supplies the active camera matrices
pub trait CameraProvider: Component {
    /// View matrix, given the owner's freshly computed transform
    fn view_matrix(&self, owner: &Transform) -> Mat4;

    /// Perspective projection for the given aspect ratio and clip planes
    fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4;
}

/// Draws into the GUI pass, always with the "gui" shader
pub trait GuiRenderable: Component {
    /// Issue draw calls for this frame
    fn render_gui(&self, pass: &mut GuiPass<'_>) -> Result<(), RenderError>;
}

/// Query key for typed component lookup
pub trait Capability: 'static {
    /// What a native match borrows as
    type Target: ?Sized + 'static;

    /// Tag the scripting layer is asked about
    fn tag() -> CapabilityTag;

    /// Native cast, `None` when the component lacks the capability
    fn cast<'c>(component: &'c (dyn Component + 'static)) -> Option<&'c Self::Target>;

    /// Mutable native cast
    fn cast_mut<'c>(component: &'c mut (dyn Component + 'static)) -> Option<&'c mut Self::Target>;
}

impl Capability for dyn Component {
    type Target = dyn Component;

    fn tag() -> CapabilityTag {
        tags::COMPONENT
    }

    fn cast<'c>(component: &'c (dyn Component + 'static)) -> Option<&'c Self::Target> {
        Some(component)
    }

    fn cast_mut<'c>(component: &'c mut (dyn Component + 'static)) -> Option<&'c mut Self::Target> {
        Some(component)
    }
}

impl Capability for dyn Renderable {
    type Target = dyn Renderable;

    fn tag() -> CapabilityTag {
        tags::RENDERABLE
    }

    fn cast<'c>(component: &'c (dyn Component + 'static)) -> Option<&'c Self::Target> {
        component.as_renderable()
    }

    fn cast_mut<'c>(component: &'c mut (dyn Component + 'static)) -> Option<&'c mut Self::Target> {
        component.as_renderable_mut()
    }
}

impl Capability for dyn CameraProvider {
    type Target = dyn CameraProvider;

    fn tag() -> CapabilityTag {
        tags::CAMERA_PROVIDER
    }

    fn cast<'c>(component: &'c (dyn Component + 'static)) -> Option<&'c Self::Target> {
        component.as_camera()
    }

    fn cast_mut<'c>(component: &'c mut (dyn Component + 'static)) -> Option<&'c mut Self::Target> {
        component.as_camera_mut()
    }
}

impl Capability for dyn GuiRenderable {
    type Target = dyn GuiRenderable;

    fn tag() -> CapabilityTag {
        tags::GUI_RENDERABLE
    }

    fn cast<'c>(component: &'c (dyn Component + 'static)) -> Option<&'c Self::Target> {
        component.as_gui()
    }

    fn cast_mut<'c>(component: &'c mut (dyn Component + 'static)) -> Option<&'c mut Self::Target> {
        component.as_gui_mut()
    }
}

/// Make a concrete component type usable as a lookup key
///
/// ```ignore
/// native_capability!(Spinner, "Spinner");
/// let spinner = entity.get_component::<Spinner>();
/// ```
#[macro_export]
macro_rules! native_capability {
    ($ty:ty, $tag:expr) => {
        impl $crate::scene::Capability for $ty {
            type Target = $ty;

            fn tag() -> $crate::scene::CapabilityTag {
                $tag
            }

            fn cast<'c>(component: &'c (dyn $crate::scene::Component + 'static)) -> Option<&'c Self::Target> {
                $crate::scene::AsAny::as_any(component).downcast_ref::<$ty>()
            }

            fn cast_mut<'c>(component: &'c mut (dyn $crate::scene::Component + 'static)) -> Option<&'c mut Self::Target> {
                $crate::scene::AsAny::as_any_mut(component).downcast_mut::<$ty>()
            }
        }
    };
}

/// Result of a typed lookup
///
/// Foreign components cannot be borrowed as a native trait object, so a match
/// on a script-backed component hands back the bridge itself.
pub enum ComponentRef<'a, T: ?Sized> {
    /// Natively implemented match
    Native(&'a T),
    /// Script-backed match
    Foreign(&'a ScriptComponent),
}

impl<'a, T: ?Sized> ComponentRef<'a, T> {
    /// The native match, if any
    pub fn native(self) -> Option<&'a T> {
        match self {
            Self::Native(component) => Some(component),
            Self::Foreign(_) => None,
        }
    }

    /// The bridge, if the match was script-backed
    pub fn foreign(self) -> Option<&'a ScriptComponent> {
        match self {
            Self::Native(_) => None,
            Self::Foreign(bridge) => Some(bridge),
        }
    }

    /// Whether the match was script-backed
    pub fn is_foreign(&self) -> bool {
        matches!(self, Self::Foreign(_))
    }
}

impl<'a, T: Component + ?Sized> ComponentRef<'a, T> {
    /// Owning entity of the matched component
    pub fn owner(&self) -> Option<EntityId> {
        match self {
            Self::Native(component) => component.owner(),
            Self::Foreign(bridge) => bridge.owner(),
        }
    }
}

// Manual impls: derive would require `T: Clone`
impl<T: ?Sized> Clone for ComponentRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for ComponentRef<'_, T> {}

/// Match one component against a capability
///
/// A bridge is matched by asking its script object about the tag; anything
/// else goes through the native cast.
pub(crate) fn match_component<'a, T: Capability + ?Sized>(
    component: &'a (dyn Component + 'static),
) -> Option<ComponentRef<'a, T::Target>> {
    if let Some(bridge) = component.as_any().downcast_ref::<ScriptComponent>() {
        return bridge.satisfies(T::tag()).then_some(ComponentRef::Foreign(bridge));
    }
    T::cast(component).map(ComponentRef::Native)
}
