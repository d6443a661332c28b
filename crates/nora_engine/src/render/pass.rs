//! Per-draw state handed to renderable components

use crate::foundation::math::{Mat4, Vec2};
use crate::render::{BackendResult, Color, MeshDraw, MeshShape, RenderBackend, ShaderHandle, TextDraw};
use crate::scene::Transform;

/// 3D pass state for one renderable component
pub struct RenderPass<'a> {
    backend: &'a mut dyn RenderBackend,
    shader: ShaderHandle,
    view: &'a Mat4,
    projection: &'a Mat4,
    transform: &'a Transform,
}

impl<'a> RenderPass<'a> {
    /// Pass for a component owned by an entity with `transform`
    pub fn new(
        backend: &'a mut dyn RenderBackend,
        shader: ShaderHandle,
        view: &'a Mat4,
        projection: &'a Mat4,
        transform: &'a Transform,
    ) -> Self {
        Self {
            backend,
            shader,
            view,
            projection,
            transform,
        }
    }

    /// Shader picked for the component's category
    pub fn shader(&self) -> ShaderHandle {
        self.shader
    }

    /// Active camera view matrix
    pub fn view(&self) -> &Mat4 {
        self.view
    }

    /// Active camera projection matrix
    pub fn projection(&self) -> &Mat4 {
        self.projection
    }

    /// Owner transform, computed this frame
    pub fn transform(&self) -> &Transform {
        self.transform
    }

    /// Draw `shape` at the owner's world matrix
    pub fn draw_mesh(&mut self, shape: &MeshShape, texture: Option<&str>) -> BackendResult<()> {
        let draw = MeshDraw {
            shape,
            texture,
            model: self.transform.model_matrix(),
            view: self.view,
            projection: self.projection,
        };
        self.backend.draw_mesh(self.shader, &draw)
    }
}

/// GUI pass state: screen space, "gui" shader, no camera
///
/// The owner's local position is read as screen pixels.
pub struct GuiPass<'a> {
    backend: &'a mut dyn RenderBackend,
    shader: ShaderHandle,
    screen_size: (u32, u32),
    transform: &'a Transform,
}

impl<'a> GuiPass<'a> {
    /// GUI pass over a target of `screen_size` pixels
    pub fn new(
        backend: &'a mut dyn RenderBackend,
        shader: ShaderHandle,
        screen_size: (u32, u32),
        transform: &'a Transform,
    ) -> Self {
        Self {
            backend,
            shader,
            screen_size,
            transform,
        }
    }

    /// Owner transform
    pub fn transform(&self) -> &Transform {
        self.transform
    }

    /// GUI shader
    pub fn shader(&self) -> ShaderHandle {
        self.shader
    }

    /// Target size in pixels
    pub fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }

    /// Draw a run of text at a screen position
    pub fn draw_text(&mut self, text: &str, font: &str, font_size: u32, color: Color, position: Vec2) -> BackendResult<()> {
        let draw = TextDraw {
            text,
            font,
            font_size,
            color,
            position,
        };
        self.backend.draw_text(self.shader, &draw)
    }
}
