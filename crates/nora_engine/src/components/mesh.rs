//! Mesh renderer component

use std::path::PathBuf;

use crate::core::config::{MESH_SHADER, MODEL_SHADER};
use crate::render::{MeshShape, RenderError, RenderPass};
use crate::scene::{Component, OwnerSlot, Renderable};

/// Draws a mesh at its owner's world matrix
#[derive(Debug, Clone)]
pub struct MeshRenderer {
    owner: OwnerSlot,
    shape: MeshShape,
    texture: Option<String>,
    shader_category: String,
}

impl MeshRenderer {
    /// Renderer for `shape`; models use the "3d_model" category, everything else "mesh"
    pub fn new(shape: MeshShape) -> Self {
        let shader_category = match shape {
            MeshShape::Model { .. } => MODEL_SHADER,
            _ => MESH_SHADER,
        };
        Self {
            owner: OwnerSlot::new(),
            shape,
            texture: None,
            shader_category: shader_category.to_string(),
        }
    }

    /// Unit cube
    pub fn cuboid() -> Self {
        Self::new(MeshShape::Cuboid)
    }

    /// UV sphere with default subdivision
    pub fn sphere() -> Self {
        Self::new(MeshShape::sphere())
    }

    /// Capsule with default subdivision
    pub fn capsule(radius: f32, cylinder_height: f32) -> Self {
        Self::new(MeshShape::capsule(radius, cylinder_height))
    }

    /// Model loaded from a file by the backend
    pub fn model(path: impl Into<PathBuf>) -> Self {
        Self::new(MeshShape::model(path))
    }

    /// Builder pattern: Set the texture name
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    /// Builder pattern: Override the shader category
    pub fn with_shader_category(mut self, category: impl Into<String>) -> Self {
        self.shader_category = category.into();
        self
    }

    /// Geometry description
    pub fn shape(&self) -> &MeshShape {
        &self.shape
    }

    /// Texture name
    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }
}

impl Component for MeshRenderer {
    fn owner_slot(&self) -> &OwnerSlot {
        &self.owner
    }

    fn owner_slot_mut(&mut self) -> &mut OwnerSlot {
        &mut self.owner
    }

    fn as_renderable(&self) -> Option<&(dyn Renderable + 'static)> {
        Some(self)
    }

    fn as_renderable_mut(&mut self) -> Option<&mut (dyn Renderable + 'static)> {
        Some(self)
    }
}

impl Renderable for MeshRenderer {
    fn shader_category(&self) -> &str {
        &self.shader_category
    }

    fn render(&self, pass: &mut RenderPass<'_>) -> Result<(), RenderError> {
        pass.draw_mesh(&self.shape, self.texture.as_deref())
    }
}

crate::native_capability!(MeshRenderer, "MeshRenderer");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Vec3};
    use crate::render::{DrawCall, HeadlessBackend, ShaderRegistry};
    use crate::scene::Transform;
    use approx::assert_relative_eq;

    #[test]
    fn test_category_follows_shape() {
        assert_eq!(MeshRenderer::cuboid().shader_category(), "mesh");
        assert_eq!(MeshRenderer::capsule(0.5, 1.0).shader_category(), "mesh");
        assert_eq!(MeshRenderer::model("assets/ship.obj").shader_category(), "3d_model");
        assert_eq!(
            MeshRenderer::sphere().with_shader_category("wireframe").shader_category(),
            "wireframe"
        );
    }

    #[test]
    fn test_render_draws_at_owner_matrix() {
        let mut backend = HeadlessBackend::new();
        let mut registry = ShaderRegistry::new();
        let shader = registry.register(&mut backend, "mesh").unwrap();

        let mut transform = Transform::new().with_position(Vec3::new(0.0, 2.0, 0.0));
        transform.compute_model_matrix();
        let view = Mat4::identity();
        let projection = Mat4::identity();

        let renderer = MeshRenderer::sphere().with_texture("marble");
        let mut pass = RenderPass::new(&mut backend, shader, &view, &projection, &transform);
        renderer.render(&mut pass).unwrap();

        match &backend.calls()[0] {
            DrawCall::Mesh { shape, texture, model, .. } => {
                assert_eq!(shape, &MeshShape::sphere());
                assert_eq!(texture.as_deref(), Some("marble"));
                assert_relative_eq!(*model, *transform.model_matrix());
            }
            other => panic!("unexpected call {:?}", other),
        }
    }
}
