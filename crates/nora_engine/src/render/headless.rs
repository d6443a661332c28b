//! Headless render backend
//!
//! Records every call of the current frame instead of drawing. Used by the
//! CLI when no GPU backend is wired in and by the runtime tests.

use std::collections::HashSet;

use crate::foundation::math::{Mat4, Vec2};
use crate::render::{BackendResult, Color, MeshDraw, MeshShape, RenderBackend, RenderError, ShaderHandle, TextDraw};

/// A recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// Frame cleared
    Clear(Color),
    /// Projection uploaded to a shader
    Projection {
        /// Target shader
        shader: ShaderHandle,
        /// Uploaded matrix
        projection: Mat4,
    },
    /// Mesh drawn
    Mesh {
        /// Shader used
        shader: ShaderHandle,
        /// Geometry
        shape: MeshShape,
        /// Texture name
        texture: Option<String>,
        /// World matrix
        model: Mat4,
        /// Model-view-projection matrix
        mvp: Mat4,
    },
    /// Text drawn
    Text {
        /// Shader used
        shader: ShaderHandle,
        /// Text content
        text: String,
        /// Font name
        font: String,
        /// Font size in pixels, after scaling
        font_size: u32,
        /// Fill color
        color: Color,
        /// Screen position
        position: Vec2,
    },
}

/// Render backend that records instead of drawing
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    shaders: Vec<(ShaderHandle, String)>,
    supported: Option<HashSet<String>>,
    calls: Vec<DrawCall>,
    frames: u64,
}

impl HeadlessBackend {
    /// Backend accepting every shader category
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Only accept these shader categories
    pub fn with_supported_categories(mut self, categories: &[&str]) -> Self {
        self.supported = Some(categories.iter().map(|c| (*c).to_string()).collect());
        self
    }

    /// Calls recorded since the last clear
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Mesh draws recorded since the last clear
    pub fn mesh_draws(&self) -> impl Iterator<Item = &DrawCall> + '_ {
        self.calls.iter().filter(|call| matches!(call, DrawCall::Mesh { .. }))
    }

    /// Text draws recorded since the last clear
    pub fn text_draws(&self) -> impl Iterator<Item = &DrawCall> + '_ {
        self.calls.iter().filter(|call| matches!(call, DrawCall::Text { .. }))
    }

    /// Number of frames begun
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Category loaded under `handle`
    pub fn category_of(&self, handle: ShaderHandle) -> Option<&str> {
        self.shaders
            .iter()
            .find(|(loaded, _)| *loaded == handle)
            .map(|(_, category)| category.as_str())
    }

    fn check_shader(&self, shader: ShaderHandle) -> BackendResult<()> {
        if self.category_of(shader).is_some() {
            Ok(())
        } else {
            Err(RenderError::RenderingFailed(format!("shader {:?} was never loaded", shader)))
        }
    }
}

impl RenderBackend for HeadlessBackend {
    fn name(&self) -> &str {
        "headless"
    }

    fn load_shader(&mut self, handle: ShaderHandle, category: &str) -> BackendResult<()> {
        if let Some(supported) = &self.supported {
            if !supported.contains(category) {
                return Err(RenderError::ResourceCreationFailed(format!(
                    "no program for shader category '{}'",
                    category
                )));
            }
        }
        self.shaders.push((handle, category.to_string()));
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        self.calls.clear();
        self.frames += 1;
        log::trace!("frame {}: clear {:?}", self.frames, color);
        self.calls.push(DrawCall::Clear(color));
    }

    fn set_projection(&mut self, shader: ShaderHandle, projection: &Mat4) -> BackendResult<()> {
        self.check_shader(shader)?;
        log::trace!("frame {}: projection on {:?}", self.frames, shader);
        self.calls.push(DrawCall::Projection {
            shader,
            projection: *projection,
        });
        Ok(())
    }

    fn draw_mesh(&mut self, shader: ShaderHandle, draw: &MeshDraw<'_>) -> BackendResult<()> {
        self.check_shader(shader)?;
        log::trace!("frame {}: {} mesh with {:?}", self.frames, draw.shape.kind(), shader);
        self.calls.push(DrawCall::Mesh {
            shader,
            shape: draw.shape.clone(),
            texture: draw.texture.map(str::to_string),
            model: *draw.model,
            mvp: draw.mvp(),
        });
        Ok(())
    }

    fn draw_text(&mut self, shader: ShaderHandle, draw: &TextDraw<'_>) -> BackendResult<()> {
        self.check_shader(shader)?;
        log::trace!(
            "frame {}: text '{}' in {} {}px at {:?}",
            self.frames,
            draw.text,
            draw.font,
            draw.font_size,
            draw.position
        );
        self.calls.push(DrawCall::Text {
            shader,
            text: draw.text.to_string(),
            font: draw.font.to_string(),
            font_size: draw.font_size,
            color: draw.color,
            position: draw.position,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ShaderRegistry;

    #[test]
    fn test_clear_starts_new_frame() {
        let mut backend = HeadlessBackend::new();
        let mut registry = ShaderRegistry::new();
        let gui = registry.register(&mut backend, "gui").unwrap();

        backend.clear(Color::BLACK);
        backend.set_projection(gui, &Mat4::identity()).unwrap();
        assert_eq!(backend.calls().len(), 2);

        backend.clear(Color::WHITE);
        assert_eq!(backend.calls(), &[DrawCall::Clear(Color::WHITE)]);
        assert_eq!(backend.frames(), 2);
    }

    #[test]
    fn test_unknown_shader_rejected() {
        let mut backend = HeadlessBackend::new();
        let mut other = HeadlessBackend::new();
        let mut registry = ShaderRegistry::new();
        let handle = registry.register(&mut other, "mesh").unwrap();

        assert!(backend.set_projection(handle, &Mat4::identity()).is_err());
    }
}
