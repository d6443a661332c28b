//! Backend abstraction traits for the rendering system
//!
//! This module defines the trait that rendering backends must implement so
//! the runtime loop can dispatch draws without knowing how (or whether) they
//! reach a GPU. Geometry generation, texture loading and glyph rasterization
//! all live behind this boundary.

use crate::foundation::math::{Mat4, Vec2};
use crate::render::{Color, MeshShape, RenderError, ShaderHandle};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// One mesh draw as seen by the backend
#[derive(Debug, Clone, Copy)]
pub struct MeshDraw<'a> {
    /// Geometry to generate or look up
    pub shape: &'a MeshShape,
    /// Optional texture name
    pub texture: Option<&'a str>,
    /// Owner world matrix
    pub model: &'a Mat4,
    /// Active camera view matrix
    pub view: &'a Mat4,
    /// Active camera projection matrix
    pub projection: &'a Mat4,
}

impl MeshDraw<'_> {
    /// Combined model-view-projection matrix
    pub fn mvp(&self) -> Mat4 {
        self.projection * self.view * self.model
    }
}

/// One text draw as seen by the backend
#[derive(Debug, Clone, Copy)]
pub struct TextDraw<'a> {
    /// UTF-8 text to lay out
    pub text: &'a str,
    /// Font name
    pub font: &'a str,
    /// Font size in pixels
    pub font_size: u32,
    /// Text color
    pub color: Color,
    /// Baseline origin in screen pixels (origin bottom-left)
    pub position: Vec2,
}

/// Main rendering backend trait
///
/// Calls arrive in frame order: `clear`, then 3D draws, then
/// `set_projection` on the GUI shader followed by GUI draws, then `present`.
pub trait RenderBackend {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Prepare the program for a shader category under `handle`
    fn load_shader(&mut self, handle: ShaderHandle, category: &str) -> BackendResult<()>;

    /// Begin a frame by clearing the target
    fn clear(&mut self, color: Color);

    /// Upload a projection matrix to a shader
    fn set_projection(&mut self, shader: ShaderHandle, projection: &Mat4) -> BackendResult<()>;

    /// Draw a mesh with a shader
    fn draw_mesh(&mut self, shader: ShaderHandle, draw: &MeshDraw<'_>) -> BackendResult<()>;

    /// Draw text with a shader
    fn draw_text(&mut self, shader: ShaderHandle, draw: &TextDraw<'_>) -> BackendResult<()>;

    /// Finish the frame
    fn present(&mut self) -> BackendResult<()> {
        Ok(())
    }
}
