//! # Rendering System
//!
//! The render-dispatch boundary of the engine. The runtime loop decides *what*
//! is drawn (active camera, renderable components, GUI components) and hands
//! each draw to a [`RenderBackend`], which owns *how* it is drawn.
//!
//! ## Architecture
//!
//! - **RenderBackend**: trait over the graphics API (or the headless recorder)
//! - **ShaderRegistry**: shader categories ("mesh", "gui", "3d_model") to handles
//! - **RenderPass / GuiPass**: what a renderable component sees while drawing
//! - **MeshShape / Color**: plain descriptions that cross the boundary

mod backend;
mod color;
mod headless;
mod mesh;
mod pass;
mod shader;

pub use backend::{BackendResult, MeshDraw, RenderBackend, TextDraw};
pub use color::Color;
pub use headless::{DrawCall, HeadlessBackend};
pub use mesh::MeshShape;
pub use pass::{GuiPass, RenderPass};
pub use shader::{ShaderHandle, ShaderProgram, ShaderRegistry};

/// Rendering error types
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// A draw or state upload failed
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// Shader or other resource creation failed
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),
}
