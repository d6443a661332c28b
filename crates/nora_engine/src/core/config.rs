//! # Unified Configuration System
//!
//! All configuration consumed by the runtime loop lives here: engine behaviour,
//! the (headless) window description and the render dispatch settings. The
//! whole tree is loaded through [`Config`] from either RON or TOML.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: logging, frame pacing and run length
//! - **Window Config**: title, size and clear color
//! - **Render Config**: shader categories and projection planes

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError, ConfigFormat};
use crate::render::Color;

/// Shader category used by mesh renderables
pub const MESH_SHADER: &str = "mesh";

/// Shader category used by imported models
pub const MODEL_SHADER: &str = "3d_model";

/// Shader category every GUI component renders with
pub const GUI_SHADER: &str = "gui";

/// # Engine Configuration
///
/// Core engine behavior: logging, frame pacing and run length.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine when `RUST_LOG` is not set
    pub log_level: String,
    /// Target FPS for frame rate limiting (None = unlimited)
    pub target_fps: Option<u32>,
    /// Stop after this many frames (None = run until quit is requested)
    pub max_frames: Option<u64>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            target_fps: None,
            max_frames: None,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set target FPS
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = Some(fps);
        self
    }

    /// Limit the run to a number of frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Window Configuration
///
/// Describes the surface the runtime renders into. With the headless backend
/// only the size (for projection aspect and the GUI ortho) and the clear
/// color have an effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Clear color for every frame
    pub background_color: Color,
}

impl WindowConfig {
    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Nora Engine".to_string(),
            width: 800,
            height: 600,
            background_color: Color::new(0.2, 0.3, 0.3, 1.0),
        }
    }
}

/// # Render Configuration
///
/// Shader categories registered with the backend at startup and the planes of
/// the perspective projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Shader categories the backend must provide
    pub shader_categories: Vec<String>,
    /// Near clipping plane
    pub near_plane: f32,
    /// Far clipping plane
    pub far_plane: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shader_categories: vec![
                MESH_SHADER.to_string(),
                GUI_SHADER.to_string(),
                MODEL_SHADER.to_string(),
            ],
            near_plane: 0.1,
            far_plane: 100.0,
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Window configuration
    pub window: WindowConfig,
    /// Render dispatch configuration
    pub render: RenderConfig,
}

impl ApplicationConfig {
    /// Create a configuration with the given window title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            window: WindowConfig {
                title: title.into(),
                ..WindowConfig::default()
            },
            ..Self::default()
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.title.is_empty() {
            return Err(ConfigError::Invalid("window title cannot be empty".to_string()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.render.near_plane <= 0.0 || self.render.near_plane >= self.render.far_plane {
            return Err(ConfigError::Invalid(format!(
                "near plane {} must be positive and below far plane {}",
                self.render.near_plane, self.render.far_plane
            )));
        }
        if !self.render.shader_categories.iter().any(|c| c == GUI_SHADER) {
            return Err(ConfigError::Invalid("the \"gui\" shader category is required".to_string()));
        }
        Ok(())
    }
}

impl Config for ApplicationConfig {}
