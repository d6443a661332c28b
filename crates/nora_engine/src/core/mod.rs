//! # Core Engine Module
//!
//! Shared configuration used by the runtime loop and the application crate.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for engine, window and render dispatch

pub mod config;

pub use crate::foundation;

pub use config::{
    ApplicationConfig,
    EngineConfig,
    WindowConfig,
    RenderConfig,
    Config,
    ConfigError,
    ConfigFormat,
    GUI_SHADER,
    MESH_SHADER,
    MODEL_SHADER,
};
