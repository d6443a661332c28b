//! # Nora Engine
//!
//! A small real-time engine built around a scene graph of entities carrying
//! attachable components, with behaviors written natively or in a scripting
//! layer.
//!
//! ## Features
//!
//! - **Scene Graph**: entities own their children and propagate transforms
//!   down the hierarchy once per frame
//! - **Components**: native behaviors and script-backed behaviors behind one
//!   contract, queried by capability (renderable, camera, GUI)
//! - **Script Bridge**: script failures are logged and contained
//! - **Render Dispatch**: camera, mesh and GUI passes over a pluggable backend
//! - **Configuration**: RON or TOML files through one `Config` trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nora_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         engine.spawn(Entity::named("camera").with_component(Camera::new()));
//!         engine.spawn(Entity::named("cube").with_component(MeshRenderer::cuboid()));
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::new("Quick Start");
//!     let mut backend = HeadlessBackend::new();
//!     Engine::run(config, &mut MyApp, &mut backend)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;
pub mod foundation;

pub mod components;
pub mod render;
pub mod scene;
pub mod script;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        components::{Camera, CameraMovement, MeshRenderer, Text},
        core::config::{ApplicationConfig, Config, EngineConfig, RenderConfig, WindowConfig},
        foundation::math::{Mat4, Vec2, Vec3},
        render::{Color, HeadlessBackend, MeshShape, RenderBackend},
        scene::{
            CameraProvider, Component, ComponentContext, ComponentError, ComponentRef, Entity, EntityId,
            FrameContext, GuiRenderable, OwnerSlot, Renderable, Scene, Transform,
        },
        script::{BehaviourLibrary, ScriptComponent, ScriptObject},
        AppError, Application, Engine, EngineError,
    };
}
