//! Core engine implementation
//!
//! The runtime loop: register shader categories, let the application build
//! its scene, start the scene once, then every frame tick the timer, update
//! the application and the scene, and render.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::{
    application::Application,
    config::ConfigError,
    core::config::{ApplicationConfig, GUI_SHADER},
    foundation::{
        math::{Mat4, Mat4Ext},
        time::Timer,
    },
    render::{Color, GuiPass, RenderBackend, RenderError, RenderPass, ShaderRegistry},
    scene::{CameraProvider, Component, ComponentRef, Entity, FrameContext, GuiRenderable, Renderable, Scene},
};

/// Main engine struct
///
/// Owns the scene and the frame state. The application reaches it through
/// [`Application::initialize`] and [`Application::update`], which run outside
/// any scene traversal.
pub struct Engine {
    scene: Scene,
    config: ApplicationConfig,
    shaders: ShaderRegistry,
    timer: Timer,
    frame: FrameContext,
    background_color: Color,
    running: bool,
}

impl Engine {
    /// Create a new engine instance from a validated configuration
    pub fn new(config: ApplicationConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!(
            "Initializing engine: '{}' {}x{}",
            config.window.title,
            config.window.width,
            config.window.height
        );

        let frame = FrameContext {
            screen_size: (config.window.width, config.window.height),
            ..FrameContext::default()
        };

        Ok(Self {
            scene: Scene::new(),
            background_color: config.window.background_color,
            shaders: ShaderRegistry::new(),
            timer: Timer::new(),
            frame,
            config,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(
        config: ApplicationConfig,
        app: &mut T,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;
        engine.register_shaders(backend)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::Application(format!("App initialization: {}", e)))?;

        engine.start();
        log::info!("Starting main loop...");

        while engine.running {
            let frame_start = Instant::now();
            engine.tick();

            let delta_time = engine.delta_time();
            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::Application(format!("App update: {}", e)))?;

            engine.update();
            engine.render(backend)?;

            if let Some(max_frames) = engine.config.engine.max_frames {
                if engine.timer.frame_count() >= max_frames {
                    log::info!("Reached frame limit of {}", max_frames);
                    engine.running = false;
                }
            }
            engine.pace(frame_start);
        }

        app.cleanup(&mut engine);

        log::info!("Engine shutdown complete after {} frames", engine.timer.frame_count());
        Ok(())
    }

    /// Register every configured shader category with the backend
    pub fn register_shaders(&mut self, backend: &mut dyn RenderBackend) -> Result<(), EngineError> {
        for category in &self.config.render.shader_categories {
            self.shaders.register(backend, category).map_err(|e| {
                EngineError::InitializationFailed(format!("Shader category '{}': {}", category, e))
            })?;
        }
        Ok(())
    }

    /// Run the start pass over the whole scene
    pub fn start(&mut self) {
        self.scene.start(&self.frame);
    }

    /// Advance the frame clock
    pub fn tick(&mut self) {
        self.timer.update();
        self.sync_frame();
    }

    /// Advance the frame clock by a fixed step
    pub fn tick_fixed(&mut self, step: Duration) {
        self.timer.advance(step);
        self.sync_frame();
    }

    fn sync_frame(&mut self) {
        self.frame = FrameContext {
            delta_time: self.timer.delta_time(),
            total_time: self.timer.total_time(),
            frame: self.timer.frame_count().saturating_sub(1),
            fps: self.timer.fps(),
            screen_size: (self.config.window.width, self.config.window.height),
        };
    }

    /// Run the update pass over the whole scene
    pub fn update(&mut self) {
        self.scene.update(&self.frame);
    }

    /// Render the current frame
    ///
    /// Without a camera in the scene nothing but the clear happens. A failing
    /// component draw is logged and skipped; backend state errors abort.
    pub fn render(&self, backend: &mut dyn RenderBackend) -> Result<(), EngineError> {
        backend.clear(self.background_color);

        let Some((view, projection)) = self.active_camera_matrices() else {
            log::trace!("No active camera, skipping frame {}", self.frame.frame);
            return backend.present().map_err(EngineError::from);
        };

        for entity in self.scene.entities_with_component::<dyn Renderable>() {
            let Some(renderable) = native_match(entity, entity.get_component::<dyn Renderable>()) else {
                continue;
            };

            let category = renderable.shader_category();
            let Some(shader) = self.shaders.get(category) else {
                log::warn!(
                    "Entity {} '{}': unknown shader category '{}', not rendered",
                    entity.id(),
                    entity.name(),
                    category
                );
                continue;
            };

            let mut pass = RenderPass::new(backend, shader, &view, &projection, entity.transform());
            if let Err(err) = renderable.render(&mut pass) {
                log::error!("Entity {} '{}': {} failed to render: {}", entity.id(), entity.name(), renderable.name(), err);
            }
        }

        self.render_gui(backend)?;
        backend.present().map_err(EngineError::from)
    }

    fn render_gui(&self, backend: &mut dyn RenderBackend) -> Result<(), EngineError> {
        let shader = self
            .shaders
            .get(GUI_SHADER)
            .ok_or_else(|| EngineError::Render(RenderError::RenderingFailed("gui shader not registered".to_string())))?;

        let (width, height) = self.frame.screen_size;
        let ortho = Mat4::orthographic_2d(0.0, width as f32, 0.0, height as f32);
        backend.set_projection(shader, &ortho)?;

        for entity in self.scene.entities_with_component::<dyn GuiRenderable>() {
            let Some(gui) = native_match(entity, entity.get_component::<dyn GuiRenderable>()) else {
                continue;
            };

            let mut pass = GuiPass::new(backend, shader, self.frame.screen_size, entity.transform());
            if let Err(err) = gui.render_gui(&mut pass) {
                log::error!("Entity {} '{}': {} failed to render: {}", entity.id(), entity.name(), gui.name(), err);
            }
        }
        Ok(())
    }

    /// View and projection of the first camera in the scene
    fn active_camera_matrices(&self) -> Option<(Mat4, Mat4)> {
        let entity = self.scene.first_entity_with_component::<dyn CameraProvider>()?;
        let camera = native_match(entity, entity.get_component::<dyn CameraProvider>())?;
        let aspect = self.config.window.aspect_ratio();
        let render = &self.config.render;
        Some((
            camera.view_matrix(entity.transform()),
            camera.projection_matrix(aspect, render.near_plane, render.far_plane),
        ))
    }

    fn pace(&self, frame_start: Instant) {
        let Some(target_fps) = self.config.engine.target_fps.filter(|fps| *fps > 0) else {
            return;
        };
        let budget = Duration::from_secs_f32(1.0 / target_fps as f32);
        if let Some(remaining) = budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    /// Request engine shutdown after the current frame
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Get mutable access to the scene
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Add a root entity to the scene
    pub fn spawn(&mut self, entity: Entity) -> bool {
        self.scene.add_entity(entity)
    }

    /// Active configuration
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// State of the current frame
    pub fn frame(&self) -> &FrameContext {
        &self.frame
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.frame.delta_time
    }

    /// Registered shader categories
    pub fn shaders(&self) -> &ShaderRegistry {
        &self.shaders
    }

    /// Clear color of the next frame
    pub fn background_color(&self) -> Color {
        self.background_color
    }

    /// Change the clear color
    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }
}

/// Narrow a lookup to a native match; script-backed matches cannot be drawn
fn native_match<'a, T: ?Sized>(entity: &Entity, found: Option<ComponentRef<'a, T>>) -> Option<&'a T> {
    match found? {
        ComponentRef::Native(component) => Some(component),
        ComponentRef::Foreign(bridge) => {
            log::debug!(
                "Entity {} '{}': script-backed {} has no native draw path",
                entity.id(),
                entity.name(),
                bridge.name()
            );
            None
        }
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    Application(String),

    /// Rendering error
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
}
