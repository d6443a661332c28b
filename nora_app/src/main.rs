//! Nora demo: a small scene driven headlessly
//!
//! Usage: `nora [config.ron|config.toml] [behaviours.ron]`
//!
//! Builds a camera, a few meshes (one carrying a scripted spinner), a
//! script-backed bobbing drone and an FPS readout, then runs the engine loop
//! against the headless backend until the configured frame limit.

use std::path::{Path, PathBuf};

use nora_engine::foundation::logging;
use nora_engine::prelude::*;

const DEFAULT_CONFIG: &str = "nora_app/assets/nora.ron";
const DEFAULT_BEHAVIOURS: &str = "nora_app/assets/behaviours.ron";

/// Frames to run when the config sets no limit
const DEMO_FRAMES: u64 = 300;

/// Background hue cycle, in seconds per full turn
const SPECTRUM_PERIOD: f32 = 12.0;

struct DemoApp {
    behaviours: BehaviourLibrary,
    hud: Option<EntityId>,
}

impl DemoApp {
    fn new(behaviours: BehaviourLibrary) -> Self {
        Self {
            behaviours,
            hud: None,
        }
    }

    /// Attach a script class if the library has it
    fn scripted(&self, entity: Entity, class: &str) -> Result<Entity, AppError> {
        if !self.behaviours.contains(class) {
            log::warn!("Behaviour '{}' not defined, '{}' stays static", class, entity.name());
            return Ok(entity);
        }
        Ok(entity.with_component(self.behaviours.instantiate_component(class)?))
    }
}

impl Application for DemoApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Building demo scene...");

        let camera = Entity::named("camera")
            .with_transform(Transform::new().with_position(Vec3::new(0.0, 1.0, 6.0)))
            .with_component(Camera::new().with_orientation(-90.0, -10.0));
        engine.spawn(camera);

        let moon = Entity::named("moon")
            .with_transform(
                Transform::new()
                    .with_position(Vec3::new(2.5, 0.0, 0.0))
                    .with_scale(Vec3::new(0.3, 0.3, 0.3)),
            )
            .with_component(MeshRenderer::sphere().with_texture("moon.png"));
        let station = Entity::named("station")
            .with_component(MeshRenderer::cuboid().with_texture("hull.png"))
            .with_child(moon);
        engine.spawn(self.scripted(station, "Spinner")?);

        let pod = Entity::named("pod")
            .with_transform(Transform::new().with_position(Vec3::new(-2.0, 0.0, -1.0)))
            .with_component(MeshRenderer::capsule(0.5, 1.0));
        engine.spawn(self.scripted(pod, "Glitch")?);

        let drone = Entity::named("drone").with_transform(Transform::new().with_position(Vec3::new(0.0, -1.5, 0.0)));
        engine.spawn(self.scripted(drone, "Bobber")?);

        let hud = Entity::named("hud")
            .with_transform(Transform::new().with_position(Vec3::new(25.0, 25.0, 0.0)))
            .with_component(Text::new("FPS: --").with_font("mono", 24));
        self.hud = Some(hud.id());
        engine.spawn(hud);

        if engine.config().engine.max_frames.is_none() {
            log::info!("No frame limit configured, stopping after {} frames", DEMO_FRAMES);
        }

        log::info!("Demo scene ready with {} entities", engine.scene().entity_count());
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        let frame = *engine.frame();

        engine.set_background_color(spectrum(frame.total_time / SPECTRUM_PERIOD));

        if let Some(id) = self.hud {
            if let Some(text) = engine
                .scene_mut()
                .find_entity_mut(id)
                .and_then(|hud| hud.get_component_mut::<Text>())
            {
                text.text = format!("FPS: {:.0}", frame.fps);
            }
        }

        if engine.config().engine.max_frames.is_none() && frame.frame + 1 >= DEMO_FRAMES {
            engine.quit();
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "Cleaning up demo after {} frames ({} entities)",
            engine.frame().frame + 1,
            engine.scene().entity_count()
        );
    }
}

/// Fully saturated color at `turns` around the hue wheel
fn spectrum(turns: f32) -> Color {
    let hue = turns.rem_euclid(1.0) * 6.0;
    let x = 1.0 - (hue % 2.0 - 1.0).abs();
    let (r, g, b) = match hue as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    Color::rgb(r, g, b)
}

fn load_behaviours(path: &Path) -> Result<BehaviourLibrary, AppError> {
    if !path.exists() {
        log::warn!("Behaviours {} not found, running without scripts", path.display());
        return Ok(BehaviourLibrary::new());
    }
    Ok(BehaviourLibrary::load(path)?)
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let behaviours_path = args.next().map_or_else(|| PathBuf::from(DEFAULT_BEHAVIOURS), PathBuf::from);

    let config = ApplicationConfig::load_or_default(&config_path)?;
    logging::init(&config.engine.log_level);
    log::info!("Starting {} (config: {})", config.window.title, config_path.display());

    let behaviours = load_behaviours(&behaviours_path)?;
    let mut app = DemoApp::new(behaviours);
    let mut backend = HeadlessBackend::new();

    Engine::run(config, &mut app, &mut backend)?;
    log::info!("Backend presented {} frames", backend.frames());
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        // Logging may not be up yet if the config failed to load
        logging::init("error");
        log::error!("Nora demo failed: {}", e);
        std::process::exit(1);
    }
}
