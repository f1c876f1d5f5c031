//! Core engine implementation
//!
//! The engine owns the scene, the input manager and a fixed-step clock, and
//! runs frames from scripted event batches. It opens no window; a backend
//! feeds events in and reads rendered state out through behaviours.

use std::path::Path;

use crate::{
    application::{AppError, Application},
    config::{ConfigError, EngineConfig},
    ecs::systems::PickingOutcome,
    foundation::time::FrameClock,
    input::{FrameInput, InputEvent, InputManager},
    scene::Scene,
};
use thiserror::Error;

/// Main engine struct
///
/// The engine coordinates the scene and input and manages the frame loop.
#[derive(Debug)]
pub struct Engine {
    scene: Scene,
    input: InputManager,
    frame_input: FrameInput,
    clock: FrameClock,
    config: EngineConfig,
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        log::info!("Initializing engine...");

        let scene = Scene::new("main", &config);
        let input = InputManager::new(config.viewport.width, config.viewport.height);
        let frame_input = input.frame_input();

        Ok(Self {
            scene,
            input,
            frame_input,
            clock: FrameClock::default(),
            config,
            running: true,
        })
    }

    /// Create an engine from a TOML or RON configuration file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let config = EngineConfig::load_validated(path)?;
        Self::new(config)
    }

    /// Replace the fixed frame step
    pub fn with_frame_step(mut self, delta_time: f32) -> Self {
        self.clock = FrameClock::new(delta_time);
        self
    }

    /// Run the application over a sequence of per-frame event batches
    ///
    /// Returns the number of frames stepped. Stops early after [`Engine::quit`].
    pub fn run<A, I>(&mut self, app: &mut A, frames: I) -> Result<u64, EngineError>
    where
        A: Application,
        I: IntoIterator,
        I::Item: IntoIterator<Item = InputEvent>,
    {
        self.scene.init();
        app.initialize(self)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting frame loop...");
        let mut stepped = 0;
        for events in frames {
            if !self.running {
                break;
            }
            self.step(app, events)?;
            stepped += 1;
        }

        app.shutdown(self);
        self.scene.shutdown();
        log::info!("Engine shutdown complete after {} frames", stepped);
        Ok(stepped)
    }

    /// Run a single frame
    ///
    /// Latches `events`, lets the application update, updates the scene and
    /// resolves picking, reports picking to the application, then renders.
    pub fn step<A, E>(&mut self, app: &mut A, events: E) -> Result<PickingOutcome, EngineError>
    where
        A: Application,
        E: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            if let InputEvent::Resized { width, height } = event {
                self.scene.set_viewport(width, height);
            }
            self.input.handle_event(event);
        }
        self.frame_input = self.input.frame_input();
        let delta_time = self.clock.tick();

        app.update(self, delta_time)
            .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;

        let outcome = self.scene.update(delta_time, &self.frame_input);
        app.on_picking(self, &outcome)
            .map_err(|e| EngineError::ApplicationError(format!("App picking: {}", e)))?;

        self.scene.render();
        self.input.end_frame();
        log::trace!("Frame {} done", self.clock.frame_count());
        Ok(outcome)
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the frame loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, mutably
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Input snapshot of the frame being processed
    pub fn frame_input(&self) -> &FrameInput {
        &self.frame_input
    }

    /// Input manager
    pub fn input(&self) -> &InputManager {
        &self.input
    }

    /// Frame clock
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration file could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration values are out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}

impl From<AppError> for EngineError {
    fn from(error: AppError) -> Self {
        Self::ApplicationError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Interaction, PickingMethod, SpatialNode};
    use crate::foundation::math::Vec3;
    use crate::input::KeyCode;

    #[derive(Default)]
    struct Recorder {
        initialized: bool,
        shut_down: bool,
        updates: u32,
        keys: Vec<KeyCode>,
        clicks: u32,
        quit_after: Option<u32>,
    }

    impl Application for Recorder {
        fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            let scene = engine.scene_mut();
            let camera = scene.spawn_camera_2d("camera", Vec3::zeros());
            scene.set_active_camera(camera);
            let button = scene.tree_mut().spawn(
                "button",
                SpatialNode::from_position(Vec3::new(400.0, 300.0, 0.0)).with_scale(Vec3::new(100.0, 100.0, 1.0)),
            );
            scene.tree_mut().attach(button, Interaction::new(PickingMethod::Method2D));
            self.initialized = true;
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            self.updates += 1;
            self.keys.extend(engine.frame_input().keys_pressed.iter().copied());
            if self.quit_after == Some(self.updates) {
                engine.quit();
            }
            Ok(())
        }

        fn on_picking(&mut self, _engine: &mut Engine, outcome: &PickingOutcome) -> Result<(), AppError> {
            if outcome.clicked().is_some() {
                self.clicks += 1;
            }
            Ok(())
        }

        fn shutdown(&mut self, _engine: &mut Engine) {
            self.shut_down = true;
        }
    }

    struct Failing;

    impl Application for Failing {
        fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
            Ok(())
        }

        fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            Err(AppError::GameLogic("boom".to_string()))
        }

        fn shutdown(&mut self, _engine: &mut Engine) {}
    }

    #[test]
    fn test_run_steps_every_frame() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        let mut app = Recorder::default();
        let frames = vec![
            InputEvent::tap(KeyCode::W).to_vec(),
            Vec::new(),
            InputEvent::click_at(400.0, 300.0).to_vec(),
        ];

        let stepped = engine.run(&mut app, frames).unwrap();

        assert_eq!(stepped, 3);
        assert!(app.initialized);
        assert!(app.shut_down);
        assert_eq!(app.updates, 3);
        assert_eq!(app.keys, vec![KeyCode::W]);
        assert_eq!(app.clicks, 1);
        assert_eq!(engine.clock().frame_count(), 3);
        assert!(engine.scene().tree().is_empty());
    }

    #[test]
    fn test_quit_stops_the_loop() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        let mut app = Recorder { quit_after: Some(2), ..Default::default() };

        let stepped = engine.run(&mut app, vec![Vec::<InputEvent>::new(); 5]).unwrap();

        assert_eq!(stepped, 2);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_resize_reaches_the_scene() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        let mut app = Recorder::default();
        app.initialize(&mut engine).unwrap();

        engine.step(&mut app, [InputEvent::Resized { width: 1024, height: 768 }]).unwrap();

        assert_eq!(engine.scene().viewport().x, 1024.0);
        assert_eq!(engine.frame_input().viewport.y, 768.0);
    }

    #[test]
    fn test_application_error_is_reported() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        let result = engine.run(&mut Failing, vec![Vec::<InputEvent>::new()]);
        assert!(matches!(result, Err(EngineError::ApplicationError(message)) if message.contains("boom")));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig::default().with_viewport(0, 600);
        assert!(matches!(Engine::new(config), Err(EngineError::InvalidConfig(_))));
    }
}
