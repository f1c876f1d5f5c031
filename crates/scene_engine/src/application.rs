//! Application trait and lifecycle management

use crate::ecs::systems::PickingOutcome;
use crate::engine::{Engine, EngineError};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive a scene with the engine's frame loop.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame. Build the initial entity tree and
    /// activate a camera here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame before the scene updates. This frame's input is
    /// available through [`Engine::frame_input`].
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// React to this frame's hover and click transitions
    ///
    /// Called after picking, before rendering.
    fn on_picking(&mut self, _engine: &mut Engine, _outcome: &PickingOutcome) -> Result<(), AppError> {
        Ok(())
    }

    /// Shut the application down
    ///
    /// Called once after the last frame, before the scene is cleared.
    fn shutdown(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),
}
