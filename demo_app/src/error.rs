//! Demo errors

use scene_engine::prelude::EngineError;
use thiserror::Error;

/// Failures while building or driving a demo scene
#[derive(Error, Debug)]
pub enum DemoError {
    /// The oven entity tree could not be assembled
    #[error("microwave layout could not be built")]
    Layout,

    /// A keypad button has no screen position
    #[error("keypad button {0} missing from layout")]
    MissingKey(String),

    /// The engine rejected its config or a frame failed
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}
