//! # Scene Engine
//!
//! A small frame-stepped entity engine built around a scene graph with lazily
//! recomputed world transforms and pointer picking.
//!
//! ## Features
//!
//! - **Entity tree**: named entities with a spatial node each, parented
//!   through generational handles
//! - **Cameras**: orthographic 2D and perspective 3D, projections kept eager
//! - **Picking**: 2D quads and 3D bounding boxes resolved into hover and
//!   click callbacks
//! - **Input**: key and button edges latched once per frame
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let scene = engine.scene_mut();
//!         let camera = scene.spawn_camera_2d("camera", Vec3::zeros());
//!         scene.set_active_camera(camera);
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn shutdown(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::new(EngineConfig::default())?;
//!     let frames: Vec<Vec<InputEvent>> = vec![Vec::new(); 3];
//!     engine.run(&mut MyApp, frames)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod render;
pub mod input;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, Application,
        Engine, EngineError,
        config::{Config, EngineConfig},
        foundation::math::{Mat4, Mat4Ext, Quat, Vec2, Vec3},
        ecs::{
            Behaviour, Capabilities, Component, ComponentKind, EntityId, EntityTree,
            RenderContext, UpdateContext,
        },
        ecs::components::{Interaction, PickingMethod, SpatialNode},
        ecs::systems::{PickingEvent, PickingOutcome, PickingSystem},
        input::{FrameInput, InputEvent, InputManager, KeyCode, MouseButton},
        render::{Camera, Camera2D, Camera3D},
        scene::{Aabb, Ray, Scene},
    };
}
