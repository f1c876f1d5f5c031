//! # Rendering interface
//!
//! This engine does not own GPU resources. Rendering is a per-frame walk of
//! the entity tree handing world, view and projection matrices to every
//! render-capable behaviour (see [`crate::ecs::RenderContext`]); the camera
//! types here supply view and projection.

pub mod camera;

pub use camera::{Camera, Camera2D, Camera3D};
