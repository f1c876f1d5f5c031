//! Scene management
//!
//! A [`Scene`] owns one entity tree, its active camera handle and the
//! picking system that resolves pointer input against it.

pub mod scene_graph;
pub mod scene_manager;

pub use scene_graph::{Aabb, Ray};
pub use scene_manager::Scene;
