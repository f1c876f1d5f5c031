//! ECS Systems module

pub mod picking_system;

pub use picking_system::{
    PickingEvent, PickingOutcome, PickingSystem,
    is_pointer_over_2d, screen_to_world_2d, screen_to_world_ray_3d,
};
