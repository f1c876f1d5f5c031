//! ECS Components module
//!
//! Spatial data every entity carries, plus the interaction component picked
//! by the picking system.

pub mod transform;
pub mod interaction;

pub use transform::{SpatialNode, euler_degrees_to_quat, axis_angle_degrees};
pub use interaction::{Interaction, InteractionCallback, PickingMethod, PickableIndex};
