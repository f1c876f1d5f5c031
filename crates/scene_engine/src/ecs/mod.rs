//! Entity-Component-System implementation
//!
//! Entities live in an [`EntityTree`]: every entity owns one spatial node and
//! an ordered list of components, and is either a root or the child of
//! exactly one parent.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;
pub mod systems;

pub use world::EntityTree;
pub use entity::{EntityId, EntityRecord};
pub use component::{
    Behaviour, BehaviourSlot, Capabilities, Component, ComponentKind, RenderContext, UpdateContext,
};
