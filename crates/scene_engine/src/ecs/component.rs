//! Component model
//!
//! Components are a closed tagged union. The engine's own kinds (camera,
//! interaction, bounds) are matched directly; anything else plugs in as a
//! boxed [`Behaviour`], identified by its concrete type.

use std::any::{Any, TypeId};

use bitflags::bitflags;

use crate::foundation::math::Mat4;
use crate::render::Camera;
use crate::scene::scene_graph::Aabb;

use super::components::Interaction;
use super::EntityId;

bitflags! {
    /// What a component takes part in
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// Receives `update` once per frame
        const UPDATE = 1 << 0;
        /// Receives `render` once per frame
        const RENDER = 1 << 1;
        /// Provides a camera
        const CAMERA = 1 << 2;
        /// Takes part in picking
        const INTERACTION = 1 << 3;
        /// Provides local bounds for ray picking
        const BOUNDS = 1 << 4;
    }
}

/// Per-frame data handed to [`Behaviour::update`]
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext {
    /// Entity the behaviour is attached to
    pub entity: EntityId,
    /// Entity world matrix, already refreshed for this frame
    pub world: Mat4,
    /// Seconds since the previous frame
    pub delta_time: f32,
}

/// Matrices handed to [`Behaviour::render`]
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    /// Entity the behaviour is attached to
    pub entity: EntityId,
    /// Entity world matrix
    pub world: Mat4,
    /// Active camera view matrix
    pub view: Mat4,
    /// Active camera projection matrix
    pub projection: Mat4,
}

impl RenderContext {
    /// Combined model-view-projection matrix
    pub fn mvp(&self) -> Mat4 {
        self.projection * self.view * self.world
    }
}

/// Helper supertrait giving trait objects access to `Any`
pub trait AsAny: Any {
    /// Borrow as `Any`
    fn as_any(&self) -> &dyn Any;
    /// Borrow mutably as `Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// User-defined component logic
///
/// Every hook has a no-op default; implementors declare which hooks they
/// need through [`Behaviour::capabilities`].
pub trait Behaviour: AsAny {
    /// Hooks this behaviour takes part in
    fn capabilities(&self) -> Capabilities {
        Capabilities::UPDATE
    }

    /// Called once, immediately when attached
    fn init(&mut self, _entity: EntityId) {}

    /// Called once per frame when [`Capabilities::UPDATE`] is declared
    fn update(&mut self, _ctx: &UpdateContext) {}

    /// Called once per frame when [`Capabilities::RENDER`] is declared
    fn render(&mut self, _ctx: &RenderContext) {}
}

/// Boxed behaviour together with its concrete type
pub struct BehaviourSlot {
    type_id: TypeId,
    type_name: &'static str,
    inner: Box<dyn Behaviour>,
}

impl BehaviourSlot {
    /// Box a behaviour
    pub fn new<B: Behaviour>(behaviour: B) -> Self {
        Self {
            type_id: TypeId::of::<B>(),
            type_name: std::any::type_name::<B>(),
            inner: Box::new(behaviour),
        }
    }

    /// Concrete type of the boxed behaviour
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Concrete type name, for logs
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Downcast to the concrete behaviour
    pub fn downcast_ref<B: Behaviour>(&self) -> Option<&B> {
        (*self.inner).as_any().downcast_ref::<B>()
    }

    /// Downcast to the concrete behaviour, mutably
    pub fn downcast_mut<B: Behaviour>(&mut self) -> Option<&mut B> {
        (*self.inner).as_any_mut().downcast_mut::<B>()
    }

    pub(crate) fn get_mut(&mut self) -> &mut dyn Behaviour {
        self.inner.as_mut()
    }
}

/// Discriminant used to look components up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// [`Component::Camera`]
    Camera,
    /// [`Component::Interaction`]
    Interaction,
    /// [`Component::Bounds`]
    Bounds,
    /// [`Component::Behaviour`] of one concrete type
    Behaviour(TypeId),
}

impl ComponentKind {
    /// Kind of a behaviour type
    pub fn behaviour<B: Behaviour>() -> Self {
        Self::Behaviour(TypeId::of::<B>())
    }
}

/// A component attached to an entity
pub enum Component {
    /// Camera providing view and projection for the scene
    Camera(Camera),
    /// Picking target with hover and click callbacks
    Interaction(Interaction),
    /// Local-space bounding box used by ray picking
    Bounds(Aabb),
    /// User-defined behaviour
    Behaviour(BehaviourSlot),
}

impl Component {
    /// Wrap a behaviour
    pub fn behaviour<B: Behaviour>(behaviour: B) -> Self {
        Self::Behaviour(BehaviourSlot::new(behaviour))
    }

    /// Lookup key of this component
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Camera(_) => ComponentKind::Camera,
            Self::Interaction(_) => ComponentKind::Interaction,
            Self::Bounds(_) => ComponentKind::Bounds,
            Self::Behaviour(slot) => ComponentKind::Behaviour(slot.type_id()),
        }
    }

    /// Declared capabilities
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Self::Camera(_) => Capabilities::CAMERA,
            Self::Interaction(_) => Capabilities::INTERACTION,
            Self::Bounds(_) => Capabilities::BOUNDS,
            Self::Behaviour(slot) => slot.inner.capabilities(),
        }
    }
}

impl From<Camera> for Component {
    fn from(camera: Camera) -> Self {
        Self::Camera(camera)
    }
}

impl From<Interaction> for Component {
    fn from(interaction: Interaction) -> Self {
        Self::Interaction(interaction)
    }
}

impl From<Aabb> for Component {
    fn from(bounds: Aabb) -> Self {
        Self::Bounds(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::PickingMethod;

    struct Spinner;

    impl Behaviour for Spinner {}

    struct Painter;

    impl Behaviour for Painter {
        fn capabilities(&self) -> Capabilities {
            Capabilities::UPDATE | Capabilities::RENDER
        }
    }

    #[test]
    fn test_kinds_and_capabilities() {
        let interaction = Component::from(Interaction::new(PickingMethod::Method2D));
        assert_eq!(interaction.kind(), ComponentKind::Interaction);
        assert_eq!(interaction.capabilities(), Capabilities::INTERACTION);

        let bounds = Component::from(Aabb::unit_cube());
        assert_eq!(bounds.kind(), ComponentKind::Bounds);

        let painter = Component::behaviour(Painter);
        assert_eq!(painter.kind(), ComponentKind::behaviour::<Painter>());
        assert!(painter.capabilities().contains(Capabilities::RENDER));
        assert_ne!(painter.kind(), ComponentKind::behaviour::<Spinner>());
    }

    #[test]
    fn test_behaviour_downcast() {
        let slot = BehaviourSlot::new(Spinner);
        assert!(slot.downcast_ref::<Spinner>().is_some());
        assert!(slot.downcast_ref::<Painter>().is_none());
        assert!(slot.type_name().ends_with("Spinner"));
    }
}
