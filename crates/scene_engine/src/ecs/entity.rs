//! Entity implementation

use slotmap::new_key_type;

use super::component::{Capabilities, Component, ComponentKind};
use super::components::SpatialNode;

new_key_type! {
    /// Entity identifier
    ///
    /// Generational handle into an [`EntityTree`](super::EntityTree); a handle
    /// to a destroyed entity resolves to `None` rather than dangling.
    pub struct EntityId;
}

/// Storage record for one entity: its spatial node plus attached components
pub struct EntityRecord {
    name: String,
    pub(crate) node: SpatialNode,
    pub(crate) components: Vec<Component>,
    capabilities: Capabilities,
}

impl EntityRecord {
    pub(crate) fn new(name: impl Into<String>, node: SpatialNode) -> Self {
        Self {
            name: name.into(),
            node,
            components: Vec::new(),
            capabilities: Capabilities::empty(),
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spatial node
    pub fn node(&self) -> &SpatialNode {
        &self.node
    }

    /// Attached components in attach order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Union of the capabilities of every attached component
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// First component of the given kind
    pub fn component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|c| c.kind() == kind)
    }

    /// First component of the given kind, mutably
    pub fn component_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.kind() == kind)
    }

    /// Whether a component of the given kind is attached
    pub fn has(&self, kind: ComponentKind) -> bool {
        self.components.iter().any(|c| c.kind() == kind)
    }

    pub(crate) fn refresh_capabilities(&mut self) {
        self.capabilities = self
            .components
            .iter()
            .fold(Capabilities::empty(), |acc, c| acc | c.capabilities());
    }
}

impl std::fmt::Debug for EntityRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRecord")
            .field("name", &self.name)
            .field("node", &self.node)
            .field("components", &self.components.iter().map(Component::kind).collect::<Vec<_>>())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}
