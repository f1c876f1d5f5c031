//! Entity tree
//!
//! Owns every entity of a scene in a generational arena. Roots are kept in
//! insertion order; each entity lists its children in insertion order and
//! points back at its parent. Removing an entity removes its whole subtree.
//!
//! Transform mutators invalidate the subtree synchronously. World matrices are
//! resolved lazily: reading a dirty node first resolves its ancestors, so the
//! result always equals the product of the local matrices from the root down.

use slotmap::SlotMap;

use crate::foundation::math::{Mat4, Mat4Ext, Quat, Vec3};
use crate::render::Camera;
use crate::scene::scene_graph::Aabb;

use super::component::{Behaviour, Capabilities, Component, ComponentKind, RenderContext, UpdateContext};
use super::components::{axis_angle_degrees, euler_degrees_to_quat, Interaction, PickableIndex, SpatialNode};
use super::entity::{EntityId, EntityRecord};

/// Hierarchy of entities for one scene
#[derive(Debug, Default)]
pub struct EntityTree {
    entities: SlotMap<EntityId, EntityRecord>,
    roots: Vec<EntityId>,
    pickables: PickableIndex,
}

impl EntityTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Structure
    // ---------------------------------------------------------------------

    /// Add a root entity
    pub fn spawn(&mut self, name: impl Into<String>, node: SpatialNode) -> EntityId {
        let record = EntityRecord::new(name, node);
        let id = self.entities.insert(record);
        self.roots.push(id);
        log::debug!("Spawned root '{}' ({:?})", self.entities[id].name(), id);
        id
    }

    /// Append a new child entity under `parent`
    ///
    /// The child's world transform starts invalidated. Returns `None` when the
    /// parent does not exist.
    pub fn add_child(&mut self, parent: EntityId, name: impl Into<String>, node: SpatialNode) -> Option<EntityId> {
        if !self.entities.contains_key(parent) {
            log::warn!("add_child: parent {:?} does not exist", parent);
            return None;
        }

        let mut record = EntityRecord::new(name, node);
        record.node.parent = Some(parent);
        let id = self.entities.insert(record);
        self.entities[parent].node.children.push(id);
        self.invalidate(id);

        log::debug!(
            "Added child '{}' under '{}'",
            self.entities[id].name(),
            self.entities[parent].name()
        );
        Some(id)
    }

    /// Destroy the most recently added child of `parent` and its subtree
    ///
    /// Returns `false` when the parent is missing or has no children.
    pub fn remove_last_child(&mut self, parent: EntityId) -> bool {
        let Some(record) = self.entities.get_mut(parent) else {
            log::warn!("remove_last_child: parent {:?} does not exist", parent);
            return false;
        };
        let Some(child) = record.node.children.pop() else {
            return false;
        };
        self.destroy_subtree(child);
        true
    }

    /// Destroy a root entity and its subtree
    ///
    /// Child entities are only removed through [`Self::remove_last_child`];
    /// passing one here is a no-op returning `false`.
    pub fn remove_root(&mut self, root: EntityId) -> bool {
        let Some(position) = self.roots.iter().position(|r| *r == root) else {
            log::warn!("remove_root: {:?} is not a root of this tree", root);
            return false;
        };
        self.roots.remove(position);
        self.destroy_subtree(root);
        true
    }

    /// Destroy every root with the given name, returning how many were removed
    pub fn remove_roots_by_name(&mut self, name: &str) -> usize {
        let matching: Vec<EntityId> = self
            .roots
            .iter()
            .copied()
            .filter(|id| self.entities.get(*id).is_some_and(|r| r.name() == name))
            .collect();

        for id in &matching {
            self.remove_root(*id);
        }
        if !matching.is_empty() {
            log::debug!("Removed {} root(s) named '{}'", matching.len(), name);
        }
        matching.len()
    }

    /// Destroy every entity
    ///
    /// The hovered entity, if any, receives its hover-exit first.
    pub fn clear(&mut self) {
        for root in std::mem::take(&mut self.roots) {
            self.destroy_subtree(root);
        }
        self.entities.clear();
        self.pickables.clear();
    }

    fn destroy_subtree(&mut self, id: EntityId) {
        let doomed = self.descendants(id);
        for entity in &doomed {
            self.release_interaction(*entity);
        }
        for entity in &doomed {
            if let Some(record) = self.entities.remove(*entity) {
                log::debug!("Destroyed '{}'", record.name());
            }
        }
    }

    /// Deregister `id` from the pickable index, firing hover-exit when it was hovered
    fn release_interaction(&mut self, id: EntityId) {
        let was_hovered = self.pickables.hovered() == Some(id);
        if !self.pickables.deregister(id) {
            return;
        }
        if was_hovered {
            if let Some(interaction) = self.interaction_mut(id) {
                interaction.on_hover_exit();
            }
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Whether the handle refers to a live entity
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the tree has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity record
    pub fn get(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.get(id)
    }

    /// Root entities in insertion order
    pub fn roots(&self) -> &[EntityId] {
        &self.roots
    }

    /// Children of an entity in insertion order; empty for missing entities
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        match self.entities.get(id) {
            Some(record) => record.node.children(),
            None => &[],
        }
    }

    /// Parent of an entity
    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.entities.get(id)?.node.parent()
    }

    /// Display name of an entity
    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.entities.get(id).map(EntityRecord::name)
    }

    /// Spatial node of an entity
    pub fn node(&self, id: EntityId) -> Option<&SpatialNode> {
        self.entities.get(id).map(EntityRecord::node)
    }

    /// First entity with the given name, searching depth-first from the roots
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.walk()
            .into_iter()
            .find(|id| self.entities.get(*id).is_some_and(|r| r.name() == name))
    }

    /// `id` and all its descendants in depth-first pre-order
    pub fn descendants(&self, id: EntityId) -> Vec<EntityId> {
        self.preorder(&[id])
    }

    /// Every entity in depth-first pre-order, roots in insertion order
    pub fn walk(&self) -> Vec<EntityId> {
        self.preorder(&self.roots)
    }

    fn preorder(&self, starts: &[EntityId]) -> Vec<EntityId> {
        let mut order = Vec::new();
        let mut stack: Vec<EntityId> = starts.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(record) = self.entities.get(id) else {
                continue;
            };
            order.push(id);
            stack.extend(record.node.children().iter().rev().copied());
        }
        order
    }

    // ---------------------------------------------------------------------
    // Transforms
    // ---------------------------------------------------------------------

    fn mutate_node(&mut self, id: EntityId, op: &str, f: impl FnOnce(&mut SpatialNode)) -> bool {
        let Some(record) = self.entities.get_mut(id) else {
            log::warn!("{}: entity {:?} does not exist", op, id);
            return false;
        };
        f(&mut record.node);
        self.invalidate(id);
        true
    }

    /// Replace the local position
    pub fn set_local_position(&mut self, id: EntityId, position: Vec3) -> bool {
        self.mutate_node(id, "set_local_position", |node| node.write_position(position))
    }

    /// Replace the local rotation; the quaternion is normalized
    pub fn set_local_rotation(&mut self, id: EntityId, rotation: Quat) -> bool {
        self.mutate_node(id, "set_local_rotation", |node| node.write_rotation(rotation))
    }

    /// Replace the local scale
    pub fn set_local_scale(&mut self, id: EntityId, scale: Vec3) -> bool {
        self.mutate_node(id, "set_local_scale", |node| node.write_scale(scale))
    }

    /// Replace the local rotation from Euler angles in degrees
    pub fn set_local_euler_degrees(&mut self, id: EntityId, degrees: Vec3) -> bool {
        let rotation = euler_degrees_to_quat(degrees);
        self.mutate_node(id, "set_local_euler_degrees", |node| node.write_rotation(rotation))
    }

    /// Offset the local position
    pub fn translate(&mut self, id: EntityId, delta: Vec3) -> bool {
        self.mutate_node(id, "translate", |node| {
            let position = node.local_position() + delta;
            node.write_position(position);
        })
    }

    /// Pre-multiply the local rotation: `delta × current`
    pub fn rotate(&mut self, id: EntityId, delta: Quat) -> bool {
        self.mutate_node(id, "rotate", |node| node.write_pre_rotation(delta))
    }

    /// Pre-multiply the local rotation by `degrees` about `axis`
    pub fn rotate_axis_angle(&mut self, id: EntityId, degrees: f32, axis: Vec3) -> bool {
        let delta = axis_angle_degrees(degrees, axis);
        self.mutate_node(id, "rotate_axis_angle", |node| node.write_pre_rotation(delta))
    }

    /// Mark an entity and its subtree dirty
    ///
    /// Stops at nodes that are already dirty, so repeating the call is O(1).
    /// Returns the number of nodes that changed from clean to dirty.
    pub fn invalidate(&mut self, id: EntityId) -> usize {
        let mut marked = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(record) = self.entities.get_mut(current) else {
                continue;
            };
            if !record.node.mark_dirty() {
                continue;
            }
            marked += 1;
            stack.extend_from_slice(record.node.children());
        }
        marked
    }

    /// World matrix of an entity, resolving stale ancestors first
    ///
    /// Collects the dirty chain up to the first clean ancestor (or a root),
    /// then composes top-down so chain depth never grows the call stack.
    pub fn world_matrix(&mut self, id: EntityId) -> Option<Mat4> {
        let record = self.entities.get(id)?;
        if let Some(world) = record.node.cached_world_matrix() {
            return Some(world);
        }

        let mut stale = vec![id];
        let mut parent_world = Mat4::identity();
        let mut cursor = record.node.parent();
        while let Some(parent) = cursor {
            let Some(ancestor) = self.entities.get(parent) else {
                break;
            };
            if let Some(world) = ancestor.node.cached_world_matrix() {
                parent_world = world;
                break;
            }
            stale.push(parent);
            cursor = ancestor.node.parent();
        }

        for node in stale.into_iter().rev() {
            let Some(record) = self.entities.get_mut(node) else {
                continue;
            };
            parent_world *= record.node.local_matrix();
            record.node.store_world(parent_world);
        }

        log::trace!("Resolved world matrix for {:?}", id);
        Some(parent_world)
    }

    /// World-space position of an entity
    pub fn world_position(&mut self, id: EntityId) -> Option<Vec3> {
        self.world_matrix(id).map(|m| m.translation_part())
    }

    /// World-space box enclosing the entity's local bounds
    ///
    /// `None` when the entity has no [`Component::Bounds`].
    pub fn world_bounds(&mut self, id: EntityId) -> Option<Aabb> {
        let Some(local) = self.bounds(id).copied() else {
            log::debug!("world_bounds: {:?} has no bounds component", id);
            return None;
        };
        let world = self.world_matrix(id)?;
        Some(local.transformed(&world))
    }

    // ---------------------------------------------------------------------
    // Components
    // ---------------------------------------------------------------------

    /// Attach a component
    ///
    /// Runs the component's initialization immediately and registers
    /// interaction targets with the pickable index. An entity holds at most one
    /// camera, one interaction and one bounds component; attaching a second is
    /// a no-op returning `false`.
    pub fn attach(&mut self, id: EntityId, component: impl Into<Component>) -> bool {
        let mut component = component.into();
        let kind = component.kind();

        let Some(record) = self.entities.get_mut(id) else {
            log::warn!("attach: entity {:?} does not exist", id);
            return false;
        };
        if !matches!(kind, ComponentKind::Behaviour(_)) && record.has(kind) {
            log::warn!("attach: '{}' already has a {:?} component", record.name(), kind);
            return false;
        }

        if let Component::Behaviour(slot) = &mut component {
            slot.get_mut().init(id);
        }
        record.components.push(component);
        record.refresh_capabilities();

        if kind == ComponentKind::Interaction {
            self.pickables.register(id);
        }
        log::trace!("Attached {:?} to {:?}", kind, id);
        true
    }

    /// Attach a behaviour
    pub fn attach_behaviour<B: Behaviour>(&mut self, id: EntityId, behaviour: B) -> bool {
        self.attach(id, Component::behaviour(behaviour))
    }

    /// Remove every component of the given kind, returning how many were removed
    ///
    /// Removing the interaction of the hovered entity fires its hover-exit
    /// before it is dropped.
    pub fn remove_components(&mut self, id: EntityId, kind: ComponentKind) -> usize {
        if kind == ComponentKind::Interaction {
            self.release_interaction(id);
        }

        let Some(record) = self.entities.get_mut(id) else {
            return 0;
        };
        let before = record.components.len();
        record.components.retain(|c| c.kind() != kind);
        let removed = before - record.components.len();
        record.refresh_capabilities();
        removed
    }

    /// Whether an entity has a component of the given kind
    pub fn has_component(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.entities.get(id).is_some_and(|r| r.has(kind))
    }

    /// Camera component of an entity
    pub fn camera(&self, id: EntityId) -> Option<&Camera> {
        match self.entities.get(id)?.component(ComponentKind::Camera)? {
            Component::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// Camera component of an entity, mutably
    pub fn camera_mut(&mut self, id: EntityId) -> Option<&mut Camera> {
        match self.entities.get_mut(id)?.component_mut(ComponentKind::Camera)? {
            Component::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// Interaction component of an entity
    pub fn interaction(&self, id: EntityId) -> Option<&Interaction> {
        match self.entities.get(id)?.component(ComponentKind::Interaction)? {
            Component::Interaction(interaction) => Some(interaction),
            _ => None,
        }
    }

    /// Interaction component of an entity, mutably
    pub fn interaction_mut(&mut self, id: EntityId) -> Option<&mut Interaction> {
        match self.entities.get_mut(id)?.component_mut(ComponentKind::Interaction)? {
            Component::Interaction(interaction) => Some(interaction),
            _ => None,
        }
    }

    /// Local bounds of an entity
    pub fn bounds(&self, id: EntityId) -> Option<&Aabb> {
        match self.entities.get(id)?.component(ComponentKind::Bounds)? {
            Component::Bounds(bounds) => Some(bounds),
            _ => None,
        }
    }

    /// First behaviour of type `B` on an entity
    pub fn behaviour<B: Behaviour>(&self, id: EntityId) -> Option<&B> {
        match self.entities.get(id)?.component(ComponentKind::behaviour::<B>())? {
            Component::Behaviour(slot) => slot.downcast_ref::<B>(),
            _ => None,
        }
    }

    /// First behaviour of type `B` on an entity, mutably
    pub fn behaviour_mut<B: Behaviour>(&mut self, id: EntityId) -> Option<&mut B> {
        match self.entities.get_mut(id)?.component_mut(ComponentKind::behaviour::<B>())? {
            Component::Behaviour(slot) => slot.downcast_mut::<B>(),
            _ => None,
        }
    }

    /// Interaction targets registered in this tree
    pub fn pickables(&self) -> &PickableIndex {
        &self.pickables
    }

    pub(crate) fn pickables_mut(&mut self) -> &mut PickableIndex {
        &mut self.pickables
    }

    // ---------------------------------------------------------------------
    // Frame
    // ---------------------------------------------------------------------

    /// Per-frame update, depth-first pre-order from the roots
    ///
    /// Each entity refreshes its world matrix, then updates its own
    /// update-capable behaviours, then its children follow.
    pub fn update(&mut self, delta_time: f32) {
        for id in self.walk() {
            let Some(world) = self.world_matrix(id) else {
                continue;
            };
            let Some(record) = self.entities.get_mut(id) else {
                continue;
            };
            if !record.capabilities().contains(Capabilities::UPDATE) {
                continue;
            }

            let ctx = UpdateContext { entity: id, world, delta_time };
            for component in &mut record.components {
                if let Component::Behaviour(slot) = component {
                    let behaviour = slot.get_mut();
                    if behaviour.capabilities().contains(Capabilities::UPDATE) {
                        behaviour.update(&ctx);
                    }
                }
            }
        }
    }

    /// Per-frame render walk, depth-first pre-order from the roots
    ///
    /// Every render-capable behaviour receives the entity world matrix with
    /// the given view and projection.
    pub fn render(&mut self, view: &Mat4, projection: &Mat4) {
        for id in self.walk() {
            if !self
                .entities
                .get(id)
                .is_some_and(|r| r.capabilities().contains(Capabilities::RENDER))
            {
                continue;
            }
            let Some(world) = self.world_matrix(id) else {
                continue;
            };
            let Some(record) = self.entities.get_mut(id) else {
                continue;
            };

            let ctx = RenderContext {
                entity: id,
                world,
                view: *view,
                projection: *projection,
            };
            for component in &mut record.components {
                if let Component::Behaviour(slot) = component {
                    let behaviour = slot.get_mut();
                    if behaviour.capabilities().contains(Capabilities::RENDER) {
                        behaviour.render(&ctx);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::PickingMethod;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
        tag: &'static str,
    }

    impl Behaviour for Recorder {
        fn capabilities(&self) -> Capabilities {
            Capabilities::UPDATE | Capabilities::RENDER
        }

        fn init(&mut self, _entity: EntityId) {
            self.log.borrow_mut().push(format!("init {}", self.tag));
        }

        fn update(&mut self, _ctx: &UpdateContext) {
            self.log.borrow_mut().push(format!("update {}", self.tag));
        }

        fn render(&mut self, _ctx: &RenderContext) {
            self.log.borrow_mut().push(format!("render {}", self.tag));
        }
    }

    #[test]
    fn test_child_world_composes_with_parent() {
        let mut tree = EntityTree::new();
        let root = tree.spawn("root", SpatialNode::from_position(Vec3::new(1.0, 0.0, 0.0)));
        let child = tree.add_child(root, "child", SpatialNode::from_position(Vec3::new(0.0, 2.0, 0.0))).unwrap();

        assert_relative_eq!(tree.world_position(child).unwrap(), Vec3::new(1.0, 2.0, 0.0));

        tree.set_local_scale(root, Vec3::new(2.0, 2.0, 2.0));
        assert!(tree.node(child).unwrap().is_dirty());
        assert_relative_eq!(tree.world_position(child).unwrap(), Vec3::new(1.0, 4.0, 0.0));
    }

    #[test]
    fn test_add_child_to_missing_parent() {
        let mut tree = EntityTree::new();
        let root = tree.spawn("root", SpatialNode::new());
        tree.remove_root(root);
        assert!(tree.add_child(root, "orphan", SpatialNode::new()).is_none());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_last_child_destroys_subtree() {
        let mut tree = EntityTree::new();
        let root = tree.spawn("root", SpatialNode::new());
        let first = tree.add_child(root, "first", SpatialNode::new()).unwrap();
        let second = tree.add_child(root, "second", SpatialNode::new()).unwrap();
        let grandchild = tree.add_child(second, "grandchild", SpatialNode::new()).unwrap();

        assert!(tree.remove_last_child(root));
        assert_eq!(tree.children(root), &[first]);
        assert!(!tree.contains(second));
        assert!(!tree.contains(grandchild));

        assert!(tree.remove_last_child(root));
        assert!(!tree.remove_last_child(root));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_root_rejects_children() {
        let mut tree = EntityTree::new();
        let root = tree.spawn("root", SpatialNode::new());
        let child = tree.add_child(root, "child", SpatialNode::new()).unwrap();

        assert!(!tree.remove_root(child));
        assert!(tree.contains(child));
        assert!(tree.remove_root(root));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_roots_by_name_removes_all_matches() {
        let mut tree = EntityTree::new();
        tree.spawn("button", SpatialNode::new());
        let keep = tree.spawn("door", SpatialNode::new());
        tree.spawn("button", SpatialNode::new());

        assert_eq!(tree.remove_roots_by_name("button"), 2);
        assert_eq!(tree.roots(), &[keep]);
        assert_eq!(tree.remove_roots_by_name("button"), 0);
    }

    #[test]
    fn test_find_by_name_searches_depth_first() {
        let mut tree = EntityTree::new();
        let root = tree.spawn("tower", SpatialNode::new());
        let cube = tree.add_child(root, "cube", SpatialNode::new()).unwrap();
        tree.spawn("cube", SpatialNode::new());

        assert_eq!(tree.find_by_name("cube"), Some(cube));
        assert_eq!(tree.find_by_name("missing"), None);
        assert_eq!(tree.parent(cube), Some(root));
        assert_eq!(tree.name(cube), Some("cube"));
    }

    #[test]
    fn test_second_invalidate_marks_nothing() {
        let mut tree = EntityTree::new();
        let root = tree.spawn("root", SpatialNode::new());
        let child = tree.add_child(root, "child", SpatialNode::new()).unwrap();
        tree.add_child(child, "grandchild", SpatialNode::new()).unwrap();
        tree.update(0.0);

        assert_eq!(tree.invalidate(root), 3);
        assert_eq!(tree.invalidate(root), 0);
    }

    #[test]
    fn test_single_component_kinds_are_unique() {
        let mut tree = EntityTree::new();
        let id = tree.spawn("cube", SpatialNode::new());

        assert!(tree.attach(id, Interaction::new(PickingMethod::Method3D)));
        assert!(!tree.attach(id, Interaction::new(PickingMethod::Method2D)));
        assert!(tree.attach(id, Aabb::unit_cube()));
        assert!(!tree.attach(id, Aabb::unit_cube()));

        assert_eq!(tree.interaction(id).unwrap().method(), PickingMethod::Method3D);
        assert_eq!(tree.pickables().entries(), &[id]);
        assert!(tree.get(id).unwrap().capabilities().contains(Capabilities::INTERACTION | Capabilities::BOUNDS));
    }

    #[test]
    fn test_removing_hovered_interaction_fires_exit() {
        let exits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&exits);

        let mut tree = EntityTree::new();
        let id = tree.spawn("button", SpatialNode::new());
        tree.attach(
            id,
            Interaction::new(PickingMethod::Method2D).with_on_hover_exit(move || *counter.borrow_mut() += 1),
        );
        tree.interaction_mut(id).unwrap().on_hover_enter();
        tree.pickables_mut().set_hovered(Some(id));

        assert_eq!(tree.remove_components(id, ComponentKind::Interaction), 1);
        assert_eq!(*exits.borrow(), 1);
        assert!(tree.pickables().is_empty());
        assert_eq!(tree.pickables().hovered(), None);
        assert!(!tree.has_component(id, ComponentKind::Interaction));
    }

    #[test]
    fn test_destroying_hovered_entity_fires_exit() {
        let exits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&exits);

        let mut tree = EntityTree::new();
        let root = tree.spawn("tower", SpatialNode::new());
        let cube = tree.add_child(root, "cube", SpatialNode::new()).unwrap();
        tree.attach(
            cube,
            Interaction::new(PickingMethod::Method3D).with_on_hover_exit(move || *counter.borrow_mut() += 1),
        );
        tree.interaction_mut(cube).unwrap().on_hover_enter();
        tree.pickables_mut().set_hovered(Some(cube));

        tree.remove_last_child(root);
        assert_eq!(*exits.borrow(), 1);
        assert!(tree.pickables().is_empty());
    }

    #[test]
    fn test_update_and_render_order_is_preorder() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tree = EntityTree::new();

        let a = tree.spawn("a", SpatialNode::new());
        let a1 = tree.add_child(a, "a1", SpatialNode::new()).unwrap();
        let b = tree.spawn("b", SpatialNode::new());
        for (id, tag) in [(a, "a"), (a1, "a1"), (b, "b")] {
            tree.attach_behaviour(id, Recorder { log: Rc::clone(&log), tag });
        }

        tree.update(0.016);
        tree.render(&Mat4::identity(), &Mat4::identity());

        assert_eq!(
            *log.borrow(),
            vec![
                "init a", "init a1", "init b",
                "update a", "update a1", "update b",
                "render a", "render a1", "render b",
            ]
        );
        assert!(tree.behaviour::<Recorder>(a1).is_some());
    }

    #[test]
    fn test_update_leaves_every_node_clean() {
        let mut tree = EntityTree::new();
        let root = tree.spawn("root", SpatialNode::new());
        let child = tree.add_child(root, "child", SpatialNode::new()).unwrap();

        tree.update(0.0);
        assert!(!tree.node(root).unwrap().is_dirty());
        assert!(!tree.node(child).unwrap().is_dirty());
    }

    #[test]
    fn test_world_bounds_requires_bounds_component() {
        let mut tree = EntityTree::new();
        let id = tree.spawn(
            "cube",
            SpatialNode::from_position(Vec3::new(0.0, 3.0, 0.0)).with_scale(Vec3::new(2.0, 2.0, 2.0)),
        );
        assert!(tree.world_bounds(id).is_none());

        tree.attach(id, Aabb::unit_cube());
        let bounds = tree.world_bounds(id).unwrap();
        assert_relative_eq!(bounds.min, Vec3::new(-1.0, 2.0, -1.0), epsilon = 1e-5);
        assert_relative_eq!(bounds.max, Vec3::new(1.0, 4.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut tree = EntityTree::new();
        let root = tree.spawn("root", SpatialNode::new());
        tree.add_child(root, "child", SpatialNode::new());
        tree.attach(root, Interaction::new(PickingMethod::Method2D));

        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.roots().is_empty());
        assert!(tree.pickables().is_empty());
    }
}
