//! Spatial node: local transform plus hierarchy links
//!
//! The node stores local position, rotation and scale, the cached world matrix
//! and its dirty flag. Hierarchy-aware operations (invalidating a subtree,
//! resolving the world matrix through ancestors) live on
//! [`EntityTree`](crate::ecs::EntityTree), which owns every node.
//!
//! Invariant: a dirty node only has dirty descendants, so invalidation can stop
//! at the first node that is already dirty.

use crate::ecs::EntityId;
use crate::foundation::math::{Mat4, Mat4Ext, Quat, Vec3, Unit, utils};

/// Local transform and hierarchy links of one entity
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialNode {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    world: Mat4,
    dirty: bool,
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<EntityId>,
}

impl Default for SpatialNode {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            world: Mat4::identity(),
            dirty: true,
            parent: None,
            children: Vec::new(),
        }
    }
}

impl SpatialNode {
    /// Identity transform, not yet resolved
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set the initial rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = Quat::new_normalize(rotation.into_inner());
        self
    }

    /// Set the initial scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local position
    pub fn local_position(&self) -> Vec3 {
        self.position
    }

    /// Local rotation
    pub fn local_rotation(&self) -> Quat {
        self.rotation
    }

    /// Local scale
    pub fn local_scale(&self) -> Vec3 {
        self.scale
    }

    /// Local matrix, T × R × S
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_trs(&self.position, &self.rotation, &self.scale)
    }

    /// Rotation about +Y in degrees, read back as `2·atan2(q.y, q.w)`
    ///
    /// Exact for pure yaw rotations, which is all the door and tower
    /// animations produce.
    pub fn local_yaw_degrees(&self) -> f32 {
        utils::rad_to_deg(2.0 * self.rotation.j.atan2(self.rotation.w))
    }

    /// Whether the cached world matrix is stale
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Cached world matrix, `None` while dirty
    pub fn cached_world_matrix(&self) -> Option<Mat4> {
        (!self.dirty).then_some(self.world)
    }

    /// Parent handle, `None` for roots
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    // Raw field writes. Callers are responsible for invalidating the subtree.

    pub(crate) fn write_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub(crate) fn write_rotation(&mut self, rotation: Quat) {
        self.rotation = Quat::new_normalize(rotation.into_inner());
    }

    pub(crate) fn write_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    pub(crate) fn write_pre_rotation(&mut self, delta: Quat) {
        self.write_rotation(delta * self.rotation);
    }

    pub(crate) fn mark_dirty(&mut self) -> bool {
        let was_clean = !self.dirty;
        self.dirty = true;
        was_clean
    }

    pub(crate) fn store_world(&mut self, world: Mat4) {
        self.world = world;
        self.dirty = false;
    }
}

/// Rotation from Euler angles in degrees, applied yaw (Y), then pitch (X), then roll (Z)
pub fn euler_degrees_to_quat(degrees: Vec3) -> Quat {
    let yaw = Quat::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(degrees.y));
    let pitch = Quat::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(degrees.x));
    let roll = Quat::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(degrees.z));
    yaw * pitch * roll
}

/// Rotation of `degrees` about `axis`; a zero axis yields identity
pub fn axis_angle_degrees(degrees: f32, axis: Vec3) -> Quat {
    Unit::try_new(axis, f32::EPSILON)
        .map(|axis| Quat::from_axis_angle(&axis, utils::deg_to_rad(degrees)))
        .unwrap_or_else(Quat::identity)
}
