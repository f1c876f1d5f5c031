//! Scene - entity tree, active camera and picking for one screen
//!
//! The scene drives the per-frame order: entities update first (which also
//! refreshes their world matrices), then picking resolves hover and click
//! against the fresh transforms. Rendering walks the tree with the active
//! camera's matrices.

use crate::config::{Camera2DConfig, Camera3DConfig, EngineConfig, ViewportConfig};
use crate::ecs::components::SpatialNode;
use crate::ecs::systems::{PickingOutcome, PickingSystem};
use crate::ecs::{EntityId, EntityTree};
use crate::foundation::math::{Mat4, Vec2, Vec3};
use crate::input::FrameInput;
use crate::render::{Camera, Camera2D, Camera3D};

/// A named tree of entities with an active camera
#[derive(Debug)]
pub struct Scene {
    name: String,
    tree: EntityTree,
    active_camera: Option<EntityId>,
    viewport: Vec2,
    picking: PickingSystem,
    camera_2d: Camera2DConfig,
    camera_3d: Camera3DConfig,
}

impl Scene {
    /// Create an empty scene sized from the engine configuration
    pub fn new(name: impl Into<String>, config: &EngineConfig) -> Self {
        let name = name.into();
        log::info!("Scene '{}' created", name);
        Self {
            name,
            tree: EntityTree::new(),
            active_camera: None,
            viewport: Vec2::new(config.viewport.width as f32, config.viewport.height as f32),
            picking: PickingSystem::new(config.picking),
            camera_2d: config.camera_2d.clone(),
            camera_3d: config.camera_3d.clone(),
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Log scene start-up
    pub fn init(&mut self) {
        log::info!("Initializing scene '{}' ({}x{})", self.name, self.viewport.x, self.viewport.y);
    }

    /// Update every entity, then resolve picking for this frame
    pub fn update(&mut self, delta_time: f32, input: &FrameInput) -> PickingOutcome {
        self.tree.update(delta_time);
        self.picking.update(&mut self.tree, self.active_camera, input)
    }

    /// Render every entity with the active camera
    ///
    /// Without a usable camera the walk still happens with identity matrices.
    pub fn render(&mut self) {
        let (view, projection) = match self.camera_matrices() {
            Some(matrices) => matrices,
            None => {
                log::warn!("No active camera set for scene '{}'; rendering with identity matrices", self.name);
                (Mat4::identity(), Mat4::identity())
            }
        };
        self.tree.render(&view, &projection);
    }

    /// Destroy every entity and forget the active camera
    pub fn shutdown(&mut self) {
        log::info!("Shutting down scene '{}'", self.name);
        self.tree.clear();
        self.active_camera = None;
    }

    /// Entity tree
    pub fn tree(&self) -> &EntityTree {
        &self.tree
    }

    /// Entity tree, mutably
    pub fn tree_mut(&mut self) -> &mut EntityTree {
        &mut self.tree
    }

    /// Picking system
    pub fn picking(&self) -> &PickingSystem {
        &self.picking
    }

    /// Make `id` the camera used for rendering and picking
    ///
    /// Rejected when the entity does not exist or has no camera.
    pub fn set_active_camera(&mut self, id: EntityId) -> bool {
        if self.tree.camera(id).is_none() {
            log::warn!("Scene '{}': entity {:?} has no camera; active camera unchanged", self.name, id);
            return false;
        }
        self.active_camera = Some(id);
        log::info!("Active camera set for scene '{}'", self.name);
        true
    }

    /// Active camera handle, if any
    pub fn active_camera(&self) -> Option<EntityId> {
        self.active_camera
    }

    /// Viewport size in pixels
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Resize the viewport and every camera in the tree
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width as f32, height as f32);
        for id in self.tree.walk() {
            if let Some(camera) = self.tree.camera_mut(id) {
                camera.set_viewport(width as f32, height as f32);
            }
        }
        log::debug!("Scene '{}' viewport set to {}x{}", self.name, width, height);
    }

    /// Spawn a root entity carrying a 2D camera built from the scene defaults
    pub fn spawn_camera_2d(&mut self, name: impl Into<String>, position: Vec3) -> EntityId {
        let camera = Camera2D::from_config(&self.viewport_config(), &self.camera_2d);
        let id = self.tree.spawn(name, SpatialNode::from_position(position));
        self.tree.attach(id, Camera::from(camera));
        id
    }

    /// Spawn a root entity carrying a 3D camera looking at `target`
    pub fn spawn_camera_3d(&mut self, name: impl Into<String>, position: Vec3, target: Vec3) -> EntityId {
        let mut camera = Camera3D::from_config(&self.viewport_config(), &self.camera_3d);
        camera.set_target(target);
        let id = self.tree.spawn(name, SpatialNode::from_position(position));
        self.tree.attach(id, Camera::from(camera));
        id
    }

    /// View and projection of the active camera
    ///
    /// The view is taken from the camera entity's world position.
    pub fn camera_matrices(&mut self) -> Option<(Mat4, Mat4)> {
        let id = self.active_camera?;
        let position = self.tree.world_position(id)?;
        let camera = self.tree.camera(id)?;
        Some((camera.view_matrix(&position), camera.projection_matrix()))
    }

    /// The active camera component, mutably
    pub fn active_camera_mut(&mut self) -> Option<&mut Camera> {
        let id = self.active_camera?;
        self.tree.camera_mut(id)
    }

    fn viewport_config(&self) -> ViewportConfig {
        ViewportConfig::new(self.viewport.x as u32, self.viewport.y as u32)
    }
}
