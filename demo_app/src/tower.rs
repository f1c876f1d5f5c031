//! Block-stacking tower viewer
//!
//! Controls: W adds a randomly sized cube on top, S removes the top cube,
//! Q/E spin the tower, the scroll wheel zooms. The camera follows the top of
//! the tower. Cubes can be hovered and clicked.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scene_engine::prelude::*;

use crate::panel::Panel;

/// Tower spin in degrees per second
pub const ROTATION_SPEED_DEGREES: f32 = 90.0;

const MIN_CUBE_SIZE: f32 = 0.3;
const MAX_CUBE_SIZE: f32 = 1.6;

fn camera_offset() -> Vec3 {
    Vec3::new(0.0, 7.0, 15.0)
}

/// Application stacking cubes under a rotating tower root
pub struct TowerApp {
    rng: StdRng,
    tower: Option<EntityId>,
    camera: Option<EntityId>,
    height: f32,
    clicked: Vec<EntityId>,
}

impl Default for TowerApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TowerApp {
    /// Tower with entropy-seeded cube sizes
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible cube sizes
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            tower: None,
            camera: None,
            height: 0.0,
            clicked: Vec::new(),
        }
    }

    /// Tower root, once initialized
    pub fn tower(&self) -> Option<EntityId> {
        self.tower
    }

    /// Following camera, once initialized
    pub fn camera(&self) -> Option<EntityId> {
        self.camera
    }

    /// Stacked height in world units
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Cubes clicked so far, oldest first
    pub fn clicked(&self) -> &[EntityId] {
        &self.clicked
    }

    /// Cubes currently stacked
    pub fn cube_count(&self, scene: &Scene) -> usize {
        self.tower.map_or(0, |tower| scene.tree().children(tower).len())
    }

    /// Put a cube of edge `size` on top of the tower
    pub fn add_cube(&mut self, scene: &mut Scene, size: f32) -> Option<EntityId> {
        let tower = self.tower?;
        let index = scene.tree().children(tower).len();
        let node = SpatialNode::from_position(Vec3::new(0.0, self.height + size / 2.0, 0.0))
            .with_scale(Vec3::new(size, size, size));

        let tree = scene.tree_mut();
        let cube = tree.add_child(tower, format!("TowerCube{index}"), node)?;
        let color = [
            self.rng.gen_range(0.2..1.0),
            self.rng.gen_range(0.2..1.0),
            self.rng.gen_range(0.2..1.0),
            1.0,
        ];
        tree.attach_behaviour(cube, Panel::new(color));
        tree.attach(cube, Aabb::unit_cube());
        tree.attach(
            cube,
            Interaction::new(PickingMethod::Method3D)
                .with_on_hover_enter(move || log::info!("Hovering cube {index}"))
                .with_on_hover_exit(move || log::info!("Left cube {index}")),
        );

        self.height += size;
        log::info!("Added cube. New tower height: {} cubes, {:.3} m", index + 1, self.height);
        Some(cube)
    }

    /// Take the top cube off; returns false when the tower is empty
    pub fn remove_cube(&mut self, scene: &mut Scene) -> bool {
        let Some(tower) = self.tower else {
            return false;
        };
        let tree = scene.tree_mut();
        let Some(&top) = tree.children(tower).last() else {
            log::info!("Tower is empty! Cannot remove cube.");
            return false;
        };
        let size = tree.node(top).map_or(0.0, |node| node.local_scale().y);

        tree.remove_last_child(tower);
        self.clicked.retain(|id| *id != top);
        self.height = (self.height - size).max(0.0);
        log::info!(
            "Removed cube. New tower height: {} cubes, {:.3} m",
            tree.children(tower).len(),
            self.height
        );
        true
    }

    /// Keep the camera above and behind the top of the tower
    pub fn follow_top(&mut self, scene: &mut Scene, scroll_y: f32) {
        let Some(camera) = self.camera else {
            return;
        };
        let top = Vec3::new(0.0, self.height + 1.0, 0.0);
        let eye = top + camera_offset();

        let tree = scene.tree_mut();
        tree.set_local_position(camera, eye);
        tree.set_local_rotation(camera, Quat::face_towards(&(eye - top), &Vec3::y()));
        match tree.camera_mut(camera).and_then(Camera::as_3d_mut) {
            Some(camera) => {
                camera.set_target(top);
                camera.apply_fov_zoom(scroll_y);
            }
            None => log::warn!("Tower camera is not a perspective camera"),
        }
    }

    fn set_highlight(scene: &mut Scene, id: EntityId, highlighted: bool) {
        if let Some(panel) = scene.tree_mut().behaviour_mut::<Panel>(id) {
            panel.set_alpha(if highlighted { 0.6 } else { 1.0 });
        }
    }
}

impl Application for TowerApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Initializing tower scene");
        let scene = engine.scene_mut();

        let camera = scene.spawn_camera_3d("MainCamera", camera_offset() + Vec3::y(), Vec3::y());
        if !scene.set_active_camera(camera) {
            return Err(AppError::Custom("tower camera could not be activated".to_string()));
        }
        self.camera = Some(camera);

        let tree = scene.tree_mut();
        self.tower = Some(tree.spawn("Tower", SpatialNode::new()));

        let ground = tree.spawn(
            "GroundPlane",
            SpatialNode::from_position(Vec3::new(0.0, -0.5, 0.0)).with_scale(Vec3::new(100.0, 1.0, 100.0)),
        );
        tree.attach_behaviour(ground, Panel::new([0.0, 1.0, 0.0, 1.0]));

        self.follow_top(scene, 0.0);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        let input = engine.frame_input().clone();
        let scene = engine.scene_mut();

        if input.is_key_pressed(KeyCode::W) {
            let size = self.rng.gen_range(MIN_CUBE_SIZE..MAX_CUBE_SIZE);
            self.add_cube(scene, size);
        }
        if input.is_key_pressed(KeyCode::S) {
            self.remove_cube(scene);
        }

        if let Some(tower) = self.tower {
            let step = ROTATION_SPEED_DEGREES * delta_time;
            if input.is_key_held(KeyCode::Q) {
                scene.tree_mut().rotate_axis_angle(tower, step, Vec3::y());
            }
            if input.is_key_held(KeyCode::E) {
                scene.tree_mut().rotate_axis_angle(tower, -step, Vec3::y());
            }
        }

        self.follow_top(scene, input.scroll_y);
        Ok(())
    }

    fn on_picking(&mut self, engine: &mut Engine, outcome: &PickingOutcome) -> Result<(), AppError> {
        let scene = engine.scene_mut();
        for event in &outcome.events {
            match *event {
                PickingEvent::HoverEntered(id) => Self::set_highlight(scene, id, true),
                PickingEvent::HoverExited(id) => Self::set_highlight(scene, id, false),
                PickingEvent::Clicked(id) => {
                    log::info!("Clicked '{}'", scene.tree().name(id).unwrap_or("?"));
                    self.clicked.push(id);
                }
            }
        }
        Ok(())
    }

    fn shutdown(&mut self, engine: &mut Engine) {
        log::info!(
            "Tower scene shutting down with {} cubes, {:.3} m",
            self.cube_count(engine.scene()),
            self.height
        );
        self.tower = None;
        self.camera = None;
        self.height = 0.0;
    }
}
