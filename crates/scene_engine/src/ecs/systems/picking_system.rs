//! Picking system for pointer hover and click
//!
//! Orchestrates the picking pipeline once per frame:
//! input snapshot → active camera → 2D quad pass → 3D ray pass → hover
//! transitions → click.
//!
//! The 2D pass runs only under an orthographic camera and walks interaction
//! targets newest first, so later-registered quads sit on top. The 3D pass
//! runs only under a perspective camera, only when the 2D pass found nothing,
//! and picks the nearest bounding-box hit.

use crate::config::PickingConfig;
use crate::ecs::components::PickingMethod;
use crate::ecs::{ComponentKind, EntityId, EntityTree};
use crate::foundation::math::{Mat4, Mat4Ext, Vec2, Vec3, Vec4};
use crate::input::{screen_to_ndc, FrameInput};
use crate::render::Camera;
use crate::scene::scene_graph::Ray;

/// One interaction transition fired during a picking update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickingEvent {
    /// The previously hovered entity lost hover
    HoverExited(EntityId),
    /// An entity gained hover
    HoverEntered(EntityId),
    /// The hovered entity was clicked
    Clicked(EntityId),
}

/// Result of one picking update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickingOutcome {
    /// Transitions in the order their callbacks fired
    pub events: Vec<PickingEvent>,
    /// Hovered entity after the update
    pub hovered: Option<EntityId>,
    /// Whether the frame was skipped (no usable camera or viewport)
    pub skipped: bool,
}

impl PickingOutcome {
    /// Entity clicked this frame
    pub fn clicked(&self) -> Option<EntityId> {
        self.events.iter().find_map(|e| match e {
            PickingEvent::Clicked(id) => Some(*id),
            _ => None,
        })
    }

    /// Entity that gained hover this frame
    pub fn entered(&self) -> Option<EntityId> {
        self.events.iter().find_map(|e| match e {
            PickingEvent::HoverEntered(id) => Some(*id),
            _ => None,
        })
    }

    /// Entity that lost hover this frame
    pub fn exited(&self) -> Option<EntityId> {
        self.events.iter().find_map(|e| match e {
            PickingEvent::HoverExited(id) => Some(*id),
            _ => None,
        })
    }
}

/// Picking system resolving pointer hover and click against a tree
///
/// # Usage
/// ```
/// # use scene_engine::prelude::*;
/// let mut tree = EntityTree::new();
/// let camera = tree.spawn("camera", SpatialNode::new());
/// tree.attach(camera, Camera::orthographic(800.0, 600.0, -1.0, 1.0));
///
/// let button = tree.spawn(
///     "button",
///     SpatialNode::from_position(Vec3::new(400.0, 300.0, 0.0)).with_scale(Vec3::new(100.0, 100.0, 1.0)),
/// );
/// tree.attach(button, Interaction::new(PickingMethod::Method2D));
///
/// let mut picking = PickingSystem::default();
/// let frame = FrameInput::new(800.0, 600.0).with_pointer(400.0, 300.0).with_click();
/// let outcome = picking.update(&mut tree, Some(camera), &frame);
///
/// assert_eq!(outcome.hovered, Some(button));
/// assert_eq!(outcome.clicked(), Some(button));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PickingSystem {
    config: PickingConfig,
    last_ray: Option<Ray>,
}

impl PickingSystem {
    /// Create a picking system with the given passes enabled
    pub fn new(config: PickingConfig) -> Self {
        Self {
            config,
            last_ray: None,
        }
    }

    /// Enabled passes
    pub fn config(&self) -> &PickingConfig {
        &self.config
    }

    /// Ray built by the most recent 3D pass
    pub fn last_ray(&self) -> Option<Ray> {
        self.last_ray
    }

    /// Run one picking frame
    ///
    /// # Arguments
    /// * `tree` - Entities of the scene; its pickable index holds the candidates
    ///   and the hovered slot
    /// * `camera` - Active camera entity, if any
    /// * `input` - This frame's input snapshot
    ///
    /// Without a camera entity carrying a [`Camera`] component, or with an
    /// empty viewport, the frame is skipped: hover is left as it was and no
    /// click fires.
    pub fn update(&mut self, tree: &mut EntityTree, camera: Option<EntityId>, input: &FrameInput) -> PickingOutcome {
        let hovered = tree.pickables().hovered();
        let skipped = PickingOutcome {
            events: Vec::new(),
            hovered,
            skipped: true,
        };

        let Some(camera_id) = camera else {
            log::trace!("Picking skipped: no active camera");
            return skipped;
        };
        let Some(camera) = tree.camera(camera_id).cloned() else {
            log::debug!("Picking skipped: active camera entity {:?} has no camera component", camera_id);
            return skipped;
        };
        if input.viewport.x <= 0.0 || input.viewport.y <= 0.0 {
            log::warn!("Picking skipped: empty viewport {}x{}", input.viewport.x, input.viewport.y);
            return skipped;
        }
        let Some(camera_world) = tree.world_matrix(camera_id) else {
            return skipped;
        };

        let target = self.resolve_target(tree, &camera, &camera_world, input);
        let mut outcome = PickingOutcome {
            events: Vec::new(),
            hovered: target,
            skipped: false,
        };

        if hovered != target {
            if let Some(old) = hovered {
                if let Some(interaction) = tree.interaction_mut(old) {
                    interaction.on_hover_exit();
                }
                outcome.events.push(PickingEvent::HoverExited(old));
                log::trace!("Hover exit {:?}", old);
            }
            if let Some(new) = target {
                if let Some(interaction) = tree.interaction_mut(new) {
                    interaction.on_hover_enter();
                }
                outcome.events.push(PickingEvent::HoverEntered(new));
                log::trace!("Hover enter {:?}", new);
            }
            tree.pickables_mut().set_hovered(target);
        }

        if input.primary_just_pressed {
            if let Some(current) = target {
                if let Some(interaction) = tree.interaction_mut(current) {
                    interaction.on_click();
                }
                outcome.events.push(PickingEvent::Clicked(current));
                log::debug!("Clicked '{}'", tree.name(current).unwrap_or("?"));
            }
        }

        outcome
    }

    fn resolve_target(
        &mut self,
        tree: &mut EntityTree,
        camera: &Camera,
        camera_world: &Mat4,
        input: &FrameInput,
    ) -> Option<EntityId> {
        let candidates: Vec<(EntityId, PickingMethod)> = tree
            .pickables()
            .entries()
            .iter()
            .filter_map(|id| tree.interaction(*id).map(|i| (*id, i.method())))
            .collect();

        if let Camera::Orthographic2D(_) = camera {
            if self.config.enable_2d {
                let view = camera.view_matrix(&camera_world.translation_part());
                let pointer = screen_to_world_2d(input.pointer, input.viewport, &camera.projection_matrix(), &view)?;

                for (id, method) in candidates.iter().rev() {
                    if *method != PickingMethod::Method2D {
                        continue;
                    }
                    let Some(world) = tree.world_matrix(*id) else {
                        continue;
                    };
                    if is_pointer_over_2d(&world, pointer) {
                        return Some(*id);
                    }
                }
            }
        }

        if let Camera::Perspective3D(_) = camera {
            if self.config.enable_3d {
                let ray = screen_to_world_ray_3d(input.pointer, input.viewport, &camera.projection_matrix(), camera_world)?;
                self.last_ray = Some(ray);

                let mut closest: Option<(EntityId, f32)> = None;
                for (id, method) in &candidates {
                    if *method != PickingMethod::Method3D || !tree.has_component(*id, ComponentKind::Bounds) {
                        continue;
                    }
                    let Some(bounds) = tree.world_bounds(*id) else {
                        continue;
                    };
                    if let Some(t) = bounds.intersect_ray(&ray) {
                        if closest.map_or(true, |(_, best)| t < best) {
                            closest = Some((*id, t));
                        }
                    }
                }
                return closest.map(|(id, _)| id);
            }
        }

        None
    }
}

/// Unproject a pixel position onto the z = 0 plane of a 2D camera
///
/// Returns `None` when projection × view is not invertible.
pub fn screen_to_world_2d(screen: Vec2, viewport: Vec2, projection: &Mat4, view: &Mat4) -> Option<Vec2> {
    let Some(inverse_vp) = (projection * view).try_inverse() else {
        log::warn!("screen_to_world_2d: view-projection is not invertible");
        return None;
    };
    let ndc = screen_to_ndc(screen, viewport);
    let world = inverse_vp.project_point(&Vec3::new(ndc.x, ndc.y, 0.0));
    Some(world.xy())
}

/// Whether a world-space point lies on the quad an entity's world matrix spans
///
/// The quad is centred on the translation column, `|col0.xy|` wide and
/// `|col1.xy|` tall; edges count as inside.
pub fn is_pointer_over_2d(world: &Mat4, point: Vec2) -> bool {
    let center = Vec2::new(world[(0, 3)], world[(1, 3)]);
    let half_width = Vec2::new(world[(0, 0)], world[(1, 0)]).norm() * 0.5;
    let half_height = Vec2::new(world[(0, 1)], world[(1, 1)]).norm() * 0.5;

    point.x >= center.x - half_width && point.x <= center.x + half_width &&
    point.y >= center.y - half_height && point.y <= center.y + half_height
}

/// Build a world-space pick ray through a pixel for a 3D camera
///
/// The near and far clip-space points under the pointer go through the
/// inverse projection with perspective divide, then through the camera
/// entity's world matrix. The ray starts on the near plane.
pub fn screen_to_world_ray_3d(screen: Vec2, viewport: Vec2, projection: &Mat4, camera_world: &Mat4) -> Option<Ray> {
    let Some(inverse_projection) = projection.try_inverse() else {
        log::warn!("screen_to_world_ray_3d: projection is not invertible");
        return None;
    };
    let ndc = screen_to_ndc(screen, viewport);

    let unproject = |z: f32| {
        let mut eye = inverse_projection * Vec4::new(ndc.x, ndc.y, z, 1.0);
        if eye.w != 0.0 {
            eye /= eye.w;
        }
        (camera_world * eye).xyz()
    };
    let near = unproject(-1.0);
    let far = unproject(1.0);

    Ray::through(near, far)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Interaction, SpatialNode};
    use crate::render::Camera;
    use crate::scene::scene_graph::Aabb;
    use approx::assert_relative_eq;

    fn scene_2d() -> (EntityTree, EntityId) {
        let mut tree = EntityTree::new();
        let camera = tree.spawn("camera", SpatialNode::new());
        tree.attach(camera, Camera::orthographic(800.0, 600.0, -1.0, 1.0));
        (tree, camera)
    }

    fn quad(tree: &mut EntityTree, name: &str, x: f32, y: f32, size: f32) -> EntityId {
        let id = tree.spawn(
            name,
            SpatialNode::from_position(Vec3::new(x, y, 0.0)).with_scale(Vec3::new(size, size, 1.0)),
        );
        tree.attach(id, Interaction::new(PickingMethod::Method2D));
        id
    }

    #[test]
    fn test_screen_to_world_2d_flips_y() {
        let camera = Camera::orthographic(800.0, 600.0, -1.0, 1.0);
        let view = camera.view_matrix(&Vec3::zeros());
        let viewport = Vec2::new(800.0, 600.0);

        let top_left = screen_to_world_2d(Vec2::zeros(), viewport, &camera.projection_matrix(), &view).unwrap();
        assert_relative_eq!(top_left, Vec2::new(0.0, 600.0), epsilon = 1e-3);

        let center = screen_to_world_2d(Vec2::new(400.0, 300.0), viewport, &camera.projection_matrix(), &view).unwrap();
        assert_relative_eq!(center, Vec2::new(400.0, 300.0), epsilon = 1e-3);
    }

    #[test]
    fn test_quad_bounds_include_edges() {
        let world = Mat4::from_trs(&Vec3::new(10.0, 10.0, 0.0), &crate::foundation::math::Quat::identity(), &Vec3::new(4.0, 2.0, 1.0));
        assert!(is_pointer_over_2d(&world, Vec2::new(12.0, 11.0)));
        assert!(!is_pointer_over_2d(&world, Vec2::new(12.1, 10.0)));
        assert!(!is_pointer_over_2d(&world, Vec2::new(10.0, 8.9)));
    }

    #[test]
    fn test_2d_hit_and_miss() {
        let (mut tree, camera) = scene_2d();
        let button = quad(&mut tree, "button", 400.0, 300.0, 100.0);
        let mut picking = PickingSystem::default();

        let outcome = picking.update(&mut tree, Some(camera), &FrameInput::new(800.0, 600.0).with_pointer(400.0, 300.0));
        assert_eq!(outcome.hovered, Some(button));
        assert_eq!(outcome.events, vec![PickingEvent::HoverEntered(button)]);

        let outcome = picking.update(&mut tree, Some(camera), &FrameInput::new(800.0, 600.0).with_pointer(0.0, 0.0));
        assert_eq!(outcome.hovered, None);
        assert_eq!(outcome.events, vec![PickingEvent::HoverExited(button)]);
        assert!(!tree.interaction(button).unwrap().is_hovered());
    }

    #[test]
    fn test_newest_overlapping_quad_wins() {
        let (mut tree, camera) = scene_2d();
        let _a = quad(&mut tree, "a", 400.0, 300.0, 200.0);
        let b = quad(&mut tree, "b", 400.0, 300.0, 100.0);
        let mut picking = PickingSystem::default();

        let outcome = picking.update(&mut tree, Some(camera), &FrameInput::new(800.0, 600.0).with_pointer(400.0, 300.0));
        assert_eq!(outcome.hovered, Some(b));
    }

    #[test]
    fn test_missing_camera_skips_frame() {
        let (mut tree, camera) = scene_2d();
        let button = quad(&mut tree, "button", 400.0, 300.0, 100.0);
        let mut picking = PickingSystem::default();
        picking.update(&mut tree, Some(camera), &FrameInput::new(800.0, 600.0).with_pointer(400.0, 300.0));

        let outcome = picking.update(&mut tree, None, &FrameInput::new(800.0, 600.0).with_pointer(0.0, 0.0).with_click());
        assert!(outcome.skipped);
        assert!(outcome.events.is_empty());
        assert_eq!(tree.pickables().hovered(), Some(button));

        let outcome = picking.update(&mut tree, Some(button), &FrameInput::new(800.0, 600.0));
        assert!(outcome.skipped);
        assert_eq!(outcome.hovered, Some(button));
    }

    #[test]
    fn test_disabled_2d_pass_finds_nothing() {
        let (mut tree, camera) = scene_2d();
        quad(&mut tree, "button", 400.0, 300.0, 100.0);
        let mut picking = PickingSystem::new(PickingConfig { enable_2d: false, enable_3d: true });

        let outcome = picking.update(&mut tree, Some(camera), &FrameInput::new(800.0, 600.0).with_pointer(400.0, 300.0));
        assert_eq!(outcome.hovered, None);
    }

    #[test]
    fn test_3d_pass_picks_nearest_box() {
        let mut tree = EntityTree::new();
        let camera = tree.spawn("camera", SpatialNode::from_position(Vec3::new(0.0, 0.0, 10.0)));
        tree.attach(camera, Camera::perspective(45.0, 800.0 / 600.0, 0.1, 100.0));
        if let Some(Camera::Perspective3D(cam)) = tree.camera_mut(camera) {
            cam.set_target(Vec3::zeros());
        }

        let far = tree.spawn("far", SpatialNode::from_position(Vec3::new(0.0, 0.0, -5.0)));
        tree.attach(far, Interaction::new(PickingMethod::Method3D));
        tree.attach(far, Aabb::unit_cube());

        let near = tree.spawn("near", SpatialNode::new());
        tree.attach(near, Interaction::new(PickingMethod::Method3D));
        tree.attach(near, Aabb::unit_cube());

        let no_bounds = tree.spawn("no_bounds", SpatialNode::from_position(Vec3::new(0.0, 0.0, 5.0)));
        tree.attach(no_bounds, Interaction::new(PickingMethod::Method3D));

        let mut picking = PickingSystem::default();
        let outcome = picking.update(&mut tree, Some(camera), &FrameInput::new(800.0, 600.0).with_pointer(400.0, 300.0));
        assert_eq!(outcome.hovered, Some(near));

        let ray = picking.last_ray().unwrap();
        assert_relative_eq!(ray.direction, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-4);
        assert_relative_eq!(ray.origin.z, 9.9, epsilon = 1e-3);
    }
}
