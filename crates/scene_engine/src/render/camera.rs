//! # Camera Abstraction
//!
//! Cameras are components: the owning entity's world position places the
//! camera, the component itself only holds projection parameters.
//!
//! ## Design Principles
//! - **Closed set**: [`Camera`] is an enum over the two supported projections
//! - **Eager projection**: every mutator recomputes the cached projection
//! - **No panics on bad input**: degenerate parameters fall back to identity
//!   and log a warning
//!
//! All matrices follow OpenGL conventions (right-handed, Y-up, depth in [-1, 1]).

use crate::config::{Camera2DConfig, Camera3DConfig, ViewportConfig};
use crate::foundation::math::{Mat4, Mat4Ext, Vec2, Vec3, utils};

/// Orthographic camera for screen-space scenes
///
/// Projects `[0, w/zoom] × [0, h/zoom]` onto the viewport with the origin at
/// the bottom-left corner. The view is a translation by the negated camera
/// position.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    near: f32,
    far: f32,
    viewport: Vec2,
    zoom: f32,
    min_zoom: f32,
    projection: Mat4,
}

impl Camera2D {
    /// Lowest zoom any camera accepts; a config may only raise it
    pub const MIN_ZOOM: f32 = 0.1;

    /// Create a camera covering a `width × height` viewport at zoom 1
    pub fn new(width: f32, height: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            near,
            far,
            viewport: Vec2::new(width, height),
            zoom: 1.0,
            min_zoom: Self::MIN_ZOOM,
            projection: Mat4::identity(),
        };
        camera.recalculate_projection();
        log::debug!(
            "Camera2D created: {}x{}, z-range {} to {}",
            width, height, near, far
        );
        camera
    }

    /// Create from config defaults
    pub fn from_config(viewport: &ViewportConfig, config: &Camera2DConfig) -> Self {
        let mut camera = Self::new(viewport.width as f32, viewport.height as f32, config.near, config.far);
        camera.min_zoom = config.min_zoom.max(Self::MIN_ZOOM);
        camera.set_zoom(config.zoom);
        camera
    }

    /// Viewport size in pixels
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Current zoom
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the viewport size
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.recalculate_projection();
    }

    /// Set the zoom, clamped to the minimum zoom
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(self.min_zoom);
        self.recalculate_projection();
        log::trace!("Camera2D zoom set to {}", self.zoom);
    }

    /// View matrix for a camera placed at `position`
    pub fn view_matrix(&self, position: &Vec3) -> Mat4 {
        Mat4::new_translation(&-position)
    }

    fn recalculate_projection(&mut self) {
        let right = self.viewport.x / self.zoom;
        let top = self.viewport.y / self.zoom;
        self.projection = match Mat4::orthographic(0.0, right, 0.0, top, self.near, self.far) {
            Some(projection) => projection,
            None => {
                log::warn!(
                    "Degenerate orthographic projection (viewport {}x{}, zoom {}, near {}, far {}); using identity",
                    self.viewport.x, self.viewport.y, self.zoom, self.near, self.far
                );
                Mat4::identity()
            }
        };
    }
}

/// Perspective camera looking at a target point
#[derive(Debug, Clone, PartialEq)]
pub struct Camera3D {
    near: f32,
    far: f32,
    fov_degrees: f32,
    aspect: f32,
    target: Vec3,
    zoom_sensitivity: f32,
    fov_range: (f32, f32),
    projection: Mat4,
}

impl Camera3D {
    /// Create a camera looking at the origin
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Viewport width over height
    /// * `near` - Distance to the near clipping plane
    /// * `far` - Distance to the far clipping plane
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let defaults = Camera3DConfig::default();
        let mut camera = Self {
            near,
            far,
            fov_degrees,
            aspect,
            target: Vec3::zeros(),
            zoom_sensitivity: defaults.zoom_sensitivity,
            fov_range: (defaults.min_fov_degrees, defaults.max_fov_degrees),
            projection: Mat4::identity(),
        };
        camera.recalculate_projection();
        log::debug!("Camera3D created: fov {}, aspect {:.3}", fov_degrees, aspect);
        camera
    }

    /// Create from config defaults
    pub fn from_config(viewport: &ViewportConfig, config: &Camera3DConfig) -> Self {
        let mut camera = Self::new(config.fov_degrees, viewport.aspect_ratio(), config.near, config.far);
        camera.zoom_sensitivity = config.zoom_sensitivity;
        camera.fov_range = (config.min_fov_degrees, config.max_fov_degrees);
        camera
    }

    /// Vertical field of view in degrees
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Aspect ratio
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect
    }

    /// Look-at target in world space
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Set the field of view in degrees, unclamped
    pub fn set_fov(&mut self, fov_degrees: f32) {
        self.fov_degrees = fov_degrees;
        self.recalculate_projection();
    }

    /// Set the aspect ratio
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::debug!("Camera3D aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
        self.recalculate_projection();
    }

    /// Set the look-at target
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera3D target updated to: {:?}", target);
    }

    /// Narrow or widen the field of view by a scroll amount
    ///
    /// Positive scroll zooms in. The result is clamped to the configured FOV
    /// range (10° to 90° by default).
    pub fn apply_fov_zoom(&mut self, scroll_y: f32) {
        let (min_fov, max_fov) = self.fov_range;
        self.fov_degrees = utils::clamp(
            self.fov_degrees - scroll_y * self.zoom_sensitivity,
            min_fov,
            max_fov,
        );
        self.recalculate_projection();
        log::trace!("Camera3D fov zoomed to {}", self.fov_degrees);
    }

    /// View matrix for a camera placed at `position`, looking at the target with +Y up
    pub fn view_matrix(&self, position: &Vec3) -> Mat4 {
        Mat4::look_at(position, &self.target, &Vec3::y())
    }

    fn recalculate_projection(&mut self) {
        let fov = utils::deg_to_rad(self.fov_degrees);
        self.projection = match Mat4::perspective(fov, self.aspect, self.near, self.far) {
            Some(projection) => projection,
            None => {
                log::warn!(
                    "Degenerate perspective projection (fov {}, aspect {}, near {}, far {}); using identity",
                    self.fov_degrees, self.aspect, self.near, self.far
                );
                Mat4::identity()
            }
        };
    }
}

/// Camera component
#[derive(Debug, Clone, PartialEq)]
pub enum Camera {
    /// Orthographic screen-space camera
    Orthographic2D(Camera2D),
    /// Perspective look-at camera
    Perspective3D(Camera3D),
}

impl Camera {
    /// Orthographic camera covering a `width × height` viewport
    pub fn orthographic(width: f32, height: f32, near: f32, far: f32) -> Self {
        Self::Orthographic2D(Camera2D::new(width, height, near, far))
    }

    /// Perspective camera looking at the origin
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::Perspective3D(Camera3D::new(fov_degrees, aspect, near, far))
    }

    /// Cached projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        match self {
            Self::Orthographic2D(camera) => camera.projection,
            Self::Perspective3D(camera) => camera.projection,
        }
    }

    /// View matrix for a camera placed at `position`
    pub fn view_matrix(&self, position: &Vec3) -> Mat4 {
        match self {
            Self::Orthographic2D(camera) => camera.view_matrix(position),
            Self::Perspective3D(camera) => camera.view_matrix(position),
        }
    }

    /// Near clip plane
    pub fn near_plane(&self) -> f32 {
        match self {
            Self::Orthographic2D(camera) => camera.near,
            Self::Perspective3D(camera) => camera.near,
        }
    }

    /// Far clip plane
    pub fn far_plane(&self) -> f32 {
        match self {
            Self::Orthographic2D(camera) => camera.far,
            Self::Perspective3D(camera) => camera.far,
        }
    }

    /// Set the near clip plane
    pub fn set_near_plane(&mut self, near: f32) {
        match self {
            Self::Orthographic2D(camera) => {
                camera.near = near;
                camera.recalculate_projection();
            }
            Self::Perspective3D(camera) => {
                camera.near = near;
                camera.recalculate_projection();
            }
        }
    }

    /// Set the far clip plane
    pub fn set_far_plane(&mut self, far: f32) {
        match self {
            Self::Orthographic2D(camera) => {
                camera.far = far;
                camera.recalculate_projection();
            }
            Self::Perspective3D(camera) => {
                camera.far = far;
                camera.recalculate_projection();
            }
        }
    }

    /// React to a viewport resize
    ///
    /// 2D cameras take the new size; 3D cameras take its aspect ratio. A zero
    /// height leaves the 3D aspect untouched.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        match self {
            Self::Orthographic2D(camera) => camera.set_viewport(width, height),
            Self::Perspective3D(camera) => {
                if height > 0.0 {
                    camera.set_aspect_ratio(width / height);
                } else {
                    log::warn!("Ignoring viewport {}x{} for perspective camera", width, height);
                }
            }
        }
    }

    /// The 2D variant, if this is one
    pub fn as_2d(&self) -> Option<&Camera2D> {
        match self {
            Self::Orthographic2D(camera) => Some(camera),
            Self::Perspective3D(_) => None,
        }
    }

    /// The 2D variant, mutably
    pub fn as_2d_mut(&mut self) -> Option<&mut Camera2D> {
        match self {
            Self::Orthographic2D(camera) => Some(camera),
            Self::Perspective3D(_) => None,
        }
    }

    /// The 3D variant, if this is one
    pub fn as_3d(&self) -> Option<&Camera3D> {
        match self {
            Self::Perspective3D(camera) => Some(camera),
            Self::Orthographic2D(_) => None,
        }
    }

    /// The 3D variant, mutably
    pub fn as_3d_mut(&mut self) -> Option<&mut Camera3D> {
        match self {
            Self::Perspective3D(camera) => Some(camera),
            Self::Orthographic2D(_) => None,
        }
    }
}

impl From<Camera2D> for Camera {
    fn from(camera: Camera2D) -> Self {
        Self::Orthographic2D(camera)
    }
}

impl From<Camera3D> for Camera {
    fn from(camera: Camera3D) -> Self {
        Self::Perspective3D(camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_2d_projection_covers_viewport() {
        let camera = Camera::orthographic(800.0, 600.0, -1.0, 1.0);
        let vp = camera.projection_matrix() * camera.view_matrix(&Vec3::zeros());

        assert_relative_eq!(vp.project_point(&Vec3::new(400.0, 300.0, 0.0)), Vec3::zeros(), epsilon = 1e-5);
        assert_relative_eq!(vp.project_point(&Vec3::new(800.0, 600.0, 0.0)), Vec3::new(1.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_2d_zoom_is_clamped_and_scales_projection() {
        let mut camera = Camera2D::new(800.0, 600.0, -1.0, 1.0);
        camera.set_zoom(0.0);
        assert_relative_eq!(camera.zoom(), 0.1);

        camera.set_zoom(2.0);
        let projection = Camera::from(camera).projection_matrix();
        assert_relative_eq!(projection[(0, 0)], 2.0 / 400.0, epsilon = 1e-6);
    }

    #[test]
    fn test_2d_config_cannot_lower_zoom_floor() {
        let config = Camera2DConfig { min_zoom: 0.01, ..Camera2DConfig::default() };
        let mut camera = Camera2D::from_config(&ViewportConfig::new(800, 600), &config);

        camera.set_zoom(0.02);
        assert_relative_eq!(camera.zoom(), Camera2D::MIN_ZOOM);
    }

    #[test]
    fn test_2d_view_translates_by_negative_position() {
        let camera = Camera::orthographic(800.0, 600.0, -1.0, 1.0);
        let view = camera.view_matrix(&Vec3::new(10.0, 20.0, 0.0));
        assert_relative_eq!(view.translation_part(), Vec3::new(-10.0, -20.0, 0.0));
    }

    #[test]
    fn test_degenerate_parameters_fall_back_to_identity() {
        let camera = Camera::orthographic(0.0, 600.0, -1.0, 1.0);
        assert_relative_eq!(camera.projection_matrix(), Mat4::identity());

        let mut camera = Camera::perspective(45.0, 0.0, 0.1, 100.0);
        assert_relative_eq!(camera.projection_matrix(), Mat4::identity());

        camera.set_viewport(800.0, 600.0);
        assert!(camera.projection_matrix() != Mat4::identity());

        camera.set_far_plane(0.1);
        assert_relative_eq!(camera.projection_matrix(), Mat4::identity());
    }

    #[test]
    fn test_fov_zoom_clamps() {
        let mut camera = Camera3D::new(45.0, 4.0 / 3.0, 0.1, 100.0);

        camera.apply_fov_zoom(1.0);
        assert_relative_eq!(camera.fov_degrees(), 40.0);

        camera.apply_fov_zoom(100.0);
        assert_relative_eq!(camera.fov_degrees(), 10.0);

        camera.apply_fov_zoom(-100.0);
        assert_relative_eq!(camera.fov_degrees(), 90.0);
    }

    #[test]
    fn test_eager_recompute_on_near_plane() {
        let mut camera = Camera::perspective(45.0, 1.0, 0.1, 100.0);
        let before = camera.projection_matrix();
        camera.set_near_plane(1.0);
        assert!(camera.projection_matrix() != before);
        assert_relative_eq!(camera.near_plane(), 1.0);
    }

    #[test]
    fn test_3d_view_looks_at_target() {
        let mut camera = Camera3D::new(45.0, 1.0, 0.1, 100.0);
        camera.set_target(Vec3::new(0.0, 1.0, 0.0));
        let view = camera.view_matrix(&Vec3::new(0.0, 1.0, 10.0));

        assert_relative_eq!(view.project_point(&Vec3::new(0.0, 1.0, 0.0)), Vec3::new(0.0, 0.0, -10.0), epsilon = 1e-5);
    }

    #[test]
    fn test_from_config() {
        let camera = Camera3D::from_config(&ViewportConfig::new(800, 400), &Camera3DConfig::default().with_fov(60.0));
        assert_relative_eq!(camera.aspect_ratio(), 2.0);
        assert_relative_eq!(camera.fov_degrees(), 60.0);

        let camera = Camera2D::from_config(&ViewportConfig::default(), &Camera2DConfig::default().with_zoom(0.01));
        assert_relative_eq!(camera.zoom(), 0.1);
        assert_relative_eq!(camera.viewport(), Vec2::new(800.0, 600.0));
    }
}
