//! # Engine Configuration
//!
//! Defaults for the viewport, both camera kinds, picking and logging. Every
//! section deserializes with missing fields filled from `Default`, so a config
//! file only needs the values it overrides.

use serde::{Serialize, Deserialize};

use crate::render::Camera2D;

use super::{Config, ConfigError};

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ViewportConfig {
    /// Create a viewport config
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height, or 1.0 when the height is zero
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("Viewport must be non-empty, got {}x{}", self.width, self.height));
        }
        Ok(())
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Defaults for orthographic 2D cameras
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera2DConfig {
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Initial zoom factor
    pub zoom: f32,
    /// Lower bound applied to every zoom change
    pub min_zoom: f32,
}

impl Camera2DConfig {
    /// Set the clip planes
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Set the initial zoom
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.near == self.far {
            return Err("2D camera near and far planes must differ".to_string());
        }
        if self.min_zoom < Camera2D::MIN_ZOOM {
            return Err(format!("2D camera minimum zoom must be at least {}", Camera2D::MIN_ZOOM));
        }
        Ok(())
    }
}

impl Default for Camera2DConfig {
    fn default() -> Self {
        Self {
            near: -1.0,
            far: 1.0,
            zoom: 1.0,
            min_zoom: 0.1,
        }
    }
}

/// Defaults for perspective 3D cameras
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera3DConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Degrees of FOV change per unit of scroll
    pub zoom_sensitivity: f32,
    /// Narrowest FOV reachable by scrolling
    pub min_fov_degrees: f32,
    /// Widest FOV reachable by scrolling
    pub max_fov_degrees: f32,
}

impl Camera3DConfig {
    /// Set the field of view
    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self
    }

    /// Set the clip planes
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Set the scroll zoom range and sensitivity
    pub fn with_zoom_range(mut self, min_fov_degrees: f32, max_fov_degrees: f32, sensitivity: f32) -> Self {
        self.min_fov_degrees = min_fov_degrees;
        self.max_fov_degrees = max_fov_degrees;
        self.zoom_sensitivity = sensitivity;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.near <= 0.0 || self.far <= self.near {
            return Err(format!(
                "3D camera needs 0 < near < far, got near={} far={}",
                self.near, self.far
            ));
        }
        if self.min_fov_degrees <= 0.0 || self.max_fov_degrees >= 180.0 || self.min_fov_degrees > self.max_fov_degrees {
            return Err(format!(
                "3D camera FOV range must lie within (0, 180), got [{}, {}]",
                self.min_fov_degrees, self.max_fov_degrees
            ));
        }
        Ok(())
    }
}

impl Default for Camera3DConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            zoom_sensitivity: 5.0,
            min_fov_degrees: 10.0,
            max_fov_degrees: 90.0,
        }
    }
}

/// Which picking passes run each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingConfig {
    /// Screen-space quad picking against 2D entities
    pub enable_2d: bool,
    /// Ray-AABB picking against 3D entities
    pub enable_3d: bool,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            enable_2d: true,
            enable_3d: true,
        }
    }
}

/// Logging setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter level: "off", "error", "warn", "info", "debug" or "trace"
    pub level: String,
    /// Route output through the test harness capture
    pub is_test: bool,
}

impl LoggingConfig {
    /// Set log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Parsed filter level, falling back to `Info` for unknown names
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            is_test: false,
        }
    }
}

/// # Engine Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Viewport size
    pub viewport: ViewportConfig,
    /// 2D camera defaults
    pub camera_2d: Camera2DConfig,
    /// 3D camera defaults
    pub camera_3d: Camera3DConfig,
    /// Picking passes
    pub picking: PickingConfig,
    /// Logging setup
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Set the viewport size
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = ViewportConfig::new(width, height);
        self
    }

    /// Set the 2D camera defaults
    pub fn with_camera_2d(mut self, camera: Camera2DConfig) -> Self {
        self.camera_2d = camera;
        self
    }

    /// Set the 3D camera defaults
    pub fn with_camera_3d(mut self, camera: Camera3DConfig) -> Self {
        self.camera_3d = camera;
        self
    }

    /// Set the picking passes
    pub fn with_picking(mut self, picking: PickingConfig) -> Self {
        self.picking = picking;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.viewport.validate()?;
        self.camera_2d.validate()?;
        self.camera_3d.validate()?;
        Ok(())
    }

    /// Load from file and validate
    pub fn load_validated(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.viewport, ViewportConfig::new(800, 600));
        assert_eq!(config.camera_3d.fov_degrees, 45.0);
        assert_eq!(config.camera_2d.min_zoom, 0.1);
        assert!(config.picking.enable_2d && config.picking.enable_3d);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_min_zoom_below_floor_is_rejected() {
        let mut camera = Camera2DConfig::default();
        camera.min_zoom = 0.01;
        assert!(camera.validate().is_err());

        camera.min_zoom = 0.5;
        assert!(camera.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            "[viewport]\nwidth = 1024\n\n[camera_3d]\nfov_degrees = 60.0\n",
        )
        .unwrap();

        assert_eq!(config.viewport.width, 1024);
        assert_eq!(config.viewport.height, 600);
        assert_eq!(config.camera_3d.fov_degrees, 60.0);
        assert_eq!(config.camera_3d.far, 100.0);
    }

    #[test]
    fn test_ron_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("scene_engine_config_{}.ron", std::process::id()));
        let config = EngineConfig::default().with_viewport(640, 480).with_log_level("debug");

        config.save_to_file(&path).unwrap();
        let loaded = EngineConfig::load_validated(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let result = EngineConfig::load_from_file("engine.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validation_catches_degenerate_values() {
        assert!(EngineConfig::default().with_viewport(0, 600).validate().is_err());

        let camera = Camera3DConfig::default().with_clip_planes(1.0, 1.0);
        assert!(EngineConfig::default().with_camera_3d(camera).validate().is_err());

        let camera = Camera2DConfig::default().with_clip_planes(0.0, 0.0);
        assert!(EngineConfig::default().with_camera_2d(camera).validate().is_err());
    }

    #[test]
    fn test_level_filter_parsing() {
        assert_eq!(LoggingConfig::default().with_level("debug").level_filter(), log::LevelFilter::Debug);
        assert_eq!(LoggingConfig::default().with_level("nonsense").level_filter(), log::LevelFilter::Info);
    }
}
