//! Per-frame input snapshot for picking and scene code
//!
//! Provides utilities for converting screen-space coordinates to
//! Normalized Device Coordinates (NDC) for unprojection.

use crate::foundation::math::Vec2;

use super::KeyCode;

/// Input latched once per frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameInput {
    /// Pointer position in pixels, top-left origin
    pub pointer: Vec2,
    /// Primary (left) button went down this frame
    pub primary_just_pressed: bool,
    /// Viewport size in pixels
    pub viewport: Vec2,
    /// Vertical scroll accumulated this frame
    pub scroll_y: f32,
    /// Keys that went down this frame
    pub keys_pressed: Vec<KeyCode>,
    /// Keys currently held
    pub keys_held: Vec<KeyCode>,
}

impl FrameInput {
    /// Idle frame for a viewport of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Vec2::new(width, height),
            ..Default::default()
        }
    }

    /// Set the pointer position
    pub fn with_pointer(mut self, x: f32, y: f32) -> Self {
        self.pointer = Vec2::new(x, y);
        self
    }

    /// Mark the primary button as just pressed
    pub fn with_click(mut self) -> Self {
        self.primary_just_pressed = true;
        self
    }

    /// Set the scroll amount
    pub fn with_scroll(mut self, scroll_y: f32) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    /// Add a just-pressed key
    pub fn with_key_pressed(mut self, key: KeyCode) -> Self {
        self.keys_pressed.push(key);
        self
    }

    /// Add a held key
    pub fn with_key_held(mut self, key: KeyCode) -> Self {
        self.keys_held.push(key);
        self
    }

    /// Whether a key went down this frame
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Whether a key is held
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Pointer in normalized device coordinates
    pub fn pointer_ndc(&self) -> Vec2 {
        screen_to_ndc(self.pointer, self.viewport)
    }
}

/// Convert pixel coordinates to Normalized Device Coordinates (NDC)
///
/// NDC range: [-1, 1] where:
/// - X: -1 = left, +1 = right
/// - Y: +1 = top, -1 = bottom (screen Y grows downwards, so it is flipped)
///
/// # Examples
/// ```
/// # use scene_engine::input::screen_to_ndc;
/// # use scene_engine::foundation::math::Vec2;
/// let ndc = screen_to_ndc(Vec2::new(0.0, 0.0), Vec2::new(800.0, 600.0));
/// assert_eq!(ndc, Vec2::new(-1.0, 1.0));
/// ```
pub fn screen_to_ndc(screen: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        2.0 * screen.x / viewport.x - 1.0,
        1.0 - 2.0 * screen.y / viewport.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ndc_corners_and_center() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_relative_eq!(screen_to_ndc(Vec2::new(400.0, 300.0), viewport), Vec2::zeros());
        assert_relative_eq!(screen_to_ndc(Vec2::new(800.0, 600.0), viewport), Vec2::new(1.0, -1.0));
        assert_relative_eq!(screen_to_ndc(Vec2::new(0.0, 600.0), viewport), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_builder() {
        let frame = FrameInput::new(800.0, 600.0)
            .with_pointer(200.0, 150.0)
            .with_click()
            .with_scroll(-1.0)
            .with_key_pressed(KeyCode::W);

        assert!(frame.primary_just_pressed);
        assert!(frame.is_key_pressed(KeyCode::W));
        assert!(!frame.is_key_held(KeyCode::W));
        assert_relative_eq!(frame.pointer_ndc(), Vec2::new(-0.5, 0.5));
    }
}
