//! Scripted input for headless runs
//!
//! A script is a list of frames, each holding the raw events delivered before
//! that frame is processed.

use scene_engine::prelude::*;

/// Frame-by-frame input script built with chained calls
#[derive(Debug, Clone, Default)]
pub struct Script {
    frames: Vec<Vec<InputEvent>>,
}

impl Script {
    /// Empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames with no input
    pub fn idle(mut self, frames: usize) -> Self {
        self.frames.extend(std::iter::repeat_with(Vec::new).take(frames));
        self
    }

    /// Press and release `key` within one frame
    pub fn tap(mut self, key: KeyCode) -> Self {
        self.frames.push(InputEvent::tap(key).to_vec());
        self
    }

    /// Hold `key` down for `frames` frames
    pub fn hold(mut self, key: KeyCode, frames: usize) -> Self {
        if frames == 0 {
            return self;
        }
        self.frames.push(vec![InputEvent::Key { key, pressed: true }]);
        self = self.idle(frames - 1);
        self.frames.push(vec![InputEvent::Key { key, pressed: false }]);
        self
    }

    /// Move the pointer without clicking
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.frames.push(vec![InputEvent::CursorMoved { x: f64::from(x), y: f64::from(y) }]);
        self
    }

    /// Move the pointer and click the primary button
    pub fn click(mut self, x: f32, y: f32) -> Self {
        self.frames.push(InputEvent::click_at(f64::from(x), f64::from(y)).to_vec());
        self
    }

    /// Scroll the wheel
    pub fn scroll(mut self, y: f32) -> Self {
        self.frames.push(vec![InputEvent::Scroll { y: f64::from(y) }]);
        self
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the script has no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Event batches, one per frame
    pub fn into_frames(self) -> Vec<Vec<InputEvent>> {
        self.frames
    }
}

/// Pixel position of an entity's origin as seen by the active camera
///
/// Top-left origin, matching pointer coordinates.
pub fn screen_position_of(scene: &mut Scene, id: EntityId) -> Option<Vec2> {
    let (view, projection) = scene.camera_matrices()?;
    let world = scene.tree_mut().world_position(id)?;
    let ndc = (projection * view).project_point(&world);
    let viewport = scene.viewport();
    Some(Vec2::new(
        (ndc.x + 1.0) / 2.0 * viewport.x,
        (1.0 - ndc.y) / 2.0 * viewport.y,
    ))
}

impl IntoIterator for Script {
    type Item = Vec<InputEvent>;
    type IntoIter = std::vec::IntoIter<Vec<InputEvent>>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_position_of_2d_entity() {
        let mut scene = Scene::new("probe", &EngineConfig::default());
        let camera = scene.spawn_camera_2d("camera", Vec3::zeros());
        scene.set_active_camera(camera);
        let id = scene.tree_mut().spawn("dot", SpatialNode::from_position(Vec3::new(100.0, 150.0, 0.0)));

        let screen = screen_position_of(&mut scene, id).unwrap();
        assert!((screen - Vec2::new(100.0, 450.0)).norm() < 1e-3);
    }

    #[test]
    fn test_hold_spans_frames() {
        let script = Script::new().hold(KeyCode::Q, 3);
        let frames = script.into_frames();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0], vec![InputEvent::Key { key: KeyCode::Q, pressed: true }]);
        assert!(frames[1].is_empty());
        assert_eq!(frames[3], vec![InputEvent::Key { key: KeyCode::Q, pressed: false }]);
    }

    #[test]
    fn test_builders_append_in_order() {
        let script = Script::new().tap(KeyCode::W).idle(2).click(10.0, 20.0).scroll(1.0);
        assert_eq!(script.len(), 5);
        let frames = script.into_frames();
        assert_eq!(frames[3][0], InputEvent::CursorMoved { x: 10.0, y: 20.0 });
        assert_eq!(frames[4], vec![InputEvent::Scroll { y: 1.0 }]);
    }
}
