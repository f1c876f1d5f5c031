//! Flat-colored drawable used by both demo scenes

use scene_engine::prelude::*;

/// RGBA color
pub type Color = [f32; 4];

/// Records each draw it receives instead of issuing GPU work
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Fill color; alpha is driven by hover state
    pub color: Color,
    /// Render calls received so far
    pub draws: u64,
    /// Model-view-projection of the latest draw
    pub last_mvp: Mat4,
}

impl Panel {
    /// Panel with the given color and no draws yet
    pub fn new(color: Color) -> Self {
        Self {
            color,
            draws: 0,
            last_mvp: Mat4::identity(),
        }
    }

    /// Replace the alpha channel
    pub fn set_alpha(&mut self, alpha: f32) {
        self.color[3] = alpha;
    }

    /// Current alpha
    pub fn alpha(&self) -> f32 {
        self.color[3]
    }
}

impl Behaviour for Panel {
    fn capabilities(&self) -> Capabilities {
        Capabilities::RENDER
    }

    fn render(&mut self, ctx: &RenderContext) {
        self.draws += 1;
        self.last_mvp = ctx.mvp();
    }
}
