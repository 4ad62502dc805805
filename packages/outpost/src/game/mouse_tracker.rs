//! Tracks the cursor in both window and world space.

use super::scrolling_view::ScrollingView;
use vek::*;


#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct MouseTracker {
    window_pos: Option<Vec2<f32>>,
    world_pos: Option<Vec2<f32>>,
}

impl MouseTracker {
    pub fn new() -> Self {
        Default::default()
    }

    /// Record a new cursor position. Returns the window-space delta from the
    /// previous position (zero on the first update).
    pub fn update(&mut self, pos: Vec2<f32>, view: &ScrollingView) -> Vec2<f32> {
        let delta = pos - self.window_pos.unwrap_or(pos);
        self.window_pos = Some(pos);
        self.world_pos = Some(view.screen_to_world(pos));
        delta
    }

    /// Recompute the world position after the view moved under a stationary
    /// cursor.
    pub fn refresh(&mut self, view: &ScrollingView) {
        if let Some(pos) = self.window_pos {
            self.world_pos = Some(view.screen_to_world(pos));
        }
    }

    pub fn window_pos(&self) -> Option<Vec2<f32>> {
        self.window_pos
    }

    pub fn world_pos(&self) -> Option<Vec2<f32>> {
        self.world_pos
    }
}
