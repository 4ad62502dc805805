//! Camera state for the battlefield view: a world-space center plus a zoom
//! level, mapped onto the window viewport.

use vek::*;


/// Zoom limits, in pixels per world unit.
pub const MIN_ZOOM: f32 = 8.0;
pub const MAX_ZOOM: f32 = 96.0;

const DEFAULT_ZOOM: f32 = 32.0;


#[derive(Debug, Clone, PartialEq)]
pub struct ScrollingView {
    center: Vec2<f32>,
    zoom: f32,
    viewport: Extent2<f32>,
    world_bounds: Option<Rect<f32, f32>>,
}

impl ScrollingView {
    pub fn new(viewport: Extent2<f32>) -> Self {
        ScrollingView {
            center: Vec2::zero(),
            zoom: DEFAULT_ZOOM,
            viewport,
            world_bounds: None,
        }
    }

    pub fn center(&self) -> Vec2<f32> {
        self.center
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn viewport(&self) -> Extent2<f32> {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Extent2<f32>) {
        self.viewport = viewport;
    }

    /// Constrain the camera center to `bounds` from now on.
    pub fn set_world_bounds(&mut self, bounds: Rect<f32, f32>) {
        self.world_bounds = Some(bounds);
        self.clamp_center();
    }

    pub fn world_to_screen(&self, world: Vec2<f32>) -> Vec2<f32> {
        (world - self.center) * self.zoom + self.half_viewport()
    }

    pub fn screen_to_world(&self, screen: Vec2<f32>) -> Vec2<f32> {
        (screen - self.half_viewport()) / self.zoom + self.center
    }

    /// Move the camera by a world-space delta.
    pub fn scroll_world(&mut self, delta: Vec2<f32>) {
        self.center += delta;
        self.clamp_center();
    }

    /// Move the camera by a screen-space delta.
    pub fn scroll_pixels(&mut self, delta: Vec2<f32>) {
        self.scroll_world(delta / self.zoom);
    }

    /// Multiply the zoom level, clamped to the limits.
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// The world-space rectangle currently on screen.
    pub fn visible_world_rect(&self) -> Rect<f32, f32> {
        let half = self.half_viewport() / self.zoom;
        Rect::new(
            self.center.x - half.x,
            self.center.y - half.y,
            half.x * 2.0,
            half.y * 2.0,
        )
    }

    fn half_viewport(&self) -> Vec2<f32> {
        Vec2::new(self.viewport.w / 2.0, self.viewport.h / 2.0)
    }

    fn clamp_center(&mut self) {
        if let Some(bounds) = self.world_bounds {
            self.center.x = self.center.x.clamp(bounds.x, bounds.x + bounds.w);
            self.center.y = self.center.y.clamp(bounds.y, bounds.y + bounds.h);
        }
    }
}
