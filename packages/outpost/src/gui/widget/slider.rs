//! A bounded continuous control: a horizontal track with a draggable handle.

use crate::gui::{
    GuiWindowContext,
    Widget,
    color,
    point_in_rect,
    event::{EventStatus, InputEvent, MouseButton},
};
use graphics::frame_content::Canvas2;
use vek::*;


const HANDLE_WIDTH: f32 = 8.0;
const TRACK_HEIGHT: f32 = 4.0;


pub struct Slider {
    bounds: Rect<f32, f32>,
    min: f32,
    max: f32,
    value: f32,
    dragging: bool,
    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    pub fn new(bounds: Rect<f32, f32>, min: f32, max: f32, value: f32) -> Self {
        Slider {
            bounds,
            min,
            max,
            value: value.clamp(min, max),
            dragging: false,
            on_change: None,
        }
    }

    pub fn set_on_change<F: FnMut(f32) + 'static>(&mut self, f: F) {
        self.on_change = Some(Box::new(f));
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the value directly, clamped to the slider's range. Does not
    /// invoke the callback.
    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn bounds(&self) -> Rect<f32, f32> {
        self.bounds
    }

    fn track_x(&self) -> f32 {
        self.bounds.x + HANDLE_WIDTH / 2.0
    }

    fn track_w(&self) -> f32 {
        self.bounds.w - HANDLE_WIDTH
    }

    fn set_from_x(&mut self, x: f32) {
        let t = ((x - self.track_x()) / self.track_w()).clamp(0.0, 1.0);
        let value = self.min + t * (self.max - self.min);
        if value != self.value {
            self.value = value;
            if let Some(on_change) = self.on_change.as_mut() {
                on_change(value);
            }
        }
    }
}

impl Widget for Slider {
    fn handle_event(
        &mut self,
        _ctx: &GuiWindowContext,
        event: &InputEvent,
    ) -> EventStatus {
        match *event {
            InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                pos,
            } if point_in_rect(pos, self.bounds) => {
                self.dragging = true;
                self.set_from_x(pos.x);
                EventStatus::Handled
            }
            InputEvent::MouseMoved { pos } if self.dragging => {
                self.set_from_x(pos.x);
                EventStatus::Handled
            }
            InputEvent::MouseButtonUp {
                button: MouseButton::Left,
                ..
            } if self.dragging => {
                self.dragging = false;
                EventStatus::Handled
            }
            _ => EventStatus::NotHandled,
        }
    }

    fn draw(&self, _ctx: &GuiWindowContext, mut canvas: Canvas2) {
        let Rect { y, h, .. } = self.bounds;
        let mid_y = y + h / 2.0;

        canvas.reborrow()
            .translate([self.track_x(), mid_y - TRACK_HEIGHT / 2.0])
            .color(color::BORDER)
            .draw_solid([self.track_w(), TRACK_HEIGHT]);

        let t = if self.max > self.min {
            (self.value - self.min) / (self.max - self.min)
        } else {
            0.0
        };
        let handle_x = self.track_x() + t * self.track_w() - HANDLE_WIDTH / 2.0;
        canvas.reborrow()
            .translate([handle_x, y])
            .color(color::HIGHLIGHT)
            .draw_solid([HANDLE_WIDTH, h]);
    }
}
