//! Static text. Never consumes events.

use crate::gui::{
    GuiWindowContext,
    Widget,
    color,
    event::{EventStatus, InputEvent},
};
use graphics::frame_content::{Canvas2, HAlign, TextBlock, VAlign};
use vek::*;


pub struct Label {
    pos: Vec2<f32>,
    text: String,
    logical_size: f32,
    h_align: HAlign,
}

impl Label {
    pub fn new(pos: Vec2<f32>, text: impl Into<String>, logical_size: f32) -> Self {
        Label {
            pos,
            text: text.into(),
            logical_size,
            h_align: HAlign::Left,
        }
    }

    pub fn with_h_align(mut self, h_align: HAlign) -> Self {
        self.h_align = h_align;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Label {
    fn handle_event(
        &mut self,
        _ctx: &GuiWindowContext,
        _event: &InputEvent,
    ) -> EventStatus {
        EventStatus::NotHandled
    }

    fn draw(&self, _ctx: &GuiWindowContext, canvas: Canvas2) {
        canvas
            .translate(self.pos)
            .draw_text(TextBlock {
                text: self.text.clone(),
                logical_size: self.logical_size,
                color: color::TEXT,
                h_align: self.h_align,
                v_align: VAlign::Top,
            });
    }
}
