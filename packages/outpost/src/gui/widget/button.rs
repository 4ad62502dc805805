//! A clickable text button.

use crate::gui::{
    GuiWindowContext,
    Widget,
    color,
    point_in_rect,
    event::{EventStatus, InputEvent, MouseButton},
};
use graphics::frame_content::{Canvas2, HAlign, TextBlock, VAlign};
use vek::*;


pub struct Button {
    bounds: Rect<f32, f32>,
    text: String,
    on_click: Option<Box<dyn FnMut()>>,
}

impl Button {
    pub fn new(bounds: Rect<f32, f32>, text: impl Into<String>) -> Self {
        Button {
            bounds,
            text: text.into(),
            on_click: None,
        }
    }

    pub fn set_on_click<F: FnMut() + 'static>(&mut self, f: F) {
        self.on_click = Some(Box::new(f));
    }

    pub fn bounds(&self) -> Rect<f32, f32> {
        self.bounds
    }

    fn mouse_over(&self, ctx: &GuiWindowContext) -> bool {
        ctx.cursor_pos
            .map(|pos| point_in_rect(pos, self.bounds))
            .unwrap_or(false)
    }
}

impl Widget for Button {
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
                if let Some(on_click) = self.on_click.as_mut() {
                    on_click();
                }
                EventStatus::Handled
            }
            _ => EventStatus::NotHandled,
        }
    }

    fn draw(&self, ctx: &GuiWindowContext, mut canvas: Canvas2) {
        let Rect { x, y, w, h } = self.bounds;
        let fill = if self.mouse_over(ctx) {
            color::HIGHLIGHT
        } else {
            color::BACKGROUND
        };
        canvas.reborrow()
            .translate([x, y])
            .color(color::BORDER)
            .draw_solid([w, h]);
        canvas.reborrow()
            .translate([x + 2.0, y + 2.0])
            .color(fill)
            .draw_solid([w - 4.0, h - 4.0]);
        canvas.reborrow()
            .translate([x + w / 2.0, y + h / 2.0])
            .draw_text(TextBlock {
                text: self.text.clone(),
                logical_size: h * 0.5,
                color: color::TEXT,
                h_align: HAlign::Center,
                v_align: VAlign::Center,
            });
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_fixture::TestWindow;
    use std::{cell::Cell, rc::Rc};

    #[test]
    fn click_fires_callback_once() {
        let window = TestWindow::new();
        let mut button = Button::new(Rect::new(10.0, 10.0, 80.0, 24.0), "apply");
        let clicks = Rc::new(Cell::new(0u32));
        {
            let clicks = Rc::clone(&clicks);
            button.set_on_click(move || clicks.set(clicks.get() + 1));
        }

        let inside = InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            pos: [50.0, 20.0].into(),
        };
        let outside = InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            pos: [50.0, 50.0].into(),
        };
        assert!(button.handle_event(&window.ctx(), &inside).is_handled());
        assert!(!button.handle_event(&window.ctx(), &outside).is_handled());
        assert_eq!(clicks.get(), 1);
    }
}
