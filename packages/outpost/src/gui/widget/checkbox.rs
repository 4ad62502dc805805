//! A rectangular, clickable toggle.

use crate::gui::{
    GuiWindowContext,
    Widget,
    color,
    point_in_rect,
    event::{EventStatus, InputEvent, MouseButton},
};
use graphics::frame_content::Canvas2;
use std::f32::consts::SQRT_2;
use vek::*;


pub struct Checkbox {
    bounds: Rect<f32, f32>,
    checked: bool,
    on_toggle: Option<Box<dyn FnMut(bool)>>,
}

impl Checkbox {
    pub fn new(bounds: Rect<f32, f32>, initial: bool) -> Self {
        Checkbox {
            bounds,
            checked: initial,
            on_toggle: None,
        }
    }

    /// Register a callback invoked with the new state on every click toggle.
    pub fn set_on_toggle<F: FnMut(bool) + 'static>(&mut self, f: F) {
        self.on_toggle = Some(Box::new(f));
    }

    /// Set the state directly. Does not invoke the callback.
    pub fn set_state(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn state(&self) -> bool {
        self.checked
    }

    pub fn bounds(&self) -> Rect<f32, f32> {
        self.bounds
    }

    /// Thin border for small boxes, thick for large ones.
    pub fn border_width(&self) -> f32 {
        if self.bounds.w.min(self.bounds.h) < 40.0 { 2.0 } else { 4.0 }
    }
}

impl Widget for Checkbox {
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
                self.checked = !self.checked;
                if let Some(on_toggle) = self.on_toggle.as_mut() {
                    on_toggle(self.checked);
                }
                EventStatus::Handled
            }
            _ => EventStatus::NotHandled,
        }
    }

    fn draw(&self, _ctx: &GuiWindowContext, mut canvas: Canvas2) {
        let bw = self.border_width();
        let Rect { x, y, w, h } = self.bounds;

        canvas.reborrow()
            .translate([x, y])
            .color(color::BORDER)
            .draw_solid([w, h]);
        canvas.reborrow()
            .translate([x + bw, y + bw])
            .color(color::BACKGROUND)
            .draw_solid([w - 2.0 * bw, h - 2.0 * bw]);

        if self.checked {
            // two perpendicular diagonal bars forming an X
            let len = SQRT_2 * (w - 4.0 * bw);
            let center = Vec2::new(x + w / 2.0, y + h / 2.0);
            for sign in [1.0_f32, -1.0] {
                canvas.reborrow()
                    .translate(center)
                    .rotate(sign * std::f32::consts::FRAC_PI_4)
                    .translate([-len / 2.0, -bw / 2.0])
                    .color(color::TEXT)
                    .draw_solid([len, bw]);
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_fixture::TestWindow;
    use graphics::frame_content::FrameContent;
    use std::{cell::Cell, rc::Rc};

    fn click(pos: [f32; 2]) -> InputEvent {
        InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            pos: pos.into(),
        }
    }

    #[test]
    fn click_inside_toggles_and_consumes() {
        let window = TestWindow::new();
        let mut checkbox = Checkbox::new(Rect::new(0.0, 0.0, 10.0, 10.0), false);
        let seen = Rc::new(Cell::new(None));
        {
            let seen = Rc::clone(&seen);
            checkbox.set_on_toggle(move |state| seen.set(Some(state)));
        }

        let status = checkbox.handle_event(&window.ctx(), &click([5.0, 5.0]));
        assert_eq!(status, EventStatus::Handled);
        assert_eq!(checkbox.state(), true);
        assert_eq!(seen.get(), Some(true));
    }

    #[test]
    fn click_parity() {
        let window = TestWindow::new();
        let mut checkbox = Checkbox::new(Rect::new(0.0, 0.0, 30.0, 30.0), false);
        for n in 1..=6 {
            checkbox.handle_event(&window.ctx(), &click([15.0, 15.0]));
            assert_eq!(checkbox.state(), n % 2 == 1);
        }
    }

    #[test]
    fn click_outside_is_not_consumed() {
        let window = TestWindow::new();
        let mut checkbox = Checkbox::new(Rect::new(0.0, 0.0, 10.0, 10.0), false);
        let status = checkbox.handle_event(&window.ctx(), &click([15.0, 5.0]));
        assert_eq!(status, EventStatus::NotHandled);
        assert_eq!(checkbox.state(), false);
    }

    #[test]
    fn other_events_are_not_consumed() {
        let window = TestWindow::new();
        let mut checkbox = Checkbox::new(Rect::new(0.0, 0.0, 10.0, 10.0), false);
        let status = checkbox.handle_event(
            &window.ctx(),
            &InputEvent::MouseButtonDown {
                button: MouseButton::Right,
                pos: [5.0, 5.0].into(),
            },
        );
        assert_eq!(status, EventStatus::NotHandled);
        let status = checkbox.handle_event(
            &window.ctx(),
            &InputEvent::MouseMoved { pos: [5.0, 5.0].into() },
        );
        assert_eq!(status, EventStatus::NotHandled);
    }

    #[test]
    fn set_state_does_not_invoke_callback() {
        let mut checkbox = Checkbox::new(Rect::new(0.0, 0.0, 10.0, 10.0), false);
        let fired = Rc::new(Cell::new(false));
        {
            let fired = Rc::clone(&fired);
            checkbox.set_on_toggle(move |_| fired.set(true));
        }
        checkbox.set_state(true);
        assert_eq!(checkbox.state(), true);
        assert_eq!(fired.get(), false);
    }

    #[test]
    fn border_width_by_smaller_dimension() {
        let small = Checkbox::new(Rect::new(0.0, 0.0, 30.0, 30.0), false);
        assert_eq!(small.border_width(), 2.0);
        let large = Checkbox::new(Rect::new(0.0, 0.0, 50.0, 50.0), false);
        assert_eq!(large.border_width(), 4.0);
        let mixed = Checkbox::new(Rect::new(0.0, 0.0, 100.0, 30.0), false);
        assert_eq!(mixed.border_width(), 2.0);
    }

    /// The inset of the recorded background box is the border width.
    fn recorded_background_inset(size: f32) -> Vec2<f32> {
        use graphics::{
            frame_content::FrameItem,
            modifier::Modifier2,
        };

        let window = TestWindow::new();
        let mut content = FrameContent::new();
        let checkbox = Checkbox::new(Rect::new(0.0, 0.0, size, size), false);
        checkbox.draw(&window.ctx(), content.canvas());

        // border box (translate, color, scale, solid) then background box;
        // item 4 is the background's inset translate
        match content.items()[4] {
            (_, FrameItem::PushModifier(Modifier2::Transform(t))) => {
                t.apply([0.0, 0.0])
            }
            ref other => panic!("unexpected item: {:?}", other),
        }
    }

    #[test]
    fn drawn_border_matches_the_rule() {
        assert_eq!(recorded_background_inset(30.0), Vec2::new(2.0, 2.0));
        assert_eq!(recorded_background_inset(50.0), Vec2::new(4.0, 4.0));
    }

    #[test]
    fn checked_box_draws_the_cross_bars() {
        let window = TestWindow::new();
        let mut content = FrameContent::new();
        let unchecked = Checkbox::new(Rect::new(0.0, 0.0, 30.0, 30.0), false);
        unchecked.draw(&window.ctx(), content.canvas());
        let unchecked_items = content.items().len();

        let mut content = FrameContent::new();
        let checked = Checkbox::new(Rect::new(0.0, 0.0, 30.0, 30.0), true);
        checked.draw(&window.ctx(), content.canvas());
        assert!(content.items().len() > unchecked_items);
    }
}
