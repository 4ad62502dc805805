//! Concrete widgets and the container that composes them.

use crate::gui::{
    GuiWindowContext,
    Widget,
    event::{EventStatus, InputEvent},
};
use graphics::frame_content::Canvas2;


pub mod button;
pub mod checkbox;
pub mod label;
pub mod list;
pub mod slider;
pub mod tab_panel;

pub use self::{
    button::Button,
    checkbox::Checkbox,
    label::Label,
    list::{List, ListItem},
    slider::Slider,
    tab_panel::TabPanel,
};


/// An ordered collection of owned child widgets.
///
/// Children later in the container are "on top": they are drawn last and
/// offered events first. Event routing stops at the first child that
/// consumes the event.
#[derive(Default)]
pub struct Container {
    children: Vec<Box<dyn Widget>>,
}

impl Container {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push<W: Widget + 'static>(&mut self, widget: W) {
        self.children.push(Box::new(widget));
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Widget for Container {
    fn handle_event(
        &mut self,
        ctx: &GuiWindowContext,
        event: &InputEvent,
    ) -> EventStatus {
        for child in self.children.iter_mut().rev() {
            if child.handle_event(ctx, event).is_handled() {
                return EventStatus::Handled;
            }
        }
        EventStatus::NotHandled
    }

    fn update(&mut self, ctx: &GuiWindowContext, dt: f32) {
        for child in &mut self.children {
            child.update(ctx, dt);
        }
    }

    fn draw(&self, ctx: &GuiWindowContext, mut canvas: Canvas2) {
        for child in &self.children {
            child.draw(ctx, canvas.reborrow());
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_fixture::TestWindow;
    use std::{cell::Cell, rc::Rc};
    use vek::*;

    #[test]
    fn events_route_topmost_first_and_stop_when_consumed() {
        // two overlapping checkboxes; only the topmost may see the click
        let mut container = Container::new();
        let hits = Rc::new(Cell::new(0u32));
        for _ in 0..2 {
            let hits = Rc::clone(&hits);
            let mut checkbox = Checkbox::new(
                Rect::new(0.0, 0.0, 30.0, 30.0),
                false,
            );
            checkbox.set_on_toggle(move |_| hits.set(hits.get() + 1));
            container.push(checkbox);
        }

        let window = TestWindow::new();
        let status = container.handle_event(
            &window.ctx(),
            &InputEvent::MouseButtonDown {
                button: crate::gui::event::MouseButton::Left,
                pos: Vec2::new(5.0, 5.0),
            },
        );
        assert!(status.is_handled());
        assert_eq!(hits.get(), 1);
    }
}
