//! A single-choice list of text rows.

use crate::gui::{
    GuiWindowContext,
    Widget,
    color,
    point_in_rect,
    event::{EventStatus, InputEvent, MouseButton},
};
use graphics::frame_content::{Canvas2, HAlign, TextBlock, VAlign};
use vek::*;


pub const ROW_HEIGHT: f32 = 22.0;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub key: usize,
    pub text: String,
}

pub struct List {
    bounds: Rect<f32, f32>,
    items: Vec<ListItem>,
    selected: Option<usize>,
    on_select: Option<Box<dyn FnMut(usize)>>,
}

impl List {
    pub fn new(bounds: Rect<f32, f32>, items: Vec<ListItem>) -> Self {
        List {
            bounds,
            items,
            selected: None,
            on_select: None,
        }
    }

    /// Register a callback invoked with the item key on every click
    /// selection.
    pub fn set_on_select<F: FnMut(usize) + 'static>(&mut self, f: F) {
        self.on_select = Some(Box::new(f));
    }

    pub fn selected_key(&self) -> Option<usize> {
        self.selected
    }

    /// Select by key. Does not invoke the callback; unknown keys clear the
    /// selection.
    pub fn select_key(&mut self, key: usize) {
        self.selected = self.items.iter()
            .find(|item| item.key == key)
            .map(|item| item.key);
    }

    pub fn bounds(&self) -> Rect<f32, f32> {
        self.bounds
    }

    fn row_at(&self, pos: Vec2<f32>) -> Option<usize> {
        let row = ((pos.y - self.bounds.y) / ROW_HEIGHT) as usize;
        if row < self.items.len() {
            Some(row)
        } else {
            None
        }
    }
}

impl Widget for List {
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
                if let Some(row) = self.row_at(pos) {
                    let key = self.items[row].key;
                    self.selected = Some(key);
                    if let Some(on_select) = self.on_select.as_mut() {
                        on_select(key);
                    }
                }
                EventStatus::Handled
            }
            _ => EventStatus::NotHandled,
        }
    }

    fn draw(&self, _ctx: &GuiWindowContext, mut canvas: Canvas2) {
        let Rect { x, y, w, h } = self.bounds;
        canvas.reborrow()
            .translate([x, y])
            .color(color::BACKGROUND)
            .draw_solid([w, h]);
        for (row, item) in self.items.iter().enumerate() {
            let row_y = y + row as f32 * ROW_HEIGHT;
            if self.selected == Some(item.key) {
                canvas.reborrow()
                    .translate([x, row_y])
                    .color(color::HIGHLIGHT)
                    .draw_solid([w, ROW_HEIGHT]);
            }
            canvas.reborrow()
                .translate([x + 6.0, row_y + ROW_HEIGHT / 2.0])
                .draw_text(TextBlock {
                    text: item.text.clone(),
                    logical_size: ROW_HEIGHT - 6.0,
                    color: color::TEXT,
                    h_align: HAlign::Left,
                    v_align: VAlign::Center,
                });
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::test_fixture::TestWindow;
    use std::{cell::Cell, rc::Rc};

    fn list() -> List {
        List::new(
            Rect::new(0.0, 0.0, 120.0, 200.0),
            (0..3)
                .map(|key| ListItem {
                    key,
                    text: format!("item {}", key),
                })
                .collect(),
        )
    }

    #[test]
    fn click_selects_the_row_under_the_cursor() {
        let window = TestWindow::new();
        let mut list = list();
        let seen = Rc::new(Cell::new(None));
        {
            let seen = Rc::clone(&seen);
            list.set_on_select(move |key| seen.set(Some(key)));
        }

        let status = list.handle_event(
            &window.ctx(),
            &InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                pos: [10.0, ROW_HEIGHT * 1.5].into(),
            },
        );
        assert!(status.is_handled());
        assert_eq!(list.selected_key(), Some(1));
        assert_eq!(seen.get(), Some(1));
    }

    #[test]
    fn click_below_the_rows_consumes_without_selecting() {
        let window = TestWindow::new();
        let mut list = list();
        let status = list.handle_event(
            &window.ctx(),
            &InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                pos: [10.0, 150.0].into(),
            },
        );
        assert!(status.is_handled());
        assert_eq!(list.selected_key(), None);
    }

    #[test]
    fn select_key_ignores_unknown_keys() {
        let mut list = list();
        list.select_key(2);
        assert_eq!(list.selected_key(), Some(2));
        list.select_key(9);
        assert_eq!(list.selected_key(), None);
    }
}
