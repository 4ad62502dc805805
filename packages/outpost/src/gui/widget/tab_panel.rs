//! A row of tab headers over per-tab widget containers. Only the active
//! tab's contents receive events or are drawn.

use crate::gui::{
    GuiWindowContext,
    Widget,
    color,
    point_in_rect,
    event::{EventStatus, InputEvent, MouseButton},
};
use super::Container;
use graphics::frame_content::{Canvas2, HAlign, TextBlock, VAlign};
use vek::*;


pub const HEADER_HEIGHT: f32 = 28.0;


struct Tab {
    label: String,
    contents: Container,
}

pub struct TabPanel {
    bounds: Rect<f32, f32>,
    tabs: Vec<Tab>,
    active: usize,
}

impl TabPanel {
    pub fn new(bounds: Rect<f32, f32>) -> Self {
        TabPanel {
            bounds,
            tabs: Vec::new(),
            active: 0,
        }
    }

    /// Append a tab and return its index.
    pub fn add_tab(&mut self, label: impl Into<String>) -> usize {
        self.tabs.push(Tab {
            label: label.into(),
            contents: Container::new(),
        });
        self.tabs.len() - 1
    }

    /// Add a widget to the tab at `tab`.
    ///
    /// Panics if `tab` is out of range; tabs are created up-front by the
    /// owning menu.
    pub fn push_to_tab<W: Widget + 'static>(&mut self, tab: usize, widget: W) {
        self.tabs[tab].contents.push(widget);
    }

    pub fn active_tab(&self) -> usize {
        self.active
    }

    pub fn set_active_tab(&mut self, tab: usize) {
        if tab < self.tabs.len() {
            self.active = tab;
        }
    }

    pub fn bounds(&self) -> Rect<f32, f32> {
        self.bounds
    }

    fn header_rect(&self, index: usize) -> Rect<f32, f32> {
        let w = self.bounds.w / self.tabs.len().max(1) as f32;
        Rect::new(
            self.bounds.x + index as f32 * w,
            self.bounds.y,
            w,
            HEADER_HEIGHT,
        )
    }
}

impl Widget for TabPanel {
    fn handle_event(
        &mut self,
        ctx: &GuiWindowContext,
        event: &InputEvent,
    ) -> EventStatus {
        if let InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            pos,
        } = *event
        {
            for index in 0..self.tabs.len() {
                if point_in_rect(pos, self.header_rect(index)) {
                    self.active = index;
                    return EventStatus::Handled;
                }
            }
        }
        match self.tabs.get_mut(self.active) {
            Some(tab) => tab.contents.handle_event(ctx, event),
            None => EventStatus::NotHandled,
        }
    }

    fn update(&mut self, ctx: &GuiWindowContext, dt: f32) {
        if let Some(tab) = self.tabs.get_mut(self.active) {
            tab.contents.update(ctx, dt);
        }
    }

    fn draw(&self, ctx: &GuiWindowContext, mut canvas: Canvas2) {
        for (index, tab) in self.tabs.iter().enumerate() {
            let rect = self.header_rect(index);
            let fill = if index == self.active {
                color::HIGHLIGHT
            } else {
                color::BACKGROUND
            };
            canvas.reborrow()
                .translate([rect.x, rect.y])
                .color(color::BORDER)
                .draw_solid([rect.w, rect.h]);
            canvas.reborrow()
                .translate([rect.x + 1.0, rect.y + 1.0])
                .color(fill)
                .draw_solid([rect.w - 2.0, rect.h - 2.0]);
            canvas.reborrow()
                .translate([rect.x + rect.w / 2.0, rect.y + rect.h / 2.0])
                .draw_text(TextBlock {
                    text: tab.label.clone(),
                    logical_size: HEADER_HEIGHT * 0.5,
                    color: color::TEXT,
                    h_align: HAlign::Center,
                    v_align: VAlign::Center,
                });
        }
        if let Some(tab) = self.tabs.get(self.active) {
            tab.contents.draw(ctx, canvas.reborrow());
        }
    }
}
