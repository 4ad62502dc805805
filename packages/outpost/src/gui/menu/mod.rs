//! Full-screen menus overlaid on the game view. A menu captures all input
//! while open; closing returns control to whatever is underneath.

use crate::gui::{
    GuiWindowContext,
    Widget,
    color,
    widget::Container,
    event::{EventStatus, InputEvent},
};
use graphics::frame_content::{Canvas2, HAlign, TextBlock, VAlign};
use vek::*;


pub mod settings;

pub use self::settings::SettingsMenu;


pub const MENU_BACKGROUND: Rgba<f32> = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.5 };

const TITLE_SIZE: f32 = 24.0;


/// Shared chrome of a full-screen menu: translucent backdrop, a title, and
/// an owned widget tree. Concrete menus embed this and add their own
/// behavior on top.
pub struct Menu {
    title: String,
    widgets: Container,
    closed: bool,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        Menu {
            title: title.into(),
            widgets: Container::new(),
            closed: false,
        }
    }

    pub fn push<W: Widget + 'static>(&mut self, widget: W) {
        self.widgets.push(widget);
    }

    /// Mark the menu for removal. The owner drops it after the current
    /// dispatch.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Widget for Menu {
    fn handle_event(
        &mut self,
        ctx: &GuiWindowContext,
        event: &InputEvent,
    ) -> EventStatus {
        let _ = self.widgets.handle_event(ctx, event);
        // modal: nothing leaks through to the widgets underneath
        EventStatus::Handled
    }

    fn update(&mut self, ctx: &GuiWindowContext, dt: f32) {
        self.widgets.update(ctx, dt);
    }

    fn draw(&self, ctx: &GuiWindowContext, mut canvas: Canvas2) {
        canvas.reborrow()
            .color(MENU_BACKGROUND)
            .draw_solid([ctx.size.w, ctx.size.h]);
        canvas.reborrow()
            .translate([ctx.size.w / 2.0, 24.0])
            .draw_text(TextBlock {
                text: self.title.clone(),
                logical_size: TITLE_SIZE,
                color: color::TEXT,
                h_align: HAlign::Center,
                v_align: VAlign::Top,
            });
        self.widgets.draw(ctx, canvas.reborrow());
    }
}
