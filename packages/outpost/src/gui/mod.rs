//! The widget capability, the per-dispatch context, and window-level
//! commands.
//!
//! Widgets receive events and a shared context, and draw themselves into a
//! `Canvas2`. Anything that must touch the window itself (quitting,
//! changing the display mode) is requested through the context's command
//! queue and performed by the event loop, which owns the window.

use crate::settings::Settings;
use self::event::{EventStatus, InputEvent, MouseButton, VirtualKeyCode};
use graphics::frame_content::Canvas2;
use std::{
    cell::RefCell,
    collections::{HashSet, VecDeque},
    fmt,
    path::Path,
};
use vek::*;


pub mod event;
pub mod event_loop;
pub mod menu;
pub mod widget;


/// One display mode the host window can be switched into.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DisplayMode {
    /// Width and height in physical pixels.
    pub size: Extent2<u32>,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.size.w, self.size.h)
    }
}

/// Effects only the window owner can perform. Widgets queue these; the
/// event loop drains them after dispatch.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WindowCommand {
    /// Terminate the event loop gracefully.
    Exit,
    /// Apply a display mode. Expensive; failures are the toolkit's to
    /// report and are not retried.
    SetDisplayMode {
        mode: DisplayMode,
        fullscreen: bool,
    },
}

/// Shared context handed to every widget dispatch.
#[derive(Copy, Clone)]
pub struct GuiWindowContext<'c> {
    /// Window size in logical coordinates.
    pub size: Extent2<f32>,
    /// Window scale factor (physical pixels per logical unit).
    pub scale: f32,
    /// Cursor position in logical coordinates, if the cursor is over the
    /// window.
    pub cursor_pos: Option<Vec2<f32>>,
    /// Keys currently held, by semantic identifier.
    pub pressed_keys: &'c HashSet<VirtualKeyCode>,
    /// Mouse buttons currently held.
    pub pressed_mouse_buttons: &'c HashSet<MouseButton>,
    /// Live settings; committed to `settings_path` via `save_settings`.
    pub settings: &'c RefCell<Settings>,
    pub settings_path: &'c Path,
    /// Display modes the host window supports, as enumerated at startup.
    pub display_modes: &'c [DisplayMode],
    /// Queue of window-level effects; see `WindowCommand`.
    pub commands: &'c RefCell<VecDeque<WindowCommand>>,
}

impl<'c> GuiWindowContext<'c> {
    pub fn key_down(&self, key: VirtualKeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.pressed_mouse_buttons.contains(&button)
    }

    pub fn push_command(&self, command: WindowCommand) {
        self.commands.borrow_mut().push_back(command);
    }

    /// Write the current settings to their file. Failure is logged, not
    /// propagated; the in-memory settings stay authoritative either way.
    pub fn save_settings(&self) {
        if let Err(e) = self.settings.borrow().write(self.settings_path) {
            warn!("unable to save settings: {:#}", e);
        }
    }
}

/// A rectangle-bounded, event-handling, drawable element.
pub trait Widget {
    /// Handle an input event. Returns whether this widget consumed it.
    fn handle_event(
        &mut self,
        ctx: &GuiWindowContext,
        event: &InputEvent,
    ) -> EventStatus;

    /// Advance state that changes without events. `dt` is seconds since the
    /// previous frame.
    fn update(&mut self, _ctx: &GuiWindowContext, _dt: f32) {}

    /// Draw the widget.
    fn draw(&self, ctx: &GuiWindowContext, canvas: Canvas2);
}

/// Whether `point` falls within `rect`, edges inclusive.
pub fn point_in_rect(point: Vec2<f32>, rect: Rect<f32, f32>) -> bool {
    point.x >= rect.x && point.x <= rect.x + rect.w
        && point.y >= rect.y && point.y <= rect.y + rect.h
}


/// The client's palette.
pub mod color {
    use vek::*;

    pub const BACKGROUND: Rgba<f32> = Rgba { r: 0.10, g: 0.11, b: 0.13, a: 1.0 };
    pub const BORDER: Rgba<f32> = Rgba { r: 0.62, g: 0.64, b: 0.68, a: 1.0 };
    pub const TEXT: Rgba<f32> = Rgba { r: 0.92, g: 0.92, b: 0.94, a: 1.0 };
    pub const HIGHLIGHT: Rgba<f32> = Rgba { r: 0.26, g: 0.42, b: 0.64, a: 1.0 };
    pub const SELECTION: Rgba<f32> = Rgba { r: 0.30, g: 0.85, b: 0.35, a: 1.0 };
}


#[cfg(test)]
pub(crate) mod test_fixture {
    use super::*;
    use std::path::PathBuf;

    /// Owns everything a `GuiWindowContext` borrows, so tests can dispatch
    /// events without a window.
    pub(crate) struct TestWindow {
        pub size: Extent2<f32>,
        pub cursor_pos: Option<Vec2<f32>>,
        pub pressed_keys: HashSet<VirtualKeyCode>,
        pub pressed_mouse_buttons: HashSet<MouseButton>,
        pub settings: RefCell<Settings>,
        pub settings_path: PathBuf,
        pub display_modes: Vec<DisplayMode>,
        pub commands: RefCell<VecDeque<WindowCommand>>,
    }

    impl TestWindow {
        pub fn new() -> Self {
            TestWindow {
                size: Extent2 { w: 800.0, h: 600.0 },
                cursor_pos: None,
                pressed_keys: HashSet::new(),
                pressed_mouse_buttons: HashSet::new(),
                settings: RefCell::new(Settings::default()),
                settings_path: std::env::temp_dir()
                    .join("outpost-test-settings.json"),
                display_modes: vec![
                    DisplayMode { size: Extent2 { w: 800, h: 600 } },
                    DisplayMode { size: Extent2 { w: 1024, h: 768 } },
                    DisplayMode { size: Extent2 { w: 1280, h: 720 } },
                    DisplayMode { size: Extent2 { w: 1680, h: 1050 } },
                    DisplayMode { size: Extent2 { w: 1920, h: 1080 } },
                ],
                commands: RefCell::new(VecDeque::new()),
            }
        }

        pub fn ctx(&self) -> GuiWindowContext {
            GuiWindowContext {
                size: self.size,
                scale: 1.0,
                cursor_pos: self.cursor_pos,
                pressed_keys: &self.pressed_keys,
                pressed_mouse_buttons: &self.pressed_mouse_buttons,
                settings: &self.settings,
                settings_path: &self.settings_path,
                display_modes: &self.display_modes,
                commands: &self.commands,
            }
        }
    }
}
