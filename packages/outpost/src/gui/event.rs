//! Types which may exist transiently to convey GUI events.

use vek::*;

pub use winit::event::{MouseButton, VirtualKeyCode};


/// One input event, in window-space logical coordinates (physical pixels
/// divided by the scale factor).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    MouseButtonDown {
        button: MouseButton,
        pos: Vec2<f32>,
    },
    MouseButtonUp {
        button: MouseButton,
        pos: Vec2<f32>,
    },
    MouseMoved {
        pos: Vec2<f32>,
    },
    Scrolled {
        amount: ScrolledAmount,
    },
    KeyDown {
        key: VirtualKeyCode,
    },
    KeyUp {
        key: VirtualKeyCode,
    },
    Resized {
        size: Extent2<f32>,
    },
}

/// Amount of scrolling.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ScrolledAmount {
    Pixels(Vec2<f32>),
    Lines(Vec2<f32>),
}

impl ScrolledAmount {
    /// Convert to pixels, using the given line-to-pixel conversion if is
    /// `Lines`.
    pub fn to_pixels(self, line_px: f32) -> Vec2<f32> {
        match self {
            ScrolledAmount::Pixels(v) => v,
            ScrolledAmount::Lines(l) => l * line_px,
        }
    }
}

/// Whether a widget consumed an event. Malformed or irrelevant events are
/// simply not consumed; they are never errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventStatus {
    Handled,
    NotHandled,
}

impl EventStatus {
    pub fn is_handled(self) -> bool {
        self == EventStatus::Handled
    }
}
