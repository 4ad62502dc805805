//! The window event loop.
//!
//! Translates winit events into `InputEvent`s (maintaining the pressed-key
//! and pressed-button sets the context exposes), drives the root widget
//! once per frame, submits the drawn frame to the renderer, and performs
//! queued `WindowCommand`s. The host builds the renderer backend for the
//! window and hands it in; startup sequencing stays with the host.

use crate::{
    gui::{
        DisplayMode,
        GuiWindowContext,
        Widget,
        WindowCommand,
        event::{InputEvent, MouseButton, ScrolledAmount, VirtualKeyCode},
    },
    settings::Settings,
};
use graphics::{Renderer, frame_content::FrameContent};
use std::{
    cell::RefCell,
    collections::{HashSet, VecDeque},
    path::PathBuf,
    time::Instant,
};
use anyhow::Result;
use vek::*;
use winit::{
    dpi::PhysicalSize,
    event::{
        ElementState,
        Event,
        MouseScrollDelta,
        WindowEvent,
    },
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowBuilder},
};


struct State {
    renderer: RefCell<Box<dyn Renderer>>,
    settings: RefCell<Settings>,
    settings_path: PathBuf,
    display_modes: Vec<DisplayMode>,
    commands: RefCell<VecDeque<WindowCommand>>,
    pressed_keys: HashSet<VirtualKeyCode>,
    pressed_mouse_buttons: HashSet<MouseButton>,
    cursor_pos: Option<Vec2<f32>>,
    /// Window size in logical coordinates.
    size: Extent2<f32>,
    scale: f32,
    focused: bool,
}

impl State {
    fn with_ctx<F>(&self, f: F)
    where
        F: FnOnce(&GuiWindowContext),
    {
        f(&GuiWindowContext {
            size: self.size,
            scale: self.scale,
            cursor_pos: self.cursor_pos,
            pressed_keys: &self.pressed_keys,
            pressed_mouse_buttons: &self.pressed_mouse_buttons,
            settings: &self.settings,
            settings_path: &self.settings_path,
            display_modes: &self.display_modes,
            commands: &self.commands,
        })
    }

    fn dispatch(&self, root: &mut Box<dyn Widget>, event: InputEvent) {
        self.with_ctx(|ctx| {
            let _ = root.handle_event(ctx, &event);
        });
    }
}

pub struct GuiEventLoop {
    event_loop: EventLoop<()>,
    window: Window,
}

impl GuiEventLoop {
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new();
        let window = WindowBuilder::new()
            .with_title("outpost")
            .build(&event_loop)?;
        Ok(GuiEventLoop {
            event_loop,
            window,
        })
    }

    /// The window, for the host to construct its renderer backend against.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Supported display modes, deduplicated by resolution.
    pub fn display_modes(&self) -> Vec<DisplayMode> {
        let mut modes: Vec<DisplayMode> = self.window.current_monitor()
            .map(|monitor| {
                monitor.video_modes()
                    .map(|mode| DisplayMode {
                        size: Extent2 {
                            w: mode.size().width,
                            h: mode.size().height,
                        },
                    })
                    .collect()
            })
            .unwrap_or_default();
        modes.sort_by_key(|mode| (mode.size.w, mode.size.h));
        modes.dedup();
        modes
    }

    pub fn run(
        self,
        mut root: Box<dyn Widget>,
        renderer: Box<dyn Renderer>,
        settings: Settings,
        settings_path: PathBuf,
    ) -> ! {
        let display_modes = self.display_modes();
        let GuiEventLoop { event_loop, window } = self;

        let scale = window.scale_factor() as f32;
        let winit_size = window.inner_size();
        let mut state = State {
            renderer: RefCell::new(renderer),
            settings: RefCell::new(settings),
            settings_path,
            display_modes,
            commands: RefCell::new(VecDeque::new()),
            pressed_keys: HashSet::new(),
            pressed_mouse_buttons: HashSet::new(),
            cursor_pos: None,
            size: Extent2 {
                w: winit_size.width as f32 / scale,
                h: winit_size.height as f32 / scale,
            },
            scale,
            focused: true,
        };
        let mut last_frame = Instant::now();

        info!("entering event loop");
        event_loop.run(move |event, _target, control_flow| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(winit_size) => {
                    state.size = Extent2 {
                        w: winit_size.width as f32 / state.scale,
                        h: winit_size.height as f32 / state.scale,
                    };
                    state.renderer.borrow_mut().resize(Extent2 {
                        w: winit_size.width,
                        h: winit_size.height,
                    });
                    state.dispatch(&mut root, InputEvent::Resized {
                        size: state.size,
                    });
                }
                WindowEvent::ScaleFactorChanged {
                    scale_factor,
                    new_inner_size,
                } => {
                    state.scale = scale_factor as f32;
                    state.size = Extent2 {
                        w: new_inner_size.width as f32 / state.scale,
                        h: new_inner_size.height as f32 / state.scale,
                    };
                    state.renderer.borrow_mut().resize(Extent2 {
                        w: new_inner_size.width,
                        h: new_inner_size.height,
                    });
                    state.dispatch(&mut root, InputEvent::Resized {
                        size: state.size,
                    });
                }
                WindowEvent::CloseRequested => {
                    state.commands.borrow_mut()
                        .push_back(WindowCommand::Exit);
                }
                WindowEvent::Focused(focused) => {
                    state.focused = focused;
                    if !focused {
                        state.pressed_keys.clear();
                        state.pressed_mouse_buttons.clear();
                    }
                }
                WindowEvent::KeyboardInput {
                    is_synthetic: false,
                    input,
                    ..
                } => {
                    if let Some(key) = input.virtual_keycode {
                        match input.state {
                            ElementState::Pressed => {
                                let changed = state.pressed_keys.insert(key);
                                if changed && state.focused {
                                    state.dispatch(
                                        &mut root,
                                        InputEvent::KeyDown { key },
                                    );
                                }
                            }
                            ElementState::Released => {
                                let changed = state.pressed_keys.remove(&key);
                                if changed && state.focused {
                                    state.dispatch(
                                        &mut root,
                                        InputEvent::KeyUp { key },
                                    );
                                }
                            }
                        }
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let pos = Vec2 {
                        x: position.x as f32 / state.scale,
                        y: position.y as f32 / state.scale,
                    };
                    state.cursor_pos = Some(pos);
                    state.dispatch(&mut root, InputEvent::MouseMoved { pos });
                }
                WindowEvent::CursorLeft { .. } => {
                    state.cursor_pos = None;
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let amount = match delta {
                        MouseScrollDelta::LineDelta(x, y) => {
                            ScrolledAmount::Lines(Vec2 { x, y })
                        }
                        MouseScrollDelta::PixelDelta(pos) => {
                            ScrolledAmount::Pixels(Vec2 {
                                x: pos.x as f32,
                                y: pos.y as f32,
                            })
                        }
                    };
                    state.dispatch(&mut root, InputEvent::Scrolled { amount });
                }
                WindowEvent::MouseInput {
                    state: element_state,
                    button,
                    ..
                } => {
                    let pos = match state.cursor_pos {
                        Some(pos) => pos,
                        None => return,
                    };
                    match element_state {
                        ElementState::Pressed => {
                            if state.pressed_mouse_buttons.insert(button) {
                                state.dispatch(
                                    &mut root,
                                    InputEvent::MouseButtonDown { button, pos },
                                );
                            }
                        }
                        ElementState::Released => {
                            if state.pressed_mouse_buttons.remove(&button) {
                                state.dispatch(
                                    &mut root,
                                    InputEvent::MouseButtonUp { button, pos },
                                );
                            }
                        }
                    }
                }
                _ => (),
            }
            Event::MainEventsCleared => {
                let now = Instant::now();
                let dt = (now - last_frame).as_secs_f32();
                last_frame = now;

                state.with_ctx(|ctx| {
                    root.update(ctx, dt);
                    let mut frame_content = FrameContent::new();
                    root.draw(ctx, frame_content.canvas());
                    if let Err(e) = state.renderer
                        .borrow_mut()
                        .draw_frame(&frame_content)
                    {
                        warn!("failed to draw frame: {:#}", e);
                    }
                });

                loop {
                    let command = state.commands.borrow_mut().pop_front();
                    match command {
                        Some(WindowCommand::Exit) => {
                            info!("exit requested");
                            *control_flow = ControlFlow::Exit;
                        }
                        Some(WindowCommand::SetDisplayMode {
                            mode,
                            fullscreen,
                        }) => {
                            apply_display_mode(&window, mode, fullscreen);
                        }
                        None => break,
                    }
                }
            }
            Event::RedrawEventsCleared => {
                if *control_flow != ControlFlow::Exit {
                    *control_flow = ControlFlow::Poll;
                }
            }
            _ => (),
        });
    }
}

/// Apply a display mode to the live window. Not retried on failure; the
/// toolkit reports what it can.
fn apply_display_mode(window: &Window, mode: DisplayMode, fullscreen: bool) {
    info!("applying display mode {} (fullscreen {})", mode, fullscreen);
    if fullscreen {
        let video_mode = window.current_monitor().and_then(|monitor| {
            monitor.video_modes().find(|candidate| {
                candidate.size().width == mode.size.w
                    && candidate.size().height == mode.size.h
            })
        });
        match video_mode {
            Some(video_mode) => {
                window.set_fullscreen(Some(Fullscreen::Exclusive(video_mode)));
            }
            None => {
                warn!("no exclusive video mode matches {}", mode);
                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
        }
    } else {
        window.set_fullscreen(None);
        window.set_inner_size(PhysicalSize::new(mode.size.w, mode.size.h));
    }
}
